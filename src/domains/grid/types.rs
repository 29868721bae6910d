use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;

/// A cell address. Validity depends on the grid it is used with, so
/// coordinates are signed and may point outside any grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, mv: Move) -> Position {
        let (dr, dc) = mv.delta();
        Position::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Obstacle,
}

/// The eight legal moves. Orthogonal moves cost 1, diagonal moves cost sqrt(2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Move {
    /// Expansion order: orthogonal before diagonal. Search tie-breaking relies on it.
    pub const ALL: [Move; 8] = [
        Move::Up,
        Move::Down,
        Move::Left,
        Move::Right,
        Move::UpLeft,
        Move::UpRight,
        Move::DownLeft,
        Move::DownRight,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
            Move::UpLeft => (-1, -1),
            Move::UpRight => (-1, 1),
            Move::DownLeft => (1, -1),
            Move::DownRight => (1, 1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Move::UpLeft | Move::UpRight | Move::DownLeft | Move::DownRight
        )
    }

    pub fn cost(self) -> f64 {
        if self.is_diagonal() {
            SQRT_2
        } else {
            1.0
        }
    }

    /// The single move leading from `from` to `to`, if the two cells are adjacent.
    pub fn between(from: Position, to: Position) -> Option<Move> {
        let delta = (to.row - from.row, to.col - from.col);
        Move::ALL.into_iter().find(|mv| mv.delta() == delta)
    }
}
