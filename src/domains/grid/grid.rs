use super::types::{CellState, Move, Position};
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Fixed-size matrix of cell states, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> DomainResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(DomainError::invalid_configuration(format!(
                "Grid dimensions must be at least 1x1, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
        })
    }

    /// Build a grid from text rows where `#` marks an obstacle and anything else is empty.
    pub fn from_ascii(lines: &[&str]) -> DomainResult<Self> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut grid = Grid::new(rows, cols)?;
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(DomainError::invalid_configuration(format!(
                    "Row {} has {} cells, expected {}",
                    r,
                    line.chars().count(),
                    cols
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.cells[r * cols + c] = CellState::Obstacle;
                }
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows && (pos.col as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    fn checked_index(&self, pos: Position) -> DomainResult<usize> {
        self.index(pos).ok_or(DomainError::OutOfBounds {
            position: pos,
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn cell(&self, pos: Position) -> Option<CellState> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn set_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        let i = self.checked_index(pos)?;
        self.cells[i] = CellState::Obstacle;
        Ok(())
    }

    pub fn clear_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        let i = self.checked_index(pos)?;
        self.cells[i] = CellState::Empty;
        Ok(())
    }

    pub fn clear_all_obstacles(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.cell(pos) == Some(CellState::Obstacle)
    }

    /// False outside the grid and on obstacles.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell(pos) == Some(CellState::Empty)
    }

    /// Passable cells one move away from `pos`, with the move that reaches them,
    /// in `Move::ALL` order. Diagonals are allowed even when both flanking
    /// orthogonal cells are blocked.
    pub fn moves_from(&self, pos: Position) -> impl Iterator<Item = (Position, Move)> + '_ {
        Move::ALL.into_iter().filter_map(move |mv| {
            let next = pos.offset(mv);
            self.is_passable(next).then_some((next, mv))
        })
    }

    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.moves_from(pos).map(|(next, _)| next)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Position::new((i / cols) as i32, (i % cols) as i32))
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |p| self.is_passable(*p))
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == CellState::Obstacle)
            .count()
    }
}
