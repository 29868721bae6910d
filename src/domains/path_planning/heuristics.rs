use crate::domains::grid::Position;
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Chebyshev,
        Heuristic::Octile,
    ];

    pub fn estimate(self, pos: Position, goal: Position) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(pos, goal),
            Heuristic::Euclidean => euclidean(pos, goal),
            Heuristic::Chebyshev => chebyshev(pos, goal),
            Heuristic::Octile => octile(pos, goal),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "Manhattan",
            Heuristic::Euclidean => "Euclidean",
            Heuristic::Chebyshev => "Chebyshev",
            Heuristic::Octile => "Octile",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn deltas(pos: Position, goal: Position) -> (f64, f64) {
    (
        f64::from((pos.row - goal.row).abs()),
        f64::from((pos.col - goal.col).abs()),
    )
}

pub fn manhattan(pos: Position, goal: Position) -> f64 {
    let (dr, dc) = deltas(pos, goal);
    dr + dc
}

pub fn euclidean(pos: Position, goal: Position) -> f64 {
    let (dr, dc) = deltas(pos, goal);
    dr.hypot(dc)
}

pub fn chebyshev(pos: Position, goal: Position) -> f64 {
    let (dr, dc) = deltas(pos, goal);
    dr.max(dc)
}

/// Exact distance on an empty 8-connected grid with unit/sqrt(2) move costs.
pub fn octile(pos: Position, goal: Position) -> f64 {
    let (dr, dc) = deltas(pos, goal);
    dr.max(dc) + (SQRT_2 - 1.0) * dr.min(dc)
}
