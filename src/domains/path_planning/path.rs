use super::search::GoalNode;
use crate::domains::grid::{Grid, Move, Position};
use serde::{Deserialize, Serialize};

/// Ordered cells from a start to a goal, each step one of the eight legal moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Path {
    cells: Vec<Position>,
}

impl Path {
    pub fn new(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Position> {
        self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn first(&self) -> Option<Position> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.cells.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.cells.get(index).copied()
    }

    /// Cells strictly after `index`.
    pub fn remaining_after(&self, index: usize) -> &[Position] {
        self.cells.get(index + 1..).unwrap_or(&[])
    }

    /// Sum of the real move costs between consecutive cells. Non-adjacent
    /// pairs never occur in extracted paths and contribute nothing.
    pub fn cost(&self) -> f64 {
        self.cells
            .windows(2)
            .filter_map(|pair| Move::between(pair[0], pair[1]))
            .map(Move::cost)
            .sum()
    }

    pub fn is_contiguous(&self) -> bool {
        self.cells
            .windows(2)
            .all(|pair| Move::between(pair[0], pair[1]).is_some())
    }

    pub fn diagonal_steps(&self) -> usize {
        self.cells
            .windows(2)
            .filter_map(|pair| Move::between(pair[0], pair[1]))
            .filter(|mv| mv.is_diagonal())
            .count()
    }

    /// True when every cell is passable on `grid`.
    pub fn is_clear(&self, grid: &Grid) -> bool {
        self.cells.iter().all(|p| grid.is_passable(*p))
    }
}

/// Follow parent links from the goal back to the start and reverse them.
pub fn extract(goal: &GoalNode) -> Path {
    let mut cells = Vec::new();
    let mut cursor = Some(goal.id());
    while let Some(id) = cursor {
        let Some(node) = goal.node(id) else {
            break;
        };
        cells.push(node.position);
        cursor = node.parent;
    }
    cells.reverse();
    Path::new(cells)
}
