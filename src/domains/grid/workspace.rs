use super::grid::Grid;
use super::types::Position;
use crate::common::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// The editable world: the cell matrix plus the start and target markers,
/// which live outside the matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub grid: Grid,
    pub start: Option<Position>,
    pub target: Option<Position>,
}

impl Workspace {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            start: None,
            target: None,
        }
    }

    /// A fresh empty grid with start near the top-left corner and target near
    /// the bottom-right corner.
    pub fn with_defaults(rows: usize, cols: usize) -> DomainResult<Self> {
        let mut workspace = Workspace::new(Grid::new(rows, cols)?);
        workspace.place_defaults();
        Ok(workspace)
    }

    pub fn place_defaults(&mut self) {
        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        let start = Position::new(1.min(rows - 1), 1.min(cols - 1));
        let target = Position::new((rows - 2).max(0), (cols - 2).max(0));

        self.start = Some(start);
        self.target = (target != start).then_some(target);
        // markers never sit on obstacles
        let _ = self.grid.clear_obstacle(start);
        if let Some(target) = self.target {
            let _ = self.grid.clear_obstacle(target);
        }
    }

    fn is_marker(&self, pos: Position) -> bool {
        self.start == Some(pos) || self.target == Some(pos)
    }

    /// Move the start marker. The cell is cleared of any obstacle.
    pub fn set_start(&mut self, pos: Position) -> DomainResult<()> {
        self.grid.clear_obstacle(pos)?;
        if self.target == Some(pos) {
            self.target = None;
        }
        self.start = Some(pos);
        Ok(())
    }

    /// Move the target marker. The cell is cleared of any obstacle.
    pub fn set_target(&mut self, pos: Position) -> DomainResult<()> {
        self.grid.clear_obstacle(pos)?;
        if self.start == Some(pos) {
            self.start = None;
        }
        self.target = Some(pos);
        Ok(())
    }

    pub fn set_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        if self.is_marker(pos) {
            return Err(DomainError::invalid_configuration(format!(
                "Cannot place an obstacle on the start or target cell {}",
                pos
            )));
        }
        self.grid.set_obstacle(pos)
    }

    pub fn clear_obstacle(&mut self, pos: Position) -> DomainResult<()> {
        if self.is_marker(pos) {
            return Err(DomainError::invalid_configuration(format!(
                "Cannot erase the start or target cell {}",
                pos
            )));
        }
        self.grid.clear_obstacle(pos)
    }

    pub fn clear_walls(&mut self) {
        self.grid.clear_all_obstacles();
    }

    /// Replace the grid with an empty one of the new size and re-place the markers.
    pub fn resize(&mut self, rows: usize, cols: usize) -> DomainResult<()> {
        self.grid = Grid::new(rows, cols)?;
        self.place_defaults();
        Ok(())
    }

    /// Both markers, if a run could start from this workspace.
    pub fn endpoints(&self) -> DomainResult<(Position, Position)> {
        let (start, target) = match (self.start, self.target) {
            (Some(start), Some(target)) => (start, target),
            _ => {
                return Err(DomainError::invalid_configuration(
                    "Please place both start and target on the grid",
                ))
            }
        };
        if start == target {
            return Err(DomainError::invalid_configuration(
                "Start and target must be different cells",
            ));
        }
        for (name, pos) in [("Start", start), ("Target", target)] {
            if !self.grid.in_bounds(pos) {
                return Err(DomainError::invalid_configuration(format!(
                    "{} {} is outside the grid",
                    name, pos
                )));
            }
            if self.grid.is_obstacle(pos) {
                return Err(DomainError::invalid_configuration(format!(
                    "{} {} is on an obstacle",
                    name, pos
                )));
            }
        }
        Ok((start, target))
    }
}
