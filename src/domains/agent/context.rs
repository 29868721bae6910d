use crate::common::{DomainError, DomainResult};
use crate::domains::grid::{Grid, Position};
use crate::domains::path_planning::{Heuristic, Path, PlanningAlgorithm, SearchEngine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub algorithm: PlanningAlgorithm,
    pub heuristic: Heuristic,
    pub dynamic_obstacles_enabled: bool,
    /// Per-tick spawn chance as a fraction in `[0, 1]`.
    pub spawn_probability: f64,
    /// Pacing hint for whoever renders the run. The simulation never sleeps.
    pub step_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            algorithm: PlanningAlgorithm::AStar,
            heuristic: Heuristic::Manhattan,
            dynamic_obstacles_enabled: false,
            spawn_probability: 0.12,
            step_delay: Duration::from_millis(25),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(DomainError::invalid_configuration(format!(
                "Spawn probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        Ok(())
    }

    pub fn engine(&self) -> SearchEngine {
        SearchEngine::new(self.algorithm, self.heuristic)
    }
}

/// Everything a run mutates, owned by the simulator for the run's lifetime.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub grid: Grid,
    pub start: Position,
    pub target: Position,
    pub agent_position: Position,
    pub current_path: Path,
    /// Index of `agent_position` within `current_path`.
    pub path_index: usize,
    pub replan_count: u32,
    pub path_cost: f64,
}

impl SimulationContext {
    pub fn new(grid: Grid, start: Position, target: Position) -> Self {
        Self {
            grid,
            start,
            target,
            agent_position: start,
            current_path: Path::default(),
            path_index: 0,
            replan_count: 0,
            path_cost: 0.0,
        }
    }

    /// Path cells the agent has not reached yet.
    pub fn remaining_path(&self) -> &[Position] {
        self.current_path.remaining_after(self.path_index)
    }

    pub fn adopt_path(&mut self, path: Path) {
        self.path_cost = path.cost();
        self.current_path = path;
        self.path_index = 0;
    }
}
