use super::events::SimulationEvent;
use super::state::AgentState;
use crate::domains::grid::Position;
use serde::{Deserialize, Serialize};

/// Run statistics folded from the event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub algorithm: String,
    pub heuristic: String,
    /// Nodes expanded by the most recent search only.
    pub nodes_visited: usize,
    pub total_nodes_visited: usize,
    pub searches: u32,
    pub path_cost: f64,
    pub path_length: usize,
    pub search_time_ms: f64,
    pub replans: u32,
    pub steps_taken: usize,
    pub obstacles_spawned: usize,
    pub last_position: Option<Position>,
    pub outcome: Option<AgentState>,
}

impl SimulationMetrics {
    pub fn apply_event(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::RunStarted {
                start,
                algorithm,
                heuristic,
                ..
            } => {
                *self = SimulationMetrics {
                    algorithm: algorithm.name().to_string(),
                    heuristic: heuristic.name().to_string(),
                    last_position: Some(*start),
                    ..SimulationMetrics::default()
                };
            }
            SimulationEvent::SearchFinished {
                nodes_visited,
                elapsed_ms,
                ..
            } => {
                self.nodes_visited = *nodes_visited;
                self.total_nodes_visited += nodes_visited;
                self.search_time_ms = *elapsed_ms;
                self.searches += 1;
            }
            SimulationEvent::PathFound { path, cost } => {
                self.path_cost = *cost;
                self.path_length = path.len();
            }
            SimulationEvent::AgentMoved { position } => {
                self.steps_taken += 1;
                self.last_position = Some(*position);
            }
            SimulationEvent::ObstacleSpawned { .. } => {
                self.obstacles_spawned += 1;
            }
            SimulationEvent::Replanned {
                path,
                replan_count,
                cost,
            } => {
                self.replans = *replan_count;
                self.path_cost = *cost;
                self.path_length = path.len();
            }
            SimulationEvent::Arrived { .. } => self.outcome = Some(AgentState::Arrived),
            SimulationEvent::Stuck { .. } => self.outcome = Some(AgentState::Stuck),
            SimulationEvent::Aborted { .. } => self.outcome = Some(AgentState::Aborted),
            SimulationEvent::Visited { .. } | SimulationEvent::FrontierAdded { .. } => {}
        }
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a SimulationEvent>) -> Self {
        let mut metrics = SimulationMetrics::default();
        for event in events {
            metrics.apply_event(event);
        }
        metrics
    }
}
