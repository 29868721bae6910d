use crate::common::DomainEvent;
use crate::domains::grid::Position;
use crate::domains::path_planning::{Heuristic, PlanningAlgorithm, SearchEvent};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    RunStarted {
        run_id: Uuid,
        start: Position,
        target: Position,
        algorithm: PlanningAlgorithm,
        heuristic: Heuristic,
    },
    Visited {
        position: Position,
    },
    FrontierAdded {
        position: Position,
    },
    SearchFinished {
        from: Position,
        nodes_visited: usize,
        elapsed_ms: f64,
        found: bool,
    },
    PathFound {
        path: Vec<Position>,
        cost: f64,
    },
    AgentMoved {
        position: Position,
    },
    ObstacleSpawned {
        position: Position,
        blocks_path: bool,
    },
    Replanned {
        path: Vec<Position>,
        replan_count: u32,
        cost: f64,
    },
    Arrived {
        position: Position,
    },
    Stuck {
        position: Position,
        replan_count: u32,
    },
    Aborted {
        position: Option<Position>,
    },
}

impl From<SearchEvent> for SimulationEvent {
    fn from(event: SearchEvent) -> Self {
        match event {
            SearchEvent::Visited(position) => SimulationEvent::Visited { position },
            SearchEvent::FrontierAdded(position) => SimulationEvent::FrontierAdded { position },
        }
    }
}

impl DomainEvent for SimulationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SimulationEvent::RunStarted { .. } => "RunStarted",
            SimulationEvent::Visited { .. } => "Visited",
            SimulationEvent::FrontierAdded { .. } => "FrontierAdded",
            SimulationEvent::SearchFinished { .. } => "SearchFinished",
            SimulationEvent::PathFound { .. } => "PathFound",
            SimulationEvent::AgentMoved { .. } => "AgentMoved",
            SimulationEvent::ObstacleSpawned { .. } => "ObstacleSpawned",
            SimulationEvent::Replanned { .. } => "Replanned",
            SimulationEvent::Arrived { .. } => "Arrived",
            SimulationEvent::Stuck { .. } => "Stuck",
            SimulationEvent::Aborted { .. } => "Aborted",
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self,
            SimulationEvent::Arrived { .. }
                | SimulationEvent::Stuck { .. }
                | SimulationEvent::Aborted { .. }
        )
    }
}
