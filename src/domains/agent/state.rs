use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgentState {
    #[default]
    Idle,
    Planning,
    Traversing,
    Replanning,
    Arrived,
    Stuck,
    Aborted,
}

impl AgentState {
    /// A run is in progress and owns the grid.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            AgentState::Planning | AgentState::Traversing | AgentState::Replanning
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AgentState::Arrived | AgentState::Stuck | AgentState::Aborted
        )
    }
}
