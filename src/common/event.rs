use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;

    /// True for events that end a run.
    fn is_terminal(&self) -> bool;
}

/// Event wrapped for consumers outside the simulation loop (channels, log files).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub run_id: Uuid,
    pub sequence: u64,
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub occurred_at: DateTime<Utc>,
}

impl EventEnvelope {
    pub fn new<E: DomainEvent + Serialize>(
        event: &E,
        run_id: Uuid,
        sequence: u64,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            event_id: Uuid::new_v4(),
            run_id,
            sequence,
            event_type: event.event_type().to_string(),
            event_data: serde_json::to_value(event)?,
            occurred_at: Utc::now(),
        })
    }
}
