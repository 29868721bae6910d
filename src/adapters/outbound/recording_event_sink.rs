use crate::domains::agent::{EventSink, SimulationEvent};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Keeps every published event in memory. Clones share the same buffer, so a
/// caller can hand one clone to the service and read from another.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<(Uuid, SimulationEvent)>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SimulationEvent> {
        self.lock().iter().map(|(_, e)| e.clone()).collect()
    }

    pub fn events_for(&self, run_id: Uuid) -> Vec<SimulationEvent> {
        self.lock()
            .iter()
            .filter(|(id, _)| *id == run_id)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Uuid, SimulationEvent)>> {
        // a poisoned buffer still holds valid events
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&mut self, run_id: Uuid, event: &SimulationEvent) {
        self.lock().push((run_id, event.clone()));
    }
}
