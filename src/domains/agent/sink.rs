use super::events::SimulationEvent;
use uuid::Uuid;

/// Port through which a run's events reach the rendering/control side.
pub trait EventSink: Send {
    fn publish(&mut self, run_id: Uuid, event: &SimulationEvent);
}
