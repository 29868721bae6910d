use crate::common::EventEnvelope;
use crate::domains::agent::{EventSink, SimulationEvent};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Non-blocking forwarder of enveloped events to an async consumer such as a
/// renderer. Events are dropped when the channel is full or closed; the run
/// loop never waits on the consumer.
pub struct ChannelEventSink {
    sender: mpsc::Sender<EventEnvelope>,
    sequence: u64,
    dropped: u64,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::Sender<EventEnvelope>) -> Self {
        Self {
            sender,
            sequence: 0,
            dropped: 0,
        }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&mut self, run_id: Uuid, event: &SimulationEvent) {
        self.sequence += 1;
        let envelope = match EventEnvelope::new(event, run_id, self.sequence) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize simulation event");
                self.dropped += 1;
                return;
            }
        };
        if self.sender.try_send(envelope).is_err() {
            self.dropped += 1;
        }
    }
}

/// Create a sink together with the receiving end of its channel.
pub fn init_channel_event_sink(capacity: usize) -> (ChannelEventSink, mpsc::Receiver<EventEnvelope>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ChannelEventSink::new(tx), rx)
}
