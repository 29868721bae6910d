use crate::domains::grid::Position;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal, polled before every node expansion and
/// every traversal tick.
pub trait CancelCheck {
    fn should_stop(&self) -> bool;
}

impl<F: Fn() -> bool> CancelCheck for F {
    fn should_stop(&self) -> bool {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Shared stop flag. Clones observe the same flag, so the control side keeps
/// one handle and the run loop polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    stop: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.stop.store(false, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

impl CancelCheck for CancelFlag {
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchEvent {
    Visited(Position),
    FrontierAdded(Position),
}

/// Receives search progress. Observers see events only; they cannot influence
/// the expansion order.
pub trait SearchObserver {
    fn on_search_event(&mut self, event: SearchEvent);
}

impl<F: FnMut(SearchEvent)> SearchObserver for F {
    fn on_search_event(&mut self, event: SearchEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_search_event(&mut self, _event: SearchEvent) {}
}

/// Records every event in emission order.
#[derive(Debug, Clone, Default)]
pub struct SearchTrace {
    pub events: Vec<SearchEvent>,
}

impl SearchTrace {
    pub fn visited(&self) -> Vec<Position> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Visited(p) => Some(*p),
                SearchEvent::FrontierAdded(_) => None,
            })
            .collect()
    }

    pub fn frontier(&self) -> Vec<Position> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::FrontierAdded(p) => Some(*p),
                SearchEvent::Visited(_) => None,
            })
            .collect()
    }
}

impl SearchObserver for SearchTrace {
    fn on_search_event(&mut self, event: SearchEvent) {
        self.events.push(event);
    }
}
