use crate::domains::logger::StatusLogger;
use std::sync::Arc;

struct TracingBridge;

impl StatusLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "status", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "status", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "status", "{}", msg);
    }
}

/// Status logger that forwards to whatever `tracing` subscriber is installed.
pub fn init_tracing_logger() -> Arc<dyn StatusLogger> {
    Arc::new(TracingBridge {})
}
