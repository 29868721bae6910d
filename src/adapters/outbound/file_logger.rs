use crate::domains::logger::{FileLogger, StatusLogger};
use chrono::Utc;
use std::sync::Arc;

struct LogFacadeBridge;

impl StatusLogger for LogFacadeBridge {
    fn info(&self, msg: &str) {
        log::info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Initialize `fast_log` writing to `path` and return a status logger bound to it.
pub fn init_file_logger(path: &str) -> Result<Arc<dyn StatusLogger>, String> {
    FileLogger::init(path).map_err(|e| format!("Failed to initialize fast_log: {}", e))?;
    Ok(Arc::new(LogFacadeBridge {}))
}
