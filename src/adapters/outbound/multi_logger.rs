use crate::domains::logger::{DynStatusLogger, StatusLogger};
use std::sync::Arc;

/// Fans each status message out to every attached logger, in attach order.
#[derive(Default)]
pub struct MultiLogger {
    targets: Vec<DynStatusLogger>,
}

impl MultiLogger {
    pub fn new(targets: Vec<DynStatusLogger>) -> Self {
        Self { targets }
    }

    pub fn with(mut self, target: DynStatusLogger) -> Self {
        self.targets.push(target);
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn into_shared(self) -> DynStatusLogger {
        Arc::new(self)
    }
}

impl StatusLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.targets.iter().for_each(|t| t.error(msg));
    }
}

/// Status messages to the file at `path` and to tracing. A file that cannot
/// be opened leaves tracing as the only target.
pub fn init_combined_logger(path: &str) -> DynStatusLogger {
    let combined = MultiLogger::default().with(super::init_tracing_logger());
    match super::init_file_logger(path) {
        Ok(file_logger) => combined.with(file_logger).into_shared(),
        Err(e) => {
            tracing::warn!(path, error = %e, "file status logger unavailable, using tracing only");
            combined.into_shared()
        }
    }
}
