use std::sync::Arc;

/// Port for user-facing run status ("Searching…", "Target Reached!").
/// Diagnostics go through `tracing`; this port carries only the messages a
/// control surface would show in its status bar.
pub trait StatusLogger: Send + Sync + 'static {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

pub type DynStatusLogger = Arc<dyn StatusLogger>;

/// Drops every status message. Used for headless runs that only care about
/// the event stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl SilentLogger {
    pub fn shared() -> DynStatusLogger {
        Arc::new(SilentLogger)
    }
}

impl StatusLogger for SilentLogger {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Sets up `fast_log` with a file appender behind the `log` facade.
pub struct FileLogger;

impl FileLogger {
    pub fn init(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        fast_log::init(
            fast_log::config::Config::new()
                .file(path)
                .level(log::LevelFilter::Info),
        )?;
        Ok(())
    }
}
