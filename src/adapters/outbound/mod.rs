pub mod channel_event_sink;
pub mod file_logger;
pub mod multi_logger;
pub mod recording_event_sink;
pub mod tracing_logger;

pub use channel_event_sink::*;
pub use file_logger::*;
pub use multi_logger::*;
pub use recording_event_sink::*;
pub use tracing_logger::*;
