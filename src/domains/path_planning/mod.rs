pub mod heuristics;
pub mod path;
pub mod ports;
pub mod search;

pub use heuristics::*;
pub use path::*;
pub use ports::*;
pub use search::*;
