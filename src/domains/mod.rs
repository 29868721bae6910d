pub mod agent;
pub mod dynamics;
pub mod grid;
pub mod logger;
pub mod path_planning;

pub use agent::*;
pub use dynamics::*;
pub use grid::*;
pub use logger::*;
pub use path_planning::*;
