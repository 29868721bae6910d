pub mod context;
pub mod events;
pub mod projections;
pub mod simulator;
pub mod sink;
pub mod state;

pub use context::*;
pub use events::*;
pub use projections::*;
pub use simulator::*;
pub use sink::*;
pub use state::*;
