pub mod generator;
pub mod grid;
pub mod types;
pub mod workspace;

pub use generator::*;
pub use grid::*;
pub use types::*;
pub use workspace::*;
