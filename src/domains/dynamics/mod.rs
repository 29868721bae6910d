pub mod injector;

pub use injector::*;
