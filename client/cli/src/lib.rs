pub mod configs;
pub mod runner;

pub use configs::*;
pub use runner::*;
