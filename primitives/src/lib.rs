pub mod binding;
pub mod cli;
pub mod constants;
pub mod contracts;
pub mod errors;
pub mod events;
pub mod macros;
pub mod traits;
pub mod utils;
