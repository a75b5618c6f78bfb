mod config_stream;
mod file;
mod memory;
mod sinks;

pub use config_stream::*;
pub use file::*;
pub use memory::*;
pub use sinks::*;
