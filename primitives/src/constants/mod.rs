pub mod cli;
pub mod errors;
pub mod store;
pub mod subscription;
