pub mod sentry;
pub use crate::sentry::*;
