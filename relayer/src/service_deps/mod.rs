mod relay_deps;
mod store_deps;

pub use relay_deps::RelayDeps;
pub use store_deps::StoreDeps;

use std::{sync::Arc, time::Duration};

use kr_primitives::cli::Configuration;
