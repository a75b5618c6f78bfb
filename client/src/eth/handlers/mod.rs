mod collection_manager;
mod event_dispatcher;
mod lifecycle_manager;

pub use collection_manager::*;
pub use event_dispatcher::*;
pub use lifecycle_manager::*;

#[cfg(test)]
pub(crate) mod mock;

use std::{sync::Arc, time::Duration};

use kr_primitives::{
	constants::subscription::{DEFAULT_SUBSCRIPTION_RETRIES, DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS},
	traits::{DeliveryClient, ErrorSink, PollingRegistry},
};

/// The capabilities shared by every binding.
pub struct RelayContext {
	/// The chain ID attached to every decoded event.
	pub chain_id: u64,
	/// The events directory. Endpoints and polled contracts are resolved in this namespace.
	pub namespace: String,
	pub api_key: String,
	pub delivery: Arc<dyn DeliveryClient>,
	pub error_sink: Arc<dyn ErrorSink>,
	pub polling_registry: Arc<dyn PollingRegistry>,
}

/// How failed subscription attempts are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Zero waits for the next configuration update.
	pub retries: u8,
	/// The interval before the first retry.
	pub interval: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			retries: DEFAULT_SUBSCRIPTION_RETRIES,
			interval: Duration::from_millis(DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS),
		}
	}
}
