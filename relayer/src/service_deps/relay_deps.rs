use kr_client::{
	delivery::HttpDeliveryClient,
	eth::{
		handlers::{RelayContext, RetryPolicy},
		EthLedgerClient,
	},
};
use kr_primitives::{constants::errors::DELIVERY_CLIENT_INITIALIZATION_ERROR, traits::LedgerClient};

use super::*;

pub struct RelayDeps {
	/// The capabilities shared by every binding.
	pub context: Arc<RelayContext>,
	/// The client opening every ledger subscription.
	pub ledger: Arc<dyn LedgerClient>,
	/// The retry policy of failed subscription attempts.
	pub retry: RetryPolicy,
}

impl RelayDeps {
	pub fn new(config: &Configuration, store_deps: &StoreDeps) -> Self {
		let system = &config.relayer_config.system;
		let delivery = &config.relayer_config.delivery;
		let subscription = &config.relayer_config.subscription;

		let delivery_client = Arc::new(
			HttpDeliveryClient::new(
				store_deps.store.clone(),
				&delivery.api_key_header,
				Duration::from_millis(delivery.timeout_ms),
			)
			.expect(DELIVERY_CLIENT_INITIALIZATION_ERROR),
		);

		let context = Arc::new(RelayContext {
			chain_id: system.chain_id,
			namespace: system.events_directory.clone(),
			api_key: config.api_key.clone(),
			delivery: delivery_client,
			error_sink: store_deps.sinks.clone(),
			polling_registry: store_deps.sinks.clone(),
		});

		Self {
			context,
			ledger: Arc::new(EthLedgerClient::new(Duration::from_millis(
				subscription.poll_interval_ms,
			))),
			retry: RetryPolicy {
				retries: subscription.retries,
				interval: Duration::from_millis(subscription.retry_interval_ms),
			},
		}
	}
}
