use kr_primitives::{
	cli::Configuration,
	constants::{
		cli::{MAX_DELIVERY_TIMEOUT_MS, MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS},
		errors::PARAMETER_OUT_OF_RANGE,
		subscription::{
			DEFAULT_SUBSCRIPTION_RETRIES, DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS,
			MAX_SUBSCRIPTION_RETRIES, MAX_SUBSCRIPTION_RETRY_INTERVAL_MS,
		},
	},
};

/// Verifies whether the certain numeric parameters specified in the configuration YAML file are valid.
/// If any single parameter is out of range, the system will panic on-start.
pub(super) fn assert_configuration_validity(config: &Configuration) {
	let store = &config.relayer_config.store;
	let delivery = &config.relayer_config.delivery;
	let subscription = &config.relayer_config.subscription;

	// assert `store`
	assert!(
		(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&store.poll_interval_ms),
		"{} [parameter: {}, range: {}…{}]",
		PARAMETER_OUT_OF_RANGE,
		"store.poll_interval_ms",
		MIN_POLL_INTERVAL_MS,
		MAX_POLL_INTERVAL_MS
	);

	// assert `delivery`
	assert!(
		(1..=MAX_DELIVERY_TIMEOUT_MS).contains(&delivery.timeout_ms),
		"{} [parameter: {}, range: 1…{}]",
		PARAMETER_OUT_OF_RANGE,
		"delivery.timeout_ms",
		MAX_DELIVERY_TIMEOUT_MS
	);

	// assert `subscription`
	assert!(
		(0..=MAX_SUBSCRIPTION_RETRIES).contains(&subscription.retries),
		"{} [parameter: {}, range: 0…{}, default: {}]",
		PARAMETER_OUT_OF_RANGE,
		"subscription.retries",
		MAX_SUBSCRIPTION_RETRIES,
		DEFAULT_SUBSCRIPTION_RETRIES
	);
	assert!(
		(0..=MAX_SUBSCRIPTION_RETRY_INTERVAL_MS).contains(&subscription.retry_interval_ms),
		"{} [parameter: {}, range: 0…{}, default: {}]",
		PARAMETER_OUT_OF_RANGE,
		"subscription.retry_interval_ms",
		MAX_SUBSCRIPTION_RETRY_INTERVAL_MS,
		DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS
	);
	assert!(
		(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&subscription.poll_interval_ms),
		"{} [parameter: {}, range: {}…{}]",
		PARAMETER_OUT_OF_RANGE,
		"subscription.poll_interval_ms",
		MIN_POLL_INTERVAL_MS,
		MAX_POLL_INTERVAL_MS
	);
}
