use std::future::Future;

use kr_client::registry::{select_bindings, BindingRegistry};
use kr_primitives::{
	cli::{Configuration, Error},
	constants::errors::{INVALID_BINDING_NAME, INVALID_CONTRACT_ABI},
	utils::sub_display_format,
};
use tokio::task::JoinSet;

use crate::{
	cli::{LOG_TARGET, SUB_LOG_TARGET},
	service_deps::{RelayDeps, StoreDeps},
	verification::assert_configuration_validity,
};

/// Starts the relayer service. Yields the binding tasks and the future tearing down their
/// subscriptions.
pub async fn relay(
	config: Configuration,
) -> Result<(JoinSet<&'static str>, impl Future<Output = ()>), Error> {
	assert_configuration_validity(&config);

	let bindings = select_bindings(config.relayer_config.bindings.as_deref())
		.map_err(|err| format!("{} ({})", INVALID_BINDING_NAME, err))?;

	let store_deps = StoreDeps::new(&config);
	let RelayDeps { context, ledger, retry } = RelayDeps::new(&config, &store_deps);

	let registry =
		BindingRegistry::new(bindings, ledger, context, retry, store_deps.store.clone())
			.map_err(|err| format!("{} ({})", INVALID_CONTRACT_ABI, err))?;

	print_relay_targets(&config, registry.len());

	let mut tasks = JoinSet::new();
	registry.spawn(&mut tasks);
	Ok((tasks, async move { registry.shutdown().await }))
}

/// Log information about the relayed bindings.
fn print_relay_targets(config: &Configuration, bindings: usize) {
	let system = &config.relayer_config.system;

	log::info!(
		target: LOG_TARGET,
		"-[{}] 🔨 Relaying {} bindings of chain {} from {}",
		sub_display_format(SUB_LOG_TARGET),
		bindings,
		system.chain_id,
		system.events_directory,
	);
	if config.relayer_config.subscription.retries > 0 {
		log::info!(
			target: LOG_TARGET,
			"-[{}] 🔁 Failed subscriptions are retried {} times",
			sub_display_format(SUB_LOG_TARGET),
			config.relayer_config.subscription.retries,
		);
	}
}
