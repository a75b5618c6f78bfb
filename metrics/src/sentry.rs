use sentry::ClientInitGuard;
use std::borrow::Cow;

use kr_primitives::{cli::SentryConfig, utils::sub_display_format};

pub const LOG_TARGET: &str = "kor-event-relayer";
const SUB_LOG_TARGET: &str = "sentry-client";

/// Builds a sentry client only when the sentry config is enabled and carries a DSN.
pub fn build_sentry_client(
	chain_id: u64,
	sentry_config: Option<SentryConfig>,
) -> Option<ClientInitGuard> {
	let config = sentry_config?;
	let dsn = config.dsn.unwrap_or_default();
	if !config.enabled || dsn.is_empty() {
		return None;
	}

	let environment = config.environment.map(Cow::Owned);
	let sentry_client = sentry::init((
		dsn,
		sentry::ClientOptions {
			release: sentry::release_name!(),
			environment: environment.clone(),
			..Default::default()
		},
	));
	sentry::configure_scope(|scope| scope.set_tag("chain_id", chain_id));

	log::info!(
		target: LOG_TARGET,
		"-[{}] 🔨 Initializing sentry client with environment: {}",
		sub_display_format(SUB_LOG_TARGET),
		environment.unwrap_or_default()
	);
	Some(sentry_client)
}
