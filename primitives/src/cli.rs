use serde::Deserialize;

use crate::constants::{
	cli::{
		DEFAULT_API_KEY_ENV, DEFAULT_API_KEY_HEADER, DEFAULT_DELIVERY_TIMEOUT_MS,
		DEFAULT_STORE_POLL_INTERVAL_MS, DEFAULT_STORE_ROOT,
	},
	subscription::{
		DEFAULT_LOG_POLL_INTERVAL_MS, DEFAULT_SUBSCRIPTION_RETRIES,
		DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS,
	},
};

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the CLI.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("Invalid input: {0}")]
	Input(String),
}

impl From<&str> for Error {
	fn from(s: &str) -> Error {
		Error::Input(s.to_string())
	}
}

impl From<String> for Error {
	fn from(s: String) -> Error {
		Error::Input(s)
	}
}

#[derive(Debug, Clone)]
pub struct Configuration {
	pub relayer_config: RelayerConfig,
	/// The delivery API key, read from the environment.
	pub api_key: String,
	/// Handle to the tokio runtime. Will be used to spawn the binding tasks.
	pub tokio_handle: tokio::runtime::Handle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayerConfig {
	pub system: SystemConfig,
	#[serde(default)]
	pub store: StoreConfig,
	#[serde(default)]
	pub delivery: DeliveryConfig,
	#[serde(default)]
	pub subscription: SubscriptionConfig,
	/// The bindings to relay. Every known binding is relayed when omitted.
	pub bindings: Option<Vec<String>>,
	pub sentry_config: Option<SentryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
	/// The chain ID attached to every delivered event.
	pub chain_id: u64,
	/// The document namespace holding every binding configuration and endpoint.
	pub events_directory: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
	/// The root directory of the document store.
	#[serde(default = "default_store_root")]
	pub root: String,
	/// The interval(ms) used to check documents for changes.
	#[serde(default = "default_store_poll_interval")]
	pub poll_interval_ms: u64,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self { root: default_store_root(), poll_interval_ms: DEFAULT_STORE_POLL_INTERVAL_MS }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
	/// The environment variable holding the API key.
	#[serde(default = "default_api_key_env")]
	pub api_key_env: String,
	/// The request header carrying the API key.
	#[serde(default = "default_api_key_header")]
	pub api_key_header: String,
	#[serde(default = "default_delivery_timeout")]
	pub timeout_ms: u64,
}

impl Default for DeliveryConfig {
	fn default() -> Self {
		Self {
			api_key_env: default_api_key_env(),
			api_key_header: default_api_key_header(),
			timeout_ms: DEFAULT_DELIVERY_TIMEOUT_MS,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionConfig {
	/// Retries of a failed subscription attempt. Zero waits for the next configuration update.
	#[serde(default = "default_subscription_retries")]
	pub retries: u8,
	/// The interval(ms) before the first retry. Doubled on every following retry.
	#[serde(default = "default_subscription_retry_interval")]
	pub retry_interval_ms: u64,
	/// The interval(ms) used by HTTP providers to poll for new logs.
	#[serde(default = "default_log_poll_interval")]
	pub poll_interval_ms: u64,
}

impl Default for SubscriptionConfig {
	fn default() -> Self {
		Self {
			retries: DEFAULT_SUBSCRIPTION_RETRIES,
			retry_interval_ms: DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS,
			poll_interval_ms: DEFAULT_LOG_POLL_INTERVAL_MS,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentryConfig {
	pub enabled: bool,
	pub dsn: Option<String>,
	pub environment: Option<String>,
}

fn default_store_root() -> String {
	DEFAULT_STORE_ROOT.to_string()
}

fn default_store_poll_interval() -> u64 {
	DEFAULT_STORE_POLL_INTERVAL_MS
}

fn default_api_key_env() -> String {
	DEFAULT_API_KEY_ENV.to_string()
}

fn default_api_key_header() -> String {
	DEFAULT_API_KEY_HEADER.to_string()
}

fn default_delivery_timeout() -> u64 {
	DEFAULT_DELIVERY_TIMEOUT_MS
}

fn default_subscription_retries() -> u8 {
	DEFAULT_SUBSCRIPTION_RETRIES
}

fn default_subscription_retry_interval() -> u64 {
	DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS
}

fn default_log_poll_interval() -> u64 {
	DEFAULT_LOG_POLL_INTERVAL_MS
}
