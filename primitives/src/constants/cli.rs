/// The default path of the relayer configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// The default root directory of the file backed document store.
pub const DEFAULT_STORE_ROOT: &str = "./store";

/// The default environment variable holding the delivery API key.
pub const DEFAULT_API_KEY_ENV: &str = "LAMBDA_API_KEY";

/// The default request header carrying the delivery API key.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// The default delivery request timeout in milliseconds. (=10s)
pub const DEFAULT_DELIVERY_TIMEOUT_MS: u64 = 10_000;

/// The default interval used to poll the document store for changes in milliseconds. (=2s)
pub const DEFAULT_STORE_POLL_INTERVAL_MS: u64 = 2_000;

/// The minimum poll interval allowed in milliseconds. (=100ms)
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

/// The maximum poll interval allowed in milliseconds. (=60s)
pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;

/// The maximum delivery timeout allowed in milliseconds. (=120s)
pub const MAX_DELIVERY_TIMEOUT_MS: u64 = 120_000;
