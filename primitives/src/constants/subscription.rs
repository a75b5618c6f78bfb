/// The default retries of a failed subscription attempt. (=no retry)
pub const DEFAULT_SUBSCRIPTION_RETRIES: u8 = 0;

/// The maximum retries allowed for a failed subscription attempt.
pub const MAX_SUBSCRIPTION_RETRIES: u8 = 10;

/// The default subscription retry interval in milliseconds.
pub const DEFAULT_SUBSCRIPTION_RETRY_INTERVAL_MS: u64 = 3000;

/// The coefficient that will be multiplied on the retry interval.
pub const RETRY_INTERVAL_COEFFICIENT: u64 = 2;

/// The default interval used by HTTP log filters to poll for new logs in milliseconds. (=2s)
pub const DEFAULT_LOG_POLL_INTERVAL_MS: u64 = 2_000;

/// The maximum subscription retry interval allowed in milliseconds. (=60s)
pub const MAX_SUBSCRIPTION_RETRY_INTERVAL_MS: u64 = 60_000;
