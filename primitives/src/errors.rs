use ethers::types::Address;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
pub type CodecResult<T> = std::result::Result<T, CodecError>;
pub type DeliveryResult<T> = std::result::Result<T, DeliveryError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Failures raised while connecting to a ledger or attaching event hooks.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
	#[error("Invalid provider url `{0}`: {1}")]
	InvalidEndpoint(String, String),

	#[error("Failed to connect to `{0}`: {1}")]
	Connection(String, String),

	#[error("Failed to bind contract {0:?}: {1}")]
	Bind(Address, String),

	#[error("Failed to attach the {event} hook: {reason}")]
	Hook { event: &'static str, reason: String },
}

/// Failures raised while translating between raw logs and decoded events.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("Invalid event signature for {0}: {1}")]
	InvalidSignature(&'static str, String),

	#[error("Log topic does not match the {0} event signature")]
	TopicMismatch(&'static str),

	#[error("Malformed log data: {0}")]
	Malformed(String),

	#[error("Log is missing its {0}")]
	MissingField(&'static str),

	#[error("Indexed parameter `{0}` cannot be encoded into a topic")]
	UnsupportedIndexed(String),

	#[error("Event field `{0}` does not match the event schema")]
	FieldMismatch(String),
}

/// Failures raised while composing the bound contracts.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("Unknown binding `{0}`")]
	UnknownBinding(String),
}

/// Failures raised before a delivery request could be sent.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
	#[error("Endpoint `{0}` is not configured")]
	UnknownEndpoint(String),

	#[error("Invalid endpoint url `{0}`")]
	InvalidUrl(String),

	#[error(transparent)]
	Store(#[from] StoreError),
}

/// Failures raised by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("Invalid document path `{0}`")]
	InvalidPath(String),
}
