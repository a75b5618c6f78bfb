/// The collection every delivery failure is recorded into.
pub const ERRORS_COLLECTION: &str = "errors";

/// The document (relative to the events directory) mapping endpoint names to URLs.
pub const ENDPOINTS_DOCUMENT: &str = "endpoints";

/// The collection (relative to the events directory) of contracts registered for polling.
pub const POLLING_REGISTRY_COLLECTION: &str = "erc1155/contracts";

/// The fields read from a dedicated contract configuration document.
pub const CONTRACT_ADDRESS_FIELD: &str = "contractAddress";
pub const LISTENER_RPC_URL_FIELD: &str = "listenerRpcUrl";
pub const RPC_URL_FIELD: &str = "rpcUrl";
pub const PAUSED_FIELD: &str = "paused";

/// The list field of a collection configuration document.
pub const CONTRACTS_FIELD: &str = "contracts";
pub const ADDRESS_FIELD: &str = "address";
