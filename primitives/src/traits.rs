use std::sync::Arc;

use ethers::types::{Address, Log};
use futures::stream::BoxStream;
use serde_json::Value;
use tokio::sync::watch;

use crate::{
	errors::{CodecResult, DeliveryResult, LedgerResult, StoreResult},
	events::{DecodedEvent, DeliveryResponse, ErrorRecord, EventKind, PollingEntry},
};

/// Invoked for every log observed by a contract hook.
pub type LogCallback = Arc<dyn Fn(Log) + Send + Sync>;

/// Opens ledger connections.
#[async_trait::async_trait]
pub trait LedgerClient: Send + Sync {
	/// Connects to the given RPC endpoint. The connection is released once every
	/// reference to it has been dropped.
	async fn connect(&self, endpoint: &str) -> LedgerResult<Arc<dyn LedgerConnection>>;
}

#[async_trait::async_trait]
pub trait LedgerConnection: Send + Sync {
	/// Binds a contract handle able to emit the given events.
	async fn bind_contract(
		&self,
		address: Address,
		events: &'static [EventKind],
	) -> LedgerResult<Box<dyn ContractHandle>>;
}

#[async_trait::async_trait]
pub trait ContractHandle: Send + Sync {
	fn address(&self) -> Address;

	/// Attaches a hook invoked for every emitted `kind` log.
	async fn on(&self, kind: &'static EventKind, callback: LogCallback) -> LedgerResult<()>;

	/// Detaches every hook. Callbacks already running may still complete.
	async fn remove_all_listeners(&self);

	/// Flips to `true` once a hook stopped receiving logs without being detached.
	fn closed(&self) -> watch::Receiver<bool>;
}

/// Translates raw logs of a single event kind.
pub trait EventCodec: Send + Sync {
	fn kind(&self) -> &'static EventKind;

	fn decode(&self, log: &Log, chain_id: u64) -> CodecResult<DecodedEvent>;

	fn encode(&self, event: &DecodedEvent) -> CodecResult<Log>;
}

/// Delivers decoded events to the ingestion API.
#[async_trait::async_trait]
pub trait DeliveryClient: Send + Sync {
	/// Resolves the URL registered for `endpoint_name` in the given namespace.
	async fn resolve_endpoint(&self, namespace: &str, endpoint_name: &str)
		-> DeliveryResult<String>;

	/// Performs a single delivery attempt.
	async fn post(&self, url: &str, event: &DecodedEvent, api_key: &str) -> DeliveryResponse;
}

/// Durable storage of delivery failures.
#[async_trait::async_trait]
pub trait ErrorSink: Send + Sync {
	/// Writes the record keyed by its transaction hash. The last write wins.
	async fn save_error(&self, record: ErrorRecord) -> StoreResult<()>;
}

/// Registry of contracts handed over to block polling.
#[async_trait::async_trait]
pub trait PollingRegistry: Send + Sync {
	async fn register(&self, namespace: &str, entry: PollingEntry) -> StoreResult<()>;
}

/// A JSON document store with change notifications.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
	async fn get(&self, path: &str) -> StoreResult<Option<Value>>;

	async fn set(&self, path: &str, value: Value) -> StoreResult<()>;

	/// Yields the current snapshot of the document followed by every change.
	/// `None` means the document does not exist.
	fn watch(&self, path: &str) -> BoxStream<'static, Option<Value>>;
}
