use std::{
	collections::BTreeMap,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Mutex,
	},
	time::Duration,
};

use ethers::{
	abi::{ParamType, Token},
	types::{Address, Log, H256, U256, U64},
};
use kr_primitives::{
	errors::{
		CodecError, CodecResult, DeliveryError, DeliveryResult, LedgerError, LedgerResult,
		StoreResult,
	},
	events::{DecodedEvent, DeliveryResponse, ErrorRecord, EventField, EventKind, PollingEntry},
	traits::{
		ContractHandle, DeliveryClient, ErrorSink, EventCodec, LedgerClient, LedgerConnection,
		LogCallback, PollingRegistry,
	},
};
use serde_json::json;
use tokio::{sync::watch, time::sleep};

use crate::eth::AbiEventCodec;

pub(crate) const CONTRACT: u64 = 0xc0ffee;

fn sample_token(kind: &ParamType, seed: u64) -> Token {
	match kind {
		ParamType::Address => Token::Address(Address::from_low_u64_be(0xa000 + seed)),
		ParamType::Uint(_) => Token::Uint(U256::from(1_000 + seed)),
		ParamType::Bool => Token::Bool(seed % 2 == 0),
		_ => Token::String(format!("value-{seed}")),
	}
}

/// An ABI encoded log of the given kind, emitted in a transaction filled with `tx_byte`.
pub(crate) fn sample_log(kind: &'static EventKind, tx_byte: u8) -> Log {
	let codec = AbiEventCodec::new(kind).unwrap();
	let abi = kind.abi().unwrap();
	let event = DecodedEvent {
		kind: kind.name,
		chain_id: 8453,
		contract_address: Address::from_low_u64_be(CONTRACT),
		transaction_hash: H256::repeat_byte(tx_byte),
		block_number: 100 + tx_byte as u64,
		log_index: 0,
		fields: abi
			.inputs
			.iter()
			.enumerate()
			.map(|(i, input)| EventField {
				name: input.name.clone(),
				value: sample_token(&input.kind, i as u64),
			})
			.collect(),
	};
	codec.encode(&event).unwrap()
}

/// Remembers every encoded event and hands it back on decode. Only logs encoded by the same
/// instance can be decoded.
pub(crate) struct FakeCodec {
	kind: &'static EventKind,
	encoded: Mutex<BTreeMap<H256, DecodedEvent>>,
}

impl FakeCodec {
	pub(crate) fn new(kind: &'static EventKind) -> Self {
		Self { kind, encoded: Mutex::new(BTreeMap::new()) }
	}

	pub(crate) fn event(kind: &'static EventKind, tx_byte: u8) -> DecodedEvent {
		DecodedEvent {
			kind: kind.name,
			chain_id: 8453,
			contract_address: Address::from_low_u64_be(CONTRACT),
			transaction_hash: H256::repeat_byte(tx_byte),
			block_number: 7,
			log_index: 1,
			fields: vec![EventField { name: "_name".into(), value: Token::String("Rice".into()) }],
		}
	}
}

impl EventCodec for FakeCodec {
	fn kind(&self) -> &'static EventKind {
		self.kind
	}

	fn decode(&self, log: &Log, chain_id: u64) -> CodecResult<DecodedEvent> {
		let tx_hash = log.transaction_hash.ok_or(CodecError::MissingField("transaction hash"))?;
		let mut event = self
			.encoded
			.lock()
			.unwrap()
			.get(&tx_hash)
			.cloned()
			.ok_or_else(|| CodecError::Malformed("unknown log".into()))?;
		event.chain_id = chain_id;
		Ok(event)
	}

	fn encode(&self, event: &DecodedEvent) -> CodecResult<Log> {
		self.encoded.lock().unwrap().insert(event.transaction_hash, event.clone());
		Ok(Log {
			address: event.contract_address,
			transaction_hash: Some(event.transaction_hash),
			block_number: Some(U64::from(event.block_number)),
			..Default::default()
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FakeDeliveryMode {
	/// Every post is answered with 200.
	Accept,
	/// Every post is answered with an unrecognized status.
	Reject,
	/// No endpoint can be resolved.
	Unresolved,
}

pub(crate) struct FakeDelivery {
	mode: FakeDeliveryMode,
	posts: Mutex<Vec<(String, DecodedEvent, String)>>,
}

impl FakeDelivery {
	pub(crate) fn new(mode: FakeDeliveryMode) -> Self {
		Self { mode, posts: Mutex::new(vec![]) }
	}

	pub(crate) fn posts(&self) -> Vec<(String, DecodedEvent, String)> {
		self.posts.lock().unwrap().clone()
	}

	/// Waits until at least `count` posts arrived.
	pub(crate) async fn wait_for_posts(&self, count: usize) -> Vec<(String, DecodedEvent, String)> {
		for _ in 0..200 {
			if self.posts.lock().unwrap().len() >= count {
				break;
			}
			sleep(Duration::from_millis(5)).await;
		}
		self.posts()
	}
}

#[async_trait::async_trait]
impl DeliveryClient for FakeDelivery {
	async fn resolve_endpoint(
		&self,
		namespace: &str,
		endpoint_name: &str,
	) -> DeliveryResult<String> {
		match self.mode {
			FakeDeliveryMode::Unresolved => {
				Err(DeliveryError::UnknownEndpoint(endpoint_name.to_string()))
			},
			_ => Ok(format!("https://ingest.example.com/{namespace}/{endpoint_name}")),
		}
	}

	async fn post(&self, url: &str, event: &DecodedEvent, api_key: &str) -> DeliveryResponse {
		self.posts.lock().unwrap().push((url.to_string(), event.clone(), api_key.to_string()));
		match self.mode {
			FakeDeliveryMode::Accept => {
				DeliveryResponse { status: Some(200), body: json!({ "ok": true }) }
			},
			_ => DeliveryResponse {
				status: None,
				body: json!({ "status": 500, "data": "internal error" }),
			},
		}
	}
}

#[derive(Default)]
pub(crate) struct FakeSinks {
	errors: Mutex<Vec<ErrorRecord>>,
	polling: Mutex<Vec<(String, PollingEntry)>>,
}

impl FakeSinks {
	pub(crate) fn errors(&self) -> Vec<ErrorRecord> {
		self.errors.lock().unwrap().clone()
	}

	pub(crate) fn polling_entries(&self) -> Vec<(String, PollingEntry)> {
		self.polling.lock().unwrap().clone()
	}
}

#[async_trait::async_trait]
impl ErrorSink for FakeSinks {
	async fn save_error(&self, record: ErrorRecord) -> StoreResult<()> {
		self.errors.lock().unwrap().push(record);
		Ok(())
	}
}

#[async_trait::async_trait]
impl PollingRegistry for FakeSinks {
	async fn register(&self, namespace: &str, entry: PollingEntry) -> StoreResult<()> {
		self.polling.lock().unwrap().push((namespace.to_string(), entry));
		Ok(())
	}
}

/// Everything the fake ledger was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LedgerEvent {
	Connected(String),
	Bound(Address),
	Hooked(Address, &'static str),
	ListenersRemoved(Address),
	Released(String),
}

struct FakeHandleState {
	address: Address,
	hooks: Vec<(&'static str, LogCallback)>,
	removed: bool,
	closed: Arc<watch::Sender<bool>>,
}

#[derive(Default)]
struct LedgerJournal {
	events: Vec<LedgerEvent>,
	handles: Vec<FakeHandleState>,
	failing_binds: usize,
	failing_hook: Option<&'static str>,
}

#[derive(Default)]
pub(crate) struct FakeLedger {
	journal: Arc<Mutex<LedgerJournal>>,
	failing_connects: AtomicUsize,
	connect_delay_ms: AtomicUsize,
}

impl FakeLedger {
	/// Fails the next `count` connection attempts.
	pub(crate) fn fail_next_connects(&self, count: usize) {
		self.failing_connects.store(count, Ordering::SeqCst);
	}

	/// Fails the next `count` contract bindings.
	pub(crate) fn fail_next_binds(&self, count: usize) {
		self.journal.lock().unwrap().failing_binds = count;
	}

	/// Fails every attempt to hook `kind`.
	pub(crate) fn fail_hook(&self, kind: &'static str) {
		self.journal.lock().unwrap().failing_hook = Some(kind);
	}

	/// Ends the log streams of every live handle bound to `address`.
	pub(crate) fn close_streams(&self, address: Address) {
		let journal = self.journal.lock().unwrap();
		journal
			.handles
			.iter()
			.filter(|h| h.address == address && !h.removed)
			.for_each(|h| {
				h.closed.send_replace(true);
			});
	}

	pub(crate) fn set_connect_delay(&self, delay: Duration) {
		self.connect_delay_ms.store(delay.as_millis() as usize, Ordering::SeqCst);
	}

	pub(crate) fn events(&self) -> Vec<LedgerEvent> {
		self.journal.lock().unwrap().events.clone()
	}

	pub(crate) fn connects(&self) -> usize {
		self.events().iter().filter(|e| matches!(e, LedgerEvent::Connected(_))).count()
	}

	/// Contract handles whose listeners were never removed.
	pub(crate) fn live_subscriptions(&self) -> usize {
		self.journal.lock().unwrap().handles.iter().filter(|h| !h.removed).count()
	}

	/// Emits a log to every live hook of `kind` on `address`. Returns the number of hooks hit.
	pub(crate) fn emit(&self, address: Address, kind: &str, log: Log) -> usize {
		let callbacks: Vec<LogCallback> = self
			.journal
			.lock()
			.unwrap()
			.handles
			.iter()
			.filter(|h| h.address == address && !h.removed)
			.flat_map(|h| h.hooks.iter().filter(|(name, _)| *name == kind))
			.map(|(_, callback)| callback.clone())
			.collect();
		callbacks.iter().for_each(|callback| callback(log.clone()));
		callbacks.len()
	}

	/// A hook captured before its subscription was torn down.
	pub(crate) fn captured_hook(&self, address: Address, kind: &str) -> Option<LogCallback> {
		self.journal
			.lock()
			.unwrap()
			.handles
			.iter()
			.filter(|h| h.address == address)
			.flat_map(|h| h.hooks.iter())
			.find(|(name, _)| *name == kind)
			.map(|(_, callback)| callback.clone())
	}
}

#[async_trait::async_trait]
impl LedgerClient for FakeLedger {
	async fn connect(&self, endpoint: &str) -> LedgerResult<Arc<dyn LedgerConnection>> {
		let delay = self.connect_delay_ms.load(Ordering::SeqCst);
		if delay > 0 {
			sleep(Duration::from_millis(delay as u64)).await;
		}
		let failing = self.failing_connects.load(Ordering::SeqCst);
		if failing > 0 {
			self.failing_connects.store(failing - 1, Ordering::SeqCst);
			return Err(LedgerError::Connection(endpoint.to_string(), "refused".into()));
		}

		self.journal.lock().unwrap().events.push(LedgerEvent::Connected(endpoint.to_string()));
		Ok(Arc::new(FakeConnection {
			endpoint: endpoint.to_string(),
			journal: self.journal.clone(),
		}))
	}
}

struct FakeConnection {
	endpoint: String,
	journal: Arc<Mutex<LedgerJournal>>,
}

impl Drop for FakeConnection {
	fn drop(&mut self) {
		if let Ok(mut journal) = self.journal.lock() {
			journal.events.push(LedgerEvent::Released(self.endpoint.clone()));
		}
	}
}

#[async_trait::async_trait]
impl LedgerConnection for FakeConnection {
	async fn bind_contract(
		&self,
		address: Address,
		_events: &'static [EventKind],
	) -> LedgerResult<Box<dyn ContractHandle>> {
		let mut journal = self.journal.lock().unwrap();
		if journal.failing_binds > 0 {
			journal.failing_binds -= 1;
			return Err(LedgerError::Bind(address, "rejected".into()));
		}
		let closed = Arc::new(watch::channel(false).0);
		journal.events.push(LedgerEvent::Bound(address));
		journal.handles.push(FakeHandleState {
			address,
			hooks: vec![],
			removed: false,
			closed: closed.clone(),
		});
		Ok(Box::new(FakeHandle {
			id: journal.handles.len() - 1,
			address,
			journal: self.journal.clone(),
			closed,
		}))
	}
}

struct FakeHandle {
	id: usize,
	address: Address,
	journal: Arc<Mutex<LedgerJournal>>,
	closed: Arc<watch::Sender<bool>>,
}

#[async_trait::async_trait]
impl ContractHandle for FakeHandle {
	fn address(&self) -> Address {
		self.address
	}

	async fn on(&self, kind: &'static EventKind, callback: LogCallback) -> LedgerResult<()> {
		let mut journal = self.journal.lock().unwrap();
		if journal.failing_hook == Some(kind.name) {
			return Err(LedgerError::Hook { event: kind.name, reason: "rejected".into() });
		}
		journal.events.push(LedgerEvent::Hooked(self.address, kind.name));
		journal.handles[self.id].hooks.push((kind.name, callback));
		Ok(())
	}

	async fn remove_all_listeners(&self) {
		let mut journal = self.journal.lock().unwrap();
		journal.events.push(LedgerEvent::ListenersRemoved(self.address));
		journal.handles[self.id].removed = true;
	}

	fn closed(&self) -> watch::Receiver<bool> {
		self.closed.subscribe()
	}
}
