#![allow(dead_code)]

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use ethers::{
	abi::{ParamType, Token},
	types::{Address, Log, H256, U256},
};
use kr_client::{
	delivery::HttpDeliveryClient,
	eth::{
		handlers::{RelayContext, RetryPolicy},
		AbiEventCodec,
	},
	registry::{select_bindings, BindingRegistry},
	store::{DocumentSinks, MemoryDocumentStore},
};
use kr_primitives::{
	errors::LedgerResult,
	events::{DecodedEvent, EventField, EventKind},
	traits::{ContractHandle, DocumentStore, EventCodec, LedgerClient, LedgerConnection, LogCallback},
};
use serde_json::json;
use tokio::{sync::watch, task::JoinSet, time::sleep};
use wiremock::MockServer;

pub const CHAIN_ID: u64 = 8453;
pub const NAMESPACE: &str = "events-base";
pub const API_KEY: &str = "test-api-key";
pub const RPC_URL: &str = "wss://rpc.example.com";

/// Waits until `condition` holds or panics after a second.
pub async fn until(condition: impl Fn() -> bool) {
	for _ in 0..200 {
		if condition() {
			return;
		}
		sleep(Duration::from_millis(5)).await;
	}
	panic!("condition not reached");
}

pub fn address(value: u64) -> Address {
	Address::from_low_u64_be(value)
}

fn sample_token(kind: &ParamType, seed: u64) -> Token {
	match kind {
		ParamType::Address => Token::Address(address(0xa000 + seed)),
		ParamType::Uint(_) => Token::Uint(U256::from(1_000 + seed)),
		ParamType::Bool => Token::Bool(seed % 2 == 0),
		_ => Token::String(format!("value-{seed}")),
	}
}

/// An ABI encoded log of `kind` emitted by `contract` in a transaction filled with `tx_byte`.
pub fn encoded_log(kind: &'static EventKind, contract: Address, tx_byte: u8) -> Log {
	let event = kind.abi().unwrap();
	let decoded = DecodedEvent {
		kind: kind.name,
		chain_id: CHAIN_ID,
		contract_address: contract,
		transaction_hash: H256::repeat_byte(tx_byte),
		block_number: 500 + tx_byte as u64,
		log_index: 0,
		fields: event
			.inputs
			.iter()
			.enumerate()
			.map(|(i, input)| EventField {
				name: input.name.clone(),
				value: sample_token(&input.kind, i as u64),
			})
			.collect(),
	};
	AbiEventCodec::new(kind).unwrap().encode(&decoded).unwrap()
}

#[derive(Default)]
struct Subscriptions {
	connects: usize,
	binds: Vec<Address>,
	removals: Vec<Address>,
	/// `(handle id, address, event name, callback)`.
	hooks: Vec<(usize, Address, &'static str, LogCallback)>,
	removed: Vec<usize>,
}

/// A ledger client keeping every hook in memory. Logs are pushed with `emit`.
#[derive(Default, Clone)]
pub struct TestLedger {
	subscriptions: Arc<Mutex<Subscriptions>>,
}

impl TestLedger {
	pub fn connects(&self) -> usize {
		self.subscriptions.lock().unwrap().connects
	}

	pub fn binds(&self) -> Vec<Address> {
		self.subscriptions.lock().unwrap().binds.clone()
	}

	/// How often the listeners of `address` were removed.
	pub fn removals(&self, address: Address) -> usize {
		self.subscriptions.lock().unwrap().removals.iter().filter(|a| **a == address).count()
	}

	/// The hooks attached to `address` that were never removed.
	pub fn live_hooks(&self, address: Address) -> usize {
		let subscriptions = self.subscriptions.lock().unwrap();
		subscriptions
			.hooks
			.iter()
			.filter(|(id, hooked, _, _)| *hooked == address && !subscriptions.removed.contains(id))
			.count()
	}

	/// Pushes `log` to every live hook of `kind` on `address`. Returns the number of hooks hit.
	pub fn emit(&self, address: Address, kind: &str, log: Log) -> usize {
		let callbacks: Vec<LogCallback> = {
			let subscriptions = self.subscriptions.lock().unwrap();
			subscriptions
				.hooks
				.iter()
				.filter(|(id, hooked, name, _)| {
					*hooked == address && *name == kind && !subscriptions.removed.contains(id)
				})
				.map(|(_, _, _, callback)| callback.clone())
				.collect()
		};
		callbacks.iter().for_each(|callback| callback(log.clone()));
		callbacks.len()
	}
}

#[async_trait::async_trait]
impl LedgerClient for TestLedger {
	async fn connect(&self, _endpoint: &str) -> LedgerResult<Arc<dyn LedgerConnection>> {
		self.subscriptions.lock().unwrap().connects += 1;
		Ok(Arc::new(self.clone()))
	}
}

#[async_trait::async_trait]
impl LedgerConnection for TestLedger {
	async fn bind_contract(
		&self,
		address: Address,
		_events: &'static [EventKind],
	) -> LedgerResult<Box<dyn ContractHandle>> {
		let mut subscriptions = self.subscriptions.lock().unwrap();
		subscriptions.binds.push(address);
		Ok(Box::new(TestHandle {
			id: subscriptions.binds.len(),
			address,
			ledger: self.clone(),
			closed: watch::channel(false).0,
		}))
	}
}

struct TestHandle {
	id: usize,
	address: Address,
	ledger: TestLedger,
	closed: watch::Sender<bool>,
}

#[async_trait::async_trait]
impl ContractHandle for TestHandle {
	fn address(&self) -> Address {
		self.address
	}

	async fn on(&self, kind: &'static EventKind, callback: LogCallback) -> LedgerResult<()> {
		self.ledger.subscriptions.lock().unwrap().hooks.push((
			self.id,
			self.address,
			kind.name,
			callback,
		));
		Ok(())
	}

	async fn remove_all_listeners(&self) {
		let mut subscriptions = self.ledger.subscriptions.lock().unwrap();
		subscriptions.removals.push(self.address);
		subscriptions.removed.push(self.id);
	}

	fn closed(&self) -> watch::Receiver<bool> {
		self.closed.subscribe()
	}
}

/// A running relayer over an in-memory document store and a mocked ingestion API.
pub struct TestRelayer {
	pub ledger: TestLedger,
	pub store: Arc<MemoryDocumentStore>,
	pub server: MockServer,
	pub registry: BindingRegistry,
	pub tasks: JoinSet<&'static str>,
}

impl TestRelayer {
	/// Starts the given bindings. Every endpoint name resolves to `<server>/<endpoint name>`.
	pub async fn start(bindings: &[&str], endpoints: &[&str]) -> Self {
		let server = MockServer::start().await;
		let ledger = TestLedger::default();
		let store = Arc::new(MemoryDocumentStore::new());

		let mut document = serde_json::Map::new();
		for endpoint in endpoints {
			document.insert(endpoint.to_string(), json!(format!("{}/{}", server.uri(), endpoint)));
		}
		store.set(&format!("{}/endpoints", NAMESPACE), document.into()).await.unwrap();

		let document_store: Arc<dyn DocumentStore> = store.clone();
		let sinks = Arc::new(DocumentSinks::new(document_store.clone()));
		let delivery = Arc::new(
			HttpDeliveryClient::new(document_store.clone(), "x-api-key", Duration::from_secs(5))
				.unwrap(),
		);
		let context = Arc::new(RelayContext {
			chain_id: CHAIN_ID,
			namespace: NAMESPACE.into(),
			api_key: API_KEY.into(),
			delivery,
			error_sink: sinks.clone(),
			polling_registry: sinks,
		});

		let names: Vec<String> = bindings.iter().map(|name| name.to_string()).collect();
		let registry = BindingRegistry::new(
			select_bindings(Some(names.as_slice())).unwrap(),
			Arc::new(ledger.clone()),
			context,
			RetryPolicy::default(),
			document_store,
		)
		.unwrap();
		let mut tasks = JoinSet::new();
		registry.spawn(&mut tasks);

		Self { ledger, store, server, registry, tasks }
	}

	/// Writes a configuration document below the events directory.
	pub async fn configure(&self, document: &str, value: serde_json::Value) {
		self.store.set(&format!("{}/{}", NAMESPACE, document), value).await.unwrap();
	}

	/// The error records written so far.
	pub async fn errors(&self) -> Vec<serde_json::Value> {
		let mut records = vec![];
		for path in self.store.paths("errors/") {
			records.push(self.store.get(&path).await.unwrap().unwrap());
		}
		records
	}

	/// Waits until `count` requests reached the ingestion API.
	pub async fn wait_for_requests(&self, count: usize) -> Vec<wiremock::Request> {
		for _ in 0..400 {
			let requests = self.server.received_requests().await.unwrap_or_default();
			if requests.len() >= count {
				return requests;
			}
			sleep(Duration::from_millis(5)).await;
		}
		panic!("expected {count} requests");
	}

	/// Waits until `count` error records were written.
	pub async fn wait_for_errors(&self, count: usize) -> Vec<serde_json::Value> {
		for _ in 0..400 {
			let errors = self.errors().await;
			if errors.len() >= count {
				return errors;
			}
			sleep(Duration::from_millis(5)).await;
		}
		panic!("expected {count} error records");
	}
}
