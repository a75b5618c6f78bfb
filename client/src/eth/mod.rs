mod codec;
pub use codec::*;

pub mod handlers;
pub mod traits;

use std::{
	sync::{Arc, Mutex, PoisonError},
	time::Duration,
};

use ethers::{
	providers::{Http, Middleware, Provider, Ws},
	types::{Address, Filter},
};
use futures::StreamExt;
use kr_primitives::{
	errors::{LedgerError, LedgerResult},
	events::EventKind,
	traits::{ContractHandle, LedgerClient, LedgerConnection, LogCallback},
	utils::sub_display_format,
};
use tokio::{
	sync::{oneshot, watch},
	task::JoinHandle,
};
use url::Url;

const LOG_TARGET: &str = "eth-client";
const SUB_LOG_TARGET: &str = "log-listener";

/// The ethers.rs transport of a single ledger connection.
#[derive(Clone)]
pub enum EthTransport {
	/// Logs are received through `eth_getFilterChanges` polling.
	Http(Arc<Provider<Http>>),
	/// Logs are pushed through `eth_subscribe`.
	Ws(Arc<Provider<Ws>>),
}

/// Opens ethers.rs providers. `ws://` and `wss://` endpoints are subscribed to, every other
/// endpoint is polled.
pub struct EthLedgerClient {
	/// The interval used by HTTP providers to poll for new logs.
	poll_interval: Duration,
}

impl EthLedgerClient {
	pub fn new(poll_interval: Duration) -> Self {
		Self { poll_interval }
	}
}

#[async_trait::async_trait]
impl LedgerClient for EthLedgerClient {
	async fn connect(&self, endpoint: &str) -> LedgerResult<Arc<dyn LedgerConnection>> {
		let url = Url::parse(endpoint)
			.map_err(|err| LedgerError::InvalidEndpoint(endpoint.to_string(), err.to_string()))?;
		let connection_error = |err: String| LedgerError::Connection(endpoint.to_string(), err);

		let transport = match url.scheme() {
			"ws" | "wss" => EthTransport::Ws(Arc::new(
				Provider::<Ws>::connect(endpoint)
					.await
					.map_err(|err| connection_error(err.to_string()))?,
			)),
			"http" | "https" => {
				let provider = Provider::new(Http::new(url)).interval(self.poll_interval);
				// the HTTP transport is lazy; query it once so unreachable endpoints fail here
				provider.get_block_number().await.map_err(|err| connection_error(err.to_string()))?;
				EthTransport::Http(Arc::new(provider))
			},
			scheme => {
				return Err(LedgerError::InvalidEndpoint(
					endpoint.to_string(),
					format!("unsupported scheme `{scheme}`"),
				))
			},
		};

		Ok(Arc::new(EthConnection { endpoint: endpoint.to_string(), transport }))
	}
}

pub struct EthConnection {
	endpoint: String,
	transport: EthTransport,
}

#[async_trait::async_trait]
impl LedgerConnection for EthConnection {
	async fn bind_contract(
		&self,
		address: Address,
		events: &'static [EventKind],
	) -> LedgerResult<Box<dyn ContractHandle>> {
		for kind in events {
			kind.abi().map_err(|err| LedgerError::Bind(address, err.to_string()))?;
		}
		Ok(Box::new(EthContractHandle {
			address,
			endpoint: self.endpoint.clone(),
			transport: self.transport.clone(),
			listeners: Mutex::new(vec![]),
			closed: Arc::new(watch::channel(false).0),
		}))
	}
}

/// A contract bound to a connection. Every hook runs as its own listener task.
pub struct EthContractHandle {
	address: Address,
	endpoint: String,
	transport: EthTransport,
	listeners: Mutex<Vec<JoinHandle<()>>>,
	/// Set by the first listener whose log stream ends.
	closed: Arc<watch::Sender<bool>>,
}

impl EthContractHandle {
	fn abort_listeners(&self) {
		let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
		listeners.drain(..).for_each(|listener| listener.abort());
	}
}

#[async_trait::async_trait]
impl ContractHandle for EthContractHandle {
	fn address(&self) -> Address {
		self.address
	}

	async fn on(&self, kind: &'static EventKind, callback: LogCallback) -> LedgerResult<()> {
		let topic = kind
			.topic()
			.map_err(|err| LedgerError::Hook { event: kind.name, reason: err.to_string() })?;
		let filter = Filter::new().address(self.address).topic0(topic);

		let (ready_tx, ready_rx) = oneshot::channel();
		let listener = match &self.transport {
			EthTransport::Http(provider) => tokio::spawn(watch_logs(
				provider.clone(),
				filter,
				callback,
				ready_tx,
				self.closed.clone(),
			)),
			EthTransport::Ws(provider) => tokio::spawn(subscribe_logs(
				provider.clone(),
				filter,
				callback,
				ready_tx,
				self.closed.clone(),
			)),
		};

		let reason = match ready_rx.await {
			Ok(Ok(())) => {
				self.listeners.lock().unwrap_or_else(PoisonError::into_inner).push(listener);
				log::debug!(
					target: LOG_TARGET,
					"-[{}] 👂 Listening to {} logs of {:?} on {}",
					sub_display_format(SUB_LOG_TARGET),
					kind.name,
					self.address,
					self.endpoint,
				);
				return Ok(());
			},
			Ok(Err(reason)) => reason,
			Err(_) => "listener task stopped before it was ready".to_string(),
		};
		listener.abort();
		Err(LedgerError::Hook { event: kind.name, reason })
	}

	async fn remove_all_listeners(&self) {
		self.abort_listeners();
	}

	fn closed(&self) -> watch::Receiver<bool> {
		self.closed.subscribe()
	}
}

impl Drop for EthContractHandle {
	fn drop(&mut self) {
		self.abort_listeners();
	}
}

async fn watch_logs(
	provider: Arc<Provider<Http>>,
	filter: Filter,
	callback: LogCallback,
	ready: oneshot::Sender<Result<(), String>>,
	closed: Arc<watch::Sender<bool>>,
) {
	let mut stream = match provider.watch(&filter).await {
		Ok(stream) => stream,
		Err(err) => {
			let _ = ready.send(Err(err.to_string()));
			return;
		},
	};
	let _ = ready.send(Ok(()));

	while let Some(log) = stream.next().await {
		callback(log);
	}
	log::warn!(
		target: LOG_TARGET,
		"-[{}] ⚠️  Log filter closed: {:?}",
		sub_display_format(SUB_LOG_TARGET),
		filter.address,
	);
	closed.send_replace(true);
}

async fn subscribe_logs(
	provider: Arc<Provider<Ws>>,
	filter: Filter,
	callback: LogCallback,
	ready: oneshot::Sender<Result<(), String>>,
	closed: Arc<watch::Sender<bool>>,
) {
	let mut stream = match provider.subscribe_logs(&filter).await {
		Ok(stream) => stream,
		Err(err) => {
			let _ = ready.send(Err(err.to_string()));
			return;
		},
	};
	let _ = ready.send(Ok(()));

	while let Some(log) = stream.next().await {
		callback(log);
	}
	log::warn!(
		target: LOG_TARGET,
		"-[{}] ⚠️  Log subscription closed: {:?}",
		sub_display_format(SUB_LOG_TARGET),
		filter.address,
	);
	closed.send_replace(true);
}
