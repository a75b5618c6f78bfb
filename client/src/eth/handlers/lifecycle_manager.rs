use std::{
	collections::BTreeSet,
	str::FromStr,
	sync::{Arc, PoisonError, RwLock},
};

use ethers::types::{Address, Log};
use kr_primitives::{
	binding::{BindingSpec, ConfigurationRecord},
	constants::subscription::RETRY_INTERVAL_COEFFICIENT,
	errors::LedgerResult,
	events::EventKind,
	log_and_capture,
	traits::{ContractHandle, LedgerClient, LedgerConnection, LogCallback},
	utils::sub_display_format,
};
use tokio::{
	sync::{watch, Mutex},
	time::sleep,
};

use crate::eth::traits::ConfigHandler;

use super::{EventDispatcher, RetryPolicy};

const SUB_LOG_TARGET: &str = "lifecycle-manager";

/// The observable state of a binding's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionState {
	Inactive,
	Active { address: Address, rpc_endpoint: String },
}

/// Guards the hooks of a subscription. Closing the gate waits for every hook currently
/// dispatching and prevents any later dispatch.
#[derive(Clone)]
struct HookGate(Arc<RwLock<bool>>);

impl HookGate {
	fn open() -> Self {
		Self(Arc::new(RwLock::new(true)))
	}

	/// Runs `f` only while the gate is open.
	fn pass(&self, f: impl FnOnce()) {
		let open = self.0.read().unwrap_or_else(PoisonError::into_inner);
		if *open {
			f();
		}
	}

	fn close(&self) {
		*self.0.write().unwrap_or_else(PoisonError::into_inner) = false;
	}

	fn same(&self, other: &HookGate) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

/// Bumps the generation and returns the new value.
pub(super) fn next_generation(generation: &watch::Sender<u64>) -> u64 {
	let mut next = 0;
	generation.send_modify(|current| {
		*current += 1;
		next = *current;
	});
	next
}

/// A live connection with one hook per event kind on a single contract.
struct LedgerSubscription {
	address: Address,
	rpc_endpoint: String,
	handle: Box<dyn ContractHandle>,
	gate: HookGate,
	active_hooks: BTreeSet<&'static str>,
	/// Released once the subscription is dropped.
	_connection: Arc<dyn LedgerConnection>,
}

impl LedgerSubscription {
	/// Detaches every hook and releases the connection.
	async fn teardown(self, target: &'static str) {
		self.gate.close();
		self.handle.remove_all_listeners().await;
		log::info!(
			target: target,
			"-[{}] 🔕 Unsubscribed from {:?}",
			sub_display_format(SUB_LOG_TARGET),
			self.address,
		);
	}

	fn is_closed(&self) -> bool {
		let closed = self.handle.closed();
		let is_closed = *closed.borrow();
		is_closed
	}
}

/// Keeps at most one ledger subscription in line with the latest configuration record of
/// a binding.
pub struct LifecycleManager {
	binding: &'static BindingSpec,
	ledger: Arc<dyn LedgerClient>,
	dispatcher: Arc<EventDispatcher>,
	retry: RetryPolicy,
	/// Held across a whole reconciliation.
	subscription: Arc<Mutex<Option<LedgerSubscription>>>,
	/// Bumped for every configuration record.
	generation: Arc<watch::Sender<u64>>,
}

impl LifecycleManager {
	pub fn new(
		binding: &'static BindingSpec,
		ledger: Arc<dyn LedgerClient>,
		dispatcher: Arc<EventDispatcher>,
		retry: RetryPolicy,
	) -> Self {
		Self {
			binding,
			ledger,
			dispatcher,
			retry,
			subscription: Arc::new(Mutex::new(None)),
			generation: Arc::new(watch::channel(0).0),
		}
	}

	/// Shares the generation of a collection. Records of the collection supersede every
	/// reconciliation of this manager.
	pub(super) fn with_generation(mut self, generation: Arc<watch::Sender<u64>>) -> Self {
		self.generation = generation;
		self
	}

	fn is_superseded(&self, generation: u64) -> bool {
		*self.generation.borrow() != generation
	}

	pub fn binding(&self) -> &'static BindingSpec {
		self.binding
	}

	pub async fn state(&self) -> SubscriptionState {
		match self.subscription.lock().await.as_ref() {
			Some(subscription) => SubscriptionState::Active {
				address: subscription.address,
				rpc_endpoint: subscription.rpc_endpoint.clone(),
			},
			None => SubscriptionState::Inactive,
		}
	}

	/// The event kinds hooked on the live subscription.
	pub async fn active_hooks(&self) -> Vec<&'static str> {
		match self.subscription.lock().await.as_ref() {
			Some(subscription) => subscription.active_hooks.iter().copied().collect(),
			None => vec![],
		}
	}

	/// Returns the contract address of the record. `None` means the binding is inactive.
	fn target_address(&self, record: &ConfigurationRecord) -> Option<Address> {
		if !record.is_bound() {
			log::debug!(
				target: self.binding.name,
				"-[{}] 💤 No contract address configured",
				sub_display_format(SUB_LOG_TARGET),
			);
			return None;
		}
		match Address::from_str(&record.contract_address) {
			Ok(address) => Some(address),
			Err(err) => {
				log::warn!(
					target: self.binding.name,
					"-[{}] ⚠️  Ignoring invalid contract address {}: {}",
					sub_display_format(SUB_LOG_TARGET),
					record.contract_address,
					err,
				);
				None
			},
		}
	}

	fn hook(&self, kind: &'static EventKind, gate: HookGate) -> LogCallback {
		let dispatcher = self.dispatcher.clone();
		let chain_id = dispatcher.chain_id();
		Arc::new(move |log: Log| {
			gate.pass(|| {
				let dispatcher = dispatcher.clone();
				tokio::spawn(async move { dispatcher.handle(kind, log, chain_id).await });
			});
		})
	}

	async fn subscribe(&self, address: Address, rpc_endpoint: &str) -> LedgerResult<LedgerSubscription> {
		let connection = self.ledger.connect(rpc_endpoint).await?;
		let handle = connection.bind_contract(address, self.binding.events).await?;

		let gate = HookGate::open();
		let mut active_hooks = BTreeSet::new();
		for kind in self.binding.events {
			if let Err(err) = handle.on(kind, self.hook(kind, gate.clone())).await {
				gate.close();
				handle.remove_all_listeners().await;
				return Err(err);
			}
			active_hooks.insert(kind.name);
		}

		Ok(LedgerSubscription {
			address,
			rpc_endpoint: rpc_endpoint.to_string(),
			handle,
			gate,
			active_hooks,
			_connection: connection,
		})
	}

	/// Subscribes, retrying failed attempts as configured. Gives up once a newer record
	/// supersedes `generation`.
	async fn subscribe_with_retry(
		&self,
		address: Address,
		rpc_endpoint: &str,
		generation: u64,
	) -> Option<LedgerSubscription> {
		let mut superseded = self.generation.subscribe();
		let mut retries_remaining = self.retry.retries;
		let mut retry_interval = self.retry.interval;

		loop {
			if self.is_superseded(generation) {
				log::info!(
					target: self.binding.name,
					"-[{}] ⏭️  Skipping {:?} for a newer configuration",
					sub_display_format(SUB_LOG_TARGET),
					address,
				);
				return None;
			}

			match self.subscribe(address, rpc_endpoint).await {
				Ok(subscription) => {
					log::info!(
						target: self.binding.name,
						"-[{}] 🔔 Subscribed to {:?} via {} ({} hooks)",
						sub_display_format(SUB_LOG_TARGET),
						address,
						rpc_endpoint,
						subscription.active_hooks.len(),
					);
					return Some(subscription);
				},
				Err(err) if retries_remaining == 0 => {
					log_and_capture!(
						error,
						self.binding.name,
						SUB_LOG_TARGET,
						format!("{:?}", address),
						"❗️ Failed to subscribe: {}",
						err
					);
					return None;
				},
				Err(err) => {
					log_and_capture!(
						warn,
						self.binding.name,
						SUB_LOG_TARGET,
						format!("{:?}", address),
						"⚠️  Failed to subscribe: {}, Retrying in {}ms ({} left)",
						err,
						retry_interval.as_millis(),
						retries_remaining
					);
					tokio::select! {
						_ = sleep(retry_interval) => {},
						_ = superseded.changed() => {},
					}
					retries_remaining -= 1;
					retry_interval *= RETRY_INTERVAL_COEFFICIENT as u32;
				},
			}
		}
	}

	/// Drops `subscription` once the ledger closes one of its log streams. The next record
	/// subscribes again.
	fn supervise(&self, subscription: &LedgerSubscription) {
		let mut closed = subscription.handle.closed();
		let gate = subscription.gate.clone();
		let current = self.subscription.clone();
		let target = self.binding.name;

		tokio::spawn(async move {
			while !*closed.borrow_and_update() {
				if closed.changed().await.is_err() {
					return;
				}
			}

			let mut current = current.lock().await;
			if !current.as_ref().is_some_and(|subscription| subscription.gate.same(&gate)) {
				return;
			}
			if let Some(subscription) = current.take() {
				log_and_capture!(
					error,
					target,
					SUB_LOG_TARGET,
					format!("{:?}", subscription.address),
					"❗️ Ledger closed the log stream, dropping the subscription"
				);
				subscription.teardown(target).await;
			}
		});
	}

	/// Reconciles `record` unless a newer record superseded `generation`.
	pub(super) async fn reconcile(&self, record: ConfigurationRecord, generation: u64) {
		let mut subscription = self.subscription.lock().await;
		if self.is_superseded(generation) {
			return;
		}

		if record.paused {
			if let Some(current) = subscription.take() {
				log::info!(
					target: self.binding.name,
					"-[{}] ⏸️  Binding paused",
					sub_display_format(SUB_LOG_TARGET),
				);
				current.teardown(self.binding.name).await;
			}
			return;
		}

		let Some(address) = self.target_address(&record) else {
			if let Some(current) = subscription.take() {
				current.teardown(self.binding.name).await;
			}
			return;
		};

		if let Some(current) = subscription.as_ref() {
			if current.address == address &&
				current.rpc_endpoint == record.rpc_endpoint &&
				!current.is_closed()
			{
				return;
			}
		}
		if let Some(current) = subscription.take() {
			current.teardown(self.binding.name).await;
		}

		*subscription = self.subscribe_with_retry(address, &record.rpc_endpoint, generation).await;
		if let Some(current) = subscription.as_ref() {
			self.supervise(current);
		}
	}
}

#[async_trait::async_trait]
impl ConfigHandler for LifecycleManager {
	type Update = ConfigurationRecord;

	async fn on_config_update(&self, record: ConfigurationRecord) {
		let generation = next_generation(&self.generation);
		self.reconcile(record, generation).await;
	}

	async fn shutdown(&self) {
		if let Some(current) = self.subscription.lock().await.take() {
			current.teardown(self.binding.name).await;
		}
	}

	fn supersede(&self) {
		next_generation(&self.generation);
	}
}
