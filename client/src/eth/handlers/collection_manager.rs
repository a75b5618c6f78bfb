use std::{collections::BTreeMap, str::FromStr, sync::Arc};

use ethers::types::Address;
use kr_primitives::{
	binding::{BindingSpec, ConfigurationRecord},
	traits::LedgerClient,
	utils::sub_display_format,
};
use tokio::sync::{watch, Mutex};

use crate::eth::traits::ConfigHandler;

use super::{lifecycle_manager::next_generation, EventDispatcher, LifecycleManager, RetryPolicy};

const SUB_LOG_TARGET: &str = "collection-manager";

/// Keeps one lifecycle manager per contract listed in a collection document.
pub struct CollectionManager {
	binding: &'static BindingSpec,
	ledger: Arc<dyn LedgerClient>,
	dispatcher: Arc<EventDispatcher>,
	retry: RetryPolicy,
	children: Mutex<BTreeMap<Address, Arc<LifecycleManager>>>,
	/// Shared with every child. Bumped for every collection document.
	generation: Arc<watch::Sender<u64>>,
}

impl CollectionManager {
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
			children: Mutex::new(BTreeMap::new()),
			generation: Arc::new(watch::channel(0).0),
		}
	}

	/// The contracts currently managed.
	pub async fn contracts(&self) -> Vec<Address> {
		self.children.lock().await.keys().copied().collect()
	}

	pub async fn child(&self, address: &Address) -> Option<Arc<LifecycleManager>> {
		self.children.lock().await.get(address).cloned()
	}
}

#[async_trait::async_trait]
impl ConfigHandler for CollectionManager {
	type Update = Vec<ConfigurationRecord>;

	async fn on_config_update(&self, records: Vec<ConfigurationRecord>) {
		let generation = next_generation(&self.generation);
		let mut children = self.children.lock().await;
		if *self.generation.borrow() != generation {
			return;
		}

		let mut desired = BTreeMap::new();
		for record in records {
			match Address::from_str(&record.contract_address) {
				Ok(address) => {
					desired.insert(address, record);
				},
				Err(err) => log::warn!(
					target: self.binding.name,
					"-[{}] ⚠️  Ignoring invalid contract address {}: {}",
					sub_display_format(SUB_LOG_TARGET),
					record.contract_address,
					err,
				),
			}
		}

		let removed: Vec<Address> =
			children.keys().filter(|address| !desired.contains_key(address)).copied().collect();
		for address in removed {
			if let Some(child) = children.remove(&address) {
				child.shutdown().await;
				log::info!(
					target: self.binding.name,
					"-[{}] ➖ Removed contract {:?}",
					sub_display_format(SUB_LOG_TARGET),
					address,
				);
			}
		}

		for (address, record) in desired {
			let child = children
				.entry(address)
				.or_insert_with(|| {
					Arc::new(
						LifecycleManager::new(
							self.binding,
							self.ledger.clone(),
							self.dispatcher.clone(),
							self.retry,
						)
						.with_generation(self.generation.clone()),
					)
				})
				.clone();
			child.reconcile(record, generation).await;
		}
	}

	async fn shutdown(&self) {
		let children = std::mem::take(&mut *self.children.lock().await);
		for child in children.into_values() {
			child.shutdown().await;
		}
	}

	fn supersede(&self) {
		next_generation(&self.generation);
	}
}
