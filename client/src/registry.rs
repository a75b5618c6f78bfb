use std::sync::Arc;

use kr_primitives::{
	binding::BindingSpec,
	contracts::{find_binding, BINDINGS},
	errors::{CodecResult, RegistryError, RegistryResult},
	traits::{DocumentStore, LedgerClient},
	utils::sub_display_format,
};
use tokio::task::JoinSet;

use crate::{
	eth::{
		handlers::{CollectionManager, EventDispatcher, LifecycleManager, RelayContext, RetryPolicy},
		traits::ConfigHandler,
	},
	store::{watch_record, watch_records},
};

const SUB_LOG_TARGET: &str = "binding-registry";

/// The manager reconciling a single binding.
pub enum BindingManager {
	Single(Arc<LifecycleManager>),
	Collection(Arc<CollectionManager>),
}

impl BindingManager {
	async fn shutdown(&self) {
		match self {
			Self::Single(manager) => manager.shutdown().await,
			Self::Collection(manager) => manager.shutdown().await,
		}
	}
}

/// Returns the bindings with the given names, or every binding when no names are given.
/// Fails with the first unknown name.
pub fn select_bindings(names: Option<&[String]>) -> RegistryResult<Vec<&'static BindingSpec>> {
	match names {
		Some(names) => names
			.iter()
			.map(|name| {
				find_binding(name.trim())
					.ok_or_else(|| RegistryError::UnknownBinding(name.trim().to_string()))
			})
			.collect(),
		None => Ok(BINDINGS.iter().collect()),
	}
}

/// Composes one manager per binding and feeds each with its configuration stream.
pub struct BindingRegistry {
	store: Arc<dyn DocumentStore>,
	events_directory: String,
	managers: Vec<(&'static BindingSpec, BindingManager)>,
}

impl BindingRegistry {
	pub fn new(
		bindings: Vec<&'static BindingSpec>,
		ledger: Arc<dyn LedgerClient>,
		context: Arc<RelayContext>,
		retry: RetryPolicy,
		store: Arc<dyn DocumentStore>,
	) -> CodecResult<Self> {
		let events_directory = context.namespace.clone();
		let mut managers = vec![];
		for binding in bindings {
			let dispatcher = Arc::new(EventDispatcher::new(binding, context.clone())?);
			let manager = if binding.layout.is_collection() {
				BindingManager::Collection(Arc::new(CollectionManager::new(
					binding,
					ledger.clone(),
					dispatcher,
					retry,
				)))
			} else {
				BindingManager::Single(Arc::new(LifecycleManager::new(
					binding,
					ledger.clone(),
					dispatcher,
					retry,
				)))
			};
			managers.push((binding, manager));
		}

		Ok(Self { store, events_directory, managers })
	}

	pub fn manager(&self, name: &str) -> Option<&BindingManager> {
		self.managers
			.iter()
			.find(|(binding, _)| binding.name == name)
			.map(|(_, manager)| manager)
	}

	pub fn len(&self) -> usize {
		self.managers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.managers.is_empty()
	}

	/// Spawns one task per binding. Each task yields the binding name once its configuration
	/// stream ends.
	pub fn spawn(&self, tasks: &mut JoinSet<&'static str>) {
		for (binding, manager) in &self.managers {
			let binding: &'static BindingSpec = *binding;
			match manager {
				BindingManager::Single(manager) => {
					let manager = manager.clone();
					let updates = watch_record(&self.store, &self.events_directory, binding);
					tasks.spawn(async move {
						manager.run(updates).await;
						binding.name
					});
				},
				BindingManager::Collection(manager) => {
					let manager = manager.clone();
					let updates = watch_records(&self.store, &self.events_directory, binding);
					tasks.spawn(async move {
						manager.run(updates).await;
						binding.name
					});
				},
			}
			log::info!(
				target: binding.name,
				"-[{}] 👀 Watching {}",
				sub_display_format(SUB_LOG_TARGET),
				binding.layout.document_path(&self.events_directory),
			);
		}
	}

	/// Tears down every live subscription.
	pub async fn shutdown(&self) {
		for (binding, manager) in &self.managers {
			manager.shutdown().await;
			log::debug!(
				target: binding.name,
				"-[{}] 🛑 Binding shut down",
				sub_display_format(SUB_LOG_TARGET),
			);
		}
	}
}
