use std::sync::Arc;

use kr_primitives::{
	constants::store::{ERRORS_COLLECTION, POLLING_REGISTRY_COLLECTION},
	errors::StoreResult,
	events::{ErrorRecord, PollingEntry},
	traits::{DocumentStore, ErrorSink, PollingRegistry},
	utils::document_path,
};

/// Persists delivery errors and polling registrations as documents.
pub struct DocumentSinks {
	store: Arc<dyn DocumentStore>,
}

impl DocumentSinks {
	pub fn new(store: Arc<dyn DocumentStore>) -> Self {
		Self { store }
	}
}

#[async_trait::async_trait]
impl ErrorSink for DocumentSinks {
	async fn save_error(&self, record: ErrorRecord) -> StoreResult<()> {
		let path = document_path(&[ERRORS_COLLECTION, record.tx_hash.as_str()]);
		self.store.set(&path, serde_json::to_value(&record)?).await
	}
}

#[async_trait::async_trait]
impl PollingRegistry for DocumentSinks {
	async fn register(&self, namespace: &str, entry: PollingEntry) -> StoreResult<()> {
		let key = entry.address.to_lowercase();
		let path = document_path(&[namespace, POLLING_REGISTRY_COLLECTION, key.as_str()]);
		self.store.set(&path, serde_json::to_value(&entry)?).await
	}
}
