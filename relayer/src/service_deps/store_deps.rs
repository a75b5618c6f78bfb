use kr_client::store::{DocumentSinks, FileDocumentStore};
use kr_primitives::{constants::errors::INVALID_STORE_ROOT, traits::DocumentStore};

use super::*;

pub struct StoreDeps {
	/// The document store holding every binding configuration, endpoint and error record.
	pub store: Arc<dyn DocumentStore>,
	/// The error sink and polling registry written by the dispatchers.
	pub sinks: Arc<DocumentSinks>,
}

impl StoreDeps {
	pub fn new(config: &Configuration) -> Self {
		let store_config = &config.relayer_config.store;

		let store: Arc<dyn DocumentStore> = Arc::new(
			FileDocumentStore::new(
				&store_config.root,
				Duration::from_millis(store_config.poll_interval_ms),
			)
			.expect(INVALID_STORE_ROOT),
		);
		let sinks = Arc::new(DocumentSinks::new(store.clone()));

		Self { store, sinks }
	}
}
