use std::sync::Arc;

use futures::{stream::BoxStream, StreamExt};
use kr_primitives::{
	binding::{BindingSpec, ConfigurationRecord},
	traits::DocumentStore,
};

/// Watches the configuration records of a binding.
pub fn watch_records(
	store: &Arc<dyn DocumentStore>,
	events_directory: &str,
	binding: &'static BindingSpec,
) -> BoxStream<'static, Vec<ConfigurationRecord>> {
	store
		.watch(&binding.layout.document_path(events_directory))
		.map(move |document| binding.layout.read(document.as_ref()))
		.boxed()
}

/// Watches the configuration record of a single contract binding.
pub fn watch_record(
	store: &Arc<dyn DocumentStore>,
	events_directory: &str,
	binding: &'static BindingSpec,
) -> BoxStream<'static, ConfigurationRecord> {
	watch_records(store, events_directory, binding)
		.map(|records| records.into_iter().next().unwrap_or_default())
		.boxed()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryDocumentStore;
	use kr_primitives::contracts::find_binding;
	use serde_json::json;

	#[tokio::test]
	async fn maps_documents_into_records() {
		let memory = Arc::new(MemoryDocumentStore::new());
		let store: Arc<dyn DocumentStore> = memory.clone();
		let binding = find_binding("athlete-payment-manager").unwrap();

		let mut records = watch_record(&store, "events-base", binding);
		assert_eq!(records.next().await, Some(ConfigurationRecord::default()));

		store
			.set(
				"events-base/pollers/contracts/athletePaymentManager",
				json!({
					"contractAddress": "0x00000000000000000000000000000000000000a1",
					"listenerRpcUrl": "wss://rpc.example.com",
					"paused": false,
				}),
			)
			.await
			.unwrap();
		assert_eq!(
			records.next().await,
			Some(ConfigurationRecord::new(
				"0x00000000000000000000000000000000000000a1",
				"wss://rpc.example.com",
				false
			))
		);
	}
}
