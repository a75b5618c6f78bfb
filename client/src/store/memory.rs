use std::{
	collections::BTreeMap,
	sync::{Mutex, PoisonError},
};

use futures::{stream::BoxStream, StreamExt};
use kr_primitives::{errors::StoreResult, traits::DocumentStore};
use serde_json::Value;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A document store kept in memory. Watchers observe the latest value of a document, so
/// rapid successive writes may be coalesced.
#[derive(Default)]
pub struct MemoryDocumentStore {
	documents: Mutex<BTreeMap<String, watch::Sender<Option<Value>>>>,
}

impl MemoryDocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn update(&self, path: &str, value: Option<Value>) {
		let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
		documents.entry(path.to_string()).or_insert_with(|| watch::channel(None).0).send_replace(value);
	}

	/// Deletes the document. Watchers observe `None`.
	pub fn remove(&self, path: &str) {
		self.update(path, None);
	}

	/// The paths of every existing document below the given prefix.
	pub fn paths(&self, prefix: &str) -> Vec<String> {
		let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
		documents
			.iter()
			.filter(|(path, sender)| path.starts_with(prefix) && sender.borrow().is_some())
			.map(|(path, _)| path.clone())
			.collect()
	}
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
	async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
		let documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
		Ok(documents.get(path).and_then(|sender| sender.borrow().clone()))
	}

	async fn set(&self, path: &str, value: Value) -> StoreResult<()> {
		self.update(path, Some(value));
		Ok(())
	}

	fn watch(&self, path: &str) -> BoxStream<'static, Option<Value>> {
		let mut documents = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
		let receiver =
			documents.entry(path.to_string()).or_insert_with(|| watch::channel(None).0).subscribe();
		WatchStream::new(receiver).boxed()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn watchers_see_the_snapshot_and_later_changes() {
		let store = MemoryDocumentStore::new();
		store.set("events/registry", json!({ "college": "0x01" })).await.unwrap();

		let mut watch = store.watch("events/registry");
		assert_eq!(watch.next().await, Some(Some(json!({ "college": "0x01" }))));

		store.set("events/registry", json!({ "college": "0x02" })).await.unwrap();
		assert_eq!(watch.next().await, Some(Some(json!({ "college": "0x02" }))));

		store.remove("events/registry");
		assert_eq!(watch.next().await, Some(None));
		assert_eq!(store.get("events/registry").await.unwrap(), None);
	}

	#[tokio::test]
	async fn missing_documents_are_watched_as_none() {
		let store = MemoryDocumentStore::new();
		let mut watch = store.watch("events/erc20");
		assert_eq!(watch.next().await, Some(None));

		store.set("events/erc20", json!({ "contracts": [] })).await.unwrap();
		assert_eq!(watch.next().await, Some(Some(json!({ "contracts": [] }))));
		assert_eq!(store.paths("events/"), vec!["events/erc20".to_string()]);
	}
}
