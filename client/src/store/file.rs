use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
	time::Duration,
};

use futures::{stream::BoxStream, StreamExt};
use kr_primitives::{
	errors::{StoreError, StoreResult},
	traits::DocumentStore,
	utils::sub_display_format,
};
use serde_json::Value;
use tokio::{sync::watch, time::sleep};
use tokio_stream::wrappers::WatchStream;

const LOG_TARGET: &str = "document-store";
const SUB_LOG_TARGET: &str = "file-store";

/// A document store keeping every document as a JSON file below a root directory.
/// `events/registry` is stored at `<root>/events/registry.json`. Changes are detected by
/// polling.
pub struct FileDocumentStore {
	root: PathBuf,
	poll_interval: Duration,
}

impl FileDocumentStore {
	pub fn new(root: impl Into<PathBuf>, poll_interval: Duration) -> StoreResult<Self> {
		let root = root.into();
		std::fs::create_dir_all(&root)?;
		Ok(Self { root, poll_interval })
	}

	fn file_path(&self, path: &str) -> StoreResult<PathBuf> {
		let segments: Vec<&str> = path.split('/').collect();
		let invalid = |segment: &&str| {
			segment.is_empty() || *segment == "." || *segment == ".." || segment.contains('\\')
		};
		if segments.iter().any(invalid) {
			return Err(StoreError::InvalidPath(path.to_string()));
		}

		let mut file = self.root.clone();
		file.extend(&segments[..segments.len() - 1]);
		file.push(format!("{}.json", segments[segments.len() - 1]));
		Ok(file)
	}
}

async fn read_document(file: &Path) -> StoreResult<Option<Value>> {
	match tokio::fs::read(file).await {
		Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
		Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
		Err(err) => Err(err.into()),
	}
}

#[async_trait::async_trait]
impl DocumentStore for FileDocumentStore {
	async fn get(&self, path: &str) -> StoreResult<Option<Value>> {
		read_document(&self.file_path(path)?).await
	}

	async fn set(&self, path: &str, value: Value) -> StoreResult<()> {
		let file = self.file_path(path)?;
		if let Some(parent) = file.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}
		// write aside and rename so watchers never read a partial document
		let staged = file.with_extension("json.tmp");
		tokio::fs::write(&staged, serde_json::to_vec_pretty(&value)?).await?;
		tokio::fs::rename(&staged, &file).await?;
		Ok(())
	}

	fn watch(&self, path: &str) -> BoxStream<'static, Option<Value>> {
		let (sender, receiver) = watch::channel(None);
		let file = match self.file_path(path) {
			Ok(file) => file,
			Err(err) => {
				log::error!(
					target: LOG_TARGET,
					"-[{}] ❗️ Cannot watch {}: {}",
					sub_display_format(SUB_LOG_TARGET),
					path,
					err,
				);
				return futures::stream::empty().boxed();
			},
		};
		let poll_interval = self.poll_interval;

		tokio::spawn(async move {
			let mut is_initial = true;
			while !sender.is_closed() {
				match read_document(&file).await {
					Ok(document) if is_initial => {
						sender.send_replace(document);
						is_initial = false;
					},
					Ok(document) => {
						sender.send_if_modified(|current| {
							if *current == document {
								return false;
							}
							*current = document;
							true
						});
					},
					Err(err) => log::warn!(
						target: LOG_TARGET,
						"-[{}] ⚠️  Failed to read {}: {}",
						sub_display_format(SUB_LOG_TARGET),
						file.display(),
						err,
					),
				}
				sleep(poll_interval).await;
			}
		});

		WatchStream::from_changes(receiver).boxed()
	}
}
