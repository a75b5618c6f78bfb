use futures::{stream::BoxStream, StreamExt};

#[async_trait::async_trait]
pub trait ConfigHandler: Send + Sync {
	/// The configuration observed on every store notification.
	type Update: Send + 'static;

	/// Reconciles the live subscriptions with the given configuration.
	async fn on_config_update(&self, update: Self::Update);

	/// Tears down every live subscription.
	async fn shutdown(&self);

	/// Marks the reconciliation in progress as outdated. Pending retries give up.
	fn supersede(&self) {}

	/// Starts the handler and reconciles every configuration update until the stream ends.
	/// An update arriving mid reconciliation supersedes the one in progress.
	async fn run(&self, updates: BoxStream<'static, Self::Update>) {
		let mut updates = updates.fuse();
		let mut next = updates.next().await;
		while let Some(update) = next.take() {
			let mut reconcile = self.on_config_update(update);
			next = tokio::select! {
				_ = &mut reconcile => updates.next().await,
				Some(update) = updates.next() => {
					self.supersede();
					reconcile.await;
					Some(update)
				},
			};
		}
	}
}
