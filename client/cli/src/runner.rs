use kr_primitives::{cli::Configuration, utils::sub_display_format};

use futures::{future, future::FutureExt, pin_mut, select, Future};
use sentry::ClientInitGuard;
use std::time::Duration;
use tokio::task::JoinSet;

const LOG_TARGET: &str = "kor-event-relayer";
const SUB_LOG_TARGET: &str = "runner";

#[cfg(target_family = "unix")]
async fn main<F, E>(func: F) -> Result<(), E>
where
	F: Future<Output = Result<(), E>> + future::FusedFuture,
	E: std::error::Error + Send + Sync + 'static + From<std::io::Error>,
{
	use tokio::signal::unix::{signal, SignalKind};

	let mut stream_int = signal(SignalKind::interrupt())?;
	let mut stream_term = signal(SignalKind::terminate())?;

	let t1 = stream_int.recv().fuse();
	let t2 = stream_term.recv().fuse();
	let t3 = func;

	pin_mut!(t1, t2, t3);

	select! {
		_ = t1 => {},
		_ = t2 => {},
		res = t3 => res?,
	}

	Ok(())
}

/// Resolves once any essential task exits.
async fn essential_tasks<E>(mut tasks: JoinSet<&'static str>) -> Result<(), E> {
	match tasks.join_next().await {
		Some(Ok(name)) => log::error!(
			target: LOG_TARGET,
			"-[{}] ❗️ Essential task {} exited",
			sub_display_format(SUB_LOG_TARGET),
			name,
		),
		Some(Err(err)) => log::error!(
			target: LOG_TARGET,
			"-[{}] ❗️ Essential task failed: {}",
			sub_display_format(SUB_LOG_TARGET),
			err,
		),
		None => log::warn!(
			target: LOG_TARGET,
			"-[{}] ⚠️  No essential tasks were spawned",
			sub_display_format(SUB_LOG_TARGET),
		),
	}
	Ok(())
}

/// Runs the essential tasks until one exits or a signal arrives, then awaits `shutdown`.
async fn until_exit<S, E>(tasks: JoinSet<&'static str>, shutdown: S) -> Result<(), E>
where
	S: Future<Output = ()>,
	E: std::error::Error + Send + Sync + 'static + From<std::io::Error>,
{
	// The task set is dropped with the future, which aborts every binding task before the
	// subscriptions are torn down.
	let res = main(essential_tasks(tasks).fuse()).await;

	log::info!(
		target: LOG_TARGET,
		"-[{}] 🛑 Tearing down live subscriptions",
		sub_display_format(SUB_LOG_TARGET),
	);
	shutdown.await;

	res
}

/// Build a tokio runtime with all features
pub fn build_runtime() -> Result<tokio::runtime::Runtime, std::io::Error> {
	tokio::runtime::Builder::new_multi_thread().enable_all().build()
}

/// A KOR event relayer CLI runtime that can be used to run a relayer
pub struct Runner {
	config: Configuration,
	tokio_runtime: tokio::runtime::Runtime,
	pub sentry_client: Option<ClientInitGuard>,
}

impl Runner {
	pub fn new(config: Configuration, tokio_runtime: tokio::runtime::Runtime) -> Runner {
		Runner {
			sentry_client: kr_metrics::build_sentry_client(
				config.relayer_config.system.chain_id,
				config.relayer_config.sentry_config.clone(),
			),
			config,
			tokio_runtime,
		}
	}

	/// Runs the relayer until an essential task exits or a signal arrives. `initialize`
	/// yields the essential tasks and the future tearing them down.
	pub fn run_relayer_until_exit<F, S, E>(
		self,
		initialize: impl FnOnce(Configuration) -> F,
	) -> Result<(), E>
	where
		F: Future<Output = Result<(JoinSet<&'static str>, S), E>>,
		S: Future<Output = ()>,
		E: std::error::Error + Send + Sync + 'static + From<std::io::Error>,
	{
		let (tasks, shutdown) = self.tokio_runtime.block_on(initialize(self.config))?;
		let res = self.tokio_runtime.block_on(until_exit(tasks, shutdown));

		// Give all futures 60 seconds to shutdown, before tokio "leaks" them.
		self.tokio_runtime.shutdown_timeout(Duration::from_secs(60));

		res
	}
}
