mod cli;
mod service;
mod service_deps;
mod verification;

use std::io::Write;

use chrono::Local;
use env_logger::fmt::Color;
use kr_cli::{
	create_configuration,
	runner::{build_runtime, Runner},
};
use kr_primitives::{cli::Error, utils::sub_display_format};
use log::Level;

use crate::cli::Cli;

fn main() {
	env_logger::Builder::new()
		.format(|buf, record| {
			let mut level_style = buf.style();
			let color = match record.level() {
				Level::Info => Color::Green,
				_ => Color::Red,
			};

			level_style.set_color(color).set_bold(true);

			writeln!(
				buf,
				"{} {:05} {:020}]{}",
				Local::now().format("%Y-%m-%dT%H:%M:%S"),
				level_style.value(record.level()),
				record.target(),
				record.args(),
			)
		})
		.filter(None, log::LevelFilter::Info)
		.parse_default_env()
		.init();

	let cli = Cli::from_args();

	let tokio_runtime = build_runtime().unwrap();
	let configuration =
		create_configuration(tokio_runtime.handle().clone(), &cli.load_spec()).unwrap();

	cli.print_relayer_infos();

	let runner = Runner::new(configuration, tokio_runtime);
	runner
		.run_relayer_until_exit(|config| async move { service::relay(config).await })
		.unwrap_or_else(|err: Error| {
			log::error!(
				target: cli::LOG_TARGET,
				"-[{}] ❗️ Relayer stopped: {}",
				sub_display_format(cli::SUB_LOG_TARGET),
				err
			)
		});
}
