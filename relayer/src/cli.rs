use chrono::{Datelike, Local};
use clap::{CommandFactory, FromArgMatches, Parser};
use kr_primitives::{constants::cli::DEFAULT_CONFIG_PATH, utils::sub_display_format};

#[derive(Debug, Parser)]
pub struct Cli {
	/// The path of the relayer configuration file.
	#[arg(long, value_name = "PATH")]
	pub config: Option<String>,
}

impl Cli {
	/// Helper function used to parse the command line arguments. This is the equivalent of
	/// [`clap::Parser::parse()`].
	///
	/// Creates `Self` from the command line arguments. Print the
	/// error message and quit the program in case of failure.
	pub fn from_args() -> Self
	where
		Self: Parser + Sized,
	{
		Self::from_iter(&mut std::env::args_os())
	}

	/// Helper function used to parse the command line arguments. This is the equivalent of
	/// [`clap::Parser::parse_from`].
	///
	/// Creates `Self` from any iterator over arguments.
	/// Print the error message and quit the program in case of failure.
	fn from_iter<I>(iter: I) -> Self
	where
		Self: Parser + Sized,
		I: IntoIterator,
		I::Item: Into<std::ffi::OsString> + Clone,
	{
		let app = <Self as CommandFactory>::command();

		let mut full_version = Self::impl_version();
		full_version.push('\n');

		let name = Self::executable_name();
		let author = Self::author();
		let about = Self::description();
		let app = app
			.name(name)
			.author(author)
			.about(about)
			.version(full_version)
			.propagate_version(true);

		let matches = app.try_get_matches_from(iter).unwrap_or_else(|e| e.exit());

		<Self as FromArgMatches>::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
	}

	/// The configuration file path. Falls back to `config.yaml` in the working directory.
	pub fn load_spec(&self) -> String {
		self.config.clone().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
	}

	/// Implementation name.
	fn impl_name() -> String {
		"KOR Event Relayer".into()
	}

	/// Implementation version.
	fn impl_version() -> String {
		env!("CARGO_PKG_VERSION").into()
	}

	/// Executable file name.
	///
	/// Extracts the file name from `std::env::current_exe()`.
	/// Resorts to the env var `CARGO_PKG_NAME` in case of Error.
	fn executable_name() -> String {
		std::env::current_exe()
			.ok()
			.and_then(|e| e.file_name().map(|s| s.to_os_string()))
			.and_then(|w| w.into_string().ok())
			.unwrap_or_else(|| env!("CARGO_PKG_NAME").into())
	}

	/// Executable file description.
	fn description() -> String {
		env!("CARGO_PKG_DESCRIPTION").into()
	}

	/// Executable file author.
	fn author() -> String {
		env!("CARGO_PKG_AUTHORS").into()
	}

	/// Copyright starting year (x-current year)
	fn copyright_start_year() -> i32 {
		2024
	}

	/// Log information about the relayer itself.
	pub fn print_relayer_infos(&self) {
		let sub_target = sub_display_format(SUB_LOG_TARGET);

		log::info!(target: LOG_TARGET, "-[{}] {}", sub_target, Self::impl_name());
		log::info!(target: LOG_TARGET, "-[{}] ✌️  version {}", sub_target, Self::impl_version());
		log::info!(
			target: LOG_TARGET,
			"-[{}] ❤️  by {}, {}-{}",
			sub_target,
			Self::author(),
			Self::copyright_start_year(),
			Local::now().year()
		);
		log::info!(target: LOG_TARGET, "-[{}] 📄 Config: {}", sub_target, self.load_spec());
	}
}

pub const LOG_TARGET: &str = "kor-event-relayer";
pub const SUB_LOG_TARGET: &str = "main";
