use kr_primitives::{
	cli::{Configuration, RelayerConfig, Result},
	constants::errors::{INVALID_CONFIG_FILE_PATH, INVALID_CONFIG_FILE_STRUCTURE, MISSING_API_KEY},
	utils::sub_display_format,
};

const LOG_TARGET: &str = "kor-event-relayer";
const SUB_LOG_TARGET: &str = "config";

/// Loads the relayer configuration from the given YAML file and reads the delivery API key
/// from the configured environment variable.
pub fn create_configuration(
	tokio_handle: tokio::runtime::Handle,
	config_path: &str,
) -> Result<Configuration> {
	let config_file = std::fs::File::open(config_path)
		.map_err(|err| format!("{} ({}: {})", INVALID_CONFIG_FILE_PATH, config_path, err))?;
	let relayer_config: RelayerConfig = serde_yaml::from_reader(config_file)
		.map_err(|err| format!("{} ({})", INVALID_CONFIG_FILE_STRUCTURE, err))?;

	let api_key = read_api_key(&relayer_config.delivery.api_key_env);

	Ok(Configuration { relayer_config, api_key, tokio_handle })
}

fn read_api_key(variable: &str) -> String {
	match std::env::var(variable) {
		Ok(api_key) if !api_key.is_empty() => api_key,
		_ => {
			log::warn!(
				target: LOG_TARGET,
				"-[{}] ⚠️  {} [variable: {}]",
				sub_display_format(SUB_LOG_TARGET),
				MISSING_API_KEY,
				variable,
			);
			String::new()
		},
	}
}
