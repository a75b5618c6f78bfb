pub const INVALID_CONTRACT_ABI: &str =
	"Invalid contract ABI provided. Please check your binding's event signatures.";

pub const INVALID_BINDING_NAME: &str =
	"Unknown binding name provided. Please check your `bindings` configuration.";

pub const INVALID_CONFIG_FILE_PATH: &str =
	"Invalid config.yaml file path provided. Please check your file path.";

pub const INVALID_CONFIG_FILE_STRUCTURE: &str =
	"Invalid config.yaml file structure provided. Please check your file structure.";

pub const INVALID_STORE_ROOT: &str =
	"Invalid document store root provided. Please check your `store.root` configuration.";

pub const MISSING_API_KEY: &str =
	"Delivery API key is not set. Requests will be sent with an empty key.";

pub const PARAMETER_OUT_OF_RANGE: &str =
	"Some configuration parameters are out of range. Please check your configuration file.";

pub const DELIVERY_CLIENT_INITIALIZATION_ERROR: &str =
	"Failed to initialize the delivery client. Please check your `delivery` configuration.";
