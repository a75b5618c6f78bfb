use serde_json::Value;

use crate::{
	constants::store::{
		ADDRESS_FIELD, CONTRACTS_FIELD, CONTRACT_ADDRESS_FIELD, LISTENER_RPC_URL_FIELD,
		PAUSED_FIELD, RPC_URL_FIELD,
	},
	events::EventKind,
	utils::document_path,
};

/// The desired subscription state of a single contract binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationRecord {
	/// The contract address. Empty when the binding is unbound.
	pub contract_address: String,
	/// The RPC endpoint used to listen for events.
	pub rpc_endpoint: String,
	pub paused: bool,
}

impl ConfigurationRecord {
	pub fn new(contract_address: &str, rpc_endpoint: &str, paused: bool) -> Self {
		Self {
			contract_address: contract_address.trim().to_string(),
			rpc_endpoint: rpc_endpoint.trim().to_string(),
			paused,
		}
	}

	/// A record that tears down any live subscription.
	pub fn paused() -> Self {
		Self { paused: true, ..Default::default() }
	}

	pub fn is_bound(&self) -> bool {
		!self.contract_address.is_empty()
	}
}

/// Where and how a binding's configuration document is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayout {
	/// One document shared by a family of contracts. Each contract address is stored under
	/// its own field next to a common `rpcUrl`. There is no pause flag.
	Shared { document: &'static str, address_field: &'static str },
	/// One document per contract with `contractAddress`, `listenerRpcUrl` and `paused`.
	Dedicated { document: &'static str },
	/// One document listing many contracts under `contracts: [{ address }]`.
	Collection { document: &'static str },
}

impl ConfigLayout {
	pub fn document(&self) -> &'static str {
		match self {
			Self::Shared { document, .. }
			| Self::Dedicated { document }
			| Self::Collection { document } => document,
		}
	}

	/// The full document path below the given events directory.
	pub fn document_path(&self, events_directory: &str) -> String {
		document_path(&[events_directory, self.document()])
	}

	pub fn is_collection(&self) -> bool {
		matches!(self, Self::Collection { .. })
	}

	/// Reads the configuration records out of a document snapshot. Single contract layouts
	/// always yield exactly one record; a missing document yields an unbound record.
	pub fn read(&self, document: Option<&Value>) -> Vec<ConfigurationRecord> {
		let Some(document) = document else {
			return match self {
				Self::Collection { .. } => vec![],
				_ => vec![ConfigurationRecord::default()],
			};
		};

		match self {
			Self::Shared { address_field, .. } => vec![ConfigurationRecord::new(
				str_field(document, address_field),
				str_field(document, RPC_URL_FIELD),
				false,
			)],
			Self::Dedicated { .. } => vec![ConfigurationRecord::new(
				str_field(document, CONTRACT_ADDRESS_FIELD),
				listener_endpoint(document),
				bool_field(document, PAUSED_FIELD),
			)],
			Self::Collection { .. } => {
				let rpc_endpoint = listener_endpoint(document);
				let paused = bool_field(document, PAUSED_FIELD);
				document
					.get(CONTRACTS_FIELD)
					.and_then(Value::as_array)
					.map(|contracts| {
						contracts
							.iter()
							.map(|contract| {
								ConfigurationRecord::new(
									str_field(contract, ADDRESS_FIELD),
									rpc_endpoint,
									paused,
								)
							})
							.filter(ConfigurationRecord::is_bound)
							.collect()
					})
					.unwrap_or_default()
			},
		}
	}
}

fn str_field<'a>(document: &'a Value, field: &str) -> &'a str {
	document.get(field).and_then(Value::as_str).unwrap_or_default()
}

fn bool_field(document: &Value, field: &str) -> bool {
	document.get(field).and_then(Value::as_bool).unwrap_or(false)
}

fn listener_endpoint(document: &Value) -> &str {
	match str_field(document, LISTENER_RPC_URL_FIELD) {
		"" => str_field(document, RPC_URL_FIELD),
		endpoint => endpoint,
	}
}

/// A logical contract binding: which configuration to watch and which events to relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSpec {
	/// Unique binding name, also used as the log target.
	pub name: &'static str,
	pub layout: ConfigLayout,
	pub events: &'static [EventKind],
}
