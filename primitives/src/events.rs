use ethers::{
	abi::{Event, Token},
	types::{Address, H256, I256},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::{CodecError, CodecResult};

/// A secondary write performed after an event was dispatched. The address carried by
/// `address_param` is registered for block polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossReference {
	pub address_param: &'static str,
}

/// A contract event the relayer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKind {
	/// The event name as declared in the contract.
	pub name: &'static str,
	/// The human readable ABI signature. ex) `event Transfer(address from, address to, uint256 value)`
	pub signature: &'static str,
	/// The delivery endpoint name resolved on every dispatch.
	pub endpoint: &'static str,
	pub cross_reference: Option<CrossReference>,
}

impl EventKind {
	pub const fn new(name: &'static str, signature: &'static str, endpoint: &'static str) -> Self {
		Self { name, signature, endpoint, cross_reference: None }
	}

	pub const fn with_cross_reference(mut self, address_param: &'static str) -> Self {
		self.cross_reference = Some(CrossReference { address_param });
		self
	}

	/// Parses the event's ABI definition.
	pub fn abi(&self) -> CodecResult<Event> {
		let abi = ethers::abi::parse_abi(&[self.signature])
			.map_err(|err| CodecError::InvalidSignature(self.name, err.to_string()))?;
		abi.event(self.name)
			.cloned()
			.map_err(|err| CodecError::InvalidSignature(self.name, err.to_string()))
	}

	/// The first log topic emitted with this event.
	pub fn topic(&self) -> CodecResult<H256> {
		Ok(self.abi()?.signature())
	}
}

/// A single decoded event parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct EventField {
	pub name: String,
	pub value: Token,
}

/// A raw log translated through its event ABI.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
	/// The event name.
	pub kind: &'static str,
	pub chain_id: u64,
	/// The emitting contract.
	pub contract_address: Address,
	pub transaction_hash: H256,
	pub block_number: u64,
	pub log_index: u64,
	/// Parameters in ABI declaration order.
	pub fields: Vec<EventField>,
}

impl DecodedEvent {
	/// Returns the parameter with the given name. A leading underscore is optional.
	pub fn field(&self, name: &str) -> Option<&Token> {
		let name = payload_key(name);
		self.fields.iter().find(|field| payload_key(&field.name) == name).map(|f| &f.value)
	}

	pub fn transaction_hash_hex(&self) -> String {
		format!("{:?}", self.transaction_hash)
	}

	pub fn contract_address_hex(&self) -> String {
		format!("{:?}", self.contract_address)
	}

	/// The JSON body posted to the delivery endpoint.
	pub fn to_payload(&self) -> Value {
		let mut payload = Map::new();
		payload.insert("eventName".into(), json!(self.kind));
		payload.insert("chainId".into(), json!(self.chain_id));
		payload.insert("contractAddress".into(), json!(self.contract_address_hex()));
		payload.insert("txHash".into(), json!(self.transaction_hash_hex()));
		payload.insert("blockNumber".into(), json!(self.block_number));
		payload.insert("logIndex".into(), json!(self.log_index));
		for field in &self.fields {
			payload.insert(payload_key(&field.name).to_string(), token_to_json(&field.value));
		}
		Value::Object(payload)
	}
}

fn payload_key(name: &str) -> &str {
	name.strip_prefix('_').unwrap_or(name)
}

/// Converts an ABI token into its JSON representation.
/// Integers become decimal strings so no precision is lost on the receiving side.
pub fn token_to_json(token: &Token) -> Value {
	match token {
		Token::Address(address) => json!(format!("{:?}", address)),
		Token::FixedBytes(bytes) | Token::Bytes(bytes) => {
			json!(format!("0x{}", hex::encode(bytes)))
		},
		Token::Uint(value) => json!(value.to_string()),
		Token::Int(value) => json!(I256::from_raw(*value).to_string()),
		Token::Bool(value) => json!(value),
		Token::String(value) => json!(value),
		Token::FixedArray(tokens) | Token::Array(tokens) | Token::Tuple(tokens) => {
			Value::Array(tokens.iter().map(token_to_json).collect())
		},
	}
}

/// A delivery failure record, keyed by transaction hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
	/// Describes the failing handler.
	pub error: String,
	/// The raw failure payload returned by the delivery attempt.
	pub result: Value,
	pub endpoint: String,
	pub tx_hash: String,
	pub block_number: u64,
	pub chain_id: u64,
	pub contract_address: String,
}

/// A contract registered for block polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollingEntry {
	pub address: String,
	pub last_block_polled: u64,
}

/// The outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResponse {
	/// Set only when the endpoint answered with a recognized (2xx) status.
	pub status: Option<u16>,
	pub body: Value,
}

impl DeliveryResponse {
	pub fn is_recognized(&self) -> bool {
		self.status.is_some()
	}
}
