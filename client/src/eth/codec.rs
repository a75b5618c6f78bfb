use ethers::{
	abi::{self, Event, RawLog},
	types::{Log, H256, U256, U64},
};
use kr_primitives::{
	errors::{CodecError, CodecResult},
	events::{DecodedEvent, EventField, EventKind},
	traits::EventCodec,
};

/// Decodes logs through the event's human readable ABI.
pub struct AbiEventCodec {
	kind: &'static EventKind,
	event: Event,
	topic: H256,
}

impl AbiEventCodec {
	pub fn new(kind: &'static EventKind) -> CodecResult<Self> {
		let event = kind.abi()?;
		let topic = event.signature();
		Ok(Self { kind, event, topic })
	}
}

impl EventCodec for AbiEventCodec {
	fn kind(&self) -> &'static EventKind {
		self.kind
	}

	fn decode(&self, log: &Log, chain_id: u64) -> CodecResult<DecodedEvent> {
		if log.topics.first() != Some(&self.topic) {
			return Err(CodecError::TopicMismatch(self.kind.name));
		}
		let transaction_hash =
			log.transaction_hash.ok_or(CodecError::MissingField("transaction hash"))?;
		let block_number = log.block_number.ok_or(CodecError::MissingField("block number"))?;

		let parsed = self
			.event
			.parse_log(RawLog { topics: log.topics.clone(), data: log.data.to_vec() })
			.map_err(|err| CodecError::Malformed(err.to_string()))?;

		Ok(DecodedEvent {
			kind: self.kind.name,
			chain_id,
			contract_address: log.address,
			transaction_hash,
			block_number: block_number.as_u64(),
			log_index: log.log_index.unwrap_or_default().low_u64(),
			fields: parsed
				.params
				.into_iter()
				.map(|param| EventField { name: param.name, value: param.value })
				.collect(),
		})
	}

	fn encode(&self, event: &DecodedEvent) -> CodecResult<Log> {
		if event.kind != self.kind.name || event.fields.len() != self.event.inputs.len() {
			return Err(CodecError::FieldMismatch(event.kind.to_string()));
		}

		let mut topics = vec![self.topic];
		let mut data = vec![];
		for (param, field) in self.event.inputs.iter().zip(&event.fields) {
			if param.name != field.name || !field.value.type_check(&param.kind) {
				return Err(CodecError::FieldMismatch(field.name.clone()));
			}
			if !param.indexed {
				data.push(field.value.clone());
				continue;
			}
			if param.kind.is_dynamic() {
				return Err(CodecError::UnsupportedIndexed(field.name.clone()));
			}
			topics.push(H256::from_slice(&abi::encode(&[field.value.clone()])));
		}

		Ok(Log {
			address: event.contract_address,
			topics,
			data: abi::encode(&data).into(),
			block_number: Some(U64::from(event.block_number)),
			transaction_hash: Some(event.transaction_hash),
			log_index: Some(U256::from(event.log_index)),
			..Default::default()
		})
	}
}
