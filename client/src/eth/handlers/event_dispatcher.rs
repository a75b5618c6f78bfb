use std::{collections::BTreeMap, sync::Arc};

use ethers::{abi::Token, types::Log};
use kr_primitives::{
	binding::BindingSpec,
	errors::CodecResult,
	events::{
		CrossReference, DecodedEvent, DeliveryResponse, ErrorRecord, EventKind, PollingEntry,
	},
	log_and_capture,
	traits::EventCodec,
	utils::{address_key, sub_display_format},
};
use serde_json::json;

use crate::eth::AbiEventCodec;

use super::RelayContext;

const SUB_LOG_TARGET: &str = "event-dispatcher";

/// Decodes the logs observed by a binding and delivers them exactly once.
pub struct EventDispatcher {
	/// The binding name. Used as the log target.
	binding: &'static str,
	codecs: BTreeMap<&'static str, Arc<dyn EventCodec>>,
	context: Arc<RelayContext>,
}

impl EventDispatcher {
	/// Instantiates a dispatcher decoding every event of the binding through its ABI.
	pub fn new(binding: &'static BindingSpec, context: Arc<RelayContext>) -> CodecResult<Self> {
		let codecs = binding
			.events
			.iter()
			.map(|kind| Ok(Arc::new(AbiEventCodec::new(kind)?) as Arc<dyn EventCodec>))
			.collect::<CodecResult<Vec<_>>>()?;
		Ok(Self::with_codecs(binding.name, codecs, context))
	}

	pub fn with_codecs(
		binding: &'static str,
		codecs: Vec<Arc<dyn EventCodec>>,
		context: Arc<RelayContext>,
	) -> Self {
		let codecs = codecs.into_iter().map(|codec| (codec.kind().name, codec)).collect();
		Self { binding, codecs, context }
	}

	pub fn chain_id(&self) -> u64 {
		self.context.chain_id
	}

	/// Decodes and delivers a single log. Every failure ends up in the error sink.
	pub async fn handle(&self, kind: &'static EventKind, log: Log, chain_id: u64) {
		let Some(codec) = self.codecs.get(kind.name) else {
			log_and_capture!(
				error,
				self.binding,
				SUB_LOG_TARGET,
				"❗️ No codec registered for {} events",
				kind.name
			);
			return;
		};

		let event = match codec.decode(&log, chain_id) {
			Ok(event) => event,
			Err(err) => {
				self.save_error(ErrorRecord {
					error: format!("Error in {} handler decode: {}", kind.name, err),
					result: json!(err.to_string()),
					endpoint: String::new(),
					tx_hash: format!("{:?}", log.transaction_hash.unwrap_or_default()),
					block_number: log.block_number.unwrap_or_default().as_u64(),
					chain_id,
					contract_address: address_key(&log.address),
				})
				.await;
				return;
			},
		};

		log::info!(
			target: self.binding,
			"-[{}] 📦 Received {} event: {}:{}",
			sub_display_format(SUB_LOG_TARGET),
			event.kind,
			event.block_number,
			event.transaction_hash_hex(),
		);

		let (endpoint, response) = self.deliver(kind, &event).await;
		if response.is_recognized() {
			log::info!(
				target: self.binding,
				"-[{}] ✅ Delivered {} event: {} ({})",
				sub_display_format(SUB_LOG_TARGET),
				event.kind,
				event.transaction_hash_hex(),
				response.status.unwrap_or_default(),
			);
		} else {
			self.save_error(ErrorRecord {
				error: format!("Error in {} handler delivery", kind.name),
				result: response.body,
				endpoint,
				tx_hash: event.transaction_hash_hex(),
				block_number: event.block_number,
				chain_id: event.chain_id,
				contract_address: event.contract_address_hex(),
			})
			.await;
		}

		if let Some(cross_reference) = kind.cross_reference {
			self.register_polling(&event, cross_reference).await;
		}
	}

	/// Resolves the endpoint and performs a single delivery attempt.
	async fn deliver(&self, kind: &EventKind, event: &DecodedEvent) -> (String, DeliveryResponse) {
		let delivery = &self.context.delivery;
		match delivery.resolve_endpoint(&self.context.namespace, kind.endpoint).await {
			Ok(url) => {
				let response = delivery.post(&url, event, &self.context.api_key).await;
				(url, response)
			},
			Err(err) => (
				kind.endpoint.to_string(),
				DeliveryResponse { status: None, body: json!({ "error": err.to_string() }) },
			),
		}
	}

	async fn save_error(&self, record: ErrorRecord) {
		log::warn!(
			target: self.binding,
			"-[{}] ⚠️  {}: {}",
			sub_display_format(SUB_LOG_TARGET),
			record.error,
			record.tx_hash,
		);

		let tx_hash = record.tx_hash.clone();
		if let Err(err) = self.context.error_sink.save_error(record).await {
			log_and_capture!(
				error,
				self.binding,
				SUB_LOG_TARGET,
				"❗️ Failed to record the delivery error of {}: {}",
				tx_hash,
				err
			);
		}
	}

	async fn register_polling(&self, event: &DecodedEvent, cross_reference: CrossReference) {
		let Some(Token::Address(address)) = event.field(cross_reference.address_param) else {
			log_and_capture!(
				warn,
				self.binding,
				SUB_LOG_TARGET,
				"⚠️  {} event has no `{}` address: {}",
				event.kind,
				cross_reference.address_param,
				event.transaction_hash_hex()
			);
			return;
		};

		let entry =
			PollingEntry { address: address_key(address), last_block_polled: event.block_number };
		if let Err(err) =
			self.context.polling_registry.register(&self.context.namespace, entry).await
		{
			log_and_capture!(
				warn,
				self.binding,
				SUB_LOG_TARGET,
				address_key(address),
				"⚠️  Failed to register contract for polling: {}",
				err
			);
		}
	}
}
