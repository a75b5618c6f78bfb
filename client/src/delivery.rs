use std::{sync::Arc, time::Duration};

use kr_primitives::{
	constants::store::ENDPOINTS_DOCUMENT,
	errors::{DeliveryError, DeliveryResult},
	events::{DecodedEvent, DeliveryResponse},
	traits::{DeliveryClient, DocumentStore},
	utils::document_path,
};
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

/// Posts decoded events to the ingestion API. Endpoint URLs are looked up on every call in
/// the `endpoints` document of the namespace.
pub struct HttpDeliveryClient {
	client: Client,
	store: Arc<dyn DocumentStore>,
	/// The request header carrying the API key.
	api_key_header: String,
}

impl HttpDeliveryClient {
	pub fn new(
		store: Arc<dyn DocumentStore>,
		api_key_header: &str,
		timeout: Duration,
	) -> reqwest::Result<Self> {
		Ok(Self {
			client: Client::builder().timeout(timeout).build()?,
			store,
			api_key_header: api_key_header.to_string(),
		})
	}
}

#[async_trait::async_trait]
impl DeliveryClient for HttpDeliveryClient {
	async fn resolve_endpoint(
		&self,
		namespace: &str,
		endpoint_name: &str,
	) -> DeliveryResult<String> {
		let endpoints = self.store.get(&document_path(&[namespace, ENDPOINTS_DOCUMENT])).await?;
		let endpoint = endpoints
			.as_ref()
			.and_then(|endpoints| endpoints.get(endpoint_name))
			.and_then(Value::as_str)
			.filter(|endpoint| !endpoint.is_empty())
			.ok_or_else(|| DeliveryError::UnknownEndpoint(endpoint_name.to_string()))?;

		Url::parse(endpoint).map_err(|_| DeliveryError::InvalidUrl(endpoint.to_string()))?;
		Ok(endpoint.to_string())
	}

	async fn post(&self, url: &str, event: &DecodedEvent, api_key: &str) -> DeliveryResponse {
		let response = match self
			.client
			.post(url)
			.header(self.api_key_header.as_str(), api_key)
			.json(&event.to_payload())
			.send()
			.await
		{
			Ok(response) => response,
			Err(err) => {
				return DeliveryResponse { status: None, body: json!({ "error": err.to_string() }) }
			},
		};

		let status = response.status();
		let body = match response.text().await {
			Ok(text) => serde_json::from_str(&text).unwrap_or(Value::String(text)),
			Err(err) => json!({ "error": err.to_string() }),
		};

		if status.is_success() {
			DeliveryResponse { status: Some(status.as_u16()), body }
		} else {
			DeliveryResponse { status: None, body: json!({ "status": status.as_u16(), "data": body }) }
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryDocumentStore;
	use ethers::{
		abi::Token,
		types::{Address, H256, U256},
	};
	use kr_primitives::events::EventField;
	use wiremock::{
		matchers::{body_partial_json, header, method, path},
		Mock, MockServer, ResponseTemplate,
	};

	fn event() -> DecodedEvent {
		DecodedEvent {
			kind: "TierChanged",
			chain_id: 8453,
			contract_address: Address::from_low_u64_be(0xc0ffee),
			transaction_hash: H256::repeat_byte(0x0a),
			block_number: 1234,
			log_index: 0,
			fields: vec![
				EventField { name: "_collegeId".into(), value: Token::Uint(U256::from(3u64)) },
				EventField { name: "_tier".into(), value: Token::Uint(U256::from(2u64)) },
			],
		}
	}

	async fn client(server: &MockServer) -> HttpDeliveryClient {
		let store = Arc::new(MemoryDocumentStore::new());
		store
			.set(
				"events-base/endpoints",
				json!({
					"collegeTierChanged": format!("{}/tier", server.uri()),
					"collegeAdded": "",
					"collegeChanged": "not a url",
				}),
			)
			.await
			.unwrap();
		HttpDeliveryClient::new(store, "x-api-key", Duration::from_secs(5)).unwrap()
	}

	#[tokio::test]
	async fn resolves_endpoints_from_the_namespace() {
		let server = MockServer::start().await;
		let client = client(&server).await;

		assert_eq!(
			client.resolve_endpoint("events-base", "collegeTierChanged").await.unwrap(),
			format!("{}/tier", server.uri())
		);
		assert!(matches!(
			client.resolve_endpoint("events-base", "collegeAdded").await,
			Err(DeliveryError::UnknownEndpoint(_))
		));
		assert!(matches!(
			client.resolve_endpoint("events-base", "collegeChanged").await,
			Err(DeliveryError::InvalidUrl(_))
		));
		assert!(matches!(
			client.resolve_endpoint("events-other", "collegeTierChanged").await,
			Err(DeliveryError::UnknownEndpoint(_))
		));
	}

	#[tokio::test]
	async fn posts_the_event_with_the_api_key() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.and(path("/tier"))
			.and(header("x-api-key", "secret"))
			.and(body_partial_json(json!({
				"eventName": "TierChanged",
				"chainId": 8453,
				"blockNumber": 1234,
				"collegeId": "3",
				"tier": "2",
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "saved": true })))
			.expect(1)
			.mount(&server)
			.await;

		let client = client(&server).await;
		let url = client.resolve_endpoint("events-base", "collegeTierChanged").await.unwrap();
		let response = client.post(&url, &event(), "secret").await;

		assert_eq!(response, DeliveryResponse { status: Some(200), body: json!({ "saved": true }) });
	}

	#[tokio::test]
	async fn failed_statuses_are_unrecognized() {
		let server = MockServer::start().await;
		Mock::given(method("POST"))
			.respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
			.mount(&server)
			.await;

		let client = client(&server).await;
		let response = client.post(&format!("{}/tier", server.uri()), &event(), "secret").await;

		assert!(!response.is_recognized());
		assert_eq!(response.body, json!({ "status": 502, "data": "bad gateway" }));
	}

	#[tokio::test]
	async fn transport_errors_are_unrecognized() {
		let server = MockServer::start().await;
		let client = client(&server).await;

		let response = client.post("http://127.0.0.1:1/tier", &event(), "secret").await;

		assert!(!response.is_recognized());
		assert!(response.body["error"].is_string());
	}
}
