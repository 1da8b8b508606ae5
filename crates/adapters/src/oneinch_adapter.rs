//! 1inch Swap API v6 quote adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;

use crate::common::{require_amount, url_with_params};

const BASE_URL: &str = "https://api.1inch.dev/swap/v6.0";
const REQUIRED_MARKER: &str = "BALANCER_V3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
	error: Option<String>,
	description: Option<String>,
	dst_amount: Option<String>,
	/// routes -> hops -> protocol splits
	protocols: Option<Vec<Vec<Vec<ProtocolPart>>>>,
}

#[derive(Debug, Deserialize)]
struct ProtocolPart {
	#[serde(default)]
	name: String,
	/// Integer percentage of the hop routed through this protocol
	#[serde(default)]
	part: u64,
}

#[derive(Debug, Default, Clone)]
pub struct OneInchAdapter;

impl OneInchAdapter {
	pub fn new() -> Self {
		Self
	}

	/// 1inch protocol id of Balancer V3 on a network
	fn balancer_protocol(network: &str) -> AdapterResult<&'static str> {
		match network {
			"1" => Ok("BALANCER_V3"),
			"100" => Ok("GNOSIS_BALANCER_V3"),
			"8453" => Ok("BASE_BALANCER_V3"),
			"42161" => Ok("ARBITRUM_BALANCER_V3"),
			"43114" => Ok("AVALANCHE_BALANCER_V3"),
			other => Err(AdapterError::unsupported_network(other, "1inch")),
		}
	}
}

#[async_trait]
impl ProviderAdapter for OneInchAdapter {
	fn id(&self) -> &str {
		"1inch"
	}

	async fn build_url(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<String> {
		let base = format!("{}/{}/quote", BASE_URL, endpoint.network);
		let mut params = vec![
			("src", endpoint.token_in.as_str()),
			("dst", endpoint.token_out.as_str()),
			("amount", endpoint.swap_amount.as_str()),
		];
		if options.restricted {
			params.push(("includeProtocols", "true"));
			params.push(("protocols", Self::balancer_protocol(&endpoint.network)?));
		}
		url_with_params(&base, &params)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		_endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: QuoteResponse = response.json()?;

		if result.description.as_deref() == Some("insufficient liquidity") {
			return Err(AdapterError::provider("insufficient liquidity"));
		}
		if result.dst_amount.is_none() {
			if let Some(error) = result.error.as_deref() {
				let detail = result.description.as_deref().unwrap_or_default();
				return Err(AdapterError::provider(format!("API error: {} {}", error, detail).trim_end().to_string()));
			}
		}

		if options.restricted {
			let protocols = result.protocols.as_ref().ok_or_else(|| AdapterError::KnownUnsupported {
				reason: "1inch network support WIP".to_string(),
			})?;

			let first_hop = protocols
				.first()
				.and_then(|route| route.first())
				.filter(|hop| !hop.is_empty())
				.ok_or_else(|| AdapterError::provider("no protocols found in response"))?;

			let mut total_part: u64 = 0;
			for protocol in first_hop {
				if !protocol.name.contains(REQUIRED_MARKER) {
					return Err(AdapterError::UnexpectedSource {
						found: protocol.name.clone(),
						expected: format!("protocol containing {}", REQUIRED_MARKER),
					});
				}
				total_part = total_part.saturating_add(protocol.part);
			}

			if total_part != 100 {
				return Err(AdapterError::provider(format!(
					"protocol parts sum to {}, expected 100",
					total_part
				)));
			}
		}

		let amount = require_amount(result.dst_amount.as_deref(), "dstAmount")?;
		Ok(QuoteOutcome::new(amount))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qmon_types::test_utils::EndpointBuilder;
	use serde_json::json;

	fn endpoint() -> Endpoint {
		EndpointBuilder::new().solver("1inch").network("42161").build()
	}

	fn response(parts: &[(&str, u32)]) -> ApiResponse {
		let hop: Vec<_> = parts
			.iter()
			.map(|(name, part)| json!({"name": name, "part": part, "fromTokenAddress": "0xa", "toTokenAddress": "0xb"}))
			.collect();
		ApiResponse::new(200, json!({"dstAmount": "987654", "protocols": [[hop]]}).to_string())
	}

	#[tokio::test]
	async fn test_restricted_url_uses_network_protocol() {
		let url = OneInchAdapter::new()
			.build_url(&endpoint(), &RequestOptions::restricted())
			.await
			.unwrap();
		assert!(url.starts_with("https://api.1inch.dev/swap/v6.0/42161/quote?"));
		assert!(url.contains("protocols=ARBITRUM_BALANCER_V3"));
		assert!(url.contains("includeProtocols=true"));
	}

	#[test]
	fn test_full_balancer_split_succeeds() {
		let outcome = OneInchAdapter::new()
			.validate(
				&response(&[("ARBITRUM_BALANCER_V3", 60), ("ARBITRUM_BALANCER_V3", 40)]),
				&endpoint(),
				&RequestOptions::restricted(),
			)
			.unwrap();
		assert_eq!(outcome.amount.as_str(), "987654");
	}

	#[test]
	fn test_foreign_protocol_rejected() {
		let err = OneInchAdapter::new()
			.validate(
				&response(&[("ARBITRUM_BALANCER_V3", 50), ("ARBITRUM_UNISWAP_V3", 50)]),
				&endpoint(),
				&RequestOptions::restricted(),
			)
			.unwrap_err();
		assert!(err.to_string().contains("ARBITRUM_UNISWAP_V3"));
	}

	#[test]
	fn test_partial_split_rejected() {
		let err = OneInchAdapter::new()
			.validate(&response(&[("ARBITRUM_BALANCER_V3", 80)]), &endpoint(), &RequestOptions::restricted())
			.unwrap_err();
		assert!(err.to_string().contains("sum to 80"));
	}

	#[test]
	fn test_parts_over_one_hundred_rejected() {
		let err = OneInchAdapter::new()
			.validate(
				&response(&[("ARBITRUM_BALANCER_V3", 70), ("ARBITRUM_BALANCER_V3", 31)]),
				&endpoint(),
				&RequestOptions::restricted(),
			)
			.unwrap_err();
		assert_eq!(err.to_string(), "protocol parts sum to 101, expected 100");
	}

	#[test]
	fn test_null_protocols_is_known_unsupported() {
		let body = ApiResponse::new(200, json!({"dstAmount": "1", "protocols": null}).to_string());
		let err = OneInchAdapter::new()
			.validate(&body, &endpoint(), &RequestOptions::restricted())
			.unwrap_err();
		assert_eq!(err.kind(), qmon_types::ErrorKind::KnownUnsupported);
	}

	#[test]
	fn test_insufficient_liquidity() {
		let body = ApiResponse::new(
			400,
			json!({"error": "Bad Request", "description": "insufficient liquidity", "statusCode": 400}).to_string(),
		);
		let err = OneInchAdapter::new()
			.validate(&body, &endpoint(), &RequestOptions::market_price())
			.unwrap_err();
		assert_eq!(err.to_string(), "insufficient liquidity");
	}
}
