//! ParaSwap (Velora) `/prices` adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;

use crate::common::{ensure_only_source, ensure_pool_present, require_amount, url_with_params};

const BASE_URL: &str = "https://api.paraswap.io/prices/";
const REQUIRED_SOURCE: &str = "BalancerV3";
const NO_LIQUIDITY: &str = "No routes found with enough liquidity";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricesResponse {
	error: Option<String>,
	price_route: Option<PriceRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceRoute {
	dest_amount: Option<String>,
	#[serde(default)]
	best_route: Vec<BestRoute>,
}

#[derive(Debug, Deserialize)]
struct BestRoute {
	#[serde(default)]
	swaps: Vec<Swap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Swap {
	#[serde(default)]
	swap_exchanges: Vec<SwapExchange>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapExchange {
	exchange: String,
	#[serde(default)]
	pool_addresses: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ParaswapAdapter;

impl ParaswapAdapter {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl ProviderAdapter for ParaswapAdapter {
	fn id(&self) -> &str {
		"paraswap"
	}

	async fn build_url(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<String> {
		let src_decimals = endpoint.token_in_decimals.to_string();
		let dest_decimals = endpoint.token_out_decimals.to_string();
		let mut params = vec![
			("version", "6.2"),
			("srcToken", endpoint.token_in.as_str()),
			("destToken", endpoint.token_out.as_str()),
			("amount", endpoint.swap_amount.as_str()),
			("srcDecimals", src_decimals.as_str()),
			("destDecimals", dest_decimals.as_str()),
			("side", "SELL"),
			("network", endpoint.network.as_str()),
			("otherExchangePrices", "true"),
			("partner", "paraswap.io"),
			("userAddress", "0x0000000000000000000000000000000000000000"),
			("ignoreBadUsdPrice", "true"),
		];
		if options.restricted {
			params.push(("includeDEXS", REQUIRED_SOURCE));
		}
		url_with_params(BASE_URL, &params)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: PricesResponse = response.json()?;

		match result.error.as_deref() {
			Some(NO_LIQUIDITY) => return Err(AdapterError::provider(NO_LIQUIDITY)),
			Some(error) if !error.is_empty() => {
				return Err(AdapterError::provider(format!("API error: {}", error)))
			},
			_ => {},
		}

		let price_route = result
			.price_route
			.ok_or_else(|| AdapterError::provider("No best route found"))?;

		if options.restricted {
			if price_route.best_route.is_empty() {
				return Err(AdapterError::provider("No best route found"));
			}

			let exchanges: Vec<&SwapExchange> = price_route
				.best_route
				.iter()
				.flat_map(|route| &route.swaps)
				.flat_map(|swap| &swap.swap_exchanges)
				.collect();

			ensure_only_source(exchanges.iter().map(|e| e.exchange.as_str()), REQUIRED_SOURCE)?;
			ensure_pool_present(
				endpoint,
				exchanges
					.iter()
					.flat_map(|e| e.pool_addresses.iter().map(String::as_str)),
			)?;
		}

		let amount = require_amount(price_route.dest_amount.as_deref(), "destAmount")?;
		Ok(QuoteOutcome::new(amount))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qmon_types::test_utils::{EndpointBuilder, TEST_POOL};
	use serde_json::json;

	fn response(exchanges: &[(&str, &str)]) -> ApiResponse {
		let swap_exchanges: Vec<_> = exchanges
			.iter()
			.map(|(exchange, pool)| json!({"exchange": exchange, "poolAddresses": [pool]}))
			.collect();
		let body = json!({
			"priceRoute": {
				"destAmount": "987654",
				"bestRoute": [{"percent": 100, "swaps": [{"swapExchanges": swap_exchanges}]}]
			}
		});
		ApiResponse::new(200, body.to_string())
	}

	#[tokio::test]
	async fn test_url_parameters() {
		let endpoint = EndpointBuilder::new().decimals(6, 18).build();
		let adapter = ParaswapAdapter::new();

		let url = adapter.build_url(&endpoint, &RequestOptions::restricted()).await.unwrap();
		assert!(url.contains("srcDecimals=6"));
		assert!(url.contains("destDecimals=18"));
		assert!(url.contains("network=8453"));
		assert!(url.contains("includeDEXS=BalancerV3"));

		let url = adapter.build_url(&endpoint, &RequestOptions::market_price()).await.unwrap();
		assert!(!url.contains("includeDEXS"));
	}

	#[test]
	fn test_balancer_route_with_expected_pool() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let outcome = ParaswapAdapter::new()
			.validate(&response(&[("BalancerV3", TEST_POOL)]), &endpoint, &RequestOptions::restricted())
			.unwrap();
		assert_eq!(outcome.amount.as_str(), "987654");
	}

	#[test]
	fn test_missing_pool_names_expected_pool() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let err = ParaswapAdapter::new()
			.validate(&response(&[("BalancerV3", "0xother")]), &endpoint, &RequestOptions::restricted())
			.unwrap_err();
		assert!(matches!(err, AdapterError::PoolNotFound { .. }));
		assert!(err.to_string().contains(TEST_POOL));
	}

	#[test]
	fn test_mixed_exchanges_rejected() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let err = ParaswapAdapter::new()
			.validate(
				&response(&[("BalancerV3", TEST_POOL), ("UniswapV3", "0x1")]),
				&endpoint,
				&RequestOptions::restricted(),
			)
			.unwrap_err();
		assert!(err.to_string().contains("UniswapV3"));
	}

	#[test]
	fn test_no_liquidity_sentinel() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let body = ApiResponse::new(400, r#"{"error":"No routes found with enough liquidity"}"#);
		let err = ParaswapAdapter::new()
			.validate(&body, &endpoint, &RequestOptions::restricted())
			.unwrap_err();
		assert_eq!(err.to_string(), NO_LIQUIDITY);
	}

	#[test]
	fn test_other_api_error() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let body = ApiResponse::new(400, r#"{"error":"Invalid tokens"}"#);
		let err = ParaswapAdapter::new()
			.validate(&body, &endpoint, &RequestOptions::market_price())
			.unwrap_err();
		assert_eq!(err.to_string(), "API error: Invalid tokens");
	}

	#[test]
	fn test_market_price_accepts_any_exchange() {
		let endpoint = EndpointBuilder::new().solver("paraswap").build();
		let outcome = ParaswapAdapter::new()
			.validate(&response(&[("UniswapV3", "0x1")]), &endpoint, &RequestOptions::market_price())
			.unwrap();
		assert_eq!(outcome.amount.as_str(), "987654");
	}
}
