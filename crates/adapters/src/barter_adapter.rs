//! Barter `/route` adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ensure_only_source, ensure_pool_present, require_amount};

const REQUIRED_SOURCE: &str = "BalancerV3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
	#[serde(default)]
	status: String,
	output_amount: Option<String>,
	#[serde(default)]
	route: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct RouteLeg {
	#[serde(default)]
	swaps: Vec<RouteSwap>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSwap {
	#[serde(default)]
	swap_info: SwapInfo,
}

#[derive(Debug, Default, Deserialize)]
struct SwapInfo {
	#[serde(default)]
	metadata: SwapMetadata,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapMetadata {
	#[serde(rename = "type", default)]
	kind: String,
	#[serde(default)]
	pool_address: String,
}

#[derive(Debug, Default, Clone)]
pub struct BarterAdapter;

impl BarterAdapter {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl ProviderAdapter for BarterAdapter {
	fn id(&self) -> &str {
		"barter"
	}

	async fn build_url(&self, endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<String> {
		let subdomain = match endpoint.network.as_str() {
			"1" => "eth",
			"100" => "gno",
			"8453" => "base",
			"42161" => "arb",
			other => return Err(AdapterError::unsupported_network(other, "barter")),
		};
		Ok(format!("https://api2.{}.barterswap.xyz/route", subdomain))
	}

	fn build_body(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<Option<Value>> {
		let mut body = json!({
			"source": endpoint.token_in,
			"target": endpoint.token_out,
			"sellAmount": endpoint.swap_amount.as_str(),
		});
		if options.restricted {
			body["typeFilters"] = json!([REQUIRED_SOURCE]);
		}
		Ok(Some(body))
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: RouteResponse = response.json()?;

		if options.restricted {
			if result.status != "Normal" {
				return Err(AdapterError::provider(format!(
					"API status is {}, expected Normal",
					result.status
				)));
			}
			let first_leg = result
				.route
				.first()
				.ok_or_else(|| AdapterError::provider("No routes found in response"))?;
			if first_leg.swaps.is_empty() {
				return Err(AdapterError::provider("No swaps found in route"));
			}

			let metadata = || {
				result
					.route
					.iter()
					.flat_map(|leg| &leg.swaps)
					.map(|swap| &swap.swap_info.metadata)
			};
			ensure_only_source(metadata().map(|m| m.kind.as_str()), REQUIRED_SOURCE)?;

			if first_leg.swaps.len() != endpoint.expected_hops {
				return Err(AdapterError::HopMismatch {
					expected: endpoint.expected_hops,
					actual: first_leg.swaps.len(),
				});
			}
			ensure_pool_present(endpoint, metadata().map(|m| m.pool_address.as_str()))?;
		}

		let amount = require_amount(result.output_amount.as_deref(), "outputAmount")?;
		Ok(QuoteOutcome::new(amount))
	}
}
