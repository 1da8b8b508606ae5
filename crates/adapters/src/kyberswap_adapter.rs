//! KyberSwap aggregator `/routes` adapter
//!
//! KyberSwap exposes each Balancer V3 pool family as its own source, so the
//! source is pinned from the endpoint's pool type in both modes.

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions, SwapPath, SwapPathStep,
};
use serde::Deserialize;

use crate::common::{ensure_only_source, ensure_pool_present, require_amount, url_with_params};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutesResponse {
	#[serde(default)]
	code: i64,
	#[serde(default)]
	message: String,
	#[serde(default)]
	request_id: String,
	data: Option<RoutesData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoutesData {
	route_summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSummary {
	amount_out: Option<String>,
	#[serde(rename = "routeID")]
	route_id: Option<String>,
	#[serde(default)]
	route: Vec<Vec<RouteItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteItem {
	#[serde(default)]
	pool: String,
	#[serde(default)]
	token_out: String,
	#[serde(default)]
	exchange: String,
}

#[derive(Debug, Default, Clone)]
pub struct KyberSwapAdapter;

impl KyberSwapAdapter {
	pub fn new() -> Self {
		Self
	}

	fn chain_name(network: &str) -> &'static str {
		match network {
			"1" => "ethereum",
			"10" => "optimism",
			"56" => "bsc",
			"137" => "polygon",
			"146" => "sonic",
			"250" => "fantom",
			"324" => "zksync",
			"999" => "hyperevm",
			"2020" => "ronin",
			"5000" => "mantle",
			"8453" => "base",
			"42161" => "arbitrum",
			"43114" => "avalanche",
			"59144" => "linea",
			"80094" => "berachain",
			"81457" => "blast",
			"534352" => "scroll",
			_ => "ethereum",
		}
	}

	/// KyberSwap source id for the endpoint's pool family
	fn pool_source(endpoint: &Endpoint) -> AdapterResult<&'static str> {
		let name = endpoint.name.as_str();
		if name.contains("Quant") {
			Ok("balancer-v3-quantamm")
		} else if name.contains("Stable") {
			Ok("balancer-v3-stable")
		} else if name.contains("Gyro") {
			Ok("balancer-v3-eclp")
		} else {
			Err(AdapterError::ConfigError {
				reason: format!("unsupported pool type for {}", name),
			})
		}
	}
}

#[async_trait]
impl ProviderAdapter for KyberSwapAdapter {
	fn id(&self) -> &str {
		"kyberswap"
	}

	async fn build_url(&self, endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<String> {
		let base = format!(
			"https://aggregator-api.kyberswap.com/{}/api/v1/routes",
			Self::chain_name(&endpoint.network)
		);
		url_with_params(
			&base,
			&[
				("tokenIn", endpoint.token_in.as_str()),
				("tokenOut", endpoint.token_out.as_str()),
				("amountIn", endpoint.swap_amount.as_str()),
				("includedSources", Self::pool_source(endpoint)?),
			],
		)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: RoutesResponse = response.json()?;

		if result.code != 0 {
			return Err(AdapterError::provider(format!(
				"kyberswap API error: {} (code: {}, requestId: {})",
				result.message, result.code, result.request_id
			)));
		}

		let summary = result
			.data
			.map(|data| data.route_summary)
			.ok_or_else(|| AdapterError::missing_amount("amountOut"))?;
		let amount = require_amount(summary.amount_out.as_deref(), "amountOut")?;

		if !options.restricted {
			return Ok(QuoteOutcome::new(amount));
		}

		if summary.route_id.as_deref().unwrap_or_default().is_empty() {
			return Err(AdapterError::provider("no route ID in response"));
		}

		let items = || summary.route.iter().flatten();
		ensure_pool_present(endpoint, items().map(|item| item.pool.as_str()))?;
		ensure_only_source(items().map(|item| item.exchange.as_str()), Self::pool_source(endpoint)?)?;

		let mut outcome = QuoteOutcome::new(amount);
		if let [sequence] = summary.route.as_slice() {
			outcome = outcome.with_path(SwapPath::new(
				sequence
					.iter()
					.map(|item| SwapPathStep {
						pool: item.pool.clone(),
						token_out: item.token_out.clone(),
						is_buffer: false,
					})
					.collect(),
			));
		}
		Ok(outcome)
	}
}
