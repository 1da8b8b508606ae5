//! OpenOcean v4 quote adapter
//!
//! Building the quote URL takes two auxiliary lookups on the same API: the
//! current gas price (falling back to a per-chain default) and, in restricted
//! mode, the ids of the Balancer V3 entries in the DEX list.

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiRequest, ApiResponse, Endpoint, ProviderAdapter,
	QuoteOutcome, RequestOptions,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::api_client::HttpExecutor;
use crate::common::{ensure_pool_present, require_amount, url_with_params};

const BASE_URL: &str = "https://open-api.openocean.finance/v4";
const REQUIRED_MARKER: &str = "BalancerV3";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct GasPriceResponse {
	code: i64,
	data: Option<GasPriceData>,
}

#[derive(Debug, Deserialize)]
struct GasPriceData {
	standard: Value,
}

#[derive(Debug, Deserialize)]
struct DexListResponse {
	code: i64,
	#[serde(default)]
	data: Vec<DexInfo>,
}

#[derive(Debug, Deserialize)]
struct DexInfo {
	index: i64,
	code: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
	code: i64,
	#[serde(default)]
	error: String,
	data: Option<QuoteData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteData {
	out_amount: Option<String>,
	path: Option<QuotePath>,
}

#[derive(Debug, Deserialize)]
struct QuotePath {
	#[serde(default)]
	routes: Vec<QuoteRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRoute {
	#[serde(default)]
	sub_routes: Vec<SubRoute>,
}

#[derive(Debug, Deserialize)]
struct SubRoute {
	#[serde(default)]
	dexes: Vec<RouteDex>,
}

#[derive(Debug, Deserialize)]
struct RouteDex {
	dex: String,
	#[serde(default)]
	id: String,
}

#[derive(Debug, Clone)]
pub struct OpenOceanAdapter {
	http: Arc<dyn HttpExecutor>,
}

impl OpenOceanAdapter {
	pub fn new(http: Arc<dyn HttpExecutor>) -> Self {
		Self { http }
	}

	fn chain_name(network: &str) -> String {
		match network {
			"1" => "eth",
			"10" => "optimism",
			"56" => "bsc",
			"100" => "xdai",
			"137" => "polygon",
			"250" => "fantom",
			"324" => "zksync",
			"8453" => "base",
			"42161" => "arbitrum",
			"43114" => "avax",
			"59144" => "linea",
			"534352" => "scroll",
			other => other,
		}
		.to_string()
	}

	fn default_gas_price(chain: &str) -> &'static str {
		match chain {
			"bsc" => "3000000000",
			"arbitrum" => "100000000",
			"optimism" | "base" => "1000000",
			"avax" => "25000000000",
			"xdai" => "2000000000",
			"fantom" => "50000000000",
			"zksync" => "250000000",
			"linea" => "50000000",
			"scroll" => "100000000",
			_ => "30000000000",
		}
	}

	async fn lookup(&self, url: String) -> AdapterResult<ApiResponse> {
		let request = ApiRequest::get(url).with_timeout(LOOKUP_TIMEOUT);
		self.http.execute(self.id(), &request).await
	}

	async fn fetch_gas_price(&self, chain: &str) -> AdapterResult<String> {
		let response = self.lookup(format!("{}/{}/gasPrice", BASE_URL, chain)).await?;
		let gas: GasPriceResponse = response.json()?;
		if gas.code != 200 {
			return Err(AdapterError::provider(format!(
				"gas price API returned code {}",
				gas.code
			)));
		}

		let standard = gas.data.map(|data| data.standard).unwrap_or(Value::Null);
		let price = match &standard {
			Value::Object(map) => map.get("legacyGasPrice").and_then(Value::as_f64),
			other => other.as_f64(),
		};
		price
			.map(|wei| format!("{:.0}", wei))
			.ok_or_else(|| AdapterError::invalid_response(format!("unexpected gas price format: {}", standard)))
	}

	async fn fetch_balancer_dex_ids(&self, chain: &str) -> AdapterResult<String> {
		let response = self.lookup(format!("{}/{}/dexList", BASE_URL, chain)).await?;
		let list: DexListResponse = response.json()?;
		if list.code != 200 {
			return Err(AdapterError::provider(format!(
				"DEX list API returned code {}",
				list.code
			)));
		}

		let ids: Vec<String> = list
			.data
			.iter()
			.filter(|dex| dex.code.contains(REQUIRED_MARKER))
			.map(|dex| dex.index.to_string())
			.collect();
		Ok(ids.join(","))
	}
}

#[async_trait]
impl ProviderAdapter for OpenOceanAdapter {
	fn id(&self) -> &str {
		"openocean"
	}

	async fn build_url(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<String> {
		let chain = Self::chain_name(&endpoint.network);

		let gas_price = match self.fetch_gas_price(&chain).await {
			Ok(price) => price,
			Err(e) => {
				warn!("OpenOcean gas price lookup failed for {}: {}, using default", chain, e);
				Self::default_gas_price(&chain).to_string()
			},
		};

		let mut params = vec![
			("inTokenAddress", endpoint.token_in.clone()),
			("outTokenAddress", endpoint.token_out.clone()),
			("amountDecimals", endpoint.swap_amount.to_string()),
			("gasPriceDecimals", gas_price),
			("slippage", "1".to_string()),
		];

		if options.restricted {
			// Without the id filter the route check below still catches foreign DEXes
			match self.fetch_balancer_dex_ids(&chain).await {
				Ok(ids) if !ids.is_empty() => params.push(("enabledDexIds", ids)),
				Ok(_) => debug!("OpenOcean lists no Balancer V3 DEX on {}", chain),
				Err(e) => warn!("OpenOcean DEX list lookup failed for {}: {}", chain, e),
			}
		}

		let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
		url_with_params(&format!("{}/{}/quote", BASE_URL, chain), &params)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: QuoteResponse = response.json()?;

		if result.code != 200 {
			return Err(AdapterError::provider(format!(
				"OpenOcean API error (code {}): {}",
				result.code, result.error
			)));
		}

		let data = result.data.ok_or_else(|| AdapterError::missing_amount("outAmount"))?;
		let amount = require_amount(data.out_amount.as_deref(), "outAmount")?;

		if options.restricted {
			let dexes: Vec<&RouteDex> = data
				.path
				.iter()
				.flat_map(|path| &path.routes)
				.flat_map(|route| &route.sub_routes)
				.flat_map(|sub_route| &sub_route.dexes)
				.collect();
			if dexes.is_empty() {
				return Err(AdapterError::provider("No routes found in response"));
			}

			if let Some(dex) = dexes.iter().find(|dex| !dex.dex.contains(REQUIRED_MARKER)) {
				return Err(AdapterError::UnexpectedSource {
					found: dex.dex.clone(),
					expected: REQUIRED_MARKER.to_string(),
				});
			}
			ensure_pool_present(endpoint, dexes.iter().map(|dex| dex.id.as_str()))?;
		}

		Ok(QuoteOutcome::new(amount))
	}
}
