//! HyperBloom `/swap/v1/price` adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;

use crate::common::{require_amount, url_with_params};

const BASE_URL: &str = "https://api.hyperbloom.xyz/swap/v1/price";
const REQUIRED_SOURCE: &str = "BalancerV3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
	buy_amount: Option<String>,
	price: Option<String>,
	#[serde(default)]
	sources: Vec<Source>,
	#[serde(default)]
	sell_token_address: String,
	#[serde(default)]
	buy_token_address: String,
}

#[derive(Debug, Deserialize)]
struct Source {
	#[serde(default)]
	name: String,
	#[serde(default)]
	proportion: String,
}

impl Source {
	fn is_used(&self) -> bool {
		self.proportion.parse::<f64>().map(|p| p > 0.0).unwrap_or(true)
	}
}

#[derive(Debug, Default, Clone)]
pub struct HyperBloomAdapter;

impl HyperBloomAdapter {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl ProviderAdapter for HyperBloomAdapter {
	fn id(&self) -> &str {
		"hyperbloom"
	}

	async fn build_url(&self, endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<String> {
		url_with_params(
			BASE_URL,
			&[
				("sellToken", endpoint.token_in.as_str()),
				("buyToken", endpoint.token_out.as_str()),
				("sellAmount", endpoint.swap_amount.as_str()),
				("includedSources", REQUIRED_SOURCE),
			],
		)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: PriceResponse = response.json()?;

		let amount = require_amount(result.buy_amount.as_deref(), "buyAmount")?;
		let price = result.price.as_deref().unwrap_or_default();
		if price.is_empty() || price.parse::<f64>().map(|p| p == 0.0).unwrap_or(false) {
			return Err(AdapterError::missing_amount("price"));
		}

		if options.restricted {
			if result.sources.is_empty() {
				return Err(AdapterError::provider("no sources in response"));
			}

			let used: Vec<&Source> = result.sources.iter().filter(|s| s.is_used()).collect();
			if let Some(source) = used.iter().find(|s| s.name != REQUIRED_SOURCE) {
				return Err(AdapterError::UnexpectedSource {
					found: format!("{} with proportion {}", source.name, source.proportion),
					expected: REQUIRED_SOURCE.to_string(),
				});
			}
			if used.is_empty() {
				return Err(AdapterError::provider(
					"no BalancerV3 source found with proportion > 0",
				));
			}

			if !result.sell_token_address.eq_ignore_ascii_case(&endpoint.token_in) {
				return Err(AdapterError::invalid_response(format!(
					"sellTokenAddress mismatch: expected {}, got {}",
					endpoint.token_in, result.sell_token_address
				)));
			}
			if !result.buy_token_address.eq_ignore_ascii_case(&endpoint.token_out) {
				return Err(AdapterError::invalid_response(format!(
					"buyTokenAddress mismatch: expected {}, got {}",
					endpoint.token_out, result.buy_token_address
				)));
			}
		}

		Ok(QuoteOutcome::new(amount))
	}
}
