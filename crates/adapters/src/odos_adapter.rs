//! Odos smart order routing `/sor/quote/v2` adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::require_amount;

const QUOTE_URL: &str = "https://api.odos.xyz/sor/quote/v2";
/// Quotes only, never assembled into a transaction
const QUOTE_USER: &str = "0x47E2D28169738039755586743E2dfCF3bd643f86";
const BALANCER_SOURCES: [&str; 5] = [
	"Balancer V3 Gyro",
	"Balancer V3 Stable",
	"Balancer V3 Weighted",
	"Balancer V3 StableSurge",
	"Balancer V3 reCLAMM",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
	#[serde(default)]
	out_amounts: Vec<String>,
	#[serde(default)]
	out_values: Vec<f64>,
	#[serde(default)]
	error_code: i64,
	detail: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct OdosAdapter;

impl OdosAdapter {
	pub fn new() -> Self {
		Self
	}

	/// Human-readable meaning of an Odos error code
	fn error_message(code: i64) -> &'static str {
		match code {
			1000..=1999 => "General API Error",
			2000 => "No viable path found",
			2400 => "Algorithm validation error",
			2997 => "Algorithm connection error",
			2998 => "Algorithm timeout",
			2999 => "Algorithm internal error",
			2001..=2996 => "Unknown algorithm error",
			3000 => "Internal service error",
			3100 => "Configuration internal error",
			3110 => "Transaction assembly internal error",
			3120 => "Chain data internal error",
			3130 => "Pricing internal error",
			3140 => "Gas internal error",
			3160 => "Quote internal error",
			3001..=3999 => "Unknown internal service error",
			4000 => "Bad request",
			4001 => "Invalid chain ID",
			4002 => "Invalid token address",
			4003 => "Invalid amount",
			4004 => "Invalid user address",
			4005 => "Invalid source whitelist",
			4006 => "Invalid destination whitelist",
			4007 => "Invalid source blacklist",
			4009 => "Invalid gas price",
			4011 => "Invalid slippage tolerance",
			4001..=4999 => "Unknown validation error",
			5000 => "Internal server error",
			_ => "Unknown error",
		}
	}
}

#[async_trait]
impl ProviderAdapter for OdosAdapter {
	fn id(&self) -> &str {
		"odos"
	}

	async fn build_url(&self, _endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<String> {
		Ok(QUOTE_URL.to_string())
	}

	fn build_body(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<Option<Value>> {
		let chain_id: u64 = endpoint.network.parse().map_err(|_| AdapterError::ConfigError {
			reason: format!("invalid chain id {}", endpoint.network),
		})?;

		let mut body = json!({
			"chainId": chain_id,
			"inputTokens": [{"amount": endpoint.swap_amount.as_str(), "tokenAddress": endpoint.token_in}],
			"outputTokens": [{"proportion": 1, "tokenAddress": endpoint.token_out}],
			"userAddr": QUOTE_USER,
		});
		if options.restricted {
			body["sourceWhitelist"] = json!(BALANCER_SOURCES);
		}
		Ok(Some(body))
	}

	fn validate(
		&self,
		response: &ApiResponse,
		_endpoint: &Endpoint,
		_options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: QuoteResponse = response.json()?;

		if result.error_code != 0 {
			return Err(AdapterError::provider(format!(
				"odos API error: {} (code: {})",
				Self::error_message(result.error_code),
				result.error_code
			)));
		}
		if response.status_code != 200 {
			return Err(AdapterError::HttpStatusError {
				status_code: response.status_code,
				reason: result.detail.unwrap_or_else(|| "unexpected status code".to_string()),
			});
		}

		match result.out_values.first() {
			None => return Err(AdapterError::provider("no outValues in response")),
			Some(value) if *value <= 0.0 => {
				return Err(AdapterError::provider(format!(
					"outValues is not greater than 0: {}",
					value
				)))
			},
			Some(_) => {},
		}

		let amount = require_amount(result.out_amounts.first().map(String::as_str), "outAmounts")?;
		Ok(QuoteOutcome::new(amount))
	}
}
