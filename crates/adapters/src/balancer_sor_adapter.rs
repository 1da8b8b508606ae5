//! Balancer smart order router (GraphQL `sorGetSwapPaths`) adapter

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions, SwapPath, SwapPathStep,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ensure_pool_present, require_amount};

const API_URL: &str = "https://api-v3.balancer.fi/";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
	data: Option<SorData>,
	#[serde(default)]
	errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
	message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SorData {
	sor_get_swap_paths: Option<SwapPaths>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapPaths {
	swap_amount: Option<String>,
	return_amount: Option<String>,
	#[serde(default)]
	paths: Vec<SorPath>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SorPath {
	#[serde(default)]
	pools: Vec<String>,
	#[serde(default)]
	is_buffer: Vec<bool>,
	/// token_in followed by each step's output token
	#[serde(default)]
	tokens: Vec<PathToken>,
}

#[derive(Debug, Deserialize)]
struct PathToken {
	#[serde(default)]
	address: String,
}

/// Balancer's own router; every quote is Balancer-only by construction
#[derive(Debug, Default, Clone)]
pub struct BalancerSorAdapter;

impl BalancerSorAdapter {
	pub fn new() -> Self {
		Self
	}

	fn chain(network: &str) -> AdapterResult<&'static str> {
		match network {
			"1" => Ok("MAINNET"),
			"10" => Ok("OPTIMISM"),
			"100" => Ok("GNOSIS"),
			"999" => Ok("HYPEREVM"),
			"8453" => Ok("BASE"),
			"42161" => Ok("ARBITRUM"),
			"43114" => Ok("AVALANCHE"),
			other => Err(AdapterError::unsupported_network(other, "balancer_sor")),
		}
	}

	fn swap_path(path: &SorPath, endpoint: &Endpoint) -> SwapPath {
		let steps = path
			.pools
			.iter()
			.enumerate()
			.map(|(i, pool)| SwapPathStep {
				pool: pool.clone(),
				token_out: path
					.tokens
					.get(i + 1)
					.map(|token| token.address.clone())
					.unwrap_or_else(|| endpoint.token_out.clone()),
				is_buffer: path.is_buffer.get(i).copied().unwrap_or(false),
			})
			.collect();
		SwapPath::new(steps)
	}
}

#[async_trait]
impl ProviderAdapter for BalancerSorAdapter {
	fn id(&self) -> &str {
		"balancer_sor"
	}

	async fn build_url(&self, _endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<String> {
		Ok(API_URL.to_string())
	}

	fn build_body(&self, endpoint: &Endpoint, _options: &RequestOptions) -> AdapterResult<Option<Value>> {
		let chain = Self::chain(&endpoint.network)?;
		let amount = endpoint
			.swap_amount
			.to_decimal_string(endpoint.token_in_decimals)
			.map_err(|e| AdapterError::ConfigError {
				reason: format!("invalid swap amount: {}", e),
			})?;

		let query = format!(
			r#"{{
	sorGetSwapPaths(
		chain: {chain}
		swapAmount: "{amount}"
		swapType: EXACT_IN
		tokenIn: "{token_in}"
		tokenOut: "{token_out}"
		considerPoolsWithHooks: true
		useProtocolVersion: 3
	) {{
		swapAmount
		returnAmount
		paths {{
			pools
			isBuffer
			tokens {{ address }}
		}}
	}}
}}"#,
			chain = chain,
			amount = amount,
			token_in = endpoint.token_in,
			token_out = endpoint.token_out,
		);

		Ok(Some(json!({ "query": query })))
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: GraphQlResponse = response.json()?;

		if let Some(error) = result.errors.first() {
			return Err(AdapterError::provider(format!("GraphQL error: {}", error.message)));
		}

		let paths = result
			.data
			.and_then(|data| data.sor_get_swap_paths)
			.ok_or_else(|| AdapterError::provider("No swap amount found in response"))?;

		if paths.swap_amount.as_deref().unwrap_or_default().is_empty() {
			return Err(AdapterError::provider("No swap amount found in response"));
		}
		if paths.return_amount.as_deref().unwrap_or_default().is_empty() {
			return Err(AdapterError::provider("No return amount found in response"));
		}
		let amount = require_amount(paths.return_amount.as_deref(), "returnAmount")?;

		if !options.restricted {
			return Ok(QuoteOutcome::new(amount));
		}

		let path = paths
			.paths
			.first()
			.ok_or_else(|| AdapterError::provider("No paths found in response"))?;
		ensure_pool_present(endpoint, path.pools.iter().map(String::as_str))?;

		Ok(QuoteOutcome::new(amount).with_path(Self::swap_path(path, endpoint)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qmon_types::test_utils::{EndpointBuilder, TEST_POOL, TEST_TOKEN_IN, TEST_TOKEN_OUT};

	fn endpoint() -> Endpoint {
		EndpointBuilder::new().solver("balancer_sor").build()
	}

	#[test]
	fn test_body_uses_decimal_amount() {
		let body = BalancerSorAdapter::new()
			.build_body(&endpoint(), &RequestOptions::restricted())
			.unwrap()
			.unwrap();
		let query = body["query"].as_str().unwrap();
		assert!(query.contains("chain: BASE"));
		assert!(query.contains(r#"swapAmount: "1.000000""#));
		assert!(query.contains(TEST_TOKEN_IN));
		assert!(query.contains("useProtocolVersion: 3"));
	}

	#[test]
	fn test_body_rejects_unknown_chain() {
		let endpoint = EndpointBuilder::new().solver("balancer_sor").network("56").build();
		let err = BalancerSorAdapter::new()
			.build_body(&endpoint, &RequestOptions::restricted())
			.unwrap_err();
		assert!(matches!(err, AdapterError::UnsupportedNetwork { .. }));
	}

	#[test]
	fn test_multi_step_path_with_buffers() {
		let wrapped = "0x0000000000000000000000000000000000000bbb";
		let body = json!({"data": {"sorGetSwapPaths": {
			"swapAmount": "1",
			"returnAmount": "987654",
			"paths": [{
				"pools": [wrapped, TEST_POOL],
				"isBuffer": [true, false],
				"tokens": [{"address": TEST_TOKEN_IN}, {"address": wrapped}, {"address": TEST_TOKEN_OUT}]
			}]
		}}});
		let outcome = BalancerSorAdapter::new()
			.validate(&ApiResponse::new(200, body.to_string()), &endpoint(), &RequestOptions::restricted())
			.unwrap();

		assert_eq!(outcome.amount.as_str(), "987654");
		let path = outcome.swap_path.unwrap();
		assert_eq!(path.len(), 2);
		assert!(path.steps[0].is_buffer);
		assert_eq!(path.steps[0].token_out, wrapped);
		assert_eq!(path.steps[1].token_out, TEST_TOKEN_OUT);
	}

	#[test]
	fn test_single_step_falls_back_to_endpoint_token_out() {
		let body = json!({"data": {"sorGetSwapPaths": {
			"swapAmount": "1", "returnAmount": "5", "paths": [{"pools": [TEST_POOL], "isBuffer": [false]}]
		}}});
		let outcome = BalancerSorAdapter::new()
			.validate(&ApiResponse::new(200, body.to_string()), &endpoint(), &RequestOptions::restricted())
			.unwrap();
		assert_eq!(outcome.swap_path.unwrap().steps[0].token_out, TEST_TOKEN_OUT);
	}

	#[test]
	fn test_graphql_error() {
		let body = json!({"data": null, "errors": [{"message": "Invalid chain"}]});
		let err = BalancerSorAdapter::new()
			.validate(&ApiResponse::new(200, body.to_string()), &endpoint(), &RequestOptions::restricted())
			.unwrap_err();
		assert_eq!(err.to_string(), "GraphQL error: Invalid chain");
	}

	#[test]
	fn test_missing_expected_pool() {
		let body = json!({"data": {"sorGetSwapPaths": {
			"swapAmount": "1", "returnAmount": "5", "paths": [{"pools": ["0xother"], "isBuffer": [false]}]
		}}});
		let err = BalancerSorAdapter::new()
			.validate(&ApiResponse::new(200, body.to_string()), &endpoint(), &RequestOptions::restricted())
			.unwrap_err();
		assert!(err.to_string().contains(TEST_POOL));
	}

	#[test]
	fn test_no_paths() {
		let body = json!({"data": {"sorGetSwapPaths": {"swapAmount": "1", "returnAmount": "5", "paths": []}}});
		let err = BalancerSorAdapter::new()
			.validate(&ApiResponse::new(200, body.to_string()), &endpoint(), &RequestOptions::restricted())
			.unwrap_err();
		assert_eq!(err.to_string(), "No paths found in response");
	}
}
