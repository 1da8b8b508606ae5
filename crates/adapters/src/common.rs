//! Helpers shared by the provider adapters

use qmon_types::{AdapterError, AdapterResult, Amount, Endpoint};
use url::Url;

/// Join a base URL and query parameters with form encoding
pub(crate) fn url_with_params(base: &str, params: &[(&str, &str)]) -> AdapterResult<String> {
	let url = Url::parse_with_params(base, params).map_err(|e| AdapterError::ConfigError {
		reason: format!("invalid URL {}: {}", base, e),
	})?;
	Ok(url.into())
}

/// Non-empty, all-digit, non-zero amount
pub(crate) fn require_amount(raw: Option<&str>, field: &str) -> AdapterResult<Amount> {
	let raw = raw.map(str::trim).unwrap_or_default();
	let amount = Amount::new(raw);
	if raw.is_empty() || amount.is_zero() {
		return Err(AdapterError::missing_amount(field));
	}
	amount.validate().map_err(|e| AdapterError::InvalidResponse {
		reason: format!("{} is not an integer amount: {}", field, e),
	})?;
	Ok(amount)
}

/// Fail unless the endpoint's expected pool is among `pools`
pub(crate) fn ensure_pool_present<'a, I>(endpoint: &Endpoint, pools: I) -> AdapterResult<()>
where
	I: IntoIterator<Item = &'a str>,
{
	let pools: Vec<&str> = pools.into_iter().collect();
	if pools.iter().any(|pool| endpoint.is_expected_pool(pool)) {
		return Ok(());
	}
	Err(AdapterError::PoolNotFound {
		expected: endpoint.expected_pool.clone(),
		found: pools.into_iter().map(str::to_string).collect(),
	})
}

/// Fail on any source that is not exactly `expected`
pub(crate) fn ensure_only_source<'a, I>(sources: I, expected: &str) -> AdapterResult<()>
where
	I: IntoIterator<Item = &'a str>,
{
	match sources.into_iter().find(|source| *source != expected) {
		Some(found) => Err(AdapterError::UnexpectedSource {
			found: found.to_string(),
			expected: expected.to_string(),
		}),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use qmon_types::test_utils::EndpointBuilder;

	#[test]
	fn test_url_with_params_encodes_values() {
		let url = url_with_params("https://api.example.org/quote", &[("a", "1,2"), ("b", "x y")]).unwrap();
		assert_eq!(url, "https://api.example.org/quote?a=1%2C2&b=x+y");
	}

	#[test]
	fn test_require_amount() {
		assert_eq!(require_amount(Some("987654"), "buyAmount").unwrap().as_str(), "987654");
		assert!(matches!(
			require_amount(Some("0"), "buyAmount"),
			Err(AdapterError::MissingAmount { .. })
		));
		assert!(matches!(
			require_amount(None, "buyAmount"),
			Err(AdapterError::MissingAmount { .. })
		));
		assert!(matches!(
			require_amount(Some("1.5"), "buyAmount"),
			Err(AdapterError::InvalidResponse { .. })
		));
	}

	#[test]
	fn test_ensure_pool_present_is_case_insensitive() {
		let endpoint = EndpointBuilder::new().expected_pool("0xABC").build();
		assert!(ensure_pool_present(&endpoint, ["0xdef", "0xabc"]).is_ok());

		let err = ensure_pool_present(&endpoint, ["0xdef"]).unwrap_err();
		assert!(err.to_string().contains("0xABC"));
	}

	#[test]
	fn test_ensure_only_source_names_offender() {
		assert!(ensure_only_source(["BalancerV3", "BalancerV3"], "BalancerV3").is_ok());
		let err = ensure_only_source(["BalancerV3", "UniswapV3"], "BalancerV3").unwrap_err();
		assert!(err.to_string().contains("UniswapV3"));
	}
}
