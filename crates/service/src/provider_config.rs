//! Per-provider transport configuration
//!
//! Method, static headers, timeout and the optional API key each provider
//! expects. Keys are looked up through `SecretProvider`, never stored here.

use qmon_types::{HttpMethod, SecretString, DEFAULT_REQUEST_TIMEOUT};
use std::time::Duration;

/// Where a provider expects its API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyPlacement {
	/// Raw key in the named header
	Header(String),
	/// `Authorization: Bearer <key>`
	Bearer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyConfig {
	/// Secret name, e.g. `ZEROX_API_KEY`
	pub env_var: String,
	pub placement: ApiKeyPlacement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
	pub id: String,
	pub method: HttpMethod,
	pub headers: Vec<(String, String)>,
	pub api_key: Option<ApiKeyConfig>,
	pub timeout: Duration,
}

impl ProviderConfig {
	pub fn get(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			method: HttpMethod::Get,
			headers: Vec::new(),
			api_key: None,
			timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	pub fn post(id: impl Into<String>) -> Self {
		Self {
			method: HttpMethod::Post,
			..Self::get(id)
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn with_api_key(mut self, env_var: impl Into<String>, placement: ApiKeyPlacement) -> Self {
		self.api_key = Some(ApiKeyConfig {
			env_var: env_var.into(),
			placement,
		});
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Static headers followed by the key header, if any
	pub fn headers_with_key(&self, key: Option<&SecretString>) -> Vec<(String, String)> {
		let mut headers = self.headers.clone();
		if let (Some(config), Some(key)) = (&self.api_key, key) {
			match &config.placement {
				ApiKeyPlacement::Header(name) => {
					headers.push((name.clone(), key.expose_secret().to_string()))
				},
				ApiKeyPlacement::Bearer => headers.push((
					"Authorization".to_string(),
					format!("Bearer {}", key.expose_secret()),
				)),
			}
		}
		headers
	}

	/// Transport settings for every built-in provider
	pub fn defaults() -> Vec<ProviderConfig> {
		const JSON: &str = "application/json";
		vec![
			ProviderConfig::get("0x")
				.with_header("0x-version", "v2")
				.with_api_key("ZEROX_API_KEY", ApiKeyPlacement::Header("0x-api-key".into())),
			ProviderConfig::get("paraswap").with_header("Content-Type", JSON),
			ProviderConfig::get("1inch")
				.with_header("Content-Type", JSON)
				.with_api_key("INCH_API_KEY", ApiKeyPlacement::Bearer),
			ProviderConfig::get("hyperbloom")
				.with_api_key("HYPERBLOOM_API_KEY", ApiKeyPlacement::Header("api-key".into())),
			ProviderConfig::get("kyberswap").with_header("x-client-id", "BalancerTest"),
			ProviderConfig::post("odos").with_header("Content-Type", JSON),
			ProviderConfig::get("openocean"),
			ProviderConfig::post("balancer_sor").with_header("Content-Type", JSON),
			ProviderConfig::post("barter")
				.with_header("Content-Type", JSON)
				.with_header("X-Request-Id", "123")
				.with_api_key("BARTER_API_KEY", ApiKeyPlacement::Bearer),
		]
	}
}
