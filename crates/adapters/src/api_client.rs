//! Generic API client
//!
//! Executes one fully built provider request. A non-2xx status is returned as
//! a normal `ApiResponse`; only connection, timeout and read failures are
//! errors. Nothing is retried here.

use async_trait::async_trait;
use qmon_types::{AdapterError, AdapterResult, ApiRequest, ApiResponse, HttpMethod};
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

use crate::client_cache::{ClientCache, ClientConfig};

/// Transport seam between adapters/registry and the network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpExecutor: Send + Sync + Debug {
	async fn execute(&self, provider_id: &str, request: &ApiRequest) -> AdapterResult<ApiResponse>;

	/// Drop pooled clients past their TTL; returns how many were dropped
	fn evict_idle_clients(&self) -> usize {
		0
	}
}

/// Client acquisition strategy
#[derive(Debug, Clone)]
enum ClientStrategy {
	/// Pooled clients from a TTL cache
	Cached(ClientCache),
	/// A fresh client per call
	OnDemand,
}

/// reqwest-backed `HttpExecutor`
#[derive(Debug, Clone)]
pub struct ApiClient {
	client_strategy: ClientStrategy,
}

impl Default for ApiClient {
	fn default() -> Self {
		Self::new()
	}
}

impl ApiClient {
	/// Client backed by the process-wide cache
	pub fn new() -> Self {
		Self::with_cache(ClientCache::for_adapter())
	}

	pub fn with_cache(cache: ClientCache) -> Self {
		Self {
			client_strategy: ClientStrategy::Cached(cache),
		}
	}

	pub fn without_cache() -> Self {
		Self {
			client_strategy: ClientStrategy::OnDemand,
		}
	}

	fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<reqwest::Client>> {
		match &self.client_strategy {
			ClientStrategy::Cached(cache) => cache.get_client(config),
			ClientStrategy::OnDemand => reqwest::Client::builder()
				.timeout(std::time::Duration::from_millis(config.timeout_ms))
				.build()
				.map(Arc::new)
				.map_err(AdapterError::HttpError),
		}
	}

	fn map_transport_error(error: reqwest::Error, timeout_ms: u64) -> AdapterError {
		if error.is_timeout() {
			AdapterError::Timeout { timeout_ms }
		} else if error.is_connect() {
			AdapterError::Connection(error.to_string())
		} else {
			AdapterError::HttpError(error)
		}
	}
}

#[async_trait]
impl HttpExecutor for ApiClient {
	async fn execute(&self, provider_id: &str, request: &ApiRequest) -> AdapterResult<ApiResponse> {
		let config = ClientConfig::new(provider_id, request.timeout);
		let client = self.get_client(&config)?;

		let mut builder = match request.method {
			HttpMethod::Get => client.get(&request.url),
			HttpMethod::Post => client.post(&request.url),
		};
		for (name, value) in &request.headers {
			let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
				AdapterError::ConfigError {
					reason: format!("invalid header name {}: {}", name, e),
				}
			})?;
			let header_value =
				HeaderValue::from_str(value).map_err(|e| AdapterError::ConfigError {
					reason: format!("invalid value for header {}: {}", name, e),
				})?;
			builder = builder.header(header_name, header_value);
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		debug!("{} {} {}", provider_id, request.method.as_str(), request.url);
		let response = builder
			.send()
			.await
			.map_err(|e| Self::map_transport_error(e, config.timeout_ms))?;

		let status_code = response.status().as_u16();
		let headers: HashMap<String, String> = response
			.headers()
			.iter()
			.filter_map(|(name, value)| {
				value
					.to_str()
					.ok()
					.map(|value| (name.as_str().to_string(), value.to_string()))
			})
			.collect();
		let body = response
			.bytes()
			.await
			.map_err(|e| Self::map_transport_error(e, config.timeout_ms))?;

		debug!("{} responded with HTTP {}", provider_id, status_code);
		Ok(ApiResponse {
			status_code,
			body: body.to_vec(),
			headers,
		})
	}

	fn evict_idle_clients(&self) -> usize {
		match &self.client_strategy {
			ClientStrategy::Cached(cache) => cache.cleanup_expired(),
			ClientStrategy::OnDemand => 0,
		}
	}
}
