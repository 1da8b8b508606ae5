//! Request and response value objects shared by adapters and the HTTP client

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::{AdapterError, AdapterResult};
use crate::endpoints::SwapPath;
use crate::models::Amount;

/// Default bound on any provider call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	Get,
	Post,
}

impl HttpMethod {
	pub fn as_str(&self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}

/// Fully built outbound call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
	pub method: HttpMethod,
	pub url: String,
	pub body: Option<Value>,
	pub headers: Vec<(String, String)>,
	pub timeout: Duration,
}

impl ApiRequest {
	pub fn get(url: impl Into<String>) -> Self {
		Self {
			method: HttpMethod::Get,
			url: url.into(),
			body: None,
			headers: Vec::new(),
			timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	pub fn post(url: impl Into<String>, body: Option<Value>) -> Self {
		Self {
			method: HttpMethod::Post,
			body,
			..Self::get(url)
		}
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

/// Raw provider answer, consumed once by the owning adapter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiResponse {
	pub status_code: u16,
	pub body: Vec<u8>,
	pub headers: HashMap<String, String>,
}

impl ApiResponse {
	pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status_code,
			body: body.into(),
			headers: HashMap::new(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status_code)
	}

	/// Lossy body text, for logs and error messages
	pub fn body_text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Decode the body, folding a non-2xx status into the error
	pub fn json<T: DeserializeOwned>(&self) -> AdapterResult<T> {
		serde_json::from_slice(&self.body).map_err(|e| {
			if self.is_success() {
				AdapterError::InvalidResponse {
					reason: format!("Error parsing JSON: {}", e),
				}
			} else {
				AdapterError::HttpStatusError {
					status_code: self.status_code,
					reason: self.body_text(),
				}
			}
		})
	}
}

/// Per-call mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestOptions {
	/// Exclude every liquidity source but Balancer V3
	pub restricted: bool,
}

impl RequestOptions {
	pub fn restricted() -> Self {
		Self { restricted: true }
	}

	pub fn market_price() -> Self {
		Self { restricted: false }
	}
}

/// What a successful validation yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
	/// Destination amount in the output token's smallest unit
	pub amount: Amount,
	pub swap_path: Option<SwapPath>,
}

impl QuoteOutcome {
	pub fn new(amount: impl Into<Amount>) -> Self {
		Self {
			amount: amount.into(),
			swap_path: None,
		}
	}

	pub fn with_path(mut self, path: SwapPath) -> Self {
		self.swap_path = Some(path);
		self
	}
}
