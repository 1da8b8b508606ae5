//! Error types for provider adapter operations

use thiserror::Error;

/// How a failed check is reported on the endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Missing key, unsupported network or a request that could not be built
	Configuration,
	/// Connection, timeout or read failure
	Transport,
	/// The provider answered but the payload failed validation
	Validation,
	/// The provider is known not to support this pool type or network yet
	KnownUnsupported,
}

/// Provider adapter errors
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Connection error: {0}")]
	Connection(String),

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	/// Provider-level error or "no route" sentinel, message kept verbatim
	#[error("{message}")]
	ProviderError { message: String },

	#[error("unexpected source found in route: {found}, expected {expected}")]
	UnexpectedSource { found: String, expected: String },

	#[error("Expected pool {expected} not found in route pools: {found:?}")]
	PoolNotFound { expected: String, found: Vec<String> },

	#[error("Expected {expected} hops, got {actual}")]
	HopMismatch { expected: usize, actual: usize },

	#[error("missing or zero {field} in response")]
	MissingAmount { field: String },

	#[error("unsupported network {network} for {provider}")]
	UnsupportedNetwork { network: String, provider: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("{env_var} environment variable not set")]
	MissingApiKey { env_var: String },

	#[error("{reason}")]
	KnownUnsupported { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl AdapterError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			AdapterError::UnsupportedNetwork { .. }
			| AdapterError::ConfigError { .. }
			| AdapterError::MissingApiKey { .. } => ErrorKind::Configuration,
			AdapterError::HttpError(_)
			| AdapterError::Timeout { .. }
			| AdapterError::Connection(_) => ErrorKind::Transport,
			AdapterError::KnownUnsupported { .. } => ErrorKind::KnownUnsupported,
			_ => ErrorKind::Validation,
		}
	}

	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	pub fn provider(message: impl Into<String>) -> Self {
		Self::ProviderError {
			message: message.into(),
		}
	}

	pub fn invalid_response(reason: impl Into<String>) -> Self {
		Self::InvalidResponse {
			reason: reason.into(),
		}
	}

	pub fn missing_amount(field: impl Into<String>) -> Self {
		Self::MissingAmount {
			field: field.into(),
		}
	}

	pub fn unsupported_network(network: impl Into<String>, provider: impl Into<String>) -> Self {
		Self::UnsupportedNetwork {
			network: network.into(),
			provider: provider.into(),
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_kind_classification() {
		assert_eq!(
			AdapterError::MissingApiKey {
				env_var: "ZEROX_API_KEY".into()
			}
			.kind(),
			ErrorKind::Configuration
		);
		assert_eq!(
			AdapterError::unsupported_network("56", "0x").kind(),
			ErrorKind::Configuration
		);
		assert_eq!(
			AdapterError::Timeout { timeout_ms: 30000 }.kind(),
			ErrorKind::Transport
		);
		assert_eq!(
			AdapterError::Connection("refused".into()).kind(),
			ErrorKind::Transport
		);
		assert_eq!(
			AdapterError::HopMismatch {
				expected: 1,
				actual: 2
			}
			.kind(),
			ErrorKind::Validation
		);
		assert_eq!(
			AdapterError::KnownUnsupported {
				reason: "1inch GyroE integration WIP".into()
			}
			.kind(),
			ErrorKind::KnownUnsupported
		);
	}

	#[test]
	fn test_messages_name_the_offender() {
		let err = AdapterError::UnexpectedSource {
			found: "Uniswap_V3".into(),
			expected: "Balancer_V3".into(),
		};
		assert!(err.to_string().contains("Uniswap_V3"));

		let err = AdapterError::PoolNotFound {
			expected: "0xpool".into(),
			found: vec!["0xother".into()],
		};
		assert!(err.to_string().contains("0xpool"));

		let err = AdapterError::MissingApiKey {
			env_var: "INCH_API_KEY".into(),
		};
		assert_eq!(err.to_string(), "INCH_API_KEY environment variable not set");

		assert_eq!(
			AdapterError::provider("No Routes Found").to_string(),
			"No Routes Found"
		);
	}

	#[test]
	fn test_http_failure_status_mapping() {
		let error = AdapterError::from_http_failure(429);
		assert_eq!(error.status_code(), Some(429));
		assert!(error.to_string().contains("Too Many Requests"));

		let error = AdapterError::from_http_failure(418);
		assert!(error.to_string().contains("HTTP Error 418"));

		assert_eq!(AdapterError::invalid_response("bad").status_code(), None);
	}
}
