//! On-chain verifier errors

use thiserror::Error;

pub type OnChainResult<T> = Result<T, OnChainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OnChainError {
	#[error("no RPC URL configured for network {network}")]
	NoRpcUrl { network: String },

	#[error("no path information available for endpoint {endpoint}")]
	NoPath { endpoint: String },

	#[error("invalid swap amount: {amount}")]
	InvalidSwapAmount { amount: String },

	#[error("invalid address {value}: {reason}")]
	InvalidAddress { value: String, reason: String },

	#[error("no {contract} address known for network {network}")]
	ContractNotConfigured { contract: &'static str, network: String },

	#[error("failed to connect to RPC {url}: {reason}")]
	Connection { url: String, reason: String },

	#[error("eth_call failed: {0}")]
	CallFailed(String),

	#[error("eth_call timed out after {timeout_secs}s")]
	Timeout { timeout_secs: u64 },

	#[error("ABI decoding failed: {0}")]
	DecodeFailed(String),

	#[error("empty amountsOut array")]
	EmptyAmountsOut,
}

impl OnChainError {
	pub fn invalid_address(value: &str, reason: impl ToString) -> Self {
		Self::InvalidAddress {
			value: value.to_string(),
			reason: reason.to_string(),
		}
	}
}
