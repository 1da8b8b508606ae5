//! Monitored endpoints
//!
//! An endpoint is one (swap pair, expected pool, provider) combination. It is
//! created at startup and then mutated in place by every check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Amount;

/// Outcome of the most recent check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
	#[default]
	Unknown,
	Up,
	Down,
	Error,
	Info,
	Unsupported,
}

impl EndpointStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			EndpointStatus::Unknown => "unknown",
			EndpointStatus::Up => "up",
			EndpointStatus::Down => "down",
			EndpointStatus::Error => "error",
			EndpointStatus::Info => "info",
			EndpointStatus::Unsupported => "unsupported",
		}
	}

	/// Statuses that warrant an outbound notification
	pub fn is_failure(&self) -> bool {
		matches!(self, EndpointStatus::Down | EndpointStatus::Error)
	}
}

impl fmt::Display for EndpointStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One step of a decomposed route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPathStep {
	pub pool: String,
	pub token_out: String,
	/// Wrap/unwrap through an ERC-4626 buffer rather than a pool swap
	pub is_buffer: bool,
}

/// Ordered pool steps from `token_in` to `token_out`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SwapPath {
	pub steps: Vec<SwapPathStep>,
}

impl SwapPath {
	pub fn new(steps: Vec<SwapPathStep>) -> Self {
		Self { steps }
	}

	pub fn len(&self) -> usize {
		self.steps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	pub fn pools(&self) -> impl Iterator<Item = &str> {
		self.steps.iter().map(|step| step.pool.as_str())
	}
}

/// A monitoring target and the results of its latest check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
	/// `"{solver_name}-{base_name}"`, unique across the store
	pub name: String,
	pub base_name: String,
	pub solver_name: String,
	/// Key into the adapter registry, e.g. `"0x"`
	pub route_solver: String,
	/// Decimal chain id
	pub network: String,
	pub token_in: String,
	pub token_out: String,
	pub token_in_decimals: u8,
	pub token_out_decimals: u8,
	pub swap_amount: Amount,
	pub expected_pool: String,
	pub expected_hops: usize,
	/// Pause after this endpoint's check before the scheduler moves on
	pub delay_secs: u64,

	pub last_status: EndpointStatus,
	pub last_checked: Option<DateTime<Utc>>,
	pub message: String,
	pub return_amount: Option<Amount>,
	pub market_price: Option<Amount>,
	pub swap_path: Option<SwapPath>,
	pub onchain_amount: Option<Amount>,
	pub onchain_message: Option<String>,
}

impl Endpoint {
	/// Record a check outcome and stamp the check time
	pub fn record(&mut self, status: EndpointStatus, message: impl Into<String>) {
		self.last_status = status;
		self.message = message.into();
		self.last_checked = Some(Utc::now());
	}

	/// Drop the decomposed path and the on-chain result of an earlier check
	pub fn clear_onchain(&mut self) {
		self.swap_path = None;
		self.onchain_amount = None;
		self.onchain_message = None;
	}

	/// Case-insensitive match against the configured pool address
	pub fn is_expected_pool(&self, pool: &str) -> bool {
		pool.eq_ignore_ascii_case(&self.expected_pool)
	}
}
