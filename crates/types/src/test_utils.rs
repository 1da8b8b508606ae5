//! Test utilities for creating common test objects
//!
//! Builder for `Endpoint` values with sensible defaults so tests only spell
//! out the fields they care about.

use crate::endpoints::{Endpoint, EndpointStatus, SwapPath};
use crate::models::Amount;

pub const TEST_TOKEN_IN: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
pub const TEST_TOKEN_OUT: &str = "0x4200000000000000000000000000000000000006";
pub const TEST_POOL: &str = "0x7ab124ec4029316c2a42f713828ddf2a192b36db";

/// Builder for test `Endpoint` objects
#[derive(Debug, Clone)]
pub struct EndpointBuilder {
	endpoint: Endpoint,
}

impl Default for EndpointBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl EndpointBuilder {
	/// A single-hop USDC to WETH endpoint on Base routed through 0x
	pub fn new() -> Self {
		Self {
			endpoint: Endpoint {
				name: "0x-USDC-WETH-Base".to_string(),
				base_name: "USDC-WETH-Base".to_string(),
				solver_name: "0x".to_string(),
				route_solver: "0x".to_string(),
				network: "8453".to_string(),
				token_in: TEST_TOKEN_IN.to_string(),
				token_out: TEST_TOKEN_OUT.to_string(),
				token_in_decimals: 6,
				token_out_decimals: 18,
				swap_amount: Amount::new("1000000"),
				expected_pool: TEST_POOL.to_string(),
				expected_hops: 1,
				delay_secs: 0,
				last_status: EndpointStatus::Unknown,
				last_checked: None,
				message: String::new(),
				return_amount: None,
				market_price: None,
				swap_path: None,
				onchain_amount: None,
				onchain_message: None,
			},
		}
	}

	/// Set the route solver and derive `solver_name` and `name` from it
	pub fn solver(mut self, route_solver: &str) -> Self {
		self.endpoint.route_solver = route_solver.to_string();
		self.endpoint.solver_name = route_solver.to_string();
		self.endpoint.name = format!("{}-{}", route_solver, self.endpoint.base_name);
		self
	}

	/// Set the base name and re-derive `name`
	pub fn base_name(mut self, base_name: &str) -> Self {
		self.endpoint.base_name = base_name.to_string();
		self.endpoint.name = format!("{}-{}", self.endpoint.solver_name, base_name);
		self
	}

	pub fn name(mut self, name: &str) -> Self {
		self.endpoint.name = name.to_string();
		self
	}

	pub fn network(mut self, network: &str) -> Self {
		self.endpoint.network = network.to_string();
		self
	}

	pub fn tokens(mut self, token_in: &str, token_out: &str) -> Self {
		self.endpoint.token_in = token_in.to_string();
		self.endpoint.token_out = token_out.to_string();
		self
	}

	pub fn decimals(mut self, token_in: u8, token_out: u8) -> Self {
		self.endpoint.token_in_decimals = token_in;
		self.endpoint.token_out_decimals = token_out;
		self
	}

	pub fn swap_amount(mut self, amount: &str) -> Self {
		self.endpoint.swap_amount = Amount::new(amount);
		self
	}

	pub fn expected_pool(mut self, pool: &str) -> Self {
		self.endpoint.expected_pool = pool.to_string();
		self
	}

	pub fn expected_hops(mut self, hops: usize) -> Self {
		self.endpoint.expected_hops = hops;
		self
	}

	pub fn delay_secs(mut self, delay: u64) -> Self {
		self.endpoint.delay_secs = delay;
		self
	}

	pub fn swap_path(mut self, path: SwapPath) -> Self {
		self.endpoint.swap_path = Some(path);
		self
	}

	pub fn status(mut self, status: EndpointStatus) -> Self {
		self.endpoint.last_status = status;
		self
	}

	pub fn build(self) -> Endpoint {
		self.endpoint
	}
}
