//! Settings and provider payloads used across integration tests

use quote_monitor::config::{ConfigurableValue, SwapPairSettings};
use quote_monitor::{Amount, Settings};
use serde_json::json;

#[allow(dead_code)]
pub const TOKEN_IN: &str = "0xd9aAEc86B65D86f6A7B5B1b0c42FFA531710b6CA";
#[allow(dead_code)]
pub const TOKEN_OUT: &str = "0xfde4C96c8593536E31F229EA8f37b2ADa2699bb2";
#[allow(dead_code)]
pub const POOL: &str = "0x7ab124ec4029316c2a42f713828ddf2a192b36db";
#[allow(dead_code)]
pub const RPC_URL: &str = "http://rpc.test";
/// Name the builder derives for the KyberSwap endpoint of the fixture pair
#[allow(dead_code)]
pub const KYBER_ENDPOINT: &str = "KyberSwap-Stable-USDbC-USDT-Base";

#[allow(dead_code)]
pub fn swap_pair() -> SwapPairSettings {
	SwapPairSettings {
		name: "Stable-USDbC-USDT-Base".to_string(),
		network: "8453".to_string(),
		token_in: TOKEN_IN.to_string(),
		token_out: TOKEN_OUT.to_string(),
		token_in_decimals: 6,
		token_out_decimals: 6,
		expected_pool: POOL.to_string(),
		swap_amount: Amount::new("1000000"),
		expected_hops: 1,
	}
}

/// One Base pair watched by KyberSwap only, no pauses, on-chain checks on
#[allow(dead_code)]
pub fn kyber_settings() -> Settings {
	let mut settings = Settings::default();
	settings.solvers.retain(|solver| solver.id == "kyberswap");
	settings.swap_pairs = vec![swap_pair()];
	settings.scheduler.market_price_delay_secs = 0;
	settings.scheduler.default_delay_secs = 0;
	settings.scheduler.solver_delays_secs.clear();
	settings
		.rpc_urls
		.insert("8453".to_string(), ConfigurableValue::from_plain(RPC_URL));
	settings
}

/// KyberSwap `/routes` body with one sequence of `(pool, exchange)` hops
#[allow(dead_code)]
pub fn kyber_body(hops: &[(&str, &str)], amount_out: &str) -> String {
	let sequence: Vec<_> = hops
		.iter()
		.map(|(pool, exchange)| {
			json!({
				"pool": pool,
				"tokenIn": TOKEN_IN,
				"tokenOut": TOKEN_OUT,
				"swapAmount": "1000000",
				"amountOut": amount_out,
				"exchange": exchange,
			})
		})
		.collect();
	json!({
		"code": 0,
		"message": "successfully",
		"requestId": "e2e",
		"data": {
			"routeSummary": {
				"amountOut": amount_out,
				"routeID": "route-e2e",
				"route": [sequence],
			}
		}
	})
	.to_string()
}
