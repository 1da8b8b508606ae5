//! On-chain price verification
//!
//! Re-quotes a decomposed swap path against the Balancer V3 routers with an
//! `eth_call`. One step goes through `Router.querySwapSingleTokenExactIn`,
//! longer paths through `BatchRouter.querySwapExactIn`.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use qmon_types::{Amount, Endpoint, SwapPath};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::contracts::{self, IBatchRouter, IRouter, SwapPathExactAmountIn};
use crate::errors::{OnChainError, OnChainResult};
use crate::rpc::{AlloyRpcCaller, RpcCaller};

pub const RPC_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OnChainVerifier {
	rpc_urls: HashMap<String, String>,
	caller: Arc<dyn RpcCaller>,
	timeout: Duration,
}

impl OnChainVerifier {
	/// Verifier over alloy HTTP providers; `rpc_urls` maps network id to URL
	pub fn new(rpc_urls: HashMap<String, String>) -> Self {
		Self::with_caller(rpc_urls, Arc::new(AlloyRpcCaller::new()))
	}

	pub fn with_caller(rpc_urls: HashMap<String, String>, caller: Arc<dyn RpcCaller>) -> Self {
		Self {
			rpc_urls,
			caller,
			timeout: RPC_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn has_rpc_url(&self, network: &str) -> bool {
		self.rpc_urls.contains_key(network)
	}

	/// Simulated output amount for the endpoint's recorded swap path
	#[instrument(skip_all, fields(endpoint = %endpoint.name, network = %endpoint.network))]
	pub async fn query_onchain_price(&self, endpoint: &Endpoint) -> OnChainResult<Amount> {
		let rpc_url = self
			.rpc_urls
			.get(&endpoint.network)
			.filter(|url| !url.trim().is_empty())
			.ok_or_else(|| OnChainError::NoRpcUrl {
				network: endpoint.network.clone(),
			})?;

		let path = endpoint
			.swap_path
			.as_ref()
			.filter(|path| !path.is_empty())
			.ok_or_else(|| OnChainError::NoPath {
				endpoint: endpoint.name.clone(),
			})?;

		let amount_in = endpoint
			.swap_amount
			.to_u256()
			.map_err(|_| OnChainError::InvalidSwapAmount {
				amount: endpoint.swap_amount.to_string(),
			})?;

		debug!(pools = ?path.pools().collect::<Vec<_>>(), "Querying on-chain price");

		let amount_out = if path.len() == 1 {
			self.query_single(rpc_url, endpoint, path, amount_in).await?
		} else {
			self.query_batch(rpc_url, endpoint, path, amount_in).await?
		};

		debug!(%amount_out, "Decoded on-chain amountOut");
		Ok(Amount::from(amount_out))
	}

	async fn query_single(
		&self,
		rpc_url: &str,
		endpoint: &Endpoint,
		path: &SwapPath,
		amount_in: U256,
	) -> OnChainResult<U256> {
		let router = contracts::deployment(&endpoint.network)
			.ok_or_else(|| OnChainError::ContractNotConfigured {
				contract: "Router",
				network: endpoint.network.clone(),
			})?
			.router;

		let call = IRouter::querySwapSingleTokenExactInCall {
			pool: parse_address(&path.steps[0].pool)?,
			tokenIn: parse_address(&endpoint.token_in)?,
			tokenOut: parse_address(&endpoint.token_out)?,
			exactAmountIn: amount_in,
			sender: Address::ZERO,
			userData: Bytes::new(),
		};

		let output = self.call(rpc_url, router, call.abi_encode()).await?;
		IRouter::querySwapSingleTokenExactInCall::abi_decode_returns(&output)
			.map_err(|e| OnChainError::DecodeFailed(e.to_string()))
	}

	async fn query_batch(
		&self,
		rpc_url: &str,
		endpoint: &Endpoint,
		path: &SwapPath,
		amount_in: U256,
	) -> OnChainResult<U256> {
		let batch_router = contracts::deployment(&endpoint.network)
			.ok_or_else(|| OnChainError::ContractNotConfigured {
				contract: "BatchRouter",
				network: endpoint.network.clone(),
			})?
			.batch_router;

		let steps = path
			.steps
			.iter()
			.map(|step| {
				Ok(contracts::SwapPathStep {
					pool: parse_address(&step.pool)?,
					tokenOut: parse_address(&step.token_out)?,
					isBuffer: step.is_buffer,
				})
			})
			.collect::<OnChainResult<Vec<_>>>()?;

		let call = IBatchRouter::querySwapExactInCall {
			paths: vec![SwapPathExactAmountIn {
				tokenIn: parse_address(&endpoint.token_in)?,
				steps,
				exactAmountIn: amount_in,
				minAmountOut: U256::ZERO,
			}],
			sender: Address::ZERO,
			userData: Bytes::new(),
		};

		let output = self.call(rpc_url, batch_router, call.abi_encode()).await?;
		let decoded = IBatchRouter::querySwapExactInCall::abi_decode_returns(&output)
			.map_err(|e| OnChainError::DecodeFailed(e.to_string()))?;
		decoded
			.amountsOut
			.last()
			.copied()
			.ok_or(OnChainError::EmptyAmountsOut)
	}

	async fn call(&self, rpc_url: &str, to: Address, data: Vec<u8>) -> OnChainResult<Bytes> {
		debug!(%to, calldata_len = data.len(), "eth_call");
		tokio::time::timeout(self.timeout, self.caller.call(rpc_url, to, Bytes::from(data)))
			.await
			.map_err(|_| OnChainError::Timeout {
				timeout_secs: self.timeout.as_secs(),
			})?
	}
}

fn parse_address(value: &str) -> OnChainResult<Address> {
	value
		.parse::<Address>()
		.map_err(|e| OnChainError::invalid_address(value, e))
}
