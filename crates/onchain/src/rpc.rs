//! eth_call transport
//!
//! `RpcCaller` is the seam the verifier talks to. `AlloyRpcCaller` keeps one
//! HTTP provider per RPC URL, created on first use.

use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::errors::{OnChainError, OnChainResult};

pub type HttpProvider = RootProvider<Ethereum>;

/// Read-only contract invocation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RpcCaller: Send + Sync + Debug {
	async fn call(&self, rpc_url: &str, to: Address, data: Bytes) -> OnChainResult<Bytes>;
}

#[derive(Debug, Clone, Default)]
pub struct AlloyRpcCaller {
	providers: Arc<RwLock<HashMap<String, HttpProvider>>>,
}

impl AlloyRpcCaller {
	pub fn new() -> Self {
		Self::default()
	}

	async fn provider(&self, rpc_url: &str) -> OnChainResult<HttpProvider> {
		if let Some(provider) = self.providers.read().await.get(rpc_url) {
			return Ok(provider.clone());
		}

		let mut providers = self.providers.write().await;
		// Another task may have created it while we waited for the write lock
		if let Some(provider) = providers.get(rpc_url) {
			return Ok(provider.clone());
		}

		let url = Url::parse(rpc_url).map_err(|e| OnChainError::Connection {
			url: rpc_url.to_string(),
			reason: e.to_string(),
		})?;
		let provider = RootProvider::new_http(url);
		providers.insert(rpc_url.to_string(), provider.clone());
		debug!("Created RPC provider ({} cached)", providers.len());
		Ok(provider)
	}

	pub async fn cached_providers(&self) -> usize {
		self.providers.read().await.len()
	}
}

#[async_trait]
impl RpcCaller for AlloyRpcCaller {
	async fn call(&self, rpc_url: &str, to: Address, data: Bytes) -> OnChainResult<Bytes> {
		let provider = self.provider(rpc_url).await?;
		let request = TransactionRequest::default().with_to(to).with_input(data);
		provider
			.call(request)
			.await
			.map_err(|e| OnChainError::CallFailed(e.to_string()))
	}
}
