//! HTTP client cache for provider connections
//!
//! Keeps one pooled `reqwest::Client` per provider and timeout so repeated
//! checks against the same service reuse keep-alive connections.

use dashmap::{mapref::entry::Entry, DashMap};
use qmon_types::{AdapterError, AdapterResult};
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key and build parameters for one client
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Route-solver id the client is dedicated to
	pub provider_id: String,
	/// Whole-request timeout
	pub timeout_ms: u64,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
}

impl ClientConfig {
	pub fn new(provider_id: impl Into<String>, timeout: Duration) -> Self {
		Self {
			provider_id: provider_id.into(),
			timeout_ms: timeout.as_millis() as u64,
			max_idle_per_host: 4,
			keep_alive_timeout_ms: 90_000,
		}
	}
}

/// A built client and when it was built
#[derive(Debug, Clone)]
struct PooledClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl PooledClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Clients keyed by provider and timeout, each kept for at most `ttl`
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, PooledClient>>,
	ttl: Duration,
}

impl ClientCache {
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Pooled client for `config`, rebuilt once it outlives the TTL
	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<Client>> {
		match self.clients.entry(config.clone()) {
			Entry::Occupied(mut entry) => {
				if entry.get().is_expired(self.ttl) {
					debug!(
						provider = %config.provider_id,
						age = ?entry.get().created_at.elapsed(),
						"Replacing expired HTTP client"
					);
					entry.insert(PooledClient::new(Self::create_client(config)?));
				}
				Ok(entry.get().client.clone())
			},
			Entry::Vacant(entry) => {
				debug!(
					provider = %config.provider_id,
					timeout_ms = config.timeout_ms,
					"Building HTTP client"
				);
				let pooled = entry.insert(PooledClient::new(Self::create_client(config)?));
				Ok(pooled.client.clone())
			},
		}
	}

	fn create_client(config: &ClientConfig) -> AdapterResult<Client> {
		ClientBuilder::new()
			.timeout(Duration::from_millis(config.timeout_ms))
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.tcp_keepalive(Duration::from_secs(60))
			.user_agent("quote-monitor/0.1")
			.build()
			.map_err(AdapterError::HttpError)
	}

	/// Remove all expired clients, returning how many were dropped
	pub fn cleanup_expired(&self) -> usize {
		let before = self.clients.len();
		self.clients.retain(|_, pooled| !pooled.is_expired(self.ttl));
		let removed = before.saturating_sub(self.clients.len());
		if removed > 0 {
			debug!(removed, "Dropped expired HTTP clients");
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}

	/// Shared process-wide cache
	pub fn for_adapter() -> Self {
		SHARED_CLIENTS.clone()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

lazy_static::lazy_static! {
	static ref SHARED_CLIENTS: ClientCache = ClientCache::new();
}
