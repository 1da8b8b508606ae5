//! Endpoint checks against the store
//!
//! Reads copies out of the store, checks them with no lock held and writes
//! the result back by name.

use qmon_storage::EndpointStorage;
use qmon_types::Endpoint;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::{RegistryError, RegistryResult};
use crate::registry::{CheckMode, ProviderRegistry};

#[derive(Clone)]
pub struct MonitorService {
	storage: Arc<dyn EndpointStorage>,
	registry: Arc<ProviderRegistry>,
}

impl MonitorService {
	pub fn new(storage: Arc<dyn EndpointStorage>, registry: Arc<ProviderRegistry>) -> Self {
		Self { storage, registry }
	}

	pub fn storage(&self) -> &Arc<dyn EndpointStorage> {
		&self.storage
	}

	/// Run a full check for one named endpoint and persist the result
	pub async fn check_endpoint(&self, name: &str) -> RegistryResult<Endpoint> {
		let endpoint = self
			.storage
			.get_endpoint(name)
			.await?
			.ok_or_else(|| RegistryError::EndpointNotFound {
				name: name.to_string(),
			})?;
		self.check_and_store(endpoint, CheckMode::Both).await
	}

	async fn check_and_store(&self, mut endpoint: Endpoint, mode: CheckMode) -> RegistryResult<Endpoint> {
		self.registry.check_provider(&mut endpoint, mode).await;
		self.storage.update_endpoint(endpoint.clone()).await?;
		Ok(endpoint)
	}

	/// One scheduler cycle: every endpoint in snapshot order, pausing for
	/// each endpoint's delay afterwards. A failing endpoint never stops the walk.
	pub async fn check_all(&self) -> RegistryResult<usize> {
		let endpoints = self.storage.snapshot().await?;
		let total = endpoints.len();
		info!("Starting check cycle for {} endpoints", total);

		for endpoint in endpoints {
			let name = endpoint.name.clone();
			let delay = Duration::from_secs(endpoint.delay_secs);
			match self.check_and_store(endpoint, CheckMode::Both).await {
				Ok(checked) => info!(
					endpoint = %name,
					status = %checked.last_status,
					"{}",
					checked.message
				),
				Err(e) => warn!(endpoint = %name, "Failed to store check result: {}", e),
			}
			if !delay.is_zero() {
				tokio::time::sleep(delay).await;
			}
		}

		self.registry.evict_idle_clients();
		info!("Check cycle finished");
		Ok(total)
	}
}
