//! In-memory endpoint store guarded by a single mutex

use crate::traits::{EndpointStorage, StorageError, StorageResult};
use async_trait::async_trait;
use qmon_types::Endpoint;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
	endpoints: Vec<Endpoint>,
	/// name -> position in `endpoints`
	index: HashMap<String, usize>,
}

impl Inner {
	fn rebuild_index(&mut self) {
		self.index = self
			.endpoints
			.iter()
			.enumerate()
			.map(|(position, endpoint)| (endpoint.name.clone(), position))
			.collect();
	}
}

/// Endpoint list behind one lock
///
/// Every operation copies in or out under the lock and releases it before
/// returning, so no caller can hold it across network I/O.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
	/// Create a new empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store seeded with endpoints
	pub fn with_endpoints(endpoints: Vec<Endpoint>) -> Self {
		let mut inner = Inner {
			endpoints,
			index: HashMap::new(),
		};
		inner.rebuild_index();
		Self {
			inner: Arc::new(Mutex::new(inner)),
		}
	}
}

#[async_trait]
impl EndpointStorage for MemoryStore {
	async fn set_endpoints(&self, endpoints: Vec<Endpoint>) -> StorageResult<()> {
		let mut inner = self.inner.lock().await;
		inner.endpoints = endpoints;
		inner.rebuild_index();
		debug!("Endpoint store reset with {} endpoints", inner.endpoints.len());
		Ok(())
	}

	async fn snapshot(&self) -> StorageResult<Vec<Endpoint>> {
		Ok(self.inner.lock().await.endpoints.clone())
	}

	async fn get_endpoint(&self, name: &str) -> StorageResult<Option<Endpoint>> {
		let inner = self.inner.lock().await;
		Ok(inner
			.index
			.get(name)
			.and_then(|&position| inner.endpoints.get(position))
			.cloned())
	}

	async fn update_endpoint(&self, endpoint: Endpoint) -> StorageResult<()> {
		let mut inner = self.inner.lock().await;
		let position = *inner
			.index
			.get(&endpoint.name)
			.ok_or_else(|| StorageError::NotFound {
				name: endpoint.name.clone(),
			})?;
		inner.endpoints[position] = endpoint;
		Ok(())
	}

	async fn count(&self) -> StorageResult<usize> {
		Ok(self.inner.lock().await.endpoints.len())
	}

	async fn health_check(&self) -> StorageResult<bool> {
		Ok(true)
	}
}
