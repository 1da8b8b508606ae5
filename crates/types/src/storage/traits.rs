//! Storage trait for the endpoint store

use async_trait::async_trait;

use super::StorageResult;
use crate::endpoints::Endpoint;

/// Endpoint store
///
/// Readers always get copies; writers replace one endpoint by name. No
/// implementation may hold its lock across a provider call.
#[async_trait]
pub trait EndpointStorageTrait: Send + Sync {
	/// Replace the whole endpoint list
	async fn set_endpoints(&self, endpoints: Vec<Endpoint>) -> StorageResult<()>;

	/// Copy of every endpoint, in insertion order
	async fn snapshot(&self) -> StorageResult<Vec<Endpoint>>;

	/// Copy of one endpoint
	async fn get_endpoint(&self, name: &str) -> StorageResult<Option<Endpoint>>;

	/// Overwrite the endpoint carrying `endpoint.name`
	async fn update_endpoint(&self, endpoint: Endpoint) -> StorageResult<()>;

	async fn count(&self) -> StorageResult<usize>;

	async fn health_check(&self) -> StorageResult<bool>;
}
