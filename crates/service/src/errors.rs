//! Service errors

use qmon_types::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
	#[error("endpoint not found: {name}")]
	EndpointNotFound { name: String },

	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
