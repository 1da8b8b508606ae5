//! Error types for storage operations

use thiserror::Error;

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
	#[error("Endpoint not found: {name}")]
	NotFound { name: String },
	#[error("Storage operation failed: {message}")]
	Operation { message: String },
}
