//! Storage traits for pluggable storage implementations

// Re-export the storage trait from types crate
pub use qmon_types::storage::{
	EndpointStorageTrait as EndpointStorage, StorageError, StorageResult,
};
