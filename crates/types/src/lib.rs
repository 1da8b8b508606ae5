//! Quote Monitor Types
//!
//! Shared models and traits for the quote monitor.
//! This crate contains the endpoint model, the provider adapter contract and
//! the collaborator traits (storage, notifications, secrets) used across the workspace.

pub mod adapters;
pub mod endpoints;
pub mod models;
pub mod notifications;
pub mod secrets;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{
	AdapterError, AdapterResult, ApiRequest, ApiResponse, ErrorKind, HttpMethod, ProviderAdapter,
	QuoteOutcome, RequestOptions, DEFAULT_REQUEST_TIMEOUT,
};

pub use endpoints::{Endpoint, EndpointStatus, SwapPath, SwapPathStep};

pub use models::{network_name, Amount, AmountError, SecretString};

pub use notifications::{LogNotifier, NoopNotifier, Notifier};

pub use secrets::{EnvSecretProvider, SecretProvider, StaticSecretProvider};

pub use storage::{EndpointStorageTrait, StorageError, StorageResult};
