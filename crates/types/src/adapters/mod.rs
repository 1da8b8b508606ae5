//! Provider adapter domain model

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::{AdapterError, ErrorKind};
pub use models::{
	ApiRequest, ApiResponse, HttpMethod, QuoteOutcome, RequestOptions, DEFAULT_REQUEST_TIMEOUT,
};
pub use traits::ProviderAdapter;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
