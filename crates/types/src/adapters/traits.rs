//! Provider adapter contract

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use super::{AdapterResult, ApiResponse, QuoteOutcome, RequestOptions};
use crate::endpoints::Endpoint;

/// Strategy bundle for one routing service
///
/// Adapters are stateless apart from shared HTTP plumbing and are registered
/// once at startup under their route-solver id.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + Debug {
	/// Route-solver identifier, e.g. `"0x"` or `"balancer_sor"`
	fn id(&self) -> &str;

	/// Build the request URL including query parameters
	///
	/// Async so that adapters needing auxiliary lookups (gas price, source
	/// ids) can perform them here.
	async fn build_url(&self, endpoint: &Endpoint, options: &RequestOptions)
		-> AdapterResult<String>;

	/// Build the POST body, `None` for GET providers
	fn build_body(
		&self,
		_endpoint: &Endpoint,
		_options: &RequestOptions,
	) -> AdapterResult<Option<Value>> {
		Ok(None)
	}

	/// Validate a raw response and extract the destination amount
	///
	/// With `options.restricted` unset, only the amount is extracted.
	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome>;
}
