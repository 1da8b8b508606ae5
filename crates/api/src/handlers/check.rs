//! Manual out-of-cycle checks

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Redirect,
};
use qmon_service::RegistryError;
use tracing::{info, warn};

use crate::handlers::common::{ErrorResponse, HandlerError};
use crate::state::AppState;

/// POST /check/{name} - run both sub-checks for one endpoint now, then go
/// back to the dashboard
pub async fn check_endpoint(
	State(state): State<AppState>,
	Path(name): Path<String>,
) -> Result<Redirect, HandlerError> {
	info!(endpoint = %name, "Manual check requested");
	match state.monitor.check_endpoint(&name).await {
		Ok(endpoint) => {
			info!(
				endpoint = %endpoint.name,
				status = %endpoint.last_status,
				"Manual check finished"
			);
			Ok(Redirect::to("/"))
		},
		Err(RegistryError::EndpointNotFound { name }) => Err(ErrorResponse::new(
			"ENDPOINT_NOT_FOUND",
			format!("Endpoint not found: {}", name),
		)
		.with_status(StatusCode::NOT_FOUND)),
		Err(e) => {
			warn!(endpoint = %name, "Manual check failed: {}", e);
			Err(ErrorResponse::new("STORAGE_ERROR", e.to_string())
				.with_status(StatusCode::INTERNAL_SERVER_ERROR))
		},
	}
}
