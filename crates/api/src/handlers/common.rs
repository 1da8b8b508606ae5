use axum::{http::StatusCode, response::Json};
use serde::Serialize;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}
	}

	pub fn with_status(self, status: StatusCode) -> HandlerError {
		(status, Json(self))
	}
}
