//! Security-related HTTP response headers setup

use axum::{
	http::header::{HeaderName, HeaderValue},
	middleware::map_response,
	response::Response,
	Router,
};

const SECURITY_HEADERS: &[(&str, &str)] = &[
	("strict-transport-security", "max-age=31536000; includeSubDomains"),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "strict-origin-when-cross-origin"),
	("content-security-policy", "default-src 'self'"),
	// the snapshot changes on every check
	("cache-control", "no-store"),
];

async fn apply_security_headers(mut response: Response) -> Response {
	let headers = response.headers_mut();
	for &(name, value) in SECURITY_HEADERS {
		let name = HeaderName::from_static(name);
		if !headers.contains_key(&name) {
			headers.insert(name, HeaderValue::from_static(value));
		}
	}
	response
}

/// Add the default security headers to every response that does not set them itself.
pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	router.layer(map_response(apply_security_headers))
}
