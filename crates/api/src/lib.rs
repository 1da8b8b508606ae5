//! Quote Monitor API
//!
//! Axum routes and middleware exposing the endpoint snapshot and manual checks.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;

pub use router::create_router;
pub use state::AppState;
