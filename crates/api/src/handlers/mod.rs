pub mod check;
pub mod common;
pub mod dashboard;
pub mod health;

pub use check::check_endpoint;
pub use dashboard::dashboard;
pub use health::health;
