//! Quote monitor service
//!
//! Provider registry, store-backed endpoint checks and the periodic scheduler.

pub mod comparison;
pub mod compatibility;
pub mod errors;
pub mod monitor;
pub mod provider_config;
pub mod registry;
pub mod scheduler;

pub use comparison::{compare_amounts, Highest};
pub use errors::{RegistryError, RegistryResult};
pub use monitor::MonitorService;
pub use provider_config::{ApiKeyConfig, ApiKeyPlacement, ProviderConfig};
pub use registry::{CheckMode, ProviderRegistry, DEFAULT_MARKET_PRICE_DELAY};
pub use scheduler::Scheduler;

#[cfg(test)]
mod test_support;
