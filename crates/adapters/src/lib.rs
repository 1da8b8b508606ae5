//! Quote monitor adapters
//!
//! One `ProviderAdapter` per routing service, the registry that maps route
//! solver ids to them, and the reqwest-backed HTTP client.

pub mod api_client;
pub mod balancer_sor_adapter;
pub mod barter_adapter;
pub mod client_cache;
mod common;
pub mod hyperbloom_adapter;
pub mod kyberswap_adapter;
pub mod odos_adapter;
pub mod oneinch_adapter;
pub mod openocean_adapter;
pub mod paraswap_adapter;
pub mod registry;
pub mod zerox_adapter;

pub use api_client::{ApiClient, HttpExecutor};
pub use balancer_sor_adapter::BalancerSorAdapter;
pub use barter_adapter::BarterAdapter;
pub use client_cache::{ClientCache, ClientConfig};
pub use hyperbloom_adapter::HyperBloomAdapter;
pub use kyberswap_adapter::KyberSwapAdapter;
pub use odos_adapter::OdosAdapter;
pub use oneinch_adapter::OneInchAdapter;
pub use openocean_adapter::OpenOceanAdapter;
pub use paraswap_adapter::ParaswapAdapter;
pub use qmon_types::{AdapterError, AdapterResult, ProviderAdapter};
pub use registry::AdapterRegistry;
pub use zerox_adapter::ZeroXAdapter;
