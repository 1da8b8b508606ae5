//! Quote Monitor Storage
//!
//! Endpoint store implementations for the quote monitor.

pub mod memory_store;
pub mod traits;

pub use memory_store::MemoryStore;
pub use traits::EndpointStorage;
