//! Quote monitor on-chain verification
//!
//! Cross-checks an aggregator quote by simulating the same swap path against
//! the Balancer V3 Router/BatchRouter contracts.

pub mod contracts;
pub mod errors;
pub mod rpc;
pub mod verifier;

pub use errors::{OnChainError, OnChainResult};
pub use rpc::{AlloyRpcCaller, RpcCaller};
pub use verifier::{OnChainVerifier, RPC_TIMEOUT};
