//! Shared value types used by endpoints, adapters and the verifier

pub mod amount;
pub mod network;
pub mod secret_string;

pub use amount::{Amount, AmountError};
pub use network::network_name;
pub use secret_string::SecretString;
