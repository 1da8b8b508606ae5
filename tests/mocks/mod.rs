//! Shared fixtures and hand-written collaborators for integration tests

pub mod fixtures;
pub mod transports;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use transports::{RecordingNotifier, StubHttp, StubRpc};
