//! Outbound failure notifications

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::warn;

/// Delivers a failure message to operators
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
	async fn notify(&self, message: &str);
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
	async fn notify(&self, message: &str) {
		warn!(target: "notifications", "{}", message);
	}
}

/// Drops notifications, used when notifications are disabled
#[derive(Debug, Default, Clone)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
	async fn notify(&self, _message: &str) {}
}
