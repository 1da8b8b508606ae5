use std::sync::Arc;

use qmon_service::MonitorService;
use qmon_storage::EndpointStorage;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub monitor: Arc<MonitorService>,
	pub storage: Arc<dyn EndpointStorage>,
}

impl AppState {
	/// Share the monitor's own store so reads see what checks write
	pub fn new(monitor: Arc<MonitorService>) -> Self {
		let storage = monitor.storage().clone();
		Self { monitor, storage }
	}
}
