//! Quote Monitor Server
//!
//! Main entry point: loads configuration, starts the check scheduler and
//! serves the dashboard.

use quote_monitor::MonitorBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	MonitorBuilder::new().start_server().await
}
