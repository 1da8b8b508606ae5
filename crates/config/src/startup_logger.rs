//! Service startup and shutdown banners

use std::env;
use tracing::info;

use crate::Settings;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "quote-monitor";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Quote Monitor Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs what the monitor is about to watch
pub fn log_monitor_plan(settings: &Settings, endpoint_count: usize) {
	let solvers: Vec<&str> = settings.enabled_solvers().map(|s| s.id.as_str()).collect();
	info!("🔎 Enabled solvers: {}", solvers.join(", "));
	info!(
		"📋 Monitoring {} endpoints from {} swap pairs",
		endpoint_count,
		settings.swap_pairs.len()
	);
	info!(
		"⏱️ Check interval: {}h, market price delay: {}s",
		settings.scheduler.check_interval_hours, settings.scheduler.market_price_delay_secs
	);
	for (network, value) in &settings.rpc_urls {
		info!("⛓️ RPC for network {}: {}", network, value.description());
	}
	if settings.notifications.enabled {
		info!("📨 Notifications enabled");
	}
}

pub fn log_service_shutdown() {
	info!("🛑 Quote Monitor Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Quote Monitor Started Successfully");
	info!("🌐 Dashboard listening on: {}", bind_address);
}
