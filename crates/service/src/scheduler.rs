//! Periodic check loop

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::monitor::MonitorService;

pub struct Scheduler {
	monitor: Arc<MonitorService>,
	interval: Duration,
}

impl Scheduler {
	pub fn new(monitor: Arc<MonitorService>, interval: Duration) -> Self {
		Self { monitor, interval }
	}

	/// Spawn the loop. The first cycle starts immediately; a cycle that
	/// overruns the interval delays the next one instead of bursting.
	pub fn spawn(self) -> JoinHandle<()> {
		tokio::spawn(async move { self.run().await })
	}

	async fn run(self) {
		info!("Scheduler started, interval {:?}", self.interval);
		let mut ticker = tokio::time::interval(self.interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		loop {
			ticker.tick().await;
			if let Err(e) = self.monitor.check_all().await {
				error!("Check cycle failed: {}", e);
			}
		}
	}
}
