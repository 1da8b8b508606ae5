//! Configuration settings structures

use qmon_types::{Amount, Endpoint, EndpointStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::configurable_value::ConfigurableValue;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub logging: LoggingSettings,
	pub scheduler: SchedulerSettings,
	pub http: HttpSettings,
	pub solvers: Vec<SolverSettings>,
	pub swap_pairs: Vec<SwapPairSettings>,
	/// Network id to RPC URL, used for on-chain verification
	pub rpc_urls: HashMap<String, ConfigurableValue>,
	pub notifications: NotificationSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SchedulerSettings {
	pub check_interval_hours: u64,
	/// Pause between the restricted and the market-price sub-check
	pub market_price_delay_secs: u64,
	/// Pause after each endpoint when no solver-specific delay is set
	pub default_delay_secs: u64,
	pub solver_delays_secs: HashMap<String, u64>,
}

impl SchedulerSettings {
	/// Time between check cycles
	pub fn check_interval(&self) -> Result<Duration, ConfigValidationError> {
		match self.check_interval_hours {
			0 => Err(ConfigValidationError::ZeroInterval),
			hours => hours
				.checked_mul(3600)
				.map(Duration::from_secs)
				.ok_or(ConfigValidationError::IntervalTooLarge(hours)),
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpSettings {
	pub timeout_ms: u64,
}

/// One routing service and the networks it is checked on
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SolverSettings {
	/// Route solver id, e.g. `"0x"` or `"balancer_sor"`
	pub id: String,
	/// Display name, prefixes endpoint names
	pub name: String,
	pub supported_networks: Vec<String>,
	#[serde(default = "default_true")]
	pub enabled: bool,
}

/// A token pair checked against every solver that supports its network
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SwapPairSettings {
	pub name: String,
	pub network: String,
	pub token_in: String,
	pub token_out: String,
	pub token_in_decimals: u8,
	pub token_out_decimals: u8,
	pub expected_pool: String,
	pub swap_amount: Amount,
	#[serde(default = "default_hops")]
	pub expected_hops: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NotificationSettings {
	pub enabled: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
	#[error("check_interval_hours must be greater than zero")]
	ZeroInterval,
	#[error("check_interval_hours is too large: {0}")]
	IntervalTooLarge(u64),
	#[error("swap pair {name}: {reason}")]
	InvalidSwapPair { name: String, reason: String },
	#[error("duplicate swap pair name: {0}")]
	DuplicateSwapPair(String),
	#[error("duplicate solver id: {0}")]
	DuplicateSolver(String),
}

fn default_true() -> bool {
	true
}

fn default_hops() -> usize {
	1
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8080,
		}
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Default for SchedulerSettings {
	fn default() -> Self {
		Self {
			check_interval_hours: 1,
			market_price_delay_secs: 2,
			default_delay_secs: 1,
			solver_delays_secs: HashMap::from([
				("kyberswap".to_string(), 120),
				("hyperbloom".to_string(), 30),
			]),
		}
	}
}

impl Default for HttpSettings {
	fn default() -> Self {
		Self { timeout_ms: 30_000 }
	}
}

impl SolverSettings {
	fn new(id: &str, name: &str, networks: &[&str]) -> Self {
		Self {
			id: id.to_string(),
			name: name.to_string(),
			supported_networks: networks.iter().map(|n| n.to_string()).collect(),
			enabled: true,
		}
	}

	pub fn supports(&self, network: &str) -> bool {
		self.supported_networks.iter().any(|n| n == network)
	}

	/// The nine built-in providers
	pub fn defaults() -> Vec<SolverSettings> {
		vec![
			Self::new("paraswap", "Paraswap", &["1", "8453", "42161", "100", "43114"]),
			Self::new("1inch", "1inch", &["1", "8453", "42161", "100", "43114"]),
			Self::new("0x", "0x", &["1", "8453", "42161", "43114", "9745"]),
			Self::new("odos", "Odos", &["1", "8453", "42161", "43114"]),
			Self::new(
				"kyberswap",
				"KyberSwap",
				&[
					"1", "56", "42161", "137", "10", "43114", "8453", "324", "250", "59144",
					"534352", "5000", "81457", "146", "80094", "2020", "999", "9745",
				],
			),
			Self::new("hyperbloom", "HyperBloom", &["999"]),
			Self::new(
				"balancer_sor",
				"Balancer SOR",
				&["1", "42161", "10", "8453", "43114", "100", "999", "9745"],
			),
			Self::new("barter", "Barter", &["1", "8453"]),
			Self::new("openocean", "OpenOcean", &["1", "8453", "42161", "43114", "100"]),
		]
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			logging: LoggingSettings::default(),
			scheduler: SchedulerSettings::default(),
			http: HttpSettings::default(),
			solvers: SolverSettings::defaults(),
			swap_pairs: Vec::new(),
			rpc_urls: HashMap::new(),
			notifications: NotificationSettings::default(),
		}
	}
}

/// Truthy flag values accepted by `DISABLE_<SOLVER>` and friends
fn is_truthy(value: &str, extra: &[&str]) -> bool {
	let value = value.trim().to_lowercase();
	matches!(value.as_str(), "true" | "1" | "yes" | "on") || extra.contains(&value.as_str())
}

/// Env var suffix for a solver id: `balancer_sor` -> `BALANCER_SOR`, `0x` -> `0X`
fn env_suffix(id: &str) -> String {
	id.to_uppercase()
}

impl Settings {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	pub fn enabled_solvers(&self) -> impl Iterator<Item = &SolverSettings> {
		self.solvers.iter().filter(|solver| solver.enabled)
	}

	/// Seconds to pause after checking an endpoint of this solver
	pub fn delay_for(&self, solver_id: &str) -> u64 {
		self.scheduler
			.solver_delays_secs
			.get(solver_id)
			.copied()
			.unwrap_or(self.scheduler.default_delay_secs)
	}

	/// Apply environment overrides on top of the loaded file
	///
	/// `CHECK_INTERVAL_HOURS`, `DISABLE_<SOLVER>`, `DELAY_<SOLVER>`,
	/// `EMAIL_NOTIFICATIONS` and `RPC_URL_<NETWORK>`. Unparsable values are
	/// ignored with a warning.
	pub fn apply_env_overrides<F>(&mut self, env: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(raw) = env("CHECK_INTERVAL_HOURS") {
			match raw.trim().parse::<u64>() {
				Ok(hours) if hours > 0 => self.scheduler.check_interval_hours = hours,
				_ => warn!("Ignoring invalid CHECK_INTERVAL_HOURS={}", raw),
			}
		}

		for solver in &mut self.solvers {
			let suffix = env_suffix(&solver.id);
			if let Some(raw) = env(&format!("DISABLE_{}", suffix)) {
				if is_truthy(&raw, &["disable"]) {
					solver.enabled = false;
				}
			}
			if let Some(raw) = env(&format!("DELAY_{}", suffix)) {
				match raw.trim().parse::<u64>() {
					Ok(secs) => {
						self.scheduler.solver_delays_secs.insert(solver.id.clone(), secs);
					},
					Err(_) => warn!("Ignoring invalid DELAY_{}={}", suffix, raw),
				}
			}
		}

		if let Some(raw) = env("EMAIL_NOTIFICATIONS") {
			self.notifications.enabled = is_truthy(&raw, &[]);
		}

		let networks: Vec<String> = self
			.solvers
			.iter()
			.flat_map(|solver| solver.supported_networks.iter().cloned())
			.chain(self.swap_pairs.iter().map(|pair| pair.network.clone()))
			.collect();
		for network in networks {
			let name = format!("RPC_URL_{}", network);
			if env(&name).is_some() {
				self.rpc_urls
					.insert(network, ConfigurableValue::from_env(&name));
			}
		}
	}

	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		self.scheduler.check_interval()?;

		let mut seen = std::collections::HashSet::new();
		for solver in &self.solvers {
			if !seen.insert(solver.id.as_str()) {
				return Err(ConfigValidationError::DuplicateSolver(solver.id.clone()));
			}
		}

		let mut seen = std::collections::HashSet::new();
		for pair in &self.swap_pairs {
			if !seen.insert(pair.name.as_str()) {
				return Err(ConfigValidationError::DuplicateSwapPair(pair.name.clone()));
			}
			let invalid = |reason: String| ConfigValidationError::InvalidSwapPair {
				name: pair.name.clone(),
				reason,
			};
			pair.swap_amount
				.validate()
				.map_err(|e| invalid(e.to_string()))?;
			if pair.swap_amount.is_zero() {
				return Err(invalid("swap_amount must be greater than zero".to_string()));
			}
			if pair.expected_hops == 0 {
				return Err(invalid("expected_hops must be at least 1".to_string()));
			}
		}
		Ok(())
	}

	/// Cross product of swap pairs and enabled solvers supporting the pair's network
	pub fn generate_endpoints(&self) -> Vec<Endpoint> {
		let mut endpoints = Vec::new();
		for pair in &self.swap_pairs {
			for solver in self.enabled_solvers().filter(|s| s.supports(&pair.network)) {
				endpoints.push(Endpoint {
					name: format!("{}-{}", solver.name, pair.name),
					base_name: pair.name.clone(),
					solver_name: solver.name.clone(),
					route_solver: solver.id.clone(),
					network: pair.network.clone(),
					token_in: pair.token_in.clone(),
					token_out: pair.token_out.clone(),
					token_in_decimals: pair.token_in_decimals,
					token_out_decimals: pair.token_out_decimals,
					swap_amount: pair.swap_amount.clone(),
					expected_pool: pair.expected_pool.clone(),
					expected_hops: pair.expected_hops,
					delay_secs: self.delay_for(&solver.id),
					last_status: EndpointStatus::Unknown,
					last_checked: None,
					message: String::new(),
					return_amount: None,
					market_price: None,
					swap_path: None,
					onchain_amount: None,
					onchain_message: None,
				});
			}
		}
		endpoints
	}

	/// RPC URLs that resolve; unresolvable entries are skipped with a warning
	pub fn resolved_rpc_urls(&self) -> HashMap<String, String> {
		self.rpc_urls
			.iter()
			.filter_map(|(network, value)| match value.resolve() {
				Ok(url) => Some((network.clone(), url)),
				Err(e) => {
					warn!("RPC URL for network {} unavailable: {}", network, e);
					None
				},
			})
			.collect()
	}
}
