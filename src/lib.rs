//! Quote Monitor Library
//!
//! Periodically asks swap-routing providers for Balancer V3 routes, checks
//! that the routes really go through the expected pool and cross-checks the
//! quoted amounts on-chain. Results are served as a JSON snapshot.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

// Core domain types
pub use qmon_types::{
	chrono,
	serde_json,
	AdapterError,
	AdapterResult,
	Amount,
	ApiRequest,
	ApiResponse,
	Endpoint,
	EndpointStatus,
	Notifier,
	ProviderAdapter,
	SecretProvider,
	StaticSecretProvider,
	SwapPath,
	SwapPathStep,
};

// Service layer
pub use qmon_service::{
	compare_amounts, CheckMode, Highest, MonitorService, ProviderConfig, ProviderRegistry,
	RegistryError, Scheduler,
};

// Storage layer
pub use qmon_storage::{EndpointStorage, MemoryStore};

// API layer
pub use qmon_api::{create_router, AppState};

// Adapters
pub use qmon_adapters::{AdapterRegistry, ApiClient, HttpExecutor};

// On-chain verification
pub use qmon_onchain::{AlloyRpcCaller, OnChainVerifier, RpcCaller};

// Config
pub use qmon_config::{
	load_config, log_monitor_plan, log_service_info, log_service_shutdown, log_startup_complete,
	LogFormat, LoggingSettings, Settings,
};

pub mod models {
	pub use qmon_types::*;
}

pub mod storage {
	pub use qmon_storage::*;
}

pub mod config {
	pub use qmon_config::*;
}

pub mod adapters {
	pub use qmon_adapters::*;
}

pub mod onchain {
	pub use qmon_onchain::*;
}

pub mod api {
	pub use qmon_api::*;
}

pub mod service {
	pub use qmon_service::*;
}

// Re-export external dependencies for embedders
pub use async_trait;
pub use reqwest;

/// Builder wiring settings, collaborators and the HTTP surface together
///
/// Every collaborator has a production default: in-memory storage, the
/// pooled `ApiClient`, secrets from the environment, notifications through
/// the log and alloy for RPC calls. Tests swap any of them out.
#[derive(Default)]
pub struct MonitorBuilder {
	settings: Option<Settings>,
	storage: Option<Arc<dyn EndpointStorage>>,
	http: Option<Arc<dyn HttpExecutor>>,
	secrets: Option<Arc<dyn SecretProvider>>,
	notifier: Option<Arc<dyn Notifier>>,
	rpc_caller: Option<Arc<dyn RpcCaller>>,
	adapters: Vec<Arc<dyn ProviderAdapter>>,
	endpoints: Vec<Endpoint>,
}

impl MonitorBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder seeded with loaded settings
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	pub fn with_storage(mut self, storage: Arc<dyn EndpointStorage>) -> Self {
		self.storage = Some(storage);
		self
	}

	pub fn with_http_executor(mut self, http: Arc<dyn HttpExecutor>) -> Self {
		self.http = Some(http);
		self
	}

	pub fn with_secrets(mut self, secrets: Arc<dyn SecretProvider>) -> Self {
		self.secrets = Some(secrets);
		self
	}

	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);
		self
	}

	pub fn with_rpc_caller(mut self, caller: Arc<dyn RpcCaller>) -> Self {
		self.rpc_caller = Some(caller);
		self
	}

	/// Register an extra adapter, replacing a default one with the same id
	pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Monitor an endpoint on top of the ones generated from settings
	pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
		self.endpoints.push(endpoint);
		self
	}

	/// Build the service graph and return the router with its state
	///
	/// Validates settings, seeds the store and wires registry, verifier and
	/// monitor. Nothing is spawned; see [`MonitorBuilder::start_server`].
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let storage = self
			.storage
			.unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn EndpointStorage>);
		let mut endpoints = settings.generate_endpoints();
		endpoints.extend(self.endpoints);
		if !endpoints.is_empty() {
			info!("Seeding store with {} endpoints", endpoints.len());
			storage
				.set_endpoints(endpoints)
				.await
				.map_err(|e| format!("Failed to seed endpoints: {}", e))?;
		}

		let http = self
			.http
			.unwrap_or_else(|| Arc::new(ApiClient::new()) as Arc<dyn HttpExecutor>);
		let mut adapters = AdapterRegistry::with_defaults(Arc::clone(&http));
		for adapter in self.adapters {
			adapters.register(adapter);
		}
		debug!("Registered adapters: {}", adapters.ids().join(", "));

		let secrets = self
			.secrets
			.unwrap_or_else(|| Arc::new(qmon_types::EnvSecretProvider) as Arc<dyn SecretProvider>);
		let notifier = self.notifier.unwrap_or_else(|| {
			if settings.notifications.enabled {
				Arc::new(qmon_types::LogNotifier) as Arc<dyn Notifier>
			} else {
				Arc::new(qmon_types::NoopNotifier) as Arc<dyn Notifier>
			}
		});

		let mut registry = ProviderRegistry::new(adapters, http, secrets, notifier)
			.with_market_price_delay(Duration::from_secs(settings.scheduler.market_price_delay_secs))
			.with_request_timeout(Duration::from_millis(settings.http.timeout_ms));

		let rpc_urls = settings.resolved_rpc_urls();
		if rpc_urls.is_empty() {
			info!("No RPC URLs configured, on-chain verification disabled");
		} else {
			let verifier = match self.rpc_caller {
				Some(caller) => OnChainVerifier::with_caller(rpc_urls, caller),
				None => OnChainVerifier::new(rpc_urls),
			};
			registry = registry.with_verifier(verifier);
		}

		let monitor = Arc::new(MonitorService::new(storage, Arc::new(registry)));
		let app_state = AppState::new(monitor);
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Run everything: `.env`, settings, tracing, the scheduler and the HTTP server
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		init_tracing(&settings.logging);
		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;
		let interval = settings
			.scheduler
			.check_interval()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		self.settings = Some(settings.clone());
		let (app, state) = self.start().await?;
		let endpoint_count = state.storage.count().await?;
		log_monitor_plan(&settings, endpoint_count);

		let scheduler = Scheduler::new(Arc::clone(&state.monitor), interval).spawn();

		let listener = tokio::net::TcpListener::bind(addr).await?;
		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /");
		info!("  GET  /health");
		info!("  POST /check/{{name}}");

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		scheduler.abort();
		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// A second call is a no-op.
pub fn init_tracing(logging: &LoggingSettings) {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

	let result = match logging.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt().pretty().with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt().compact().with_env_filter(env_filter);
			if logging.structured {
				subscriber.with_target(true).with_thread_ids(true).try_init()
			} else {
				subscriber.try_init()
			}
		},
	};

	match result {
		Ok(()) => info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			logging.level, logging.format, logging.structured
		),
		Err(e) => debug!("Tracing subscriber already installed: {}", e),
	}
}
