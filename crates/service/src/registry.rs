//! Provider registry
//!
//! Runs one endpoint check end to end: adapter lookup, compatibility table,
//! API key resolution, request, validation, status mapping and the optional
//! on-chain cross-check.

use qmon_adapters::{AdapterRegistry, HttpExecutor};
use qmon_onchain::OnChainVerifier;
use qmon_types::{
	AdapterError, ApiRequest, Endpoint, EndpointStatus, ErrorKind, HttpMethod, Notifier,
	ProviderAdapter, QuoteOutcome, RequestOptions, SecretProvider, SecretString,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::compatibility::known_unsupported;
use crate::provider_config::ProviderConfig;

pub const DEFAULT_MARKET_PRICE_DELAY: Duration = Duration::from_secs(2);

/// Which sub-checks to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
	/// Restricted check, pause, then market-price check on a scratch copy
	#[default]
	Both,
	RestrictedOnly,
	MarketPriceOnly,
}

/// Where in the request pipeline a sub-check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
	ApiKey,
	Url,
	Body,
	Send,
	Response,
}

#[derive(Debug)]
struct CheckFailure {
	stage: Stage,
	error: AdapterError,
}

impl CheckFailure {
	fn at(stage: Stage) -> impl FnOnce(AdapterError) -> Self {
		move |error| Self { stage, error }
	}

	/// Status and operator-facing message for this failure
	fn outcome(&self) -> (EndpointStatus, String) {
		if self.error.kind() == ErrorKind::KnownUnsupported {
			return (EndpointStatus::Info, self.error.to_string());
		}
		match self.stage {
			Stage::ApiKey => (EndpointStatus::Error, self.error.to_string()),
			Stage::Url => (
				EndpointStatus::Error,
				format!("Error building URL: {}", self.error),
			),
			Stage::Body => (
				EndpointStatus::Error,
				format!("Error building request body: {}", self.error),
			),
			Stage::Send if self.error.kind() == ErrorKind::Configuration => (
				EndpointStatus::Error,
				format!("Error building request: {}", self.error),
			),
			Stage::Send => (
				EndpointStatus::Down,
				format!("Error sending request: {}", self.error),
			),
			Stage::Response => (
				EndpointStatus::Down,
				format!("Error handling response: {}", self.error),
			),
		}
	}
}

#[derive(Debug)]
pub struct ProviderRegistry {
	adapters: AdapterRegistry,
	configs: HashMap<String, ProviderConfig>,
	http: Arc<dyn HttpExecutor>,
	secrets: Arc<dyn SecretProvider>,
	notifier: Arc<dyn Notifier>,
	verifier: Option<OnChainVerifier>,
	market_price_delay: Duration,
	api_keys: RwLock<HashMap<String, SecretString>>,
}

impl ProviderRegistry {
	/// Registry over the given adapters with the built-in transport configs
	pub fn new(
		adapters: AdapterRegistry,
		http: Arc<dyn HttpExecutor>,
		secrets: Arc<dyn SecretProvider>,
		notifier: Arc<dyn Notifier>,
	) -> Self {
		let configs = ProviderConfig::defaults()
			.into_iter()
			.map(|config| (config.id.clone(), config))
			.collect();
		Self {
			adapters,
			configs,
			http,
			secrets,
			notifier,
			verifier: None,
			market_price_delay: DEFAULT_MARKET_PRICE_DELAY,
			api_keys: RwLock::new(HashMap::new()),
		}
	}

	pub fn with_verifier(mut self, verifier: OnChainVerifier) -> Self {
		self.verifier = Some(verifier);
		self
	}

	pub fn with_market_price_delay(mut self, delay: Duration) -> Self {
		self.market_price_delay = delay;
		self
	}

	/// Override or add the transport config for one provider
	pub fn with_provider_config(mut self, config: ProviderConfig) -> Self {
		self.configs.insert(config.id.clone(), config);
		self
	}

	/// Apply the same request timeout to every provider
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		for config in self.configs.values_mut() {
			config.timeout = timeout;
		}
		self
	}

	pub fn adapters(&self) -> &AdapterRegistry {
		&self.adapters
	}

	/// Release pooled HTTP clients that outlived their TTL
	pub fn evict_idle_clients(&self) -> usize {
		let evicted = self.http.evict_idle_clients();
		if evicted > 0 {
			debug!(evicted, "Evicted idle HTTP clients");
		}
		evicted
	}

	/// Check one endpoint in place
	#[instrument(skip_all, fields(endpoint = %endpoint.name, solver = %endpoint.route_solver))]
	pub async fn check_provider(&self, endpoint: &mut Endpoint, mode: CheckMode) {
		let Some(adapter) = self.adapters.get(&endpoint.route_solver) else {
			warn!("Unsupported route solver '{}'", endpoint.route_solver);
			endpoint.record(
				EndpointStatus::Unsupported,
				format!("Unsupported route solver '{}'", endpoint.route_solver),
			);
			return;
		};

		if let Some(reason) = known_unsupported(endpoint) {
			info!("{}", reason);
			endpoint.record(EndpointStatus::Info, reason);
			return;
		}

		let config = self
			.configs
			.get(&endpoint.route_solver)
			.cloned()
			.unwrap_or_else(|| ProviderConfig::get(endpoint.route_solver.clone()));

		match mode {
			CheckMode::Both => {
				self.check_restricted(endpoint, adapter.as_ref(), &config).await;
				debug!(
					"Waiting {:?} before market price check",
					self.market_price_delay
				);
				tokio::time::sleep(self.market_price_delay).await;
				self.check_market_price(endpoint, adapter.as_ref(), &config).await;
			},
			CheckMode::RestrictedOnly => {
				self.check_restricted(endpoint, adapter.as_ref(), &config).await;
			},
			CheckMode::MarketPriceOnly => {
				self.check_market_price(endpoint, adapter.as_ref(), &config).await;
			},
		}
	}

	async fn check_restricted(
		&self,
		endpoint: &mut Endpoint,
		adapter: &dyn ProviderAdapter,
		config: &ProviderConfig,
	) {
		let options = RequestOptions::restricted();
		match self.run(endpoint, adapter, config, &options).await {
			Ok(outcome) => {
				info!(amount = %outcome.amount, "Restricted check passed");
				endpoint.clear_onchain();
				endpoint.return_amount = Some(outcome.amount);
				endpoint.swap_path = outcome.swap_path;
				endpoint.record(EndpointStatus::Up, "Ok");
				self.verify_onchain(endpoint).await;
			},
			Err(failure) => {
				let (status, message) = failure.outcome();
				if status.is_failure() {
					warn!(status = %status, "{}", message);
					self.notifier
						.notify(&format!("[{}] {}", endpoint.name, message))
						.await;
				} else {
					info!(status = %status, "{}", message);
				}
				endpoint.clear_onchain();
				endpoint.record(status, message);
			},
		}
	}

	/// Runs against a scratch copy so only `market_price` reaches the endpoint
	async fn check_market_price(
		&self,
		endpoint: &mut Endpoint,
		adapter: &dyn ProviderAdapter,
		config: &ProviderConfig,
	) {
		let scratch = endpoint.clone();
		let options = RequestOptions::market_price();
		match self.run(&scratch, adapter, config, &options).await {
			Ok(outcome) => {
				debug!(amount = %outcome.amount, "Market price recorded");
				endpoint.market_price = Some(outcome.amount);
			},
			Err(failure) => {
				let (_, message) = failure.outcome();
				warn!("Market price check failed: {}", message);
			},
		}
	}

	async fn verify_onchain(&self, endpoint: &mut Endpoint) {
		let Some(verifier) = &self.verifier else {
			return;
		};
		if endpoint.swap_path.is_none() {
			return;
		}

		match verifier.query_onchain_price(endpoint).await {
			Ok(amount) => {
				info!(amount = %amount, "On-chain price");
				endpoint.onchain_amount = Some(amount);
				endpoint.onchain_message = None;
			},
			Err(e) => {
				warn!("On-chain query failed: {}", e);
				endpoint.onchain_amount = None;
				endpoint.onchain_message = Some(e.to_string());
			},
		}
	}

	async fn run(
		&self,
		endpoint: &Endpoint,
		adapter: &dyn ProviderAdapter,
		config: &ProviderConfig,
		options: &RequestOptions,
	) -> Result<QuoteOutcome, CheckFailure> {
		let api_key = self.api_key(config).await.map_err(CheckFailure::at(Stage::ApiKey))?;

		let url = adapter
			.build_url(endpoint, options)
			.await
			.map_err(CheckFailure::at(Stage::Url))?;
		let body = adapter
			.build_body(endpoint, options)
			.map_err(CheckFailure::at(Stage::Body))?;

		let mut request = match config.method {
			HttpMethod::Get => ApiRequest::get(url),
			HttpMethod::Post => ApiRequest::post(url, body),
		}
		.with_timeout(config.timeout);
		for (name, value) in config.headers_with_key(api_key.as_ref()) {
			request = request.with_header(name, value);
		}

		debug!(method = request.method.as_str(), url = %request.url, "Sending request");
		let response = self
			.http
			.execute(adapter.id(), &request)
			.await
			.map_err(CheckFailure::at(Stage::Send))?;
		debug!(
			status = response.status_code,
			body = %response.body_text(),
			"Received response"
		);

		adapter
			.validate(&response, endpoint, options)
			.map_err(CheckFailure::at(Stage::Response))
	}

	/// Resolve the provider's API key once, then serve it from cache
	async fn api_key(&self, config: &ProviderConfig) -> Result<Option<SecretString>, AdapterError> {
		let Some(key_config) = &config.api_key else {
			return Ok(None);
		};

		if let Some(key) = self.api_keys.read().await.get(&config.id) {
			return Ok(Some(key.clone()));
		}

		let key = self
			.secrets
			.get_required_secret(&key_config.env_var)
			.ok_or_else(|| AdapterError::MissingApiKey {
				env_var: key_config.env_var.clone(),
			})?;
		self.api_keys
			.write()
			.await
			.insert(config.id.clone(), key.clone());
		Ok(Some(key))
	}
}
