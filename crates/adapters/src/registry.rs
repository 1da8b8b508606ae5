//! Adapter registry
//!
//! Maps a route-solver id to its `ProviderAdapter`.

use qmon_types::ProviderAdapter;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api_client::HttpExecutor;
use crate::{
	BalancerSorAdapter, BarterAdapter, HyperBloomAdapter, KyberSwapAdapter, OdosAdapter,
	OneInchAdapter, OpenOceanAdapter, ParaswapAdapter, ZeroXAdapter,
};

#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with every built-in provider.
	///
	/// `http` is handed to adapters that perform auxiliary lookups while
	/// building their request (OpenOcean).
	pub fn with_defaults(http: Arc<dyn HttpExecutor>) -> Self {
		let mut registry = Self::new();
		registry.register(Arc::new(ZeroXAdapter::new()));
		registry.register(Arc::new(ParaswapAdapter::new()));
		registry.register(Arc::new(OneInchAdapter::new()));
		registry.register(Arc::new(KyberSwapAdapter::new()));
		registry.register(Arc::new(OdosAdapter::new()));
		registry.register(Arc::new(OpenOceanAdapter::new(http)));
		registry.register(Arc::new(BalancerSorAdapter::new()));
		registry.register(Arc::new(BarterAdapter::new()));
		registry.register(Arc::new(HyperBloomAdapter::new()));
		registry
	}

	/// Registers an adapter under its own id, replacing any previous one
	pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) {
		self.adapters.insert(adapter.id().to_string(), adapter);
	}

	pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
		self.adapters.get(id).cloned()
	}

	pub fn contains(&self, id: &str) -> bool {
		self.adapters.contains_key(id)
	}

	/// Registered ids, sorted
	pub fn ids(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.adapters.keys().cloned().collect();
		ids.sort();
		ids
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api_client::MockHttpExecutor;

	#[test]
	fn test_defaults_register_all_providers() {
		let registry = AdapterRegistry::with_defaults(Arc::new(MockHttpExecutor::new()));
		assert_eq!(
			registry.ids(),
			vec![
				"0x",
				"1inch",
				"balancer_sor",
				"barter",
				"hyperbloom",
				"kyberswap",
				"odos",
				"openocean",
				"paraswap"
			]
		);
		assert!(registry.get("uniswap").is_none());
	}

	#[test]
	fn test_register_replaces_by_id() {
		let mut registry = AdapterRegistry::new();
		registry.register(Arc::new(ZeroXAdapter::new()));
		registry.register(Arc::new(ZeroXAdapter::new()));
		assert_eq!(registry.len(), 1);
		assert!(registry.contains("0x"));
	}
}
