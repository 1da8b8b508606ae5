//! API key lookup

use std::collections::HashMap;
use std::fmt::Debug;

use crate::models::SecretString;

/// Resolves named secrets such as `ZEROX_API_KEY`
#[cfg_attr(test, mockall::automock)]
pub trait SecretProvider: Send + Sync + Debug {
	/// `None` when the secret is unset or blank
	fn get_required_secret(&self, name: &str) -> Option<SecretString>;
}

/// Reads secrets from process environment variables
#[derive(Debug, Default, Clone)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
	fn get_required_secret(&self, name: &str) -> Option<SecretString> {
		std::env::var(name)
			.ok()
			.map(SecretString::from)
			.filter(|secret| !secret.is_empty())
	}
}

/// Fixed secret table, for tests and embedded use
#[derive(Debug, Default, Clone)]
pub struct StaticSecretProvider {
	secrets: HashMap<String, String>,
}

impl StaticSecretProvider {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.secrets.insert(name.into(), value.into());
		self
	}
}

impl SecretProvider for StaticSecretProvider {
	fn get_required_secret(&self, name: &str) -> Option<SecretString> {
		self.secrets
			.get(name)
			.map(|value| SecretString::new(value.clone()))
			.filter(|secret| !secret.is_empty())
	}
}
