//! Values that come either from the environment or straight from the config file

use serde::{Deserialize, Serialize};
use std::fmt;

/// A configurable value that can be loaded from environment variables or used as plain text
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	/// "env" for environment variable, "plain" for direct value
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name or the value itself
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve against the process environment
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		self.resolve_with(|name| std::env::var(name).ok())
	}

	/// Resolve with a caller-supplied environment lookup
	pub fn resolve_with<F>(&self, env: F) -> Result<String, ConfigurableValueError>
	where
		F: Fn(&str) -> Option<String>,
	{
		match self.value_type {
			ValueType::Env => env(&self.value)
				.filter(|value| !value.trim().is_empty())
				.ok_or_else(|| ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())),
			ValueType::Plain => Ok(self.value.clone()),
		}
	}

	/// Description for logs that never includes a plain value
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
}

// RPC URLs often embed API keys
impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` becomes an environment reference, anything else a plain value
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		if let Some(env_var) = value.strip_prefix("env:") {
			Self::from_env(env_var)
		} else {
			Self::from_plain(value)
		}
	}
}

impl From<String> for ConfigurableValue {
	fn from(value: String) -> Self {
		ConfigurableValue::from(value.as_str())
	}
}
