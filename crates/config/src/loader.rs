//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, File};

pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Load `config/config.{json,toml,...}` if present, then apply environment
/// overrides. A missing file yields the defaults.
pub fn load_config() -> Result<Settings, ConfigError> {
	load_config_from(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name(path).required(false))
		.build()?;

	let mut settings: Settings = s.try_deserialize()?;
	settings.apply_env_overrides(|name| std::env::var(name).ok());
	settings
		.validate()
		.map_err(|e| ConfigError::Message(e.to_string()))?;
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_missing_file_gives_defaults() {
		let settings = load_config_from("does/not/exist/config").unwrap();
		assert_eq!(settings.server.port, 8080);
		assert_eq!(settings.solvers.len(), 9);
	}

	#[test]
	fn test_partial_file_keeps_other_defaults() {
		let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
		write!(
			file,
			r#"{{
				"server": {{ "host": "127.0.0.1", "port": 9090 }},
				"swap_pairs": [{{
					"name": "Base-Boosted-StableSurge(GHO/USDC)",
					"network": "8453",
					"token_in": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
					"token_out": "0x6Bb7a212910682DCFdbd5BCBb3e28FB4E8da10Ee",
					"token_in_decimals": 6,
					"token_out_decimals": 18,
					"expected_pool": "0x7ab124ec4029316c2a42f713828ddf2a192b36db",
					"swap_amount": "100000000000",
					"expected_hops": 1
				}}]
			}}"#
		)
		.unwrap();

		let path = file.path().with_extension("");
		let path = path.to_str().unwrap();
		let settings = load_config_from(path).unwrap();

		assert_eq!(settings.bind_address(), "127.0.0.1:9090");
		assert_eq!(settings.swap_pairs.len(), 1);
		assert_eq!(settings.scheduler.market_price_delay_secs, 2);
	}
}
