//! Chain id helpers

/// Human-readable network name for a chain id string
///
/// Unknown ids are returned unchanged.
pub fn network_name(chain_id: &str) -> String {
	match chain_id {
		"1" => "ethereum",
		"10" => "optimism",
		"100" => "gnosis",
		"143" => "monad",
		"999" => "hyperevm",
		"8453" => "base",
		"9745" => "plasma",
		"42161" => "arbitrum",
		"43114" => "avalanche",
		other => other,
	}
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_known_networks() {
		assert_eq!(network_name("1"), "ethereum");
		assert_eq!(network_name("8453"), "base");
		assert_eq!(network_name("9745"), "plasma");
	}

	#[test]
	fn test_unknown_network_passes_through() {
		assert_eq!(network_name("31337"), "31337");
	}
}
