//! Known-unsupported provider / pool-type / network combinations
//!
//! Matching endpoints are reported as "info" and never hit the network.

use qmon_types::Endpoint;

pub fn known_unsupported(endpoint: &Endpoint) -> Option<&'static str> {
	let name = endpoint.name.as_str();
	match endpoint.route_solver.as_str() {
		"1inch" if name.contains("GyroE") => Some("1inch GyroE integration WIP"),
		"1inch" if name.contains("Quant") => Some("1inch QuantAMM integration WIP"),
		"1inch" if endpoint.network == "43114" => Some("1inch network support WIP"),
		"odos" if name.contains("Quant") => Some("Odos QuantAMM integration WIP"),
		_ => None,
	}
}
