//! Balancer V3 router bindings and deployment table

use alloy::primitives::{address, Address};
use alloy::sol;

sol! {
	#[derive(Debug, PartialEq, Eq)]
	struct SwapPathStep {
		address pool;
		address tokenOut;
		bool isBuffer;
	}

	#[derive(Debug, PartialEq, Eq)]
	struct SwapPathExactAmountIn {
		address tokenIn;
		SwapPathStep[] steps;
		uint256 exactAmountIn;
		uint256 minAmountOut;
	}

	interface IRouter {
		function querySwapSingleTokenExactIn(
			address pool,
			address tokenIn,
			address tokenOut,
			uint256 exactAmountIn,
			address sender,
			bytes userData
		) external returns (uint256 amountOut);
	}

	interface IBatchRouter {
		function querySwapExactIn(
			SwapPathExactAmountIn[] paths,
			address sender,
			bytes userData
		) external returns (uint256[] pathAmountsOut, address[] tokensOut, uint256[] amountsOut);
	}
}

/// Router and BatchRouter deployments for one network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterDeployment {
	pub router: Address,
	pub batch_router: Address,
}

/// Deployment addresses keyed by network id
pub fn deployment(network: &str) -> Option<RouterDeployment> {
	let (router, batch_router) = match network {
		"1" => (
			address!("AE563E3f8219521950555F5962419C8919758Ea2"),
			address!("136f1EFcC3f8f88516B9E94110D56FDBfB1778d1"),
		),
		"10" => (
			address!("e2fa4e1d17725e72dcdAfe943Ecf45dF4B9E285b"),
			address!("aD89051bEd8d96f045E8912aE1672c6C0bF8a85E"),
		),
		"100" => (
			address!("4eff2d77D9fFbAeFB4b141A3e494c085b3FF4Cb5"),
			address!("e2fa4e1d17725e72dcdAfe943Ecf45dF4B9E285b"),
		),
		"999" => (
			address!("A8920455934Da4D853faac1f94Fe7bEf72943eF1"),
			address!("9dd5Db2d38b50bEF682cE532bCca5DfD203915E1"),
		),
		"8453" => (
			address!("3f170631ed9821Ca51A59D996aB095162438DC10"),
			address!("85a80afee867aDf27B50BdB7b76DA70f1E853062"),
		),
		"9745" => (
			address!("9dA18982a33FD0c7051B19F0d7C76F2d5E7e017c"),
			address!("85a80afee867aDf27B50BdB7b76DA70f1E853062"),
		),
		"42161" => (
			address!("EAedc32a51c510d35ebC11088fD5fF2b47aACF2E"),
			address!("aD89051bEd8d96f045E8912aE1672c6C0bF8a85E"),
		),
		"43114" => (
			address!("F39CA6ede9BF7820a952b52f3c94af526bAB9015"),
			address!("c9b36096f5201ea332Db35d6D195774ea0D5988f"),
		),
		_ => return None,
	};
	Some(RouterDeployment {
		router,
		batch_router,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_known_networks() {
		for network in ["1", "10", "100", "999", "8453", "9745", "42161", "43114"] {
			assert!(deployment(network).is_some(), "missing {}", network);
		}
		assert!(deployment("137").is_none());
	}

	#[test]
	fn test_shared_batch_router() {
		let base = deployment("8453").unwrap();
		let plasma = deployment("9745").unwrap();
		assert_eq!(base.batch_router, plasma.batch_router);
		assert_ne!(base.router, plasma.router);
	}
}
