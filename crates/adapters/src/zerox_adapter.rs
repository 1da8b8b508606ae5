//! 0x Swap API adapter (`/swap/permit2/price`)

use async_trait::async_trait;
use qmon_types::{
	AdapterError, AdapterResult, ApiResponse, Endpoint, ProviderAdapter, QuoteOutcome,
	RequestOptions,
};
use serde::Deserialize;

use crate::common::{ensure_only_source, require_amount, url_with_params};

const BASE_URL: &str = "https://api.0x.org/swap/permit2/price";
const REQUIRED_SOURCE: &str = "Balancer_V3";

const ETHEREUM_EXCLUDED: &str = "Bebop,Fluid,Hydrex,Blackhole,Blackhole_CL,Lithos,QuickSwap_V4,0x_RFQ,Ambient,Angle,Balancer_V1,Balancer_V2,Bancor_V3,Curve,DODO_V1,DODO_V2,DeFi_Swap,Ekubo,Fluid,Fraxswap_V2,Integral,Lido,Maker_PSM,Maverick,Maverick_V2,Origin,PancakeSwap_V2,PancakeSwap_V3,Polygon_Migration,RingSwap,RocketPool,ShibaSwap,Sky_Migration,Solidly_V3,Spark,Stepn,SushiSwap,SushiSwap_V3,Swaap_V2,Synapse,Uniswap_V2,Uniswap_V3,Uniswap_V4,Wrapped_USDM,Yearn,Yearn_V3";
const ARBITRUM_EXCLUDED: &str = "Bebop,Fluid,Hydrex,Blackhole,Blackhole_CL,Lithos,QuickSwap_V4,ArbSwap,DeltaSwap,Swaap_V2,SpartaDex,0x_RFQ,Angle,Balancer_V2,Camelot_V2,Camelot_V3,Curve,DODO_V2,Fluid,GMX_V1,Integral,MIMSwap,Maverick_V2,PancakeSwap_V2,PancakeSwap_V3,Ramses,Ramses_V2,Solidly_V3,SushiSwap,Swapr,Synapse,TraderJoe_V2.1,TraderJoe_V2.2,Uniswap_V2,Uniswap_V3,Uniswap_V4,WOOFi_V2,Wrapped_USDM";
const BASE_EXCLUDED: &str = "Bebop,Fluid,Hydrex,Blackhole,Blackhole_CL,Lithos,QuickSwap_V4,0x_RFQ,Aerodrome_V2,Aerodrome_V3,AlienBase_Stable,AlienBase_V2,AlienBase_V3,Angle,Balancer_V2,BaseSwap,BaseX,Clober_V2,Curve,DackieSwap_V2,DackieSwap_V3,DeltaSwap,Equalizer,Infusion,IziSwap,Kim_V4,Kinetix,Maverick,Maverick_V2,Morphex,Overnight,PancakeSwap_V2,PancakeSwap_V3,Pinto,RocketSwap,SharkSwap_V2,SoSwap,Solidly_V3,Spark_PSM,SushiSwap,SushiSwap_V3,Swaap_V2,SwapBased_V3,Synapse,Synthswap_V2,Synthswap_V3,Thick,Treble,Treble_V2,Uniswap_V2,Uniswap_V3,Uniswap_V4,WOOFi_V2,Wrapped_BLT,Wrapped_USDM";
const AVALANCHE_EXCLUDED: &str = "Bebop,Fluid,Hydrex,Blackhole,Blackhole_CL,Lithos,QuickSwap_V4,GMX_V1,TraderJoe_V1,Pangolin,DODO_V2,TraderJoe_V2.1,Pharaoh_CL,TraderJoe_V2.2,0x_RFQ,Aerodrome_V2,Aerodrome_V3,AlienBase_Stable,AlienBase_V2,AlienBase_V3,Angle,Balancer_V2,BaseSwap,BaseX,Clober_V2,Curve,DackieSwap_V2,DackieSwap_V3,DeltaSwap,Equalizer,Infusion,IziSwap,Kim_V4,Kinetix,Maverick,Maverick_V2,Morphex,Overnight,PancakeSwap_V2,PancakeSwap_V3,Pinto,RocketSwap,SharkSwap_V2,SoSwap,Solidly_V3,Spark_PSM,SushiSwap,SushiSwap_V3,Swaap_V2,SwapBased_V3,Synapse,Synthswap_V2,Synthswap_V3,Thick,Treble,Treble_V2,Uniswap_V2,Uniswap_V3,Uniswap_V4,WOOFi_V2,Wrapped_BLT,Wrapped_USDM";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceResponse {
	buy_amount: Option<String>,
	route: Option<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
	fills: Option<Vec<Fill>>,
	tokens: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct Fill {
	source: String,
}

/// 0x adapter
///
/// Restriction works by excluding every other known source per network, so
/// only networks with an exclusion list can be checked in restricted mode.
#[derive(Debug, Default, Clone)]
pub struct ZeroXAdapter;

impl ZeroXAdapter {
	pub fn new() -> Self {
		Self
	}

	fn excluded_sources(network: &str) -> AdapterResult<&'static str> {
		match network {
			"1" | "9745" => Ok(ETHEREUM_EXCLUDED),
			"42161" => Ok(ARBITRUM_EXCLUDED),
			"8453" => Ok(BASE_EXCLUDED),
			"43114" => Ok(AVALANCHE_EXCLUDED),
			other => Err(AdapterError::unsupported_network(other, "0x")),
		}
	}
}

#[async_trait]
impl ProviderAdapter for ZeroXAdapter {
	fn id(&self) -> &str {
		"0x"
	}

	async fn build_url(&self, endpoint: &Endpoint, options: &RequestOptions) -> AdapterResult<String> {
		let mut params = vec![
			("chainId", endpoint.network.as_str()),
			("sellToken", endpoint.token_in.as_str()),
			("buyToken", endpoint.token_out.as_str()),
			("sellAmount", endpoint.swap_amount.as_str()),
		];
		if options.restricted {
			params.push(("excludedSources", Self::excluded_sources(&endpoint.network)?));
		}
		url_with_params(BASE_URL, &params)
	}

	fn validate(
		&self,
		response: &ApiResponse,
		endpoint: &Endpoint,
		options: &RequestOptions,
	) -> AdapterResult<QuoteOutcome> {
		let result: PriceResponse = response.json()?;

		if options.restricted {
			let route = result.route.as_ref();
			let (fills, tokens) = match (
				route.and_then(|r| r.fills.as_ref()),
				route.and_then(|r| r.tokens.as_ref()),
			) {
				(Some(fills), Some(tokens)) => (fills, tokens),
				_ => return Err(AdapterError::provider("No Routes Found")),
			};

			ensure_only_source(fills.iter().map(|fill| fill.source.as_str()), REQUIRED_SOURCE)?;

			// A route through n pools lists n + 1 tokens
			if tokens.len() != endpoint.expected_hops + 1 {
				return Err(AdapterError::HopMismatch {
					expected: endpoint.expected_hops,
					actual: tokens.len().saturating_sub(1),
				});
			}
		}

		let amount = require_amount(result.buy_amount.as_deref(), "buyAmount")?;
		Ok(QuoteOutcome::new(amount))
	}
}
