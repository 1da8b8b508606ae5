//! Snapshot of every endpoint, grouped by token pair
//!
//! Groups are keyed by `base_name` in sorted order and rows inside a group
//! are ordered by solver name, so two reads of an unchanged store render the
//! same document.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::{DateTime, Duration, Utc};
use qmon_service::{compare_amounts, Highest};
use qmon_types::{network_name, Amount, Endpoint, EndpointStatus};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::handlers::common::{ErrorResponse, HandlerError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
	pub endpoints: BTreeMap<String, Vec<EndpointRow>>,
	pub total_endpoints: usize,
	pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRow {
	pub name: String,
	pub solver_name: String,
	pub route_solver: String,
	pub network: String,
	pub network_name: String,
	pub token_in: String,
	pub token_out: String,
	pub swap_amount: Amount,
	pub expected_pool: String,
	pub expected_hops: usize,
	pub status: EndpointStatus,
	pub message: String,
	pub last_checked: Option<DateTime<Utc>>,
	/// Human readable age of `last_checked`
	pub last_checked_ago: String,
	pub return_amount: Option<Amount>,
	pub market_price: Option<Amount>,
	pub highest: Highest,
	pub onchain_amount: Option<Amount>,
	pub onchain_message: Option<String>,
}

impl EndpointRow {
	fn from_endpoint(endpoint: Endpoint, now: DateTime<Utc>) -> Self {
		let highest = compare_amounts(endpoint.return_amount.as_ref(), endpoint.market_price.as_ref());
		Self {
			network_name: network_name(&endpoint.network),
			last_checked_ago: format_time_ago(endpoint.last_checked, now),
			name: endpoint.name,
			solver_name: endpoint.solver_name,
			route_solver: endpoint.route_solver,
			network: endpoint.network,
			token_in: endpoint.token_in,
			token_out: endpoint.token_out,
			swap_amount: endpoint.swap_amount,
			expected_pool: endpoint.expected_pool,
			expected_hops: endpoint.expected_hops,
			status: endpoint.last_status,
			message: endpoint.message,
			last_checked: endpoint.last_checked,
			return_amount: endpoint.return_amount,
			market_price: endpoint.market_price,
			highest,
			onchain_amount: endpoint.onchain_amount,
			onchain_message: endpoint.onchain_message,
		}
	}
}

/// GET / - current endpoint snapshot
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, HandlerError> {
	let endpoints = state.storage.snapshot().await.map_err(|e| {
		ErrorResponse::new("STORAGE_ERROR", e.to_string()).with_status(StatusCode::INTERNAL_SERVER_ERROR)
	})?;
	debug!("Rendering snapshot of {} endpoints", endpoints.len());
	Ok(Json(build_dashboard(endpoints, Utc::now())))
}

pub fn build_dashboard(endpoints: Vec<Endpoint>, now: DateTime<Utc>) -> DashboardResponse {
	let total_endpoints = endpoints.len();
	let mut groups: BTreeMap<String, Vec<EndpointRow>> = BTreeMap::new();
	for endpoint in endpoints {
		groups
			.entry(endpoint.base_name.clone())
			.or_default()
			.push(EndpointRow::from_endpoint(endpoint, now));
	}
	for rows in groups.values_mut() {
		rows.sort_by(|a, b| a.solver_name.cmp(&b.solver_name).then_with(|| a.name.cmp(&b.name)));
	}

	DashboardResponse {
		endpoints: groups,
		total_endpoints,
		timestamp: now.timestamp(),
	}
}

pub fn format_time_ago(checked: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
	let Some(checked) = checked else {
		return "Never".to_string();
	};
	let diff = now.signed_duration_since(checked);
	if diff < Duration::minutes(1) {
		return "Just now".to_string();
	}
	if diff < Duration::hours(1) {
		return match diff.num_minutes() {
			1 => "1 minute ago".to_string(),
			m => format!("{} minutes ago", m),
		};
	}
	if diff < Duration::hours(24) {
		return match diff.num_hours() {
			1 => "1 hour ago".to_string(),
			h => format!("{} hours ago", h),
		};
	}
	checked.format("%b %d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use qmon_types::test_utils::EndpointBuilder;

	fn now() -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
	}

	#[test]
	fn test_groups_sorted_by_base_name() {
		let endpoints = vec![
			EndpointBuilder::new().base_name("WETH-USDC-Base").solver("odos").build(),
			EndpointBuilder::new().base_name("AAVE-WETH-Ethereum").solver("0x").build(),
			EndpointBuilder::new().base_name("WETH-USDC-Base").solver("0x").build(),
		];

		let dashboard = build_dashboard(endpoints, now());

		assert_eq!(dashboard.total_endpoints, 3);
		let keys: Vec<_> = dashboard.endpoints.keys().cloned().collect();
		assert_eq!(keys, vec!["AAVE-WETH-Ethereum", "WETH-USDC-Base"]);
		let solvers: Vec<_> = dashboard.endpoints["WETH-USDC-Base"]
			.iter()
			.map(|row| row.solver_name.as_str())
			.collect();
		assert_eq!(solvers, vec!["0x", "odos"]);
	}

	#[test]
	fn test_row_carries_network_name_and_highest() {
		let mut endpoint = EndpointBuilder::new().build();
		endpoint.return_amount = Some(Amount::new("9"));
		endpoint.market_price = Some(Amount::new("10"));

		let row = EndpointRow::from_endpoint(endpoint, now());

		assert_eq!(row.network_name, "base");
		assert_eq!(row.highest, Highest::MarketPrice);
		assert_eq!(row.last_checked_ago, "Never");
	}

	#[test]
	fn test_format_time_ago() {
		let now = now();
		assert_eq!(format_time_ago(Some(now - Duration::seconds(30)), now), "Just now");
		assert_eq!(format_time_ago(Some(now - Duration::minutes(1)), now), "1 minute ago");
		assert_eq!(format_time_ago(Some(now - Duration::minutes(42)), now), "42 minutes ago");
		assert_eq!(format_time_ago(Some(now - Duration::hours(3)), now), "3 hours ago");
		assert_eq!(format_time_ago(Some(now - Duration::days(2)), now), "Mar 12 12:00:00");
	}
}
