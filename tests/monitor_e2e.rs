//! End-to-end checks through the builder: settings to endpoint to stored result

mod mocks;

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolValue;
use mocks::*;
use quote_monitor::onchain::contracts::deployment;
use quote_monitor::{AdapterError, AppState, EndpointStatus, MonitorBuilder, StaticSecretProvider};
use std::sync::Arc;

struct Harness {
	state: AppState,
	http: Arc<StubHttp>,
	rpc: Arc<StubRpc>,
	notifier: Arc<RecordingNotifier>,
}

async fn harness(http: StubHttp) -> Harness {
	let http = Arc::new(http);
	let rpc = Arc::new(StubRpc::new(Bytes::from(U256::from(987_000u64).abi_encode())));
	let notifier = Arc::new(RecordingNotifier::default());
	let (_, state) = MonitorBuilder::from_config(kyber_settings())
		.with_http_executor(http.clone())
		.with_rpc_caller(rpc.clone())
		.with_notifier(notifier.clone())
		.with_secrets(Arc::new(StaticSecretProvider::new()))
		.start()
		.await
		.unwrap();
	Harness {
		state,
		http,
		rpc,
		notifier,
	}
}

#[tokio::test]
async fn test_settings_generate_one_endpoint_per_supporting_solver() {
	let h = harness(StubHttp::always(kyber_body(&[(POOL, "balancer-v3-stable")], "1"))).await;

	let endpoints = h.state.storage.snapshot().await.unwrap();
	assert_eq!(endpoints.len(), 1);
	assert_eq!(endpoints[0].name, KYBER_ENDPOINT);
	assert_eq!(endpoints[0].route_solver, "kyberswap");
	assert_eq!(endpoints[0].last_status, EndpointStatus::Unknown);
}

#[tokio::test]
async fn test_single_hop_balancer_route_is_up() {
	let h = harness(StubHttp::always(kyber_body(&[(POOL, "balancer-v3-stable")], "987654"))).await;

	let checked = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(checked.last_status, EndpointStatus::Up);
	assert_eq!(checked.message, "Ok");
	assert_eq!(checked.return_amount.as_ref().map(|a| a.as_str()), Some("987654"));
	assert_eq!(checked.market_price.as_ref().map(|a| a.as_str()), Some("987654"));
	assert!(checked.last_checked.is_some());

	// restricted and market price sub-checks
	let requests = h.http.requests();
	assert_eq!(requests.len(), 2);
	assert!(requests[0].url.contains("amountIn=1000000"));
	assert!(requests[0].url.contains("includedSources=balancer-v3-stable"));

	let stored = h.state.storage.get_endpoint(KYBER_ENDPOINT).await.unwrap().unwrap();
	assert_eq!(stored, checked);
	assert!(h.notifier.messages().is_empty());
}

#[tokio::test]
async fn test_single_pool_path_is_verified_through_router() {
	let h = harness(StubHttp::always(kyber_body(&[(POOL, "balancer-v3-stable")], "987654"))).await;

	let checked = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(checked.onchain_amount.as_ref().map(|a| a.as_str()), Some("987000"));
	assert_eq!(checked.onchain_message, None);
	let calls = h.rpc.calls();
	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].0, RPC_URL);
	assert_eq!(calls[0].1, deployment("8453").unwrap().router);
}

#[tokio::test]
async fn test_disallowed_second_hop_is_down_and_named() {
	let body = kyber_body(&[(POOL, "balancer-v3-stable"), ("0x2222", "uniswap-v3")], "987654");
	let h = harness(StubHttp::always(body)).await;

	let checked = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(checked.last_status, EndpointStatus::Down);
	assert!(checked.message.contains("uniswap-v3"), "message: {}", checked.message);
	assert_eq!(checked.return_amount, None);
	assert!(h.rpc.calls().is_empty());

	let messages = h.notifier.messages();
	assert_eq!(messages.len(), 1);
	assert!(messages[0].starts_with(&format!("[{}]", KYBER_ENDPOINT)));
}

#[tokio::test]
async fn test_missing_expected_pool_is_down_and_named() {
	let h = harness(StubHttp::always(kyber_body(&[("0x3333", "balancer-v3-stable")], "5"))).await;

	let checked = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(checked.last_status, EndpointStatus::Down);
	assert!(checked.message.contains(POOL), "message: {}", checked.message);
}

#[tokio::test]
async fn test_transport_failure_is_down() {
	let h = harness(StubHttp::new(|_| Err(AdapterError::Connection("connection refused".to_string())))).await;

	let checked = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(checked.last_status, EndpointStatus::Down);
	assert!(checked.message.starts_with("Error sending request"), "message: {}", checked.message);
	assert_eq!(checked.onchain_amount, None);
}

#[tokio::test]
async fn test_identical_payload_gives_identical_result() {
	let h = harness(StubHttp::always(kyber_body(&[(POOL, "balancer-v3-stable")], "987654"))).await;

	let first = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();
	let second = h.state.monitor.check_endpoint(KYBER_ENDPOINT).await.unwrap();

	assert_eq!(first.last_status, second.last_status);
	assert_eq!(first.return_amount, second.return_amount);
}

#[tokio::test]
async fn test_check_all_walks_every_endpoint() {
	let h = harness(StubHttp::always(kyber_body(&[(POOL, "balancer-v3-stable")], "42"))).await;

	let total = h.state.monitor.check_all().await.unwrap();

	assert_eq!(total, 1);
	let stored = h.state.storage.get_endpoint(KYBER_ENDPOINT).await.unwrap().unwrap();
	assert_eq!(stored.last_status, EndpointStatus::Up);
	assert_eq!(stored.return_amount.map(|a| a.to_string()), Some("42".to_string()));
}
