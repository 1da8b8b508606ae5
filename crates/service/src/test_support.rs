//! Hand-written collaborators for service tests

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use qmon_adapters::HttpExecutor;
use qmon_onchain::{OnChainResult, RpcCaller};
use qmon_types::{AdapterResult, ApiRequest, ApiResponse, Notifier};
use std::fmt;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&ApiRequest) -> AdapterResult<ApiResponse> + Send + Sync>;

/// Answers every request through a closure and records what it was asked
pub struct StubHttp {
	responder: Responder,
	requests: Mutex<Vec<ApiRequest>>,
	evictions: Mutex<usize>,
}

impl StubHttp {
	pub fn new(
		responder: impl Fn(&ApiRequest) -> AdapterResult<ApiResponse> + Send + Sync + 'static,
	) -> Self {
		Self {
			responder: Box::new(responder),
			requests: Mutex::new(Vec::new()),
			evictions: Mutex::new(0),
		}
	}

	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().unwrap().clone()
	}

	pub fn evictions(&self) -> usize {
		*self.evictions.lock().unwrap()
	}
}

impl fmt::Debug for StubHttp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StubHttp").finish_non_exhaustive()
	}
}

#[async_trait]
impl HttpExecutor for StubHttp {
	async fn execute(&self, _provider_id: &str, request: &ApiRequest) -> AdapterResult<ApiResponse> {
		self.requests.lock().unwrap().push(request.clone());
		(self.responder)(request)
	}

	fn evict_idle_clients(&self) -> usize {
		*self.evictions.lock().unwrap() += 1;
		0
	}
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
	messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
	pub fn messages(&self) -> Vec<String> {
		self.messages.lock().unwrap().clone()
	}
}

#[async_trait]
impl Notifier for RecordingNotifier {
	async fn notify(&self, message: &str) {
		self.messages.lock().unwrap().push(message.to_string());
	}
}

/// Returns the same encoded output for every `eth_call`
#[derive(Debug)]
pub struct StubRpc {
	response: Bytes,
	calls: Mutex<usize>,
}

impl StubRpc {
	pub fn new(response: Bytes) -> Self {
		Self {
			response,
			calls: Mutex::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		*self.calls.lock().unwrap()
	}
}

#[async_trait]
impl RpcCaller for StubRpc {
	async fn call(&self, _rpc_url: &str, _to: Address, _data: Bytes) -> OnChainResult<Bytes> {
		*self.calls.lock().unwrap() += 1;
		Ok(self.response.clone())
	}
}
