//! Stand-ins for the network-facing traits

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use quote_monitor::onchain::OnChainResult;
use quote_monitor::{AdapterResult, ApiRequest, ApiResponse, HttpExecutor, Notifier, RpcCaller};
use std::fmt;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&ApiRequest) -> AdapterResult<ApiResponse> + Send + Sync>;

/// Answers every provider request through a closure
pub struct StubHttp {
	responder: Responder,
	requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl StubHttp {
	pub fn new(
		responder: impl Fn(&ApiRequest) -> AdapterResult<ApiResponse> + Send + Sync + 'static,
	) -> Self {
		Self {
			responder: Box::new(responder),
			requests: Mutex::new(Vec::new()),
		}
	}

	/// Same 200 body for every request
	pub fn always(body: String) -> Self {
		Self::new(move |_| Ok(ApiResponse::new(200, body.clone())))
	}

	pub fn requests(&self) -> Vec<ApiRequest> {
		self.requests.lock().unwrap().clone()
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
}

/// Returns a fixed ABI payload and records every call target
#[derive(Debug)]
pub struct StubRpc {
	response: Bytes,
	calls: Mutex<Vec<(String, Address)>>,
}

#[allow(dead_code)]
impl StubRpc {
	pub fn new(response: Bytes) -> Self {
		Self {
			response,
			calls: Mutex::new(Vec::new()),
		}
	}

	pub fn calls(&self) -> Vec<(String, Address)> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl RpcCaller for StubRpc {
	async fn call(&self, rpc_url: &str, to: Address, _data: Bytes) -> OnChainResult<Bytes> {
		self.calls.lock().unwrap().push((rpc_url.to_string(), to));
		Ok(self.response.clone())
	}
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
	messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
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
