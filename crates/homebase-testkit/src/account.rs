use async_trait::async_trait;
use parking_lot::Mutex;

use homebase_types::account_adapter::{AccountAdapter, ChangePasswordRequest, FieldErrors};
use homebase_types::error::{Error, HbResult};

#[derive(Debug, Clone)]
enum Response {
	Ok,
	Rejected(FieldErrors),
	Network(String),
}

/// Account backend with a scripted response
#[derive(Debug)]
pub struct FakeAccountAdapter {
	response: Mutex<Response>,
	requests: Mutex<Vec<ChangePasswordRequest>>,
}

impl FakeAccountAdapter {
	/// Accepts every request
	pub fn new() -> Self {
		Self { response: Mutex::new(Response::Ok), requests: Mutex::new(Vec::new()) }
	}

	/// Rejects with a field-keyed error object such as `{"old_password": [...]}`
	/// Fails if `body` is not a field-keyed error object
	pub fn reject_with(&self, body: serde_json::Value) -> HbResult<()> {
		let errors: FieldErrors = serde_json::from_value(body)?;
		*self.response.lock() = Response::Rejected(errors);
		Ok(())
	}

	pub fn fail_network(&self, msg: &str) {
		*self.response.lock() = Response::Network(msg.to_string());
	}

	pub fn requests(&self) -> Vec<ChangePasswordRequest> {
		self.requests.lock().clone()
	}
}

impl Default for FakeAccountAdapter {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl AccountAdapter for FakeAccountAdapter {
	async fn change_password(&self, request: &ChangePasswordRequest) -> HbResult<()> {
		self.requests.lock().push(request.clone());
		match self.response.lock().clone() {
			Response::Ok => Ok(()),
			Response::Rejected(errors) => Err(Error::Rejected(errors)),
			Response::Network(msg) => Err(Error::NetworkError(msg)),
		}
	}
}

// vim: ts=4
