//! HTTP account backend adapter
//!
//! Implements the AccountAdapter trait against the property-management REST
//! API. The password change is a JSON `POST` of
//! `{"old_password": ..., "new_password": ...}`; a `400` response carries a
//! field-keyed error object such as `{"old_password": ["Wrong password."]}`.
//! A request that gets no complete response within the timeout fails with
//! `Error::Timeout`.

use std::time::Duration;

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{debug, info, warn};
use url::Url;

use homebase::account_adapter::{AccountAdapter, ChangePasswordRequest, FieldErrors};
use homebase::error::{Error as HbError, HbResult};

mod error;
pub use error::Error;

pub const DEFAULT_CHANGE_PASSWORD_PATH: &str = "auth/change-password/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, Full<Bytes>>;

pub struct AccountAdapterHttp {
	endpoint: Url,
	bearer_token: Option<Box<str>>,
	timeout: Duration,
	client: HttpsClient,
}

impl std::fmt::Debug for AccountAdapterHttp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AccountAdapterHttp")
			.field("endpoint", &self.endpoint.as_str())
			.field("authenticated", &self.bearer_token.is_some())
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

impl AccountAdapterHttp {
	/// Creates an adapter for the API at `base_url` using the default
	/// password change path
	pub fn new(base_url: &str) -> HbResult<Self> {
		Self::with_path(base_url, DEFAULT_CHANGE_PASSWORD_PATH)
	}

	pub fn with_path(base_url: &str, path: &str) -> HbResult<Self> {
		let endpoint = endpoint_url(base_url, path)?;

		let builder = match HttpsConnectorBuilder::new().with_native_roots() {
			Ok(builder) => builder,
			Err(e) => {
				warn!("No native root certificates ({}), using bundled roots", e);
				HttpsConnectorBuilder::new().with_webpki_roots()
			}
		};
		let connector = builder.https_or_http().enable_http1().build();
		let client = Client::builder(TokioExecutor::new()).build(connector);

		debug!("Account API endpoint: {}", endpoint);
		Ok(Self { endpoint, bearer_token: None, timeout: DEFAULT_REQUEST_TIMEOUT, client })
	}

	/// Session token sent as `Authorization: Bearer ...`
	pub fn with_bearer_token(mut self, token: impl Into<Box<str>>) -> Self {
		self.bearer_token = Some(token.into());
		self
	}

	/// Limit for the whole exchange, response body included
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}

/// Resolves `path` against `base_url`, treating the base as a directory
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, Error> {
	let mut base = Url::parse(base_url)?;
	if !base.path().ends_with('/') {
		let with_slash = format!("{}/", base.path());
		base.set_path(&with_slash);
	}
	Ok(base.join(path.trim_start_matches('/'))?)
}

/// Maps a password change response to a result
pub fn classify_response(status: StatusCode, body: &[u8]) -> HbResult<()> {
	if status.is_success() {
		return Ok(());
	}

	if status == StatusCode::BAD_REQUEST {
		if let Ok(errors) = serde_json::from_slice::<FieldErrors>(body) {
			if !errors.is_empty() {
				return Err(HbError::Rejected(errors));
			}
		}
	}

	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		return Err(HbError::PermissionDenied);
	}

	let body_str = std::str::from_utf8(body).unwrap_or("");
	Err(HbError::NetworkError(format!("HTTP {}: {}", status, body_str)))
}

#[async_trait]
impl AccountAdapter for AccountAdapterHttp {
	async fn change_password(&self, request: &ChangePasswordRequest) -> HbResult<()> {
		let body = serde_json::to_vec(request)?;

		let mut builder = hyper::Request::builder()
			.method(hyper::Method::POST)
			.uri(self.endpoint.as_str())
			.header("Content-Type", "application/json")
			.header("Accept", "application/json");
		if let Some(token) = &self.bearer_token {
			builder = builder.header("Authorization", format!("Bearer {}", token));
		}
		let http_request = builder
			.body(Full::new(Bytes::from(body)))
			.map_err(|e| Error::Request(e.to_string()))?;

		let (status, body_bytes) =
			tokio::time::timeout(self.timeout, self.send(http_request)).await.inspect_err(|_| {
				warn!("Password change request timed out after {:?}", self.timeout);
			})??;

		let result = classify_response(status, &body_bytes);
		match &result {
			Ok(()) => info!("Password change accepted"),
			Err(e) => warn!("Password change refused ({}): {}", status, e),
		}
		result
	}
}

impl AccountAdapterHttp {
	async fn send(&self, request: hyper::Request<Full<Bytes>>) -> HbResult<(StatusCode, Bytes)> {
		let response = self.client.request(request).await.map_err(|e| {
			warn!("Password change request failed: {}", e);
			HbError::NetworkError(format!("Network error: {}", e))
		})?;

		let status = response.status();
		let body = response
			.into_body()
			.collect()
			.await
			.map(|b| b.to_bytes())
			.map_err(|e| HbError::NetworkError(format!("Failed to read response: {}", e)))?;
		Ok((status, body))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_success_statuses() {
		assert!(classify_response(StatusCode::OK, b"{}").is_ok());
		assert!(classify_response(StatusCode::NO_CONTENT, b"").is_ok());
	}

	#[test]
	fn test_field_errors_are_rejections() {
		let res = classify_response(StatusCode::BAD_REQUEST, br#"{"old_password": ["Wrong password."]}"#);
		assert!(matches!(res, Err(HbError::Rejected(ref errors)) if errors.contains("old_password")));
	}

	#[test]
	fn test_other_failures() {
		assert!(matches!(
			classify_response(StatusCode::BAD_REQUEST, b"not json"),
			Err(HbError::NetworkError(_))
		));
		assert!(matches!(classify_response(StatusCode::BAD_REQUEST, b"{}"), Err(HbError::NetworkError(_))));
		assert!(matches!(classify_response(StatusCode::UNAUTHORIZED, b""), Err(HbError::PermissionDenied)));
		assert!(matches!(
			classify_response(StatusCode::INTERNAL_SERVER_ERROR, b"oops"),
			Err(HbError::NetworkError(msg)) if msg.contains("500")
		));
	}

	#[test]
	fn test_endpoint_join() -> Result<(), Error> {
		let url = endpoint_url("https://api.example.com/v1", DEFAULT_CHANGE_PASSWORD_PATH)?;
		assert_eq!(url.as_str(), "https://api.example.com/v1/auth/change-password/");

		let url = endpoint_url("https://api.example.com/", "/users/password")?;
		assert_eq!(url.as_str(), "https://api.example.com/users/password");

		assert!(matches!(endpoint_url("not a url", "x"), Err(Error::InvalidUrl(_))));
		Ok(())
	}
}

// vim: ts=4
