//! Delivery token retrieval
//!
//! The token is cached in the preference store on first fetch and never
//! fetched again: a stored token is treated as valid for the lifetime of
//! the installation.

use std::sync::Arc;
use std::time::Duration;

use homebase_core::preferences::PreferenceService;
use homebase_types::push_adapter::PushProvider;

use crate::prelude::*;
use crate::provider_call;
use crate::settings::TOKEN_KEY;

#[derive(Debug)]
pub struct TokenManager {
	provider: Arc<dyn PushProvider>,
	preferences: Arc<PreferenceService>,
	timeout: Duration,
	/// Serializes fetches so concurrent callers share one provider request
	fetch_lock: tokio::sync::Mutex<()>,
}

impl TokenManager {
	pub fn new(
		provider: Arc<dyn PushProvider>,
		preferences: Arc<PreferenceService>,
		timeout: Duration,
	) -> Self {
		Self { provider, preferences, timeout, fetch_lock: tokio::sync::Mutex::new(()) }
	}

	pub fn from_app(app: &App) -> Self {
		Self::new(app.push_provider.clone(), app.preferences.clone(), app.opts.provider_timeout())
	}

	/// Returns the delivery token, or `None` when notifications are unavailable.
	///
	/// Never fails: provider and storage errors are logged. Callers should not
	/// retry immediately on `None`.
	pub async fn get_token(&self) -> Option<Box<str>> {
		match self.cached().await {
			Ok(Some(token)) => return Some(token),
			Ok(None) => {}
			Err(e) => {
				warn!(error = %e, "Failed to read cached push token");
				return None;
			}
		}

		let _guard = self.fetch_lock.lock().await;

		// Another caller may have fetched while we waited
		if let Ok(Some(token)) = self.cached().await {
			return Some(token);
		}

		let token = match provider_call(self.timeout, "get_token", self.provider.get_token()).await {
			Ok(Some(token)) if !token.is_empty() => token,
			Ok(_) => {
				debug!("Push provider returned no token");
				return None;
			}
			Err(e) => {
				warn!(error = %e, "Failed to get push token");
				return None;
			}
		};

		if let Err(e) = self.preferences.set_string(TOKEN_KEY, token.clone()).await {
			warn!(error = %e, "Failed to persist push token");
		} else {
			info!("Push token fetched and cached");
		}
		Some(token)
	}

	async fn cached(&self) -> HbResult<Option<Box<str>>> {
		Ok(self.preferences.get_string(TOKEN_KEY).await?.filter(|token| !token.is_empty()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::settings::register_preferences;
	use homebase_core::preferences::PreferenceRegistry;
	use homebase_testkit::{FakePushProvider, MemoryPreferenceAdapter};

	fn setup(
		adapter: Arc<MemoryPreferenceAdapter>,
	) -> HbResult<(Arc<FakePushProvider>, TokenManager)> {
		let mut registry = PreferenceRegistry::new();
		register_preferences(&mut registry)?;
		let preferences = Arc::new(PreferenceService::new(Arc::new(registry.freeze()), adapter));
		let provider = Arc::new(FakePushProvider::new());
		let manager = TokenManager::new(provider.clone(), preferences, Duration::from_secs(5));
		Ok((provider, manager))
	}

	#[tokio::test]
	async fn test_fetches_once_then_reads_cache() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let (provider, manager) = setup(adapter.clone())?;

		assert_eq!(manager.get_token().await.as_deref(), Some("fake-token"));
		assert_eq!(manager.get_token().await.as_deref(), Some("fake-token"));

		assert_eq!(provider.token_requests(), 1);
		assert_eq!(adapter.raw(TOKEN_KEY).as_deref(), Some("fake-token"));
		Ok(())
	}

	#[tokio::test]
	async fn test_cached_token_skips_provider() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::with_values([(TOKEN_KEY, "stored")]));
		let (provider, manager) = setup(adapter)?;

		assert_eq!(manager.get_token().await.as_deref(), Some("stored"));
		assert_eq!(provider.token_requests(), 0);
		Ok(())
	}

	#[tokio::test]
	async fn test_concurrent_fetches_share_one_request() -> HbResult<()> {
		let (provider, manager) = setup(Arc::new(MemoryPreferenceAdapter::new()))?;

		let (a, b) = tokio::join!(manager.get_token(), manager.get_token());
		assert_eq!(a, b);
		assert_eq!(provider.token_requests(), 1);
		Ok(())
	}

	#[tokio::test]
	async fn test_provider_failure_returns_none() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let (provider, manager) = setup(adapter.clone())?;
		provider.fail_token("offline");

		assert_eq!(manager.get_token().await, None);
		assert_eq!(adapter.raw(TOKEN_KEY), None);

		// Not cached, so the next call asks again
		provider.set_token(Some("late-token"));
		assert_eq!(manager.get_token().await.as_deref(), Some("late-token"));
		assert_eq!(provider.token_requests(), 2);
		Ok(())
	}

	#[tokio::test]
	async fn test_empty_token_is_not_cached() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let (provider, manager) = setup(adapter.clone())?;
		provider.set_token(Some(""));

		assert_eq!(manager.get_token().await, None);
		assert_eq!(adapter.writes(), 0);
		Ok(())
	}

	#[tokio::test]
	async fn test_persist_failure_still_returns_token() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let (_provider, manager) = setup(adapter.clone())?;
		adapter.fail_writes(true);

		assert_eq!(manager.get_token().await.as_deref(), Some("fake-token"));
		assert_eq!(adapter.raw(TOKEN_KEY), None);
		Ok(())
	}
}

// vim: ts=4
