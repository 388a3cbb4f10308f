use std::sync::Arc;

use homebase_core::preferences::{PreferenceRegistry, PreferenceService};
use homebase_core::{App, AppConfig, AppState};
use homebase_testkit::{
	FakeAccountAdapter, FakePushProvider, MemoryPreferenceAdapter, RecordingNavigator,
	RecordingNotifier,
};
use homebase_types::error::HbResult;

pub struct TestApp {
	pub app: App,
	pub preferences: Arc<MemoryPreferenceAdapter>,
	pub provider: Arc<FakePushProvider>,
	pub navigator: Arc<RecordingNavigator>,
	pub account: Arc<FakeAccountAdapter>,
}

pub fn test_app(opts: AppConfig, preferences: MemoryPreferenceAdapter) -> HbResult<TestApp> {
	homebase_testkit::setup_test_logging();

	let mut registry = PreferenceRegistry::new();
	homebase_push::register_preferences(&mut registry)?;
	let registry = Arc::new(registry.freeze());

	let preferences = Arc::new(preferences);
	let provider = Arc::new(FakePushProvider::new());
	let navigator = Arc::new(RecordingNavigator::new());
	let account = Arc::new(FakeAccountAdapter::new());

	let app = Arc::new(AppState {
		opts,
		preference_adapter: preferences.clone(),
		push_provider: provider.clone(),
		local_notifier: Arc::new(RecordingNotifier::new()),
		navigator: navigator.clone(),
		account_adapter: account.clone(),
		preferences: Arc::new(PreferenceService::new(registry.clone(), preferences.clone())),
		preference_registry: registry,
	});

	Ok(TestApp { app, preferences, provider, navigator, account })
}

// vim: ts=4
