//! App builder - wires the adapters into a running Homebase client

use std::path::PathBuf;
use std::sync::Arc;

use crate::account_adapter::AccountAdapter;
use crate::navigator::Navigator;
use crate::notify_adapter::LocalNotifier;
use crate::preference_adapter::PreferenceAdapter;
use crate::prelude::*;
use crate::push_adapter::PushProvider;
pub use homebase_core::app::{Adapters, App, AppState, VERSION};
use homebase_core::config::AppConfig;
use homebase_core::preferences::{PreferenceRegistry, PreferenceService};
use homebase_pref_adapter_redb::PreferenceAdapterRedb;
use homebase_profile::{
	PasswordChangeForm, PasswordChangeOutcome, ToggleOutcome, notifications, password,
};
use homebase_push::{InitOutcome, NotificationPreference, NotificationService};

pub struct AppBuilder {
	opts: AppConfig,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		// Keeps a subscriber installed by the embedder
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder { opts: AppConfig::default(), adapters: Adapters::default() }
	}

	// Opts
	pub fn config(&mut self, opts: AppConfig) -> &mut Self {
		self.opts = opts;
		self
	}
	pub fn platform(&mut self, platform: Platform) -> &mut Self {
		self.opts.platform = platform;
		self
	}
	pub fn provider_timeout_secs(&mut self, secs: u64) -> &mut Self {
		self.opts.provider_timeout_secs = secs;
		self
	}
	pub fn fallback_title(&mut self, title: impl Into<Box<str>>) -> &mut Self {
		self.opts.fallback_title = title.into();
		self
	}
	pub fn min_password_length(&mut self, len: usize) -> &mut Self {
		self.opts.min_password_length = len;
		self
	}
	pub fn login_route(&mut self, route: impl Into<Box<str>>) -> &mut Self {
		self.opts.login_route = route.into();
		self
	}
	/// Adds or replaces the route opened for a notification type
	pub fn route(&mut self, kind: impl Into<Box<str>>, route: impl Into<Box<str>>) -> &mut Self {
		self.opts.routes.insert(kind.into(), route.into());
		self
	}
	/// Directory of the built-in preference store, used when no preference
	/// adapter is set
	pub fn data_dir(&mut self, data_dir: impl Into<PathBuf>) -> &mut Self {
		self.opts.data_dir = data_dir.into();
		self
	}

	// Adapters
	pub fn preference_adapter(&mut self, adapter: Arc<dyn PreferenceAdapter>) -> &mut Self {
		self.adapters.preference_adapter = Some(adapter);
		self
	}
	pub fn push_provider(&mut self, provider: Arc<dyn PushProvider>) -> &mut Self {
		self.adapters.push_provider = Some(provider);
		self
	}
	pub fn local_notifier(&mut self, notifier: Arc<dyn LocalNotifier>) -> &mut Self {
		self.adapters.local_notifier = Some(notifier);
		self
	}
	pub fn navigator(&mut self, navigator: Arc<dyn Navigator>) -> &mut Self {
		self.adapters.navigator = Some(navigator);
		self
	}
	pub fn account_adapter(&mut self, adapter: Arc<dyn AccountAdapter>) -> &mut Self {
		self.adapters.account_adapter = Some(adapter);
		self
	}

	pub async fn build(self) -> HbResult<Homebase> {
		info!("Homebase client V{}", VERSION);

		if let Err(e) = self.opts.validate() {
			error!("FATAL: Invalid configuration: {}", e);
			return Err(e);
		}

		let Some(push_provider) = self.adapters.push_provider else {
			error!("FATAL: No push provider configured");
			return Err(Error::Internal("No push provider configured".to_string()));
		};
		let Some(local_notifier) = self.adapters.local_notifier else {
			error!("FATAL: No local notifier configured");
			return Err(Error::Internal("No local notifier configured".to_string()));
		};
		let Some(navigator) = self.adapters.navigator else {
			error!("FATAL: No navigator configured");
			return Err(Error::Internal("No navigator configured".to_string()));
		};
		let Some(account_adapter) = self.adapters.account_adapter else {
			error!("FATAL: No account adapter configured");
			return Err(Error::Internal("No account adapter configured".to_string()));
		};
		let preference_adapter: Arc<dyn PreferenceAdapter> = match self.adapters.preference_adapter {
			Some(adapter) => adapter,
			None => {
				let store = PreferenceAdapterRedb::new(&self.opts.data_dir).await.inspect_err(|e| {
					error!("FATAL: Cannot open preference store in {}: {}", self.opts.data_dir.display(), e);
				})?;
				info!(path = %store.path().display(), "Using built-in preference store");
				Arc::new(store)
			}
		};

		// Register preferences from all modules
		let mut registry = PreferenceRegistry::new();
		homebase_push::register_preferences(&mut registry)?;
		info!("Registered {} preferences", registry.len());

		let preference_registry = Arc::new(registry.freeze());
		let preferences =
			Arc::new(PreferenceService::new(preference_registry.clone(), preference_adapter.clone()));

		let app: App = Arc::new(AppState {
			opts: self.opts,

			preference_adapter,
			push_provider,
			local_notifier,
			navigator,
			account_adapter,

			preferences,
			preference_registry,
		});

		let notifications = NotificationService::from_app(&app);
		info!(platform = %app.opts.platform, "Homebase client ready");
		Ok(Homebase { app, notifications })
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Running client. Owns the notification pipeline and exposes the profile
/// operations.
#[derive(Debug)]
pub struct Homebase {
	app: App,
	notifications: NotificationService,
}

impl Homebase {
	pub fn app(&self) -> &App {
		&self.app
	}

	pub fn notifications(&self) -> &NotificationService {
		&self.notifications
	}

	/// Initializes the notification pipeline. Call once, early in startup;
	/// later calls report `AlreadyInitialized`. A `shutdown` during startup
	/// makes it report `Cancelled`.
	pub async fn start(&self) -> HbResult<InitOutcome> {
		self.notifications.initialize().await
	}

	/// Detaches all notification handlers. `start` may be called again.
	pub fn shutdown(&self) {
		self.notifications.shutdown();
	}

	pub async fn delivery_token(&self) -> Option<Box<str>> {
		self.notifications.tokens().get_token().await
	}

	pub async fn notification_preferences(&self) -> NotificationPreference {
		notifications::load_notification_preferences(&self.app).await
	}

	pub async fn set_push_notifications(&self, enabled: bool) -> ToggleOutcome {
		notifications::set_push_notifications(&self.app, enabled).await
	}

	pub async fn set_promotional_notifications(&self, enabled: bool) -> ToggleOutcome {
		notifications::set_promotional_notifications(&self.app, enabled).await
	}

	pub async fn change_password(&self, form: PasswordChangeForm) -> PasswordChangeOutcome {
		password::change_password(&self.app, form).await
	}
}

// vim: ts=4
