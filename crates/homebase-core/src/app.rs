//! App state type

use std::sync::Arc;

use homebase_types::account_adapter::AccountAdapter;
use homebase_types::navigator::Navigator;
use homebase_types::notify_adapter::LocalNotifier;
use homebase_types::preference_adapter::PreferenceAdapter;
use homebase_types::push_adapter::PushProvider;

use crate::config::AppConfig;
use crate::preferences::{FrozenPreferenceRegistry, PreferenceService};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub struct AppState {
	pub opts: AppConfig,

	pub preference_adapter: Arc<dyn PreferenceAdapter>,
	pub push_provider: Arc<dyn PushProvider>,
	pub local_notifier: Arc<dyn LocalNotifier>,
	pub navigator: Arc<dyn Navigator>,
	pub account_adapter: Arc<dyn AccountAdapter>,

	// Preference subsystem
	pub preferences: Arc<PreferenceService>,
	pub preference_registry: Arc<FrozenPreferenceRegistry>,
}

pub type App = Arc<AppState>;

#[derive(Default)]
pub struct Adapters {
	pub preference_adapter: Option<Arc<dyn PreferenceAdapter>>,
	pub push_provider: Option<Arc<dyn PushProvider>>,
	pub local_notifier: Option<Arc<dyn LocalNotifier>>,
	pub navigator: Option<Arc<dyn Navigator>>,
	pub account_adapter: Option<Arc<dyn AccountAdapter>>,
}

// vim: ts=4
