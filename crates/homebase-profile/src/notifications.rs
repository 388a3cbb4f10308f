//! Notification preference toggles

use homebase_push::NotificationPreference;
use homebase_push::PermissionNegotiator;
use homebase_push::settings::{PROMOTIONAL_ENABLED_KEY, PUSH_ENABLED_KEY};

use crate::alert::Alert;
use crate::prelude::*;

pub const PERMISSION_REQUIRED_TITLE: &str = "Permission Required";
pub const PERMISSION_REQUIRED_MESSAGE: &str =
	"Please enable notifications in your device settings to receive push notifications.";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update notification settings";

/// State of a toggle after a change, and the alert to show, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
	pub enabled: bool,
	pub alert: Option<Alert>,
}

impl ToggleOutcome {
	fn quiet(enabled: bool) -> Self {
		Self { enabled, alert: None }
	}

	fn failed(enabled: bool) -> Self {
		Self { enabled, alert: Some(Alert::error(UPDATE_FAILED_MESSAGE)) }
	}
}

/// Loads both flags. Read errors are logged and resolve to enabled.
pub async fn load_notification_preferences(app: &App) -> NotificationPreference {
	match NotificationPreference::load(&app.preferences).await {
		Ok(prefs) => prefs,
		Err(e) => {
			error!(error = %e, "Failed to load notification preferences");
			NotificationPreference::default()
		}
	}
}

/// Turns push notifications on or off.
///
/// Turning them on asks for permission first. Turning them off only stores
/// the flag and never talks to the push provider.
pub async fn set_push_notifications(app: &App, enabled: bool) -> ToggleOutcome {
	if !enabled {
		return store_push_flag(app, false, None).await;
	}

	let negotiator = PermissionNegotiator::from_app(app);
	match negotiator.request_enabled().await {
		Ok(true) => store_push_flag(app, true, None).await,
		Ok(false) => {
			info!("Push notifications refused by the OS");
			let alert = Alert::new(PERMISSION_REQUIRED_TITLE, PERMISSION_REQUIRED_MESSAGE);
			store_push_flag(app, false, Some(alert)).await
		}
		Err(e) => {
			error!(error = %e, "Error toggling push notifications");
			ToggleOutcome::failed(false)
		}
	}
}

pub async fn set_promotional_notifications(app: &App, enabled: bool) -> ToggleOutcome {
	match app.preferences.set_bool(PROMOTIONAL_ENABLED_KEY, enabled).await {
		Ok(()) => {
			info!(enabled, "Promotional notifications updated");
			ToggleOutcome::quiet(enabled)
		}
		Err(e) => {
			error!(error = %e, "Error toggling promotional notifications");
			ToggleOutcome::failed(enabled)
		}
	}
}

async fn store_push_flag(app: &App, enabled: bool, alert: Option<Alert>) -> ToggleOutcome {
	match app.preferences.set_bool(PUSH_ENABLED_KEY, enabled).await {
		Ok(()) => {
			info!(enabled, "Push notifications updated");
			ToggleOutcome { enabled, alert }
		}
		Err(e) => {
			error!(error = %e, "Error toggling push notifications");
			ToggleOutcome::failed(enabled)
		}
	}
}

// vim: ts=4
