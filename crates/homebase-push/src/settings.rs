//! Notification preference registration
//!
//! The two flags are default-on and stored independently; the delivery token
//! has no default and is written once by the token manager.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use homebase_core::preferences::{
	PreferenceDefinition, PreferenceKind, PreferenceRegistry, PreferenceService, PreferenceValue,
};

pub const PUSH_ENABLED_KEY: &str = "pushNotificationsEnabled";
pub const PROMOTIONAL_ENABLED_KEY: &str = "promotionalNotificationsEnabled";
pub const TOKEN_KEY: &str = "fcmToken";

/// Register all notification preferences
pub fn register_preferences(registry: &mut PreferenceRegistry) -> HbResult<()> {
	// Master switch for push notifications
	registry.register(
		PreferenceDefinition::builder(PUSH_ENABLED_KEY)
			.description("Receive push notifications")
			.default(PreferenceValue::Bool(true))
			.build()?,
	)?;

	registry.register(
		PreferenceDefinition::builder(PROMOTIONAL_ENABLED_KEY)
			.description("Receive promotional notifications")
			.default(PreferenceValue::Bool(true))
			.build()?,
	)?;

	registry.register(
		PreferenceDefinition::builder(TOKEN_KEY)
			.description("Cached push delivery token")
			.kind(PreferenceKind::String)
			.build()?,
	)?;

	Ok(())
}

/// User's notification preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreference {
	#[serde(rename = "pushEnabled")]
	pub push_enabled: bool,
	#[serde(rename = "promotionalEnabled")]
	pub promotional_enabled: bool,
}

impl Default for NotificationPreference {
	fn default() -> Self {
		Self { push_enabled: true, promotional_enabled: true }
	}
}

impl NotificationPreference {
	/// Reads both flags; flags never written resolve to enabled
	pub async fn load(preferences: &PreferenceService) -> HbResult<Self> {
		let push_enabled = preferences.get_bool(PUSH_ENABLED_KEY).await?;
		let promotional_enabled = preferences.get_bool(PROMOTIONAL_ENABLED_KEY).await?;
		Ok(Self { push_enabled, promotional_enabled })
	}
}

// vim: ts=4
