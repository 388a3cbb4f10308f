//! Local notification collaborator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use crate::prelude::*;

/// How notifications are presented while the app is in the foreground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOptions {
	#[serde(rename = "shouldShowAlert")]
	pub show_alert: bool,
	#[serde(rename = "shouldPlaySound")]
	pub play_sound: bool,
	#[serde(rename = "shouldSetBadge")]
	pub set_badge: bool,
}

impl Default for PresentationOptions {
	fn default() -> Self {
		Self { show_alert: true, play_sound: true, set_badge: true }
	}
}

/// Content of a locally scheduled notification
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalNotificationContent {
	pub title: Box<str>,
	pub body: Box<str>,
	pub data: Option<HashMap<String, String>>,
}

#[async_trait]
pub trait LocalNotifier: Debug + Send + Sync {
	/// Installs the foreground presentation policy
	async fn set_presentation(&self, options: PresentationOptions) -> HbResult<()>;

	/// Schedules a notification. `trigger = None` displays it immediately.
	/// Returns the identifier assigned by the runtime.
	async fn schedule_notification(
		&self,
		content: LocalNotificationContent,
		trigger: Option<Duration>,
	) -> HbResult<Box<str>>;
}

// vim: ts=4
