//! Push provider collaborator: permission, delivery token, and message channels.
//!
//! The provider runtime (the OS plus the vendor SDK) invokes registered
//! handlers on its own schedule. Registration returns a [`Subscription`] so
//! the client can detach its handlers again on shutdown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;

use crate::prelude::*;

/// Authorization status reported by the push provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
	#[serde(rename = "notDetermined")]
	NotDetermined,
	#[serde(rename = "denied")]
	Denied,
	#[serde(rename = "authorized")]
	Authorized,
	/// Quiet delivery granted without an explicit prompt (iOS only)
	#[serde(rename = "provisional")]
	Provisional,
	/// Time-limited authorization for app clips (iOS only)
	#[serde(rename = "ephemeral")]
	Ephemeral,
}

/// Displayable part of a remote message
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
	pub title: Option<Box<str>>,
	pub body: Option<Box<str>>,
}

/// Message delivered by the push provider
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMessage {
	#[serde(rename = "messageId")]
	pub message_id: Option<Box<str>>,
	pub notification: Option<NotificationContent>,
	/// Custom key-value payload. `type` selects the navigation target.
	pub data: Option<HashMap<String, String>>,
}

impl RemoteMessage {
	/// Value of the `type` field of the data payload, if any
	pub fn data_type(&self) -> Option<&str> {
		self.data.as_ref()?.get("type").map(String::as_str)
	}
}

/// Callback invoked by the provider runtime for a delivered message
pub type MessageHandler =
	Arc<dyn Fn(RemoteMessage) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Wraps an async closure into a [`MessageHandler`]
pub fn message_handler<F, Fut>(f: F) -> MessageHandler
where
	F: Fn(RemoteMessage) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = ()> + Send + 'static,
{
	Arc::new(move |msg| Box::pin(f(msg)))
}

/// Handle to a registered provider callback
pub struct Subscription {
	channel: &'static str,
	cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
	pub fn new(channel: &'static str, cancel: impl FnOnce() + Send + 'static) -> Self {
		Self { channel, cancel: Some(Box::new(cancel)) }
	}

	/// Subscription for providers that cannot detach a handler
	pub fn detached(channel: &'static str) -> Self {
		Self { channel, cancel: None }
	}

	pub fn channel(&self) -> &'static str {
		self.channel
	}

	/// Detaches the handler from the provider
	pub fn unsubscribe(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl Debug for Subscription {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Subscription")
			.field("channel", &self.channel)
			.field("cancelable", &self.cancel.is_some())
			.finish()
	}
}

#[async_trait]
pub trait PushProvider: Debug + Send + Sync {
	/// Asks the user for notification authorization
	async fn request_permission(&self) -> HbResult<AuthorizationStatus>;

	/// Requests a delivery token. `Ok(None)` means the provider had none to give.
	async fn get_token(&self) -> HbResult<Option<Box<str>>>;

	/// Messages arriving while the app has user focus
	fn on_message(&self, handler: MessageHandler) -> HbResult<Subscription>;

	/// Messages arriving while the app is suspended or terminated
	fn set_background_message_handler(&self, handler: MessageHandler) -> HbResult<Subscription>;

	/// User tapped a notification that brought the app to the foreground
	fn on_notification_opened_app(&self, handler: MessageHandler) -> HbResult<Subscription>;

	/// Notification that launched the process from a terminated state.
	/// Providers report it only once per launch.
	async fn get_initial_notification(&self) -> HbResult<Option<RemoteMessage>>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicBool, Ordering};

	#[test]
	fn test_remote_message_wire_format() -> HbResult<()> {
		let msg: RemoteMessage = serde_json::from_value(serde_json::json!({
			"messageId": "m1",
			"notification": { "title": "Water outage" },
			"data": { "type": "announcement", "id": "42" }
		}))?;

		assert_eq!(msg.message_id.as_deref(), Some("m1"));
		assert_eq!(msg.data_type(), Some("announcement"));
		assert_eq!(msg.notification.and_then(|n| n.body), None);
		Ok(())
	}

	#[test]
	fn test_data_type_missing() {
		assert_eq!(RemoteMessage::default().data_type(), None);

		let msg = RemoteMessage { data: Some(HashMap::new()), ..Default::default() };
		assert_eq!(msg.data_type(), None);
	}

	#[test]
	fn test_subscription_unsubscribe_runs_cancel() {
		let cancelled = Arc::new(AtomicBool::new(false));
		let flag = cancelled.clone();
		let sub = Subscription::new("foreground", move || flag.store(true, Ordering::SeqCst));

		assert_eq!(sub.channel(), "foreground");
		sub.unsubscribe();
		assert!(cancelled.load(Ordering::SeqCst));

		// Detached subscriptions are a no-op
		Subscription::detached("background").unsubscribe();
	}
}

// vim: ts=4
