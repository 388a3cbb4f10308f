//! Message channel multiplexer
//!
//! Registers one handler per provider channel:
//!
//! - foreground: re-posts the message as a local notification, since the
//!   provider does not display messages while the app has focus
//! - background: logs only
//! - opened: forwards to the navigation dispatcher
//!
//! The cold-start notification is not delivered through a channel and has to
//! be fetched once with [`MessageChannels::handle_initial_notification`].

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use homebase_types::notify_adapter::{LocalNotificationContent, LocalNotifier};
use homebase_types::push_adapter::{
	MessageHandler, PushProvider, RemoteMessage, Subscription, message_handler,
};

use crate::dispatch::NavigationDispatcher;
use crate::prelude::*;
use crate::provider_call;

/// Builds the local notification shown for a foreground message
pub fn local_content(message: &RemoteMessage, fallback_title: &str) -> LocalNotificationContent {
	let notification = message.notification.as_ref();
	let title = notification
		.and_then(|n| n.title.as_deref())
		.filter(|title| !title.is_empty())
		.unwrap_or(fallback_title);
	let body = notification.and_then(|n| n.body.as_deref()).unwrap_or_default();

	LocalNotificationContent { title: title.into(), body: body.into(), data: message.data.clone() }
}

#[derive(Debug)]
pub struct MessageChannels {
	provider: Arc<dyn PushProvider>,
	notifier: Arc<dyn LocalNotifier>,
	dispatcher: Arc<NavigationDispatcher>,
	fallback_title: Box<str>,
	timeout: Duration,
	subscriptions: Mutex<Vec<Subscription>>,
}

impl MessageChannels {
	pub fn new(
		provider: Arc<dyn PushProvider>,
		notifier: Arc<dyn LocalNotifier>,
		dispatcher: Arc<NavigationDispatcher>,
		fallback_title: impl Into<Box<str>>,
		timeout: Duration,
	) -> Self {
		Self {
			provider,
			notifier,
			dispatcher,
			fallback_title: fallback_title.into(),
			timeout,
			subscriptions: Mutex::new(Vec::new()),
		}
	}

	pub fn from_app(app: &App) -> Self {
		Self::new(
			app.push_provider.clone(),
			app.local_notifier.clone(),
			Arc::new(NavigationDispatcher::from_app(app)),
			app.opts.fallback_title.clone(),
			app.opts.provider_timeout(),
		)
	}

	pub fn dispatcher(&self) -> &NavigationDispatcher {
		&self.dispatcher
	}

	pub fn is_registered(&self) -> bool {
		!self.subscriptions.lock().is_empty()
	}

	/// Registers the foreground, background, and opened handlers.
	///
	/// Does nothing if the handlers are already registered. If the provider
	/// refuses one of them, the ones registered so far are removed again.
	pub fn register(&self) -> HbResult<()> {
		let mut subscriptions = self.subscriptions.lock();
		if !subscriptions.is_empty() {
			debug!("Message handlers already registered");
			return Ok(());
		}

		if let Err(e) = self.attach(&mut subscriptions) {
			for subscription in subscriptions.drain(..) {
				subscription.unsubscribe();
			}
			return Err(e);
		}

		info!(count = subscriptions.len(), "Message handlers registered");
		Ok(())
	}

	fn attach(&self, subscriptions: &mut Vec<Subscription>) -> HbResult<()> {
		let foreground = self.provider.on_message(self.foreground_handler()).inspect_err(|e| {
			error!(channel = "foreground", error = %e, "Failed to register message handler");
		})?;
		subscriptions.push(foreground);

		let background =
			self.provider.set_background_message_handler(background_handler()).inspect_err(|e| {
				error!(channel = "background", error = %e, "Failed to register message handler");
			})?;
		subscriptions.push(background);

		let opened = self.provider.on_notification_opened_app(self.opened_handler()).inspect_err(|e| {
			error!(channel = "opened", error = %e, "Failed to register message handler");
		})?;
		subscriptions.push(opened);
		Ok(())
	}

	/// Removes all registered handlers. Returns how many were removed.
	pub fn unregister(&self) -> usize {
		let subscriptions: Vec<Subscription> = self.subscriptions.lock().drain(..).collect();
		let count = subscriptions.len();
		for subscription in subscriptions {
			debug!(channel = subscription.channel(), "Removing message handler");
			subscription.unsubscribe();
		}
		count
	}

	/// Dispatches the notification that launched the app, if any.
	/// Returns the route navigated to.
	pub async fn handle_initial_notification(&self) -> Option<Box<str>> {
		let message = match provider_call(
			self.timeout,
			"get_initial_notification",
			self.provider.get_initial_notification(),
		)
		.await
		{
			Ok(Some(message)) => message,
			Ok(None) => return None,
			Err(e) => {
				warn!(error = %e, "Failed to check initial notification");
				return None;
			}
		};

		info!(message_id = ?message.message_id, "App opened from notification");
		self.dispatcher.dispatch(&message).map(Into::into)
	}

	fn foreground_handler(&self) -> MessageHandler {
		let notifier = self.notifier.clone();
		let fallback_title = self.fallback_title.clone();

		message_handler(move |message: RemoteMessage| {
			let notifier = notifier.clone();
			let content = local_content(&message, &fallback_title);
			async move {
				debug!(message_id = ?message.message_id, "Foreground message received");
				match notifier.schedule_notification(content, None).await {
					Ok(id) => debug!(id = %id, "Local notification scheduled"),
					Err(e) => warn!(error = %e, "Failed to show foreground notification"),
				}
			}
		})
	}

	fn opened_handler(&self) -> MessageHandler {
		let dispatcher = self.dispatcher.clone();

		message_handler(move |message: RemoteMessage| {
			let dispatcher = dispatcher.clone();
			async move {
				info!(message_id = ?message.message_id, "Notification opened app");
				dispatcher.dispatch(&message);
			}
		})
	}
}

fn background_handler() -> MessageHandler {
	message_handler(|message: RemoteMessage| async move {
		info!(
			message_id = ?message.message_id,
			kind = ?message.data_type(),
			"Background message received"
		);
	})
}


// vim: ts=4
