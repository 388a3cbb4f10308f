//! Navigation dispatch for opened notifications
//!
//! Maps the `type` field of a notification's data payload to a route. Unknown
//! or missing types are ignored. The table comes from configuration, so new
//! notification types only need a new entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use homebase_types::navigator::Navigator;
use homebase_types::push_adapter::RemoteMessage;

use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct NavigationDispatcher {
	navigator: Arc<dyn Navigator>,
	routes: BTreeMap<Box<str>, Box<str>>,
}

impl NavigationDispatcher {
	pub fn new(navigator: Arc<dyn Navigator>, routes: BTreeMap<Box<str>, Box<str>>) -> Self {
		Self { navigator, routes }
	}

	pub fn from_app(app: &App) -> Self {
		Self::new(app.navigator.clone(), app.opts.routes.clone())
	}

	/// Route for a notification type, if one is configured
	pub fn route_for(&self, kind: &str) -> Option<&str> {
		self.routes.get(kind).map(AsRef::as_ref)
	}

	/// Navigates to the route selected by the message. Returns the route
	/// navigated to; never fails.
	pub fn dispatch(&self, message: &RemoteMessage) -> Option<&str> {
		let Some(kind) = message.data_type() else {
			debug!(message_id = ?message.message_id, "Notification without type, not navigating");
			return None;
		};
		let Some(route) = self.route_for(kind) else {
			debug!(kind, "No route for notification type");
			return None;
		};

		match self.navigator.push(route) {
			Ok(()) => {
				info!(kind, route, "Navigating from notification");
				Some(route)
			}
			Err(e) => {
				warn!(kind, route, error = %e, "Notification navigation failed");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use homebase_core::config::{ANNOUNCEMENTS_ROUTE, AppConfig, PAYMENT_ROUTE};
	use homebase_testkit::{RecordingNavigator, typed_message};
	use std::collections::HashMap;

	fn dispatcher() -> (Arc<RecordingNavigator>, NavigationDispatcher) {
		let navigator = Arc::new(RecordingNavigator::new());
		let dispatcher = NavigationDispatcher::new(navigator.clone(), AppConfig::default().routes);
		(navigator, dispatcher)
	}

	#[test]
	fn test_announcement_navigates_once() {
		let (navigator, dispatcher) = dispatcher();

		assert_eq!(dispatcher.dispatch(&typed_message("announcement")), Some(ANNOUNCEMENTS_ROUTE));
		assert_eq!(navigator.pushed(), vec![ANNOUNCEMENTS_ROUTE.to_string()]);
	}

	#[test]
	fn test_payment_navigates_once() {
		let (navigator, dispatcher) = dispatcher();

		assert_eq!(dispatcher.dispatch(&typed_message("payment")), Some(PAYMENT_ROUTE));
		assert_eq!(navigator.pushed(), vec![PAYMENT_ROUTE.to_string()]);
	}

	#[test]
	fn test_unroutable_payloads_are_noops() {
		let (navigator, dispatcher) = dispatcher();

		let payloads = [
			RemoteMessage::default(),
			RemoteMessage { data: Some(HashMap::new()), ..Default::default() },
			typed_message("unknown"),
			typed_message(""),
			RemoteMessage {
				data: Some(HashMap::from([("kind".to_string(), "payment".to_string())])),
				..Default::default()
			},
		];
		for payload in &payloads {
			assert_eq!(dispatcher.dispatch(payload), None);
		}
		assert!(navigator.calls().is_empty());
	}

	#[test]
	fn test_navigator_failure_is_swallowed() {
		let (navigator, dispatcher) = dispatcher();
		navigator.fail(true);

		assert_eq!(dispatcher.dispatch(&typed_message("payment")), None);
	}

	#[test]
	fn test_configured_types_extend_the_table() {
		let navigator = Arc::new(RecordingNavigator::new());
		let mut routes = AppConfig::default().routes;
		routes.insert("maintenance".into(), "/(app)/(maintenance)".into());
		let dispatcher = NavigationDispatcher::new(navigator.clone(), routes);

		assert_eq!(dispatcher.dispatch(&typed_message("maintenance")), Some("/(app)/(maintenance)"));
		assert_eq!(navigator.pushed(), vec!["/(app)/(maintenance)".to_string()]);
	}
}

// vim: ts=4
