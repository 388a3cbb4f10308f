//! Push notification module
//!
//! Delivers remote notifications to the resident client and routes taps to
//! the matching screen.
//!
//! # Components
//!
//! - Permission negotiation with a per-platform authorization policy
//! - Delivery token retrieval with a read-through preference cache
//! - Message channels: foreground, background, and app-opened handlers plus
//!   the cold-start initial notification
//! - Navigation dispatch from the payload `type` to a route
//!
//! # Preferences
//!
//! - `pushNotificationsEnabled` - Master switch, default on
//! - `promotionalNotificationsEnabled` - Promotional messages, default on
//! - `fcmToken` - Cached delivery token

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod dispatch;
pub mod permission;
pub mod service;
pub mod settings;
pub mod token;

mod prelude;

pub use channel::MessageChannels;
pub use dispatch::NavigationDispatcher;
pub use permission::{PermissionNegotiator, PermissionPolicy};
pub use service::{InitOutcome, InitReport, NotificationService};
pub use settings::NotificationPreference;
pub use token::TokenManager;

use std::time::Duration;

use crate::prelude::*;

pub fn register_preferences(
	registry: &mut homebase_core::preferences::PreferenceRegistry,
) -> HbResult<()> {
	settings::register_preferences(registry)
}

/// Awaits a provider call, failing with `Error::Timeout` after `limit`
pub(crate) async fn provider_call<T, F>(limit: Duration, what: &str, fut: F) -> HbResult<T>
where
	F: Future<Output = HbResult<T>>,
{
	tokio::time::timeout(limit, fut).await.inspect_err(|_| {
		warn!(call = what, timeout_secs = limit.as_secs(), "Push provider call timed out");
	})?
}

// vim: ts=4
