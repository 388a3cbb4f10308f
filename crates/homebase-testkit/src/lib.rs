//! Test doubles for the Homebase collaborator traits
//!
//! Every fake is deterministic, keeps its state behind a lock, and records
//! what the code under test asked of it so tests can assert on call counts
//! and arguments. Failure injection is per fake (`fail_*` setters).

mod account;
mod navigator;
mod notifier;
mod preferences;
mod push;

pub use account::FakeAccountAdapter;
pub use navigator::{NavigationCall, RecordingNavigator};
pub use notifier::RecordingNotifier;
pub use preferences::MemoryPreferenceAdapter;
pub use push::{FakePushProvider, BACKGROUND, FOREGROUND, OPENED};

use homebase_types::push_adapter::{NotificationContent, RemoteMessage};
use std::collections::HashMap;

/// Installs a test-friendly tracing subscriber (idempotent)
pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

/// Remote message with a data payload of the given `type`
pub fn typed_message(kind: &str) -> RemoteMessage {
	RemoteMessage {
		message_id: Some(format!("msg-{}", kind).into()),
		notification: None,
		data: Some(HashMap::from([("type".to_string(), kind.to_string())])),
	}
}

/// Remote message with a displayable notification part
pub fn display_message(title: Option<&str>, body: Option<&str>) -> RemoteMessage {
	RemoteMessage {
		message_id: Some("msg-display".into()),
		notification: Some(NotificationContent { title: title.map(Into::into), body: body.map(Into::into) }),
		data: None,
	}
}

// vim: ts=4
