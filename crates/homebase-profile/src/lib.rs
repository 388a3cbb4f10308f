//! Profile subsystem
//!
//! The non-visual half of the profile screen: notification preference
//! toggles and the password change flow. Results carry the alert the screen
//! should show instead of showing it.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod alert;
pub mod notifications;
pub mod password;

mod prelude;

pub use alert::Alert;
pub use notifications::{
	ToggleOutcome, load_notification_preferences, set_promotional_notifications,
	set_push_notifications,
};
pub use password::{PasswordChangeForm, PasswordChangeOutcome, PasswordFormError, change_password};

// vim: ts=4
