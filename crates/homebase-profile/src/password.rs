//! Password change flow
//!
//! The form is validated locally before anything is sent. Validation stops at
//! the first failing rule, in this order: all fields filled, confirmation
//! matches, minimum length.

use homebase_types::account_adapter::ChangePasswordRequest;

use crate::alert::Alert;
use crate::prelude::*;

pub const SUCCESS_MESSAGE: &str = "Password changed successfully. Please login again.";
pub const INCORRECT_PASSWORD_MESSAGE: &str = "Current password is incorrect";
pub const FAILED_MESSAGE: &str = "Failed to change password. Please try again.";

/// Backend field reporting a wrong current password
const OLD_PASSWORD_FIELD: &str = "old_password";

#[derive(Debug, Clone, Default)]
pub struct PasswordChangeForm {
	pub current_password: Box<str>,
	pub new_password: Box<str>,
	pub confirm_password: Box<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordFormError {
	MissingFields,
	Mismatch,
	TooShort { min_length: usize },
}

impl std::fmt::Display for PasswordFormError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PasswordFormError::MissingFields => f.write_str("Please fill in all fields"),
			PasswordFormError::Mismatch => f.write_str("New passwords do not match"),
			PasswordFormError::TooShort { min_length } => {
				write!(f, "New password must be at least {} characters long", min_length)
			}
		}
	}
}

impl PasswordChangeForm {
	pub fn new(
		current_password: impl Into<Box<str>>,
		new_password: impl Into<Box<str>>,
		confirm_password: impl Into<Box<str>>,
	) -> Self {
		Self {
			current_password: current_password.into(),
			new_password: new_password.into(),
			confirm_password: confirm_password.into(),
		}
	}

	pub fn validate(&self, min_length: usize) -> Result<(), PasswordFormError> {
		if self.current_password.is_empty()
			|| self.new_password.is_empty()
			|| self.confirm_password.is_empty()
		{
			return Err(PasswordFormError::MissingFields);
		}
		if self.new_password != self.confirm_password {
			return Err(PasswordFormError::Mismatch);
		}
		if self.new_password.chars().count() < min_length {
			return Err(PasswordFormError::TooShort { min_length });
		}
		Ok(())
	}

	fn into_request(self) -> ChangePasswordRequest {
		ChangePasswordRequest { old_password: self.current_password, new_password: self.new_password }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
	/// Password changed, the user was sent to the login screen
	Changed,
	/// Rejected locally, nothing was sent
	Invalid(PasswordFormError),
	IncorrectCurrentPassword,
	Failed,
}

impl PasswordChangeOutcome {
	pub fn alert(&self) -> Alert {
		match self {
			PasswordChangeOutcome::Changed => Alert::new("Success", SUCCESS_MESSAGE),
			PasswordChangeOutcome::Invalid(e) => Alert::error(e.to_string()),
			PasswordChangeOutcome::IncorrectCurrentPassword => Alert::error(INCORRECT_PASSWORD_MESSAGE),
			PasswordChangeOutcome::Failed => Alert::error(FAILED_MESSAGE),
		}
	}
}

/// Validates the form, submits it, and on success replaces the current route
/// with the login screen
pub async fn change_password(app: &App, form: PasswordChangeForm) -> PasswordChangeOutcome {
	if let Err(e) = form.validate(app.opts.min_password_length) {
		debug!(reason = %e, "Password form rejected");
		return PasswordChangeOutcome::Invalid(e);
	}

	match app.account_adapter.change_password(&form.into_request()).await {
		Ok(()) => {
			info!("Password changed");
			if let Err(e) = app.navigator.replace(&app.opts.login_route) {
				warn!(route = %app.opts.login_route, error = %e, "Failed to open login screen");
			}
			PasswordChangeOutcome::Changed
		}
		Err(Error::Rejected(errors)) if errors.contains(OLD_PASSWORD_FIELD) => {
			warn!("Password change rejected: wrong current password");
			PasswordChangeOutcome::IncorrectCurrentPassword
		}
		Err(e) => {
			warn!(error = %e, "Password change failed");
			PasswordChangeOutcome::Failed
		}
	}
}


// vim: ts=4
