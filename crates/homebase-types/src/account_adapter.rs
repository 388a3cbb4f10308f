//! Account backend collaborator.
//!
//! Only the password-change contract is modelled. A rejected request carries
//! a field-keyed error object, e.g. `{"old_password": ["Wrong password."]}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Request body of the password change endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
	pub old_password: Box<str>,
	pub new_password: Box<str>,
}

/// Field-keyed validation errors returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<Box<str>, serde_json::Value>);

impl FieldErrors {
	pub fn contains(&self, field: &str) -> bool {
		self.0.contains_key(field)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl std::fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let fields: Vec<&str> = self.0.keys().map(AsRef::as_ref).collect();
		write!(f, "invalid fields [{}]", fields.join(", "))
	}
}

#[async_trait]
pub trait AccountAdapter: Debug + Send + Sync {
	/// Changes the password of the signed-in user.
	///
	/// Returns `Error::Rejected` when the backend refuses the request with
	/// field-keyed errors.
	async fn change_password(&self, request: &ChangePasswordRequest) -> HbResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_errors_from_backend_body() -> HbResult<()> {
		let errors: FieldErrors = serde_json::from_str(r#"{"old_password": ["Wrong password."]}"#)?;
		assert!(errors.contains("old_password"));
		assert!(!errors.contains("new_password"));
		assert_eq!(errors.to_string(), "invalid fields [old_password]");
		Ok(())
	}

	#[test]
	fn test_request_wire_format() -> HbResult<()> {
		let req = ChangePasswordRequest { old_password: "old".into(), new_password: "newpass1".into() };
		let json = serde_json::to_value(&req)?;
		assert_eq!(json, serde_json::json!({ "old_password": "old", "new_password": "newpass1" }));
		Ok(())
	}
}

// vim: ts=4
