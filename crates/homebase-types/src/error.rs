//! Error type shared by every Homebase crate

use tracing::warn;

use crate::account_adapter::FieldErrors;

pub type HbResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,
	/// A collaborator call did not complete within the configured timeout
	Timeout,
	ValidationError(String),
	NetworkError(String),
	/// The push or local notification provider reported a failure
	Provider(String),
	/// The backend rejected a request with field-keyed validation errors
	Rejected(FieldErrors),
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		warn!("json error: {}", err);
		Self::Parse
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::ConfigError(err.to_string())
	}
}

impl From<tokio::time::error::Elapsed> for Error {
	fn from(_err: tokio::time::error::Elapsed) -> Self {
		Self::Timeout
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "parse error"),
			Error::Timeout => write!(f, "operation timed out"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::NetworkError(msg) => write!(f, "network error: {}", msg),
			Error::Provider(msg) => write!(f, "provider error: {}", msg),
			Error::Rejected(fields) => write!(f, "request rejected: {}", fields),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

// vim: ts=4
