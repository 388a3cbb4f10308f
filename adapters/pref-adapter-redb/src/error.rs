//! Error types for the preference adapter

use std::fmt;

/// Preference adapter-specific errors
#[derive(Debug)]
pub enum Error {
	/// Database operation error
	DbError(String),

	/// I/O error
	IoError(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::DbError(msg) => write!(f, "Database error: {}", msg),
			Error::IoError(msg) => write!(f, "I/O error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<Error> for homebase::error::Error {
	fn from(err: Error) -> Self {
		tracing::warn!("Preference store: {}", err);
		homebase::error::Error::DbError
	}
}

// vim: ts=4
