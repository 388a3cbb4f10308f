//! Error types for the account adapter

use std::fmt;

#[derive(Debug)]
pub enum Error {
	/// Invalid base URL or endpoint
	InvalidUrl(String),

	/// Request could not be built
	Request(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
			Error::Request(msg) => write!(f, "Request build error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl From<Error> for homebase::error::Error {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidUrl(_) => homebase::error::Error::ConfigError(err.to_string()),
			Error::Request(_) => homebase::error::Error::Internal(err.to_string()),
		}
	}
}

impl From<url::ParseError> for Error {
	fn from(err: url::ParseError) -> Self {
		Error::InvalidUrl(err.to_string())
	}
}

// vim: ts=4
