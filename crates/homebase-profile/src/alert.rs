use serde::Serialize;

/// Modal message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
	pub title: Box<str>,
	pub message: Box<str>,
}

impl Alert {
	pub fn new(title: impl Into<Box<str>>, message: impl Into<Box<str>>) -> Self {
		Self { title: title.into(), message: message.into() }
	}

	pub fn error(message: impl Into<Box<str>>) -> Self {
		Self::new("Error", message)
	}
}

impl std::fmt::Display for Alert {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}: {}", self.title, self.message)
	}
}

// vim: ts=4
