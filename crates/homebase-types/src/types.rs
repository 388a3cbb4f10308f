//! Common value types

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// Mobile platform the client runs on.
///
/// The platforms expose different notification permission models, so
/// permission handling is selected from this value once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
	#[serde(rename = "ios")]
	Ios,
	#[serde(rename = "android")]
	Android,
}

impl Platform {
	pub fn as_str(&self) -> &'static str {
		match self {
			Platform::Ios => "ios",
			Platform::Android => "android",
		}
	}
}

impl std::fmt::Display for Platform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Platform {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"ios" => Ok(Platform::Ios),
			"android" => Ok(Platform::Android),
			other => Err(Error::ConfigError(format!("Unknown platform: {}", other))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::HbResult;

	#[test]
	fn test_platform_from_str() {
		assert_eq!("ios".parse::<Platform>().ok(), Some(Platform::Ios));
		assert_eq!(" Android ".parse::<Platform>().ok(), Some(Platform::Android));
		assert!(matches!("web".parse::<Platform>(), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_platform_serde_names() -> HbResult<()> {
		let json = serde_json::to_string(&Platform::Android)?;
		assert_eq!(json, "\"android\"");
		Ok(())
	}
}

// vim: ts=4
