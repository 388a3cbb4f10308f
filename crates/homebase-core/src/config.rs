//! Client configuration
//!
//! Loaded from YAML; every field has a default so an empty document is a
//! valid configuration. A few fields can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::prelude::*;

pub const ENV_PLATFORM: &str = "HOMEBASE_PLATFORM";
pub const ENV_DATA_DIR: &str = "HOMEBASE_DATA_DIR";

pub const ANNOUNCEMENTS_ROUTE: &str = "/(app)/(home)/(announcements)";
pub const PAYMENT_ROUTE: &str = "/(app)/(payment)";

fn default_routes() -> BTreeMap<Box<str>, Box<str>> {
	BTreeMap::from([
		("announcement".into(), ANNOUNCEMENTS_ROUTE.into()),
		("payment".into(), PAYMENT_ROUTE.into()),
	])
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub platform: Platform,

	/// Upper bound for a single push provider call
	pub provider_timeout_secs: u64,

	/// Title of a foreground notification whose payload has none
	pub fallback_title: Box<str>,

	pub min_password_length: usize,

	/// Route shown after a successful password change
	pub login_route: Box<str>,

	/// Notification `data.type` -> route
	pub routes: BTreeMap<Box<str>, Box<str>>,

	/// Directory of the on-device preference database
	pub data_dir: PathBuf,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			platform: Platform::Android,
			provider_timeout_secs: 30,
			fallback_title: "New Notification".into(),
			min_password_length: 8,
			login_route: "/login".into(),
			routes: default_routes(),
			data_dir: PathBuf::from("./data"),
		}
	}
}

impl AppConfig {
	pub fn from_yaml_str(yaml: &str) -> HbResult<Self> {
		if yaml.trim().is_empty() {
			return Ok(Self::default());
		}
		let config: Self = serde_yaml::from_str(yaml)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: impl AsRef<Path>) -> HbResult<Self> {
		let path = path.as_ref();
		let yaml = std::fs::read_to_string(path).map_err(|e| {
			Error::ConfigError(format!("Cannot read config {}: {}", path.display(), e))
		})?;
		let config = Self::from_yaml_str(&yaml)?;
		info!("Loaded configuration from {}", path.display());
		Ok(config)
	}

	/// Apply environment overrides from the process environment
	pub fn apply_env(self) -> HbResult<Self> {
		self.apply_env_from(|key| std::env::var(key).ok())
	}

	/// Apply environment overrides using a custom lookup
	pub fn apply_env_from<F>(mut self, lookup: F) -> HbResult<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(platform) = lookup(ENV_PLATFORM) {
			self.platform = platform.parse()?;
		}
		if let Some(data_dir) = lookup(ENV_DATA_DIR) {
			self.data_dir = PathBuf::from(data_dir);
		}
		Ok(self)
	}

	pub fn provider_timeout(&self) -> Duration {
		Duration::from_secs(self.provider_timeout_secs)
	}

	pub fn validate(&self) -> HbResult<()> {
		if self.provider_timeout_secs == 0 {
			return Err(Error::ConfigError("provider_timeout_secs must be positive".into()));
		}
		if let Some((kind, _)) = self.routes.iter().find(|(_, route)| route.is_empty()) {
			return Err(Error::ConfigError(format!("Empty route for notification type '{}'", kind)));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_yaml_is_default() -> HbResult<()> {
		assert_eq!(AppConfig::from_yaml_str("")?, AppConfig::default());
		Ok(())
	}

	#[test]
	fn test_partial_yaml_keeps_defaults() -> HbResult<()> {
		let config = AppConfig::from_yaml_str(
			"platform: ios\nprovider_timeout_secs: 5\nroutes:\n  maintenance: /(app)/(maintenance)\n",
		)?;

		assert_eq!(config.platform, Platform::Ios);
		assert_eq!(config.provider_timeout(), Duration::from_secs(5));
		assert_eq!(config.routes.get("maintenance").map(AsRef::as_ref), Some("/(app)/(maintenance)"));
		// Replacing the map drops the built-in entries
		assert!(config.routes.get("payment").is_none());
		assert_eq!(&*config.fallback_title, "New Notification");
		Ok(())
	}

	#[test]
	fn test_invalid_values_rejected() {
		assert!(matches!(
			AppConfig::from_yaml_str("provider_timeout_secs: 0"),
			Err(Error::ConfigError(_))
		));
		assert!(matches!(AppConfig::from_yaml_str("platform: web"), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_env_overrides() -> HbResult<()> {
		let config = AppConfig::default().apply_env_from(|key| match key {
			ENV_PLATFORM => Some("ios".to_string()),
			ENV_DATA_DIR => Some("/var/lib/homebase".to_string()),
			_ => None,
		})?;

		assert_eq!(config.platform, Platform::Ios);
		assert_eq!(config.data_dir, PathBuf::from("/var/lib/homebase"));
		Ok(())
	}

	#[test]
	fn test_load_from_file() -> HbResult<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("homebase.yaml");
		std::fs::write(&path, "min_password_length: 10\n")?;

		let config = AppConfig::load(&path)?;
		assert_eq!(config.min_password_length, 10);
		assert!(matches!(AppConfig::load(dir.path().join("missing.yaml")), Err(Error::ConfigError(_))));
		Ok(())
	}
}

// vim: ts=4
