//! Preference service with type checks and default resolution

use std::sync::Arc;

use homebase_types::preference_adapter::PreferenceAdapter;

use super::types::{FrozenPreferenceRegistry, PreferenceDefinition, PreferenceValue};
use crate::prelude::*;

/// Preference service - typed access to the key-value preference store
#[derive(Debug)]
pub struct PreferenceService {
	registry: Arc<FrozenPreferenceRegistry>,
	adapter: Arc<dyn PreferenceAdapter>,
}

impl PreferenceService {
	pub fn new(registry: Arc<FrozenPreferenceRegistry>, adapter: Arc<dyn PreferenceAdapter>) -> Self {
		Self { registry, adapter }
	}

	fn definition(&self, key: &str) -> HbResult<&PreferenceDefinition> {
		self.registry
			.get(key)
			.ok_or_else(|| Error::ValidationError(format!("Unknown preference: {}", key)))
	}

	/// Get a preference value (stored -> default).
	///
	/// Absent keys resolve to the declared default without writing it back.
	pub async fn get(&self, key: &str) -> HbResult<Option<PreferenceValue>> {
		let def = self.definition(key)?;

		match self.adapter.read_preference(key).await? {
			Some(raw) => {
				trace!("Preference hit: {}", key);
				Ok(Some(PreferenceValue::decode(def.kind, &raw)))
			}
			None => Ok(def.default.clone()),
		}
	}

	/// Get a boolean preference. Errors if the key is not a flag or has no value.
	pub async fn get_bool(&self, key: &str) -> HbResult<bool> {
		match self.get(key).await? {
			Some(PreferenceValue::Bool(value)) => Ok(value),
			Some(other) => Err(Error::ValidationError(format!(
				"Preference '{}' is {:?}, not a flag",
				key,
				other.kind()
			))),
			None => Err(Error::NotFound),
		}
	}

	/// Get a string preference. `None` if never written and without default.
	pub async fn get_string(&self, key: &str) -> HbResult<Option<Box<str>>> {
		match self.get(key).await? {
			Some(PreferenceValue::String(value)) => Ok(Some(value)),
			Some(other) => Err(Error::ValidationError(format!(
				"Preference '{}' is {:?}, not a string",
				key,
				other.kind()
			))),
			None => Ok(None),
		}
	}

	/// Set a preference value after checking it against its definition
	pub async fn set(&self, key: &str, value: PreferenceValue) -> HbResult<()> {
		let def = self.definition(key)?;

		if value.kind() != def.kind {
			return Err(Error::ValidationError(format!(
				"Type mismatch for preference '{}': expected {:?}, got {:?}",
				key,
				def.kind,
				value.kind()
			)));
		}

		self.adapter.write_preference(key, &value.encode()).await?;
		debug!("Preference '{}' updated", key);
		Ok(())
	}

	pub async fn set_bool(&self, key: &str, value: bool) -> HbResult<()> {
		self.set(key, PreferenceValue::Bool(value)).await
	}

	pub async fn set_string(&self, key: &str, value: impl Into<Box<str>>) -> HbResult<()> {
		self.set(key, PreferenceValue::String(value.into())).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::preferences::{PreferenceDefinition, PreferenceKind, PreferenceRegistry};
	use homebase_testkit::MemoryPreferenceAdapter;

	fn service(adapter: Arc<MemoryPreferenceAdapter>) -> HbResult<PreferenceService> {
		let mut registry = PreferenceRegistry::new();
		registry.register(
			PreferenceDefinition::builder("flag")
				.description("A flag")
				.default(PreferenceValue::Bool(true))
				.build()?,
		)?;
		registry.register(
			PreferenceDefinition::builder("token")
				.description("A token")
				.kind(PreferenceKind::String)
				.build()?,
		)?;
		Ok(PreferenceService::new(Arc::new(registry.freeze()), adapter))
	}

	#[tokio::test]
	async fn test_missing_flag_reads_default_without_writing() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let prefs = service(adapter.clone())?;

		assert!(prefs.get_bool("flag").await?);
		assert_eq!(adapter.raw("flag"), None);
		Ok(())
	}

	#[tokio::test]
	async fn test_set_and_get_roundtrip_through_store() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let prefs = service(adapter.clone())?;

		prefs.set_bool("flag", false).await?;
		assert_eq!(adapter.raw("flag").as_deref(), Some("false"));
		assert!(!prefs.get_bool("flag").await?);

		assert_eq!(prefs.get_string("token").await?, None);
		prefs.set_string("token", "tok-1").await?;
		assert_eq!(prefs.get_string("token").await?.as_deref(), Some("tok-1"));
		Ok(())
	}

	#[tokio::test]
	async fn test_rejects_unknown_keys_and_type_mismatch() -> HbResult<()> {
		let prefs = service(Arc::new(MemoryPreferenceAdapter::new()))?;

		assert!(matches!(prefs.get("nope").await, Err(Error::ValidationError(_))));
		assert!(matches!(
			prefs.set("flag", PreferenceValue::String("yes".into())).await,
			Err(Error::ValidationError(_))
		));
		assert!(matches!(prefs.get_bool("token").await, Err(Error::NotFound)));
		Ok(())
	}

	#[tokio::test]
	async fn test_write_failure_propagates() -> HbResult<()> {
		let adapter = Arc::new(MemoryPreferenceAdapter::new());
		let prefs = service(adapter.clone())?;

		adapter.fail_writes(true);
		assert!(matches!(prefs.set_bool("flag", false).await, Err(Error::DbError)));
		Ok(())
	}
}

// vim: ts=4
