//! Preference types and definitions
//!
//! The backing store only knows strings. Definitions give each key a type
//! and an optional default so the rest of the client reads typed values.

use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Type of a preference value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
	Bool,
	String,
}

/// Typed preference value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceValue {
	Bool(bool),
	String(Box<str>),
}

impl PreferenceValue {
	pub fn kind(&self) -> PreferenceKind {
		match self {
			PreferenceValue::Bool(_) => PreferenceKind::Bool,
			PreferenceValue::String(_) => PreferenceKind::String,
		}
	}

	/// Encodes the value for the string store
	pub fn encode(&self) -> Box<str> {
		match self {
			PreferenceValue::Bool(true) => "true".into(),
			PreferenceValue::Bool(false) => "false".into(),
			PreferenceValue::String(s) => s.clone(),
		}
	}

	/// Decodes a stored string.
	///
	/// Flags are default-on: anything but the literal `"false"` reads as enabled.
	pub fn decode(kind: PreferenceKind, raw: &str) -> Self {
		match kind {
			PreferenceKind::Bool => PreferenceValue::Bool(raw != "false"),
			PreferenceKind::String => PreferenceValue::String(raw.into()),
		}
	}
}

/// Preference definition - metadata for one persisted key
#[derive(Debug, Clone)]
pub struct PreferenceDefinition {
	/// Storage key (e.g., "pushNotificationsEnabled")
	pub key: Box<str>,

	/// Human-readable description
	pub description: Box<str>,

	pub kind: PreferenceKind,

	/// Value reported when the key has never been written
	pub default: Option<PreferenceValue>,
}

impl PreferenceDefinition {
	pub fn builder(key: impl Into<Box<str>>) -> PreferenceDefinitionBuilder {
		PreferenceDefinitionBuilder::new(key)
	}
}

/// Builder for PreferenceDefinition with fluent API
pub struct PreferenceDefinitionBuilder {
	key: Box<str>,
	description: Option<Box<str>>,
	kind: Option<PreferenceKind>,
	default: Option<PreferenceValue>,
}

impl PreferenceDefinitionBuilder {
	pub fn new(key: impl Into<Box<str>>) -> Self {
		Self { key: key.into(), description: None, kind: None, default: None }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<Box<str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Set the default value. Also fixes the kind.
	pub fn default(mut self, value: PreferenceValue) -> Self {
		self.default = Some(value);
		self
	}

	/// Set the kind explicitly, for preferences without a default
	pub fn kind(mut self, kind: PreferenceKind) -> Self {
		self.kind = Some(kind);
		self
	}

	pub fn build(self) -> HbResult<PreferenceDefinition> {
		if self.key.is_empty() {
			return Err(Error::ConfigError("Preference key cannot be empty".into()));
		}
		let description = self.description.ok_or_else(|| {
			Error::ConfigError(format!("Preference '{}' needs a description", self.key))
		})?;

		let kind = match (self.kind, &self.default) {
			(Some(kind), Some(default)) if kind != default.kind() => {
				return Err(Error::ConfigError(format!(
					"Preference '{}' default does not match its kind",
					self.key
				)));
			}
			(Some(kind), _) => kind,
			(None, Some(default)) => default.kind(),
			(None, None) => {
				return Err(Error::ConfigError(format!(
					"Preference '{}' needs a kind or a default",
					self.key
				)));
			}
		};

		Ok(PreferenceDefinition { key: self.key, description, kind, default: self.default })
	}
}

/// Mutable registry used during app initialization
#[derive(Debug, Default)]
pub struct PreferenceRegistry {
	definitions: HashMap<Box<str>, PreferenceDefinition>,
}

impl PreferenceRegistry {
	pub fn new() -> Self {
		Self { definitions: HashMap::new() }
	}

	pub fn register(&mut self, def: PreferenceDefinition) -> HbResult<()> {
		if self.definitions.contains_key(&def.key) {
			return Err(Error::ConfigError(format!(
				"Preference '{}' is already registered",
				def.key
			)));
		}

		debug!("Registering preference: {}", def.key);
		self.definitions.insert(def.key.clone(), def);
		Ok(())
	}

	pub fn freeze(self) -> FrozenPreferenceRegistry {
		info!("Freezing preference registry with {} definitions", self.definitions.len());
		FrozenPreferenceRegistry { definitions: self.definitions }
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

/// Immutable registry stored in AppState
#[derive(Debug)]
pub struct FrozenPreferenceRegistry {
	definitions: HashMap<Box<str>, PreferenceDefinition>,
}

impl FrozenPreferenceRegistry {
	pub fn get(&self, key: &str) -> Option<&PreferenceDefinition> {
		self.definitions.get(key)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bool_decoding_is_default_on() {
		assert_eq!(PreferenceValue::decode(PreferenceKind::Bool, "false"), PreferenceValue::Bool(false));
		assert_eq!(PreferenceValue::decode(PreferenceKind::Bool, "true"), PreferenceValue::Bool(true));
		assert_eq!(PreferenceValue::decode(PreferenceKind::Bool, ""), PreferenceValue::Bool(true));
		assert_eq!(PreferenceValue::decode(PreferenceKind::Bool, "0"), PreferenceValue::Bool(true));
	}

	#[test]
	fn test_encode() {
		assert_eq!(&*PreferenceValue::Bool(false).encode(), "false");
		assert_eq!(&*PreferenceValue::String("abc".into()).encode(), "abc");
	}

	#[test]
	fn test_builder_requires_description_and_kind() {
		assert!(matches!(
			PreferenceDefinition::builder("a").default(PreferenceValue::Bool(true)).build(),
			Err(Error::ConfigError(_))
		));
		assert!(matches!(
			PreferenceDefinition::builder("a").description("A").build(),
			Err(Error::ConfigError(_))
		));
		assert!(matches!(
			PreferenceDefinition::builder("a")
				.description("A")
				.kind(PreferenceKind::String)
				.default(PreferenceValue::Bool(true))
				.build(),
			Err(Error::ConfigError(_))
		));

		let def = PreferenceDefinition::builder("token")
			.description("Cached token")
			.kind(PreferenceKind::String)
			.build();
		assert!(matches!(def, Ok(PreferenceDefinition { kind: PreferenceKind::String, default: None, .. })));
	}

	#[test]
	fn test_registry_rejects_duplicates() -> HbResult<()> {
		let mut registry = PreferenceRegistry::new();
		let def = PreferenceDefinition::builder("flag")
			.description("Flag")
			.default(PreferenceValue::Bool(true))
			.build()?;

		registry.register(def.clone())?;
		assert!(matches!(registry.register(def), Err(Error::ConfigError(_))));

		let frozen = registry.freeze();
		assert_eq!(frozen.len(), 1);
		assert!(frozen.get("flag").is_some());
		assert!(frozen.get("other").is_none());
		Ok(())
	}
}

// vim: ts=4
