//! Preference subsystem types and service

pub mod service;
pub mod types;

pub use service::PreferenceService;
pub use types::{
	FrozenPreferenceRegistry, PreferenceDefinition, PreferenceDefinitionBuilder, PreferenceKind,
	PreferenceRegistry, PreferenceValue,
};

// vim: ts=4
