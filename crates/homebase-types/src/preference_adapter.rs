//! Adapter that persists user preferences as string key-value pairs.
//!
//! Values are opaque strings; typing and defaults are handled by the
//! preference service in `homebase-core`. Each write is independent, there
//! is no transaction spanning several keys.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait PreferenceAdapter: Debug + Send + Sync {
	/// Reads a stored value. A missing key is `Ok(None)`, not an error.
	async fn read_preference(&self, key: &str) -> HbResult<Option<Box<str>>>;

	/// Stores a value, replacing any previous one.
	async fn write_preference(&self, key: &str, value: &str) -> HbResult<()>;
}

// vim: ts=4
