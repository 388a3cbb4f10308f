//! Client-side router collaborator

use std::fmt::Debug;

use crate::prelude::*;

pub trait Navigator: Debug + Send + Sync {
	/// Pushes a route on top of the navigation stack
	fn push(&self, route: &str) -> HbResult<()>;

	/// Replaces the current route (no way back)
	fn replace(&self, route: &str) -> HbResult<()>;
}

// vim: ts=4
