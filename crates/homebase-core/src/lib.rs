//! Core infrastructure for the Homebase client.
//!
//! Holds the application state shared by the feature crates, the YAML
//! configuration layer, and the preference registry/service that gives the
//! untyped key-value store typed, default-aware access.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod preferences;
pub mod prelude;

pub use app::{Adapters, App, AppState, VERSION};
pub use config::AppConfig;

// vim: ts=4
