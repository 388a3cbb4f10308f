//! Homebase is the client core of a residential property-management app.
//!
//! # Features
//!
//! - Push notifications
//!     - permission negotiation per platform
//!     - cached delivery token
//!     - foreground, background, and tap handling
//!     - deep links from notification payloads
//! - Profile settings
//!     - notification preference toggles
//!     - password change
//!
//! Platform services (push SDK, local notifications, router, account API,
//! key-value storage) are plugged in as adapters through [`AppBuilder`].

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

// Re-export shared types and adapter traits from homebase-types
pub use homebase_types::account_adapter;
pub use homebase_types::error;
pub use homebase_types::navigator;
pub use homebase_types::notify_adapter;
pub use homebase_types::preference_adapter;
pub use homebase_types::push_adapter;
pub use homebase_types::types;

// Feature crate re-exports
pub use homebase_core::config;
pub use homebase_core::preferences;
pub use homebase_profile as profile;
pub use homebase_push as push;

pub mod app;
pub mod prelude;

pub use crate::app::{App, AppBuilder, Homebase};

// vim: ts=4
