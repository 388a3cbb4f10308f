//! Shared types, collaborator traits, and core utilities for the Homebase client.
//!
//! Every external collaborator of the client (push provider, local
//! notification runtime, router, account backend, preference storage) is
//! described here as a trait so that feature crates and adapters can compile
//! independently of each other and be substituted in tests.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod account_adapter;
pub mod error;
pub mod navigator;
pub mod notify_adapter;
pub mod preference_adapter;
pub mod prelude;
pub mod push_adapter;
pub mod types;

// vim: ts=4
