pub use homebase_core::prelude::*;

// vim: ts=4
