pub use crate::error::{Error, HbResult};
pub use crate::types::Platform;

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
