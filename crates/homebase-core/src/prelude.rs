pub use crate::app::App;
pub use homebase_types::error::{Error, HbResult};
pub use homebase_types::types::Platform;

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4
