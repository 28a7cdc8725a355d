//! Result type alias for gzflow operations

use crate::Error;

/// Result type alias for gzflow operations
pub type Result<T> = std::result::Result<T, Error>;
