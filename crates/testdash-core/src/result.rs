//! Result type aliases for Testdash.

use crate::DashError;

/// A specialized `Result` type for Testdash operations.
pub type DashResult<T> = Result<T, DashError>;
