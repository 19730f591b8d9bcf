//! Timeout wrapper for async operations.

use std::future::Future;
use std::time::Duration;
use testdash_core::DashError;
use tracing::debug;

/// Wraps an async operation with a timeout.
///
/// An elapsed deadline becomes `DashError::Timeout` naming `operation`.
pub async fn with_timeout<F, Fut, T>(
    operation: &str,
    duration: Duration,
    f: F,
) -> Result<T, DashError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, DashError>>,
{
    match tokio::time::timeout(duration, f()).await {
        Ok(result) => result,
        Err(_) => {
            debug!(operation, ?duration, "Operation timed out");
            Err(DashError::Timeout(format!(
                "{} timed out after {:?}",
                operation, duration
            )))
        }
    }
}

/// Timeout configuration for store calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Budget for a single command, including waiting for a pooled connection.
    pub operation: Duration,
    /// Budget for establishing a new connection.
    pub connect: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            operation: Duration::from_millis(500),
            connect: Duration::from_secs(2),
        }
    }
}

impl TimeoutConfig {
    /// Creates a config with the given operation and connect budgets.
    #[must_use]
    pub const fn new(operation: Duration, connect: Duration) -> Self {
        Self { operation, connect }
    }
}
