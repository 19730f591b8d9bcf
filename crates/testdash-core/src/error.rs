//! The one error type shared by the cache, service and CLI layers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for Testdash.
///
/// Cache failures are split in two: [`DashError::CacheUnavailable`] covers
/// every transient store problem and is recovered inside the cache layer,
/// while [`DashError::Serialization`] marks a programming error at the call
/// site and is always surfaced.
#[derive(Error, Debug)]
pub enum DashError {
    /// A suite, case or execution id that the repository does not know.
    #[error("{resource_type} {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Rejected request or argument.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Write refused by the repository, such as a duplicate name.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store unreachable or timed out, or it answered with a protocol error.
    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    /// A value or key argument could not be encoded
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Failure reported by the backing repository.
    #[error("repository failure: {0}")]
    Database(String),

    #[error("bad configuration: {0}")]
    Configuration(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("internal: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DashError {
    /// Stable code printed by the CLI in JSON mode.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn cache_unavailable<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    #[must_use]
    pub fn serialization<T: Into<String>>(message: T) -> Self {
        Self::Serialization(message.into())
    }

    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Transient failures a caller may try again.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::CacheUnavailable(_) | Self::Timeout(_)
        )
    }

    /// Checks if this error came from the cache store rather than the caller.
    #[must_use]
    pub const fn is_cache_unavailable(&self) -> bool {
        matches!(self, Self::CacheUnavailable(_))
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// One failed `validator` rule, flattened for messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    /// Rule code such as `length` or `not_blank`.
    pub code: String,
}
