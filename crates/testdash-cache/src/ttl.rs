//! Expiry tiers.
//!
//! Every write names one of these; there is no way to store an entry
//! without an expiration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Short TTL for volatile lists and live dashboard figures (1 minute).
pub const SHORT_TTL: Duration = Duration::from_secs(60);

/// Medium TTL for single entities (10 minutes).
pub const MEDIUM_TTL: Duration = Duration::from_secs(600);

/// Long TTL for slow-moving aggregates (1 hour).
pub const LONG_TTL: Duration = Duration::from_secs(3600);

/// Extended TTL for near-static reference data (1 day).
pub const EXTENDED_TTL: Duration = Duration::from_secs(86_400);

/// Named expiry tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheTtl {
    Short,
    Medium,
    Long,
    Extended,
}

impl CacheTtl {
    /// Returns the tier duration.
    #[must_use]
    pub const fn duration(self) -> Duration {
        match self {
            Self::Short => SHORT_TTL,
            Self::Medium => MEDIUM_TTL,
            Self::Long => LONG_TTL,
            Self::Extended => EXTENDED_TTL,
        }
    }

    /// Returns the tier duration in whole seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.duration().as_secs()
    }

    /// Returns the lowercase tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for CacheTtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.as_str(), self.as_secs())
    }
}

impl From<CacheTtl> for Duration {
    fn from(ttl: CacheTtl) -> Self {
        ttl.duration()
    }
}
