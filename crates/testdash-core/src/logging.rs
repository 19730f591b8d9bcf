//! Logging initialisation.
//!
//! Sets up a `tracing` subscriber with an `EnvFilter` and either a
//! human-readable or a JSON formatter. `RUST_LOG` wins over the configured
//! default filter.

#[cfg(feature = "logging")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::DashResult;
use serde::{Deserialize, Serialize};

/// Default filter directive when neither `RUST_LOG` nor config set one.
pub const DEFAULT_FILTER: &str = "info,testdash=debug";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(crate::DashError::Configuration(format!(
                "Unknown log format '{other}'"
            ))),
        }
    }
}

/// Initialise the global subscriber.
///
/// Returns an error if a global subscriber was already installed.
#[cfg(feature = "logging")]
pub fn init_logging(default_filter: &str, format: LogFormat) -> DashResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    result.map_err(|e| crate::DashError::internal(format!("Failed to initialise logging: {e}")))
}

/// Placeholder for when the logging feature is disabled.
#[cfg(not(feature = "logging"))]
pub fn init_logging(_default_filter: &str, _format: LogFormat) -> DashResult<()> {
    Ok(())
}
