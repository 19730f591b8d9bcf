//! Startup checks for a loaded [`AppConfig`].
//!
//! All checks run; the caller gets every problem at once.

use crate::{AppConfig, CacheBackend, CacheConfig, ObservabilityConfig, RedisConfig};
use thiserror::Error;

/// Largest Redis pool accepted.
pub const MAX_POOL_SIZE: usize = 1000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 3] = ["pretty", "text", "json"];

/// One problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("redis.host is empty")]
    EmptyHost,

    #[error("{field} must be between 1 and 65535")]
    ZeroPort { field: &'static str },

    #[error("redis.pool_size must be between 1 and {maximum}, got {value}")]
    PoolSize { value: usize, maximum: usize },

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("observability.log_format '{0}' is not one of pretty, text, json")]
    LogFormat(String),
}

/// Runs every check against a configuration.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Returns every problem found, or `Ok` when there are none.
    ///
    /// Redis settings are only checked when they will actually be used.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut problems = Vec::new();

        check_cache(&config.cache, &mut problems);
        if config.cache.enabled && config.cache.backend == CacheBackend::Redis {
            check_redis(&config.redis, &mut problems);
        }
        check_observability(&config.observability, &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

fn check_cache(cache: &CacheConfig, problems: &mut Vec<ConfigValidationError>) {
    if cache.operation_timeout_ms == 0 {
        problems.push(ConfigValidationError::ZeroDuration {
            field: "cache.operation_timeout_ms",
        });
    }
}

fn check_redis(redis: &RedisConfig, problems: &mut Vec<ConfigValidationError>) {
    if redis.host.trim().is_empty() {
        problems.push(ConfigValidationError::EmptyHost);
    }
    if redis.port == 0 {
        problems.push(ConfigValidationError::ZeroPort { field: "redis.port" });
    }
    if !(1..=MAX_POOL_SIZE).contains(&redis.pool_size) {
        problems.push(ConfigValidationError::PoolSize {
            value: redis.pool_size,
            maximum: MAX_POOL_SIZE,
        });
    }
    if redis.connect_timeout_secs == 0 {
        problems.push(ConfigValidationError::ZeroDuration {
            field: "redis.connect_timeout_secs",
        });
    }
}

fn check_observability(observability: &ObservabilityConfig, problems: &mut Vec<ConfigValidationError>) {
    let level = observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        problems.push(ConfigValidationError::LogLevel(observability.log_level.clone()));
    }

    let format = observability.log_format.to_ascii_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        problems.push(ConfigValidationError::LogFormat(observability.log_format.clone()));
    }
}

/// Renders problems as a numbered list for the startup error.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .fold(String::from("invalid configuration:"), |mut out, (i, error)| {
            out.push_str(&format!("\n  {}. {}", i + 1, error));
            out
        })
}
