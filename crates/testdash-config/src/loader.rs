//! Layered TOML + environment loading for `AppConfig`.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use testdash_core::DashError;
use tracing::{debug, info};

/// Plain environment variables read for the Redis connection.
pub const REDIS_HOST_VAR: &str = "REDIS_HOST";
pub const REDIS_PORT_VAR: &str = "REDIS_PORT";
pub const REDIS_PASSWORD_VAR: &str = "REDIS_PASSWORD";
pub const REDIS_DB_VAR: &str = "REDIS_DB";

/// Loads and validates the layered configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Later layers win: `default.toml`, `{environment}.toml`, `local.toml`,
    /// `TESTDASH__*` variables, then the plain `REDIS_*` variables.
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, DashError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Reads from `./config`.
    pub fn from_default_location() -> Result<Self, DashError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, DashError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("TESTDASH_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut config = Self::load_layers(config_dir, &environment)?;
        apply_redis_env(&mut config, |name| std::env::var(name).ok())?;

        ConfigValidator::validate(&config)
            .map_err(|errors| DashError::Configuration(format_validation_errors(&errors)))?;

        Ok(config)
    }

    /// Builds the file and prefixed-environment layers.
    fn load_layers(config_dir: &str, environment: &str) -> Result<AppConfig, DashError> {
        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("TESTDASH")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_dash_error)
    }
}

/// Applies the plain `REDIS_*` variables on top of the layered config.
///
/// `lookup` abstracts the environment so the rules can be tested without
/// touching process state. An empty `REDIS_PASSWORD` clears the password.
pub fn apply_redis_env<F>(config: &mut AppConfig, lookup: F) -> Result<(), DashError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(REDIS_HOST_VAR).filter(|h| !h.trim().is_empty()) {
        config.redis.host = host.trim().to_string();
    }

    if let Some(port) = lookup(REDIS_PORT_VAR) {
        config.redis.port = port.trim().parse().map_err(|_| {
            DashError::Configuration(format!("{} must be a port number, got '{}'", REDIS_PORT_VAR, port))
        })?;
    }

    if let Some(password) = lookup(REDIS_PASSWORD_VAR) {
        config.redis.password = if password.is_empty() { None } else { Some(password) };
    }

    if let Some(db) = lookup(REDIS_DB_VAR) {
        config.redis.db = db.trim().parse().map_err(|_| {
            DashError::Configuration(format!("{} must be a database index, got '{}'", REDIS_DB_VAR, db))
        })?;
    }

    Ok(())
}

fn config_error_to_dash_error(err: ConfigError) -> DashError {
    DashError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_redis_env_overrides() {
        let mut config = AppConfig::default();
        apply_redis_env(
            &mut config,
            env_of(&[
                ("REDIS_HOST", "redis.prod"),
                ("REDIS_PORT", "6380"),
                ("REDIS_PASSWORD", "pw"),
                ("REDIS_DB", "3"),
            ]),
        )
        .unwrap();

        assert_eq!(config.redis.host, "redis.prod");
        assert_eq!(config.redis.port, 6380);
        assert_eq!(config.redis.password.as_deref(), Some("pw"));
        assert_eq!(config.redis.db, 3);
    }

    #[test]
    fn test_redis_env_absent_keeps_defaults() {
        let mut config = AppConfig::default();
        apply_redis_env(&mut config, env_of(&[])).unwrap();
        assert_eq!(config.redis.host, "localhost");
        assert_eq!(config.redis.port, 6379);
        assert!(config.redis.password.is_none());
    }

    #[test]
    fn test_redis_env_bad_port() {
        let mut config = AppConfig::default();
        let err = apply_redis_env(&mut config, env_of(&[("REDIS_PORT", "sixty")])).unwrap_err();
        assert!(matches!(err, DashError::Configuration(msg) if msg.contains("REDIS_PORT")));
    }

    #[test]
    fn test_redis_env_empty_password_clears() {
        let mut config = AppConfig::default();
        config.redis.password = Some("old".to_string());
        apply_redis_env(&mut config, env_of(&[("REDIS_PASSWORD", "")])).unwrap();
        assert!(config.redis.password.is_none());
    }

    #[test]
    fn test_load_layers_from_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[cache]\nenabled = true\nbackend = \"memory\"\noperation_timeout_ms = 250\n\n[redis]\nhost = \"from-file\"\nport = 7000\ndb = 0\npool_size = 4\nconnect_timeout_secs = 1\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("staging.toml"), "[redis]\nport = 7001\n").unwrap();

        let config =
            ConfigLoader::load_layers(dir.path().to_str().unwrap(), "staging").unwrap();

        assert_eq!(config.cache.backend, crate::CacheBackend::Memory);
        assert_eq!(config.cache.operation_timeout_ms, 250);
        assert_eq!(config.redis.host, "from-file");
        assert_eq!(config.redis.port, 7001);
        assert_eq!(config.redis.pool_size, 4);
    }

    #[test]
    fn test_new_loads_and_validates_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[cache]\nenabled = true\nbackend = \"memory\"\noperation_timeout_ms = 300\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(loader.get().cache.backend, crate::CacheBackend::Memory);
        assert_eq!(loader.into_config().cache.operation_timeout_ms, 300);
    }

    #[test]
    fn test_new_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            "[cache]\nenabled = true\nbackend = \"memory\"\noperation_timeout_ms = 0\n",
        )
        .unwrap();

        let err = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, DashError::Configuration(_)));
    }

    #[test]
    fn test_load_layers_missing_dir_uses_defaults() {
        let config = ConfigLoader::load_layers("/nonexistent/testdash", "development").unwrap();
        assert_eq!(config.redis.port, 6379);
        assert!(config.cache.enabled);
    }
}
