//! Startup logging.

use testdash_cache::CacheManager;
use testdash_config::AppConfig;
use tracing::info;

/// Logs where the cache lives and how it is configured.
pub fn print_startup_info(config: &AppConfig, cache: &CacheManager) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("Backend:     {}", cache.backend_name());
    if cache.is_enabled() && cache.backend_name() == "redis" {
        info!("Redis:       {}", config.redis.redacted_url());
    }
    info!("Op timeout:  {:?}", config.cache.operation_timeout());
    info!("{}", separator);
}
