//! Startup wiring for the cache.

use crate::manager::CacheManager;
use crate::metrics::register_metrics;
use crate::store::{CacheStore, InMemoryCacheStore, NoopCacheStore, RedisCacheStore};
use shaku::{module, HasComponent};
use std::sync::Arc;
use testdash_config::{AppConfig, CacheBackend};
use testdash_core::DashResult;
use tracing::{info, warn};

// Redis-backed store component. Parameters come from
// `RedisCacheStore::build_parameters`.
module! {
    pub CacheModule {
        components = [
            RedisCacheStore,
        ],
        providers = [],
    }
}

/// Builds the shaku module for the Redis store.
pub fn build_cache_module(config: &AppConfig) -> DashResult<Arc<CacheModule>> {
    let params = RedisCacheStore::build_parameters(&config.redis, &config.cache)?;
    let module = CacheModule::builder()
        .with_component_parameters::<RedisCacheStore>(params)
        .build();
    Ok(Arc::new(module))
}

/// Selects the store for the configured backend without contacting it.
pub fn build_store(config: &AppConfig) -> DashResult<Arc<dyn CacheStore>> {
    if !config.cache.enabled {
        info!("Caching disabled by configuration");
        return Ok(Arc::new(NoopCacheStore));
    }

    match config.cache.backend {
        CacheBackend::Memory => Ok(Arc::new(InMemoryCacheStore::new())),
        CacheBackend::Redis => {
            let module = build_cache_module(config)?;
            let store: Arc<dyn CacheStore> = module.resolve();
            Ok(store)
        }
    }
}

/// Builds the process-wide cache manager.
///
/// The store is pinged once. A failed ping is only logged: the store is kept
/// and its pool reconnects on the next call once the server answers again.
pub async fn build_cache_manager(config: &AppConfig) -> DashResult<Arc<CacheManager>> {
    register_metrics();

    let store = build_store(config)?;
    if store.is_enabled() {
        if let Err(e) = store.ping().await {
            warn!(
                backend = store.backend_name(),
                error = %e,
                "Cache store unreachable at startup, serving uncached until it recovers"
            );
        }
    }

    info!(backend = store.backend_name(), "Cache manager ready");
    Ok(Arc::new(CacheManager::new(store)))
}
