//! Shared fixtures for cache integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;
use testdash_cache::{CacheManager, InMemoryCacheStore, RedisCacheStore};
use testdash_config::{CacheConfig, RedisConfig};

/// Manager over a fresh in-memory store, with the store exposed for
/// inspection.
pub fn memory_manager() -> (Arc<InMemoryCacheStore>, Arc<CacheManager>) {
    let store = Arc::new(InMemoryCacheStore::new());
    let manager = Arc::new(CacheManager::new(store.clone()));
    (store, manager)
}

/// Settings pointing at a port nothing listens on.
pub fn unreachable_redis() -> (RedisConfig, CacheConfig) {
    let redis = RedisConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        connect_timeout_secs: 1,
        pool_size: 2,
        ..RedisConfig::default()
    };
    let cache = CacheConfig {
        operation_timeout_ms: 200,
        ..CacheConfig::default()
    };
    (redis, cache)
}

/// Manager over a Redis store that can never connect.
pub fn unreachable_manager() -> Arc<CacheManager> {
    let (redis, cache) = unreachable_redis();
    let store = RedisCacheStore::connect(&redis, &cache).expect("Failed to build Redis store");
    Arc::new(CacheManager::new(Arc::new(store)))
}

/// Redis container wrapper.
///
/// Keeps the container alive for as long as the value lives.
pub struct TestRedis {
    _container: ContainerAsync<Redis>,
    pub config: RedisConfig,
}

impl TestRedis {
    /// Starts a Redis container. Requires Docker.
    pub async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let config = RedisConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..RedisConfig::default()
        };

        Self {
            _container: container,
            config,
        }
    }

    /// Manager over a store connected to this container.
    pub fn manager(&self) -> Arc<CacheManager> {
        let store = RedisCacheStore::connect(&self.config, &CacheConfig::default())
            .expect("Failed to build Redis store");
        Arc::new(CacheManager::new(Arc::new(store)))
    }
}
