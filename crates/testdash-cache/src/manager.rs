//! The process-wide cache manager.

use crate::invalidation::InvalidationRecipe;
use crate::metrics::{CacheStats, CacheStatsSnapshot};
use crate::store::CacheStore;
use crate::ttl::CacheTtl;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use testdash_core::{CaseId, DashResult, ExecutionId, SuiteId};
use tracing::{debug, info, warn};

/// Typed cache operations over a [`CacheStore`].
///
/// Built once at startup and shared as `Arc<CacheManager>`. Store failures
/// are logged, counted and absorbed: `get` turns them into a miss, writes
/// and invalidations return normally. The only error a caller sees is
/// `DashError::Serialization` when a value cannot be encoded.
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
    stats: CacheStats,
}

impl CacheManager {
    /// Creates a manager over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            stats: CacheStats::default(),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Returns true if the store can hold data.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    /// Backend name of the underlying store.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Current hit/miss/error counters.
    #[must_use]
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }

    /// Reads and decodes `key`.
    ///
    /// Returns `None` on a miss, on any store failure, and when the stored
    /// value no longer decodes as `T` (the bad entry is then deleted).
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let started = Instant::now();
        let result = self.store.get(key).await;
        self.stats.observe("get", started.elapsed());

        let raw = match result {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "Cache miss");
                self.stats.miss();
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "Cache get failed, treating as miss");
                self.stats.error("get");
                self.stats.miss();
                return None;
            }
        };

        let decode_error = match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key, "Cache hit");
                self.stats.hit();
                return Some(value);
            }
            Err(e) => e.to_string(),
        };

        warn!(key, error = %decode_error, "Discarding undecodable cache entry");
        self.stats.miss();
        if let Err(e) = self.store.delete(key).await {
            warn!(key, error = %e, "Failed to delete undecodable cache entry");
            self.stats.error("delete");
        }
        None
    }

    /// Encodes `value` and stores it under `key` for the `ttl` tier.
    ///
    /// Fails only if `value` cannot be encoded. A store failure is logged
    /// and swallowed.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: CacheTtl,
    ) -> DashResult<()> {
        let raw = serde_json::to_string(value)?;

        let started = Instant::now();
        let result = self.store.set(key, &raw, ttl.duration()).await;
        self.stats.observe("set", started.elapsed());

        match result {
            Ok(()) => debug!(key, ttl = %ttl, "Cached value"),
            Err(e) => {
                warn!(key, error = %e, "Cache set failed, value not cached");
                self.stats.error("set");
            }
        }
        Ok(())
    }

    /// Deletes `key`. Returns `true` if it existed; `false` on failure.
    pub async fn delete(&self, key: &str) -> bool {
        match self.store.delete(key).await {
            Ok(existed) => existed,
            Err(e) => {
                warn!(key, error = %e, "Cache delete failed");
                self.stats.error("delete");
                false
            }
        }
    }

    /// Deletes every key matching the glob `pattern`.
    ///
    /// Returns the number of keys removed; 0 on failure.
    pub async fn delete_pattern(&self, pattern: &str) -> u64 {
        let started = Instant::now();
        let result = self.store.delete_pattern(pattern).await;
        self.stats.observe("delete_pattern", started.elapsed());

        match result {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(pattern, error = %e, "Cache pattern delete failed");
                self.stats.error("delete_pattern");
                0
            }
        }
    }

    /// Runs every deletion in `recipe`, continuing past failures.
    ///
    /// Returns the number of keys removed.
    pub async fn apply(&self, recipe: &InvalidationRecipe) -> u64 {
        let mut removed = 0;

        for key in &recipe.keys {
            if self.delete(key).await {
                removed += 1;
            }
        }
        for pattern in &recipe.patterns {
            removed += self.delete_pattern(pattern).await;
        }

        self.stats.invalidated(removed);
        removed
    }

    /// Clears a suite, the suite lists, its case lists and the dashboard.
    pub async fn invalidate_suite(&self, id: SuiteId) -> u64 {
        let removed = self.apply(&InvalidationRecipe::suite(id)).await;
        debug!(suite_id = %id, removed, "Invalidated suite");
        removed
    }

    /// Clears a case, the case lists and the dashboard.
    pub async fn invalidate_case(&self, id: CaseId, suite_id: SuiteId) -> u64 {
        let removed = self.apply(&InvalidationRecipe::case(id, suite_id)).await;
        debug!(case_id = %id, suite_id = %suite_id, removed, "Invalidated case");
        removed
    }

    /// Clears an execution, the execution lists and the dashboard.
    pub async fn invalidate_execution(&self, id: ExecutionId) -> u64 {
        let removed = self.apply(&InvalidationRecipe::execution(id)).await;
        debug!(execution_id = %id, removed, "Invalidated execution");
        removed
    }

    /// Clears every dashboard aggregate.
    pub async fn invalidate_dashboard(&self) -> u64 {
        self.apply(&InvalidationRecipe::dashboard()).await
    }

    /// Clears every key in the cache's namespaces.
    pub async fn invalidate_all(&self) -> u64 {
        let removed = self.apply(&InvalidationRecipe::all()).await;
        info!(removed, "Invalidated all cache namespaces");
        removed
    }

    /// After a suite is created.
    pub async fn invalidate_suite_lists(&self) -> u64 {
        self.apply(&InvalidationRecipe::suite_lists()).await
    }

    /// After a case is created in `suite_id`.
    pub async fn invalidate_case_lists(&self, suite_id: SuiteId) -> u64 {
        self.apply(&InvalidationRecipe::case_lists(suite_id)).await
    }

    /// After an execution is recorded.
    pub async fn invalidate_execution_lists(&self) -> u64 {
        self.apply(&InvalidationRecipe::execution_lists()).await
    }

    /// Cache-aside for an explicit key.
    ///
    /// On a hit `factory` is not called. On a miss its result is stored and
    /// returned; if it fails nothing is stored and the error is returned.
    pub async fn get_or_compute<T, F, Fut>(&self, key: &str, ttl: CacheTtl, factory: F) -> DashResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DashResult<T>>,
    {
        if let Some(cached) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = factory().await?;
        self.set(key, &value, ttl).await?;
        Ok(value)
    }

    /// Pings the store. Never fails; an unreachable store is `false`.
    pub async fn health_check(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(backend = self.backend_name(), error = %e, "Cache health check failed");
                false
            }
        }
    }

    /// Releases the store's connections. Further calls degrade to misses.
    pub fn shutdown(&self) {
        self.store.close();
        let stats = self.stats();
        info!(
            backend = self.backend_name(),
            hits = stats.hits,
            misses = stats.misses,
            errors = stats.errors,
            "Cache manager shut down"
        );
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("backend", &self.backend_name())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryCacheStore, NoopCacheStore};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Suite {
        name: String,
    }

    fn memory_manager() -> (Arc<InMemoryCacheStore>, CacheManager) {
        let store = Arc::new(InMemoryCacheStore::new());
        let manager = CacheManager::new(store.clone());
        (store, manager)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_, manager) = memory_manager();
        let suite = Suite { name: "Login".to_string() };

        manager.set("suite:1", &suite, CacheTtl::Medium).await.unwrap();
        assert_eq!(manager.get::<Suite>("suite:1").await, Some(suite));
        assert_eq!(manager.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_dropped() {
        let (store, manager) = memory_manager();
        manager.set("suite:1", &42, CacheTtl::Short).await.unwrap();

        assert_eq!(manager.get::<Suite>("suite:1").await, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_apply_counts_removed_keys() {
        let (_, manager) = memory_manager();
        manager.set("case:5", &1, CacheTtl::Medium).await.unwrap();
        manager.set("cases:list:skip:0:limit:100", &[1], CacheTtl::Short).await.unwrap();
        manager.set("dashboard:stats", &0, CacheTtl::Short).await.unwrap();

        let removed = manager.invalidate_case(CaseId::new(5), SuiteId::new(2)).await;
        assert_eq!(removed, 3);
        assert_eq!(manager.stats().invalidated_keys, 3);
    }

    #[tokio::test]
    async fn test_noop_store_always_misses() {
        let manager = CacheManager::new(Arc::new(NoopCacheStore));
        manager.set("suite:1", &1, CacheTtl::Short).await.unwrap();
        assert_eq!(manager.get::<i32>("suite:1").await, None);
        assert!(!manager.is_enabled());
        assert!(manager.health_check().await);
    }

    #[tokio::test]
    async fn test_get_or_compute_error_is_not_cached() {
        let (store, manager) = memory_manager();
        let result: DashResult<i32> = manager
            .get_or_compute("dashboard:stats", CacheTtl::Short, || async {
                Err(testdash_core::DashError::Database("down".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
