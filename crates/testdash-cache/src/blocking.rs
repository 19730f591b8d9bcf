//! Blocking adapter over [`CacheManager`].
//!
//! Synchronous call sites get the same operations with the same semantics;
//! each call drives the async operation to completion on a runtime handle.

use crate::manager::CacheManager;
use crate::metrics::CacheStatsSnapshot;
use crate::ttl::CacheTtl;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use testdash_core::{CaseId, DashError, DashResult, ExecutionId, SuiteId};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::warn;

/// Blocking front for a shared [`CacheManager`].
///
/// Call from plain threads, `spawn_blocking` closures, or worker threads of
/// a multi-thread runtime. Calling from a current-thread runtime would
/// deadlock, so there every operation degrades like an unreachable store.
#[derive(Clone)]
pub struct BlockingCacheManager {
    inner: Arc<CacheManager>,
    handle: Handle,
}

impl BlockingCacheManager {
    /// Creates an adapter that runs operations on `handle`.
    #[must_use]
    pub fn new(inner: Arc<CacheManager>, handle: Handle) -> Self {
        Self { inner, handle }
    }

    /// Creates an adapter bound to the runtime the caller is running in.
    pub fn from_current(inner: Arc<CacheManager>) -> DashResult<Self> {
        let handle = Handle::try_current()
            .map_err(|e| DashError::internal(format!("No tokio runtime available: {}", e)))?;
        Ok(Self::new(inner, handle))
    }

    /// Returns the async manager this adapter drives.
    #[must_use]
    pub fn inner(&self) -> &Arc<CacheManager> {
        &self.inner
    }

    fn run<F: Future>(&self, fut: F) -> DashResult<F::Output> {
        match Handle::try_current() {
            Err(_) => Ok(self.handle.block_on(fut)),
            Ok(current) if current.runtime_flavor() == RuntimeFlavor::MultiThread => {
                Ok(tokio::task::block_in_place(|| self.handle.block_on(fut)))
            }
            Ok(_) => {
                warn!("Blocking cache call from a current-thread runtime, skipped");
                Err(DashError::internal(
                    "Blocking cache call from a current-thread runtime",
                ))
            }
        }
    }

    /// See [`CacheManager::get`]. Misses when it cannot run.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.run(self.inner.get(key)).ok().flatten()
    }

    /// See [`CacheManager::set`]. Only encoding errors are returned; a call
    /// that cannot run is skipped.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: CacheTtl) -> DashResult<()> {
        serde_json::to_value(value)?;
        self.run(self.inner.set(key, value, ttl)).unwrap_or(Ok(()))
    }

    /// See [`CacheManager::delete`].
    pub fn delete(&self, key: &str) -> bool {
        self.run(self.inner.delete(key)).unwrap_or(false)
    }

    /// See [`CacheManager::delete_pattern`].
    pub fn delete_pattern(&self, pattern: &str) -> u64 {
        self.run(self.inner.delete_pattern(pattern)).unwrap_or(0)
    }

    /// See [`CacheManager::invalidate_suite`]. Returns the number of keys removed.
    pub fn invalidate_suite(&self, id: SuiteId) -> u64 {
        self.run(self.inner.invalidate_suite(id)).unwrap_or(0)
    }

    /// See [`CacheManager::invalidate_case`].
    pub fn invalidate_case(&self, id: CaseId, suite_id: SuiteId) -> u64 {
        self.run(self.inner.invalidate_case(id, suite_id)).unwrap_or(0)
    }

    /// See [`CacheManager::invalidate_execution`].
    pub fn invalidate_execution(&self, id: ExecutionId) -> u64 {
        self.run(self.inner.invalidate_execution(id)).unwrap_or(0)
    }

    /// See [`CacheManager::invalidate_dashboard`].
    pub fn invalidate_dashboard(&self) -> u64 {
        self.run(self.inner.invalidate_dashboard()).unwrap_or(0)
    }

    /// See [`CacheManager::invalidate_all`].
    pub fn invalidate_all(&self) -> u64 {
        self.run(self.inner.invalidate_all()).unwrap_or(0)
    }

    /// Cache-aside with a synchronous factory.
    pub fn get_or_compute<T, F>(&self, key: &str, ttl: CacheTtl, factory: F) -> DashResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> DashResult<T>,
    {
        if let Some(cached) = self.get::<T>(key) {
            return Ok(cached);
        }
        let value = factory()?;
        self.set(key, &value, ttl)?;
        Ok(value)
    }

    /// See [`CacheManager::health_check`].
    pub fn health_check(&self) -> bool {
        self.run(self.inner.health_check()).unwrap_or(false)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.inner.stats()
    }
}
