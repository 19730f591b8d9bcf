//! Store used when caching is disabled.

use super::CacheStore;
use async_trait::async_trait;
use std::time::Duration;
use testdash_core::DashResult;

/// Always misses, accepts every write, deletes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCacheStore;

#[async_trait]
impl CacheStore for NoopCacheStore {
    async fn get(&self, _key: &str) -> DashResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> DashResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> DashResult<bool> {
        Ok(false)
    }

    async fn delete_pattern(&self, _pattern: &str) -> DashResult<u64> {
        Ok(0)
    }

    async fn ping(&self) -> DashResult<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "noop"
    }
}
