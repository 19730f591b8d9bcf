//! Key-value store backends.

mod memory;
mod noop;
mod redis_store;

pub use memory::InMemoryCacheStore;
pub use noop::NoopCacheStore;
pub use redis_store::{RedisCacheStore, RedisCacheStoreParameters};

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use testdash_core::DashResult;

/// Raw string store behind the cache manager.
///
/// Every failure is reported as `DashError::CacheUnavailable`; backend error
/// types never cross this trait. Implementations must be safe to call from
/// many tasks at once.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> DashResult<Option<String>>;

    /// Stores `value` under `key`, expiring after `ttl`.
    ///
    /// Sub-second TTLs are rounded up to one second.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DashResult<()>;

    /// Deletes `key`. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> DashResult<bool>;

    /// Deletes every key matching the glob `pattern`.
    ///
    /// Not atomic across the pattern: keys written while the scan runs may
    /// survive, and a failure part way leaves earlier deletions in place.
    /// Safe to retry.
    async fn delete_pattern(&self, pattern: &str) -> DashResult<u64>;

    /// Checks that the store answers.
    async fn ping(&self) -> DashResult<()>;

    /// Returns false for stores that never hold data.
    fn is_enabled(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Releases pooled connections. Later calls fail as unavailable.
    fn close(&self) {}
}

/// Expiry in whole seconds, as sent with `SET EX`. Never zero.
pub(crate) fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}
