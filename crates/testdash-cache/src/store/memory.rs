//! Process-local store for development and tests.

use super::{ttl_secs, CacheStore};
use crate::pattern::glob_match;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use testdash_core::DashResult;
use tokio::time::Instant;
use tracing::debug;

/// Expired entries are purged once every this many writes.
const SWEEP_INTERVAL: usize = 256;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache store.
///
/// Expiry is checked on access against tokio's clock, so tests running with
/// a paused runtime can advance past a TTL deterministically. Writes also
/// sweep expired entries periodically. Not shared between processes.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
    writes: AtomicUsize,
}

impl InMemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unexpired entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no unexpired entry exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unexpired keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .lock()
            .iter()
            .filter(|(_, e)| e.is_live(now))
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Remaining lifetime of `key`, if present.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .lock()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.expires_at - now)
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> DashResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DashResult<()> {
        let now = Instant::now();
        let expires_at = now + Duration::from_secs(ttl_secs(ttl));
        let mut entries = self.entries.lock();

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_INTERVAL == 0 {
            let before = entries.len();
            entries.retain(|_, e| e.is_live(now));
            debug!(purged = before - entries.len(), "In-memory expiry sweep");
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> DashResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> DashResult<u64> {
        let now = Instant::now();
        let mut deleted = 0;

        self.entries.lock().retain(|key, entry| {
            if glob_match(pattern, key) {
                if entry.is_live(now) {
                    deleted += 1;
                }
                false
            } else {
                true
            }
        });

        debug!(pattern, deleted, "In-memory pattern delete");
        Ok(deleted)
    }

    async fn ping(&self) -> DashResult<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn close(&self) {
        self.entries.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = InMemoryCacheStore::new();
        store.set("suite:1", "{}", Duration::from_secs(60)).await.unwrap();

        assert_eq!(store.get("suite:1").await.unwrap().as_deref(), Some("{}"));
        assert!(store.delete("suite:1").await.unwrap());
        assert!(!store.delete("suite:1").await.unwrap());
        assert!(store.get("suite:1").await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire() {
        let store = InMemoryCacheStore::new();
        store.set("k", "v", Duration::from_secs(60)).await.unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.get("k").await.unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_second_ttl_rounds_up() {
        let store = InMemoryCacheStore::new();
        store.set("k", "v", Duration::from_millis(10)).await.unwrap();

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(store.get("k").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_pattern_counts_matches() {
        let store = InMemoryCacheStore::new();
        let ttl = Duration::from_secs(60);
        store.set("suites:list:skip:0:limit:10", "[]", ttl).await.unwrap();
        store.set("suites:list:skip:10:limit:10", "[]", ttl).await.unwrap();
        store.set("suite:1", "{}", ttl).await.unwrap();

        assert_eq!(store.delete_pattern("suites:list:*").await.unwrap(), 2);
        assert_eq!(store.delete_pattern("suites:list:*").await.unwrap(), 0);
        assert_eq!(store.keys(), vec!["suite:1".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_purge_expired_entries() {
        let store = InMemoryCacheStore::new();
        for i in 0..1000 {
            store.set(&format!("cases:list:{i}"), "[]", Duration::from_secs(60)).await.unwrap();
        }
        tokio::time::advance(Duration::from_secs(120)).await;

        for i in 0..SWEEP_INTERVAL {
            store.set(&format!("suite:{i}"), "{}", Duration::from_secs(600)).await.unwrap();
        }

        assert_eq!(store.len(), SWEEP_INTERVAL);
        assert!(store.entries.lock().len() <= SWEEP_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_reports_remaining() {
        let store = InMemoryCacheStore::new();
        store.set("k", "v", Duration::from_secs(600)).await.unwrap();
        tokio::time::advance(Duration::from_secs(100)).await;
        assert_eq!(store.ttl("k"), Some(Duration::from_secs(500)));
    }
}
