//! Redis-backed store using a `deadpool-redis` connection pool.

use super::{ttl_secs, CacheStore};
use async_trait::async_trait;
use deadpool_redis::{Connection, Pool, PoolConfig, Runtime};
use redis::RedisResult;
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use testdash_config::{CacheConfig, RedisConfig};
use testdash_core::{DashError, DashResult};
use testdash_resilience::{with_timeout, TimeoutConfig};
use tracing::{debug, info, warn};

/// Keys requested per `SCAN` round trip.
const SCAN_COUNT: usize = 100;

/// Redis-based cache store.
///
/// Each operation checks a connection out of the pool and returns it when
/// the guard drops, on success and on error alike. Pool wait plus one
/// command share one operation timeout; pattern deletes get a fresh budget
/// per SCAN or DEL round trip.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
    /// Per-operation and connect budgets.
    timeouts: TimeoutConfig,
    /// Connection URL with the password masked.
    endpoint: String,
}

impl RedisCacheStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>, timeouts: TimeoutConfig) -> Self {
        Self {
            pool: Some(pool),
            timeouts,
            endpoint: String::from("redis"),
        }
    }

    /// Create a store that never connects (for when caching is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            timeouts: TimeoutConfig::default(),
            endpoint: String::new(),
        }
    }

    /// Create a store from configuration.
    ///
    /// The pool connects lazily, so this succeeds even when Redis is down.
    pub fn connect(redis: &RedisConfig, cache: &CacheConfig) -> DashResult<Self> {
        let params = Self::build_parameters(redis, cache)?;
        Ok(Self {
            pool: params.pool,
            timeouts: params.timeouts,
            endpoint: params.endpoint,
        })
    }

    /// Builds the component parameters used when wiring through shaku.
    pub fn build_parameters(
        redis: &RedisConfig,
        cache: &CacheConfig,
    ) -> DashResult<RedisCacheStoreParameters> {
        let timeouts = TimeoutConfig::new(cache.operation_timeout(), redis.connect_timeout());

        let mut pool_config = PoolConfig::new(redis.pool_size);
        pool_config.timeouts.wait = Some(timeouts.operation);
        pool_config.timeouts.create = Some(timeouts.connect);
        pool_config.timeouts.recycle = Some(timeouts.connect);

        let mut redis_cfg = deadpool_redis::Config::from_url(redis.url());
        redis_cfg.pool = Some(pool_config);

        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DashError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        info!(
            url = %redis.redacted_url(),
            pool_size = redis.pool_size,
            "Redis cache pool created"
        );

        Ok(RedisCacheStoreParameters {
            pool: Some(Arc::new(pool)),
            timeouts,
            endpoint: redis.redacted_url(),
        })
    }

    /// Returns the masked endpoint this store talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs one command on a pooled connection under the operation timeout.
    ///
    /// Pool, protocol and timeout failures all come back as
    /// `CacheUnavailable`.
    async fn run<T, F, Fut>(&self, op: &'static str, f: F) -> DashResult<T>
    where
        F: FnOnce(Connection) -> Fut,
        Fut: Future<Output = RedisResult<T>>,
    {
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| DashError::cache_unavailable("Redis cache is disabled"))?;

        let result = with_timeout(op, self.timeouts.operation, || async move {
            let conn = pool.get().await.map_err(|e| {
                DashError::cache_unavailable(format!("Failed to get Redis connection: {}", e))
            })?;
            f(conn)
                .await
                .map_err(|e| DashError::cache_unavailable(format!("Redis {} failed: {}", op, e)))
        })
        .await;

        result.map_err(|e| match e {
            DashError::Timeout(msg) => DashError::CacheUnavailable(msg),
            other => other,
        })
    }

    async fn scan_page(&self, pattern: &str, cursor: u64) -> DashResult<(u64, Vec<String>)> {
        self.run("SCAN", |mut conn| async move {
            redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn)
                .await
        })
        .await
    }

    async fn delete_keys(&self, keys: Vec<String>) -> DashResult<u64> {
        self.run("DEL", |mut conn| async move {
            redis::cmd("DEL").arg(&keys).query_async(&mut conn).await
        })
        .await
    }
}

/// Walks a SCAN cursor to completion, deleting each page as it arrives.
///
/// Every SCAN and DEL round trip gets its own operation timeout. If a round
/// trip fails after some keys were already removed, the partial count is
/// returned; a failure before any deletion is returned as the error.
async fn delete_in_batches<S, SFut, D, DFut>(
    pattern: &str,
    mut scan: S,
    mut delete: D,
) -> DashResult<u64>
where
    S: FnMut(u64) -> SFut,
    SFut: Future<Output = DashResult<(u64, Vec<String>)>>,
    D: FnMut(Vec<String>) -> DFut,
    DFut: Future<Output = DashResult<u64>>,
{
    let mut deleted: u64 = 0;
    let mut cursor: u64 = 0;

    loop {
        let step = async {
            let (next_cursor, keys) = scan(cursor).await?;
            let count = if keys.is_empty() { 0 } else { delete(keys).await? };
            Ok::<_, DashError>((next_cursor, count))
        }
        .await;

        match step {
            Ok((next_cursor, count)) => {
                deleted += count;
                cursor = next_cursor;
                if cursor == 0 {
                    return Ok(deleted);
                }
            }
            Err(e) if deleted > 0 => {
                warn!(pattern, deleted, error = %e, "Pattern delete interrupted");
                return Ok(deleted);
            }
            Err(e) => return Err(e),
        }
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("endpoint", &self.endpoint)
            .field("enabled", &self.pool.is_some())
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> DashResult<Option<String>> {
        let value: Option<String> = self
            .run("GET", |mut conn| async move {
                redis::cmd("GET").arg(key).query_async(&mut conn).await
            })
            .await?;

        match &value {
            Some(_) => debug!(key, "Redis GET hit"),
            None => debug!(key, "Redis GET miss"),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> DashResult<()> {
        let secs = ttl_secs(ttl);
        self.run("SET", |mut conn| async move {
            redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("EX")
                .arg(secs)
                .query_async::<()>(&mut conn)
                .await
        })
        .await?;

        debug!(key, ttl_secs = secs, "Redis SET");
        Ok(())
    }

    async fn delete(&self, key: &str) -> DashResult<bool> {
        let deleted: u64 = self
            .run("DEL", |mut conn| async move {
                redis::cmd("DEL").arg(key).query_async(&mut conn).await
            })
            .await?;

        debug!(key, existed = deleted > 0, "Redis DEL");
        Ok(deleted > 0)
    }

    async fn delete_pattern(&self, pattern: &str) -> DashResult<u64> {
        let deleted = delete_in_batches(
            pattern,
            |cursor| self.scan_page(pattern, cursor),
            |keys| self.delete_keys(keys),
        )
        .await?;

        debug!(pattern, deleted, "Redis pattern DEL");
        Ok(deleted)
    }

    async fn ping(&self) -> DashResult<()> {
        let pong: String = self
            .run("PING", |mut conn| async move {
                redis::cmd("PING").query_async(&mut conn).await
            })
            .await?;

        if pong == "PONG" {
            Ok(())
        } else {
            Err(DashError::cache_unavailable(format!(
                "Unexpected PING reply: {}",
                pong
            )))
        }
    }

    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }

    fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            info!(url = %self.endpoint, "Redis cache pool closed");
        }
    }
}
