//! Cache-aside combinator.
//!
//! [`CachedFn`] wraps an async function so that calls with equal arguments
//! within the TTL return the stored result instead of running it again.

use crate::manager::CacheManager;
use crate::ttl::CacheTtl;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use testdash_core::DashResult;

/// A function wrapped with cache-aside lookup.
///
/// The key is `"{prefix}:{args}"` where `args` is the JSON encoding of the
/// call arguments with object keys sorted, so argument maps built in any
/// order share one entry.
///
/// ```ignore
/// let trends = CachedFn::new(cache, "dashboard:trends", CacheTtl::Long, move |days: u32| {
///     let repo = repo.clone();
///     async move { repo.trends(days).await }
/// });
/// let points = trends.call(7).await?;
/// ```
pub struct CachedFn<A, T, F> {
    manager: Arc<CacheManager>,
    prefix: String,
    ttl: CacheTtl,
    f: F,
    _marker: PhantomData<fn(A) -> T>,
}

impl<A, T, F, Fut> CachedFn<A, T, F>
where
    A: Serialize,
    T: Serialize + DeserializeOwned,
    F: Fn(A) -> Fut,
    Fut: Future<Output = DashResult<T>>,
{
    /// Wraps `f`, caching results under `prefix` for the `ttl` tier.
    pub fn new(manager: Arc<CacheManager>, prefix: impl Into<String>, ttl: CacheTtl, f: F) -> Self {
        Self {
            manager,
            prefix: prefix.into(),
            ttl,
            f,
            _marker: PhantomData,
        }
    }

    /// Key prefix for this function's entries.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the cache key for `args`.
    ///
    /// Fails with `DashError::Serialization` if `args` cannot be encoded.
    pub fn key_for(&self, args: &A) -> DashResult<String> {
        let canonical = canonicalize(serde_json::to_value(args)?);
        Ok(format!("{}:{}", self.prefix, serde_json::to_string(&canonical)?))
    }

    /// Calls the wrapped function through the cache.
    ///
    /// The key is built before anything runs, so unencodable arguments fail
    /// without calling the function. A failing call caches nothing.
    pub async fn call(&self, args: A) -> DashResult<T> {
        let key = self.key_for(&args)?;

        if let Some(cached) = self.manager.get::<T>(&key).await {
            return Ok(cached);
        }

        let value = (self.f)(args).await?;
        self.manager.set(&key, &value, self.ttl).await?;
        Ok(value)
    }

    /// Drops the entry for `args`. Returns `true` if one existed.
    pub async fn forget(&self, args: &A) -> DashResult<bool> {
        let key = self.key_for(args)?;
        Ok(self.manager.delete(&key).await)
    }
}

/// Rebuilds every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let sorted: Map<String, Value> = entries
                .into_iter()
                .map(|(k, v)| (k, canonicalize(v)))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
