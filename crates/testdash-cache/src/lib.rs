//! # Testdash Cache
//!
//! Cache-aside layer for the Testdash services.
//!
//! - [`store`]: the [`CacheStore`] trait and its Redis, in-memory and no-op
//!   backends.
//! - [`keys`], [`ttl`], [`invalidation`]: key naming, expiry tiers and the
//!   per-entity invalidation recipes.
//! - [`CacheManager`]: the single process-wide entry point. Store failures
//!   never escape it; with the store down every read is a miss.
//! - [`CachedFn`]: wraps a fallible async function so repeated calls with
//!   the same arguments are served from the cache.

pub mod blocking;
pub mod bootstrap;
pub mod cached;
pub mod invalidation;
pub mod keys;
pub mod manager;
pub mod metrics;
pub mod pattern;
pub mod store;
pub mod ttl;

pub use blocking::BlockingCacheManager;
pub use bootstrap::{build_cache_manager, build_cache_module, build_store, CacheModule};
pub use cached::CachedFn;
pub use invalidation::InvalidationRecipe;
pub use manager::CacheManager;
pub use metrics::{CacheStats, CacheStatsSnapshot};
pub use store::{
    CacheStore, InMemoryCacheStore, NoopCacheStore, RedisCacheStore, RedisCacheStoreParameters,
};
pub use ttl::{CacheTtl, EXTENDED_TTL, LONG_TTL, MEDIUM_TTL, SHORT_TTL};
