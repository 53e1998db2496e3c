//! Boundcache - bounded in-memory caches for long-running services
//!
//! Provides LRU, LFU and time-aware LRU caches behind one [`Cache`] trait,
//! a no-op [`NullCache`], and a swept [`TtlStore`].

pub mod cache;
pub mod config;
pub mod error;
mod tasks;
pub mod ttl;

pub use cache::{
    build_cache, Cache, CachePolicy, LfuCache, LruCache, NullCache, TlruCache, MIN_CAPACITY,
    MIN_TTL,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use ttl::TtlStore;
