//! Policy Module
//!
//! Eviction policy selector and the factory building a cache from it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{Cache, LfuCache, LruCache, NullCache, TlruCache};
use crate::config::CacheConfig;
use crate::error::CacheError;

// == Cache Policy ==
/// Eviction policy of a bounded cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicy {
    /// Least recently used
    #[default]
    Lru,
    /// Least frequently used
    Lfu,
    /// Least recently used with per-entry expiration
    Tlru,
    /// Caching disabled
    Null,
}

impl CachePolicy {
    /// Lowercase name, as accepted by `FromStr` and serde.
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Tlru => "tlru",
            CachePolicy::Null => "null",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheError;

    /// Parses a policy name, ignoring case and surrounding whitespace.
    /// `"none"` and `"off"` are accepted as aliases of `null`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(CachePolicy::Lru),
            "lfu" => Ok(CachePolicy::Lfu),
            "tlru" => Ok(CachePolicy::Tlru),
            "null" | "none" | "off" => Ok(CachePolicy::Null),
            _ => Err(CacheError::UnknownPolicy(s.to_string())),
        }
    }
}

// == Factory ==
/// Builds the cache selected by `config.policy` behind the shared trait.
///
/// `ttl` and `stale_once` are only read for [`CachePolicy::Tlru`].
pub fn build_cache<V>(config: &CacheConfig) -> Arc<dyn Cache<V>>
where
    V: Clone + Send + Sync + 'static,
{
    debug!(
        policy = %config.policy,
        capacity = config.capacity,
        "Building cache"
    );

    match config.policy {
        CachePolicy::Lru => Arc::new(LruCache::new(config.capacity)),
        CachePolicy::Lfu => Arc::new(LfuCache::new(config.capacity)),
        CachePolicy::Tlru => Arc::new(TlruCache::new(
            config.capacity,
            config.ttl(),
            config.stale_once,
        )),
        CachePolicy::Null => Arc::new(NullCache::new()),
    }
}
