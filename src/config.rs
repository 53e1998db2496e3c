//! Configuration Module
//!
//! Cache settings loaded from environment variables or deserialized from
//! the host application's own config file.

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{build_cache, Cache, CachePolicy};
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// Every field has a default, so a partial config section deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Eviction policy of the bounded cache
    pub policy: CachePolicy,
    /// Maximum number of entries (0 is clamped to 1)
    pub capacity: usize,
    /// Entry TTL in milliseconds for the TLRU policy
    pub ttl_ms: u64,
    /// Serve an expired TLRU entry once before dropping it
    pub stale_once: bool,
    /// TTL in milliseconds for a [`TtlStore`](crate::TtlStore)
    pub store_ttl_ms: u64,
}

impl CacheConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_POLICY` - `lru`, `lfu`, `tlru` or `null` (default: lru)
    /// - `CACHE_CAPACITY` - Maximum entries, negative values clamp (default: 1000)
    /// - `CACHE_TTL_MS` - TLRU entry TTL (default: 300000)
    /// - `CACHE_STALE_ONCE` - `true`/`false` (default: false)
    /// - `CACHE_STORE_TTL_MS` - TTL store TTL (default: 60000)
    ///
    /// Missing variables take their default; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let policy = match lookup("CACHE_POLICY") {
            Some(raw) => raw.parse()?,
            None => defaults.policy,
        };
        let capacity = parse_setting::<i64, _>(&lookup, "CACHE_CAPACITY")?
            .map(|raw| usize::try_from(raw.max(0)).unwrap_or(usize::MAX))
            .unwrap_or(defaults.capacity);
        let ttl_ms = parse_setting(&lookup, "CACHE_TTL_MS")?.unwrap_or(defaults.ttl_ms);
        let stale_once =
            parse_setting(&lookup, "CACHE_STALE_ONCE")?.unwrap_or(defaults.stale_once);
        let store_ttl_ms =
            parse_setting(&lookup, "CACHE_STORE_TTL_MS")?.unwrap_or(defaults.store_ttl_ms);

        Ok(Self {
            policy,
            capacity,
            ttl_ms,
            stale_once,
            store_ttl_ms,
        })
    }

    /// TLRU entry TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    /// TTL store TTL as a [`Duration`].
    pub fn store_ttl(&self) -> Duration {
        Duration::from_millis(self.store_ttl_ms)
    }

    /// Builds the configured cache. Shorthand for [`build_cache`].
    pub fn build<V>(&self) -> Arc<dyn Cache<V>>
    where
        V: Clone + Send + Sync + 'static,
    {
        build_cache(self)
    }
}

fn parse_setting<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidSetting { name, value: raw }),
        None => Ok(None),
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: CachePolicy::Lru,
            capacity: 1000,
            ttl_ms: 300_000,
            stale_once: false,
            store_ttl_ms: 60_000,
        }
    }
}
