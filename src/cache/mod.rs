//! Cache Module
//!
//! Bounded in-memory caches with interchangeable eviction policies.
//!
//! Every cache implements [`Cache`], so callers can hold an
//! `Arc<dyn Cache<V>>` built by [`build_cache`] and switch policy through
//! configuration alone.

mod entry;
mod lfu;
mod lru;
mod null;
mod policy;
mod tlru;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use tracing::debug;

// Re-export public types
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use null::NullCache;
pub use policy::{build_cache, CachePolicy};
pub use tlru::TlruCache;

// == Public Constants ==
/// Smallest capacity a bounded cache will accept; lower values are clamped.
pub const MIN_CAPACITY: usize = 1;

/// Smallest TTL accepted by time-aware caches and the TTL store.
pub const MIN_TTL: Duration = Duration::from_millis(1);

// == Cache Trait ==
/// Capability shared by every cache, regardless of eviction policy.
///
/// No operation fails. A missing (or, for TLRU, expired) key is reported
/// as `None`.
pub trait Cache<V>: Send + Sync {
    /// Returns the value for `key`, updating its usage marker on a hit.
    fn get(&self, key: &str) -> Option<V>;

    /// Stores `value`, overwriting any previous entry and resetting its marker.
    fn set(&self, key: String, value: V);

    /// Checks presence without touching recency or frequency.
    fn has(&self, key: &str) -> bool;

    /// Deletes the entry for `key` if present.
    fn remove(&self, key: &str);

    /// Clears all entries.
    fn purge(&self);

    /// Number of entries currently held.
    fn len(&self) -> usize;

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    /// Eviction policy of this cache.
    fn policy(&self) -> CachePolicy;

    /// Returns `true` when the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Like [`Cache::get`], but yields `V::default()` on a miss.
    fn get_or_default(&self, key: &str) -> V
    where
        V: Default,
    {
        self.get(key).unwrap_or_default()
    }
}

// == Parameter Clamping ==
pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    if capacity < MIN_CAPACITY {
        debug!(capacity, min = MIN_CAPACITY, "Clamping cache capacity");
        MIN_CAPACITY
    } else {
        capacity
    }
}

pub(crate) fn clamp_ttl(ttl: Duration) -> Duration {
    if ttl < MIN_TTL {
        debug!(?ttl, min = ?MIN_TTL, "Clamping cache TTL");
        MIN_TTL
    } else {
        ttl
    }
}
