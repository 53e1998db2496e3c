//! TLRU Cache Module
//!
//! Time-aware LRU: recency-based eviction plus a per-entry expiration.

use std::time::Duration;

use parking_lot::RwLock;
use tracing::trace;

use crate::cache::entry::{CacheEntry, EntryMap, UsageClock};
use crate::cache::{clamp_capacity, clamp_ttl, Cache, CachePolicy};

// == TLRU Cache ==
/// Bounded LRU cache whose entries expire `ttl` after their last `set`.
///
/// Expiry is only evaluated by `get`. Eviction on overflow looks at recency
/// alone, so an entry close to expiry is not preferred over a long-lived one.
///
/// With `stale_once` enabled, the first `get` after expiry still returns the
/// old value while removing the entry; later reads miss.
#[derive(Debug)]
pub struct TlruCache<V> {
    inner: RwLock<TlruState<V>>,
    ttl: Duration,
    stale_once: bool,
}

#[derive(Debug)]
struct TlruState<V> {
    entries: EntryMap<V>,
    clock: UsageClock,
}

impl<V> TlruCache<V> {
    // == Constructor ==
    /// Creates a TLRU cache. `capacity` and `ttl` are clamped to
    /// [`MIN_CAPACITY`](crate::cache::MIN_CAPACITY) and
    /// [`MIN_TTL`](crate::cache::MIN_TTL).
    pub fn new(capacity: usize, ttl: Duration, stale_once: bool) -> Self {
        Self {
            inner: RwLock::new(TlruState {
                entries: EntryMap::new(clamp_capacity(capacity)),
                clock: UsageClock::new(),
            }),
            ttl: clamp_ttl(ttl),
            stale_once,
        }
    }

    /// Lifetime of an entry after its last `set`.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether an expired entry is served once more before removal.
    pub fn stale_once(&self) -> bool {
        self.stale_once
    }
}

impl<V> Cache<V> for TlruCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let mut state = self.inner.write();
        let now = state.clock.now_micros();
        let entry = state.entries.get_mut(key)?;

        if !entry.is_expired() {
            entry.marker = now;
            return Some(entry.value.clone());
        }

        let expired = state.entries.remove(key)?;
        trace!(key, stale_once = self.stale_once, "Removed expired cache entry");
        if self.stale_once {
            Some(expired.value)
        } else {
            None
        }
    }

    fn set(&self, key: String, value: V) {
        let mut state = self.inner.write();
        state.entries.make_room(&key);
        let now = state.clock.now_micros();
        state
            .entries
            .insert(key, CacheEntry::with_ttl(value, now, self.ttl));
    }

    fn has(&self, key: &str) -> bool {
        self.inner.read().entries.contains(key)
    }

    fn remove(&self, key: &str) {
        self.inner.write().entries.remove(key);
    }

    fn purge(&self) {
        self.inner.write().entries.clear();
    }

    fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    fn capacity(&self) -> usize {
        self.inner.read().entries.capacity()
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Tlru
    }
}
