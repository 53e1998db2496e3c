//! LRU Cache Module
//!
//! Bounded cache evicting the least recently used entry.

use parking_lot::RwLock;

use crate::cache::entry::{CacheEntry, EntryMap, UsageClock};
use crate::cache::{clamp_capacity, Cache, CachePolicy};

// == LRU Cache ==
/// Bounded cache that evicts the entry with the oldest recency marker.
///
/// The marker is the microsecond timestamp of the last successful `get`,
/// or of insertion for entries never read. Eviction scans every entry, which
/// keeps the structure a plain map at the small capacities it is used with.
#[derive(Debug)]
pub struct LruCache<V> {
    inner: RwLock<LruState<V>>,
}

#[derive(Debug)]
struct LruState<V> {
    entries: EntryMap<V>,
    clock: UsageClock,
}

impl<V> LruCache<V> {
    // == Constructor ==
    /// Creates an LRU cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruState {
                entries: EntryMap::new(clamp_capacity(capacity)),
                clock: UsageClock::new(),
            }),
        }
    }
}

impl<V> Cache<V> for LruCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let mut state = self.inner.write();
        let now = state.clock.now_micros();
        let entry = state.entries.get_mut(key)?;
        entry.marker = now;
        Some(entry.value.clone())
    }

    fn set(&self, key: String, value: V) {
        let mut state = self.inner.write();
        state.entries.make_room(&key);
        let now = state.clock.now_micros();
        state.entries.insert(key, CacheEntry::new(value, now));
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
        CachePolicy::Lru
    }
}
