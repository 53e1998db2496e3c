//! LFU Cache Module
//!
//! Bounded cache evicting the least frequently used entry.

use parking_lot::RwLock;

use crate::cache::entry::{CacheEntry, EntryMap};
use crate::cache::{clamp_capacity, Cache, CachePolicy};

// == LFU Cache ==
/// Bounded cache that evicts the entry with the lowest access count.
///
/// Counters start at zero on `set` and grow by one per `get` hit. A fresh
/// entry therefore ties with every entry that was never read, and may be
/// the one evicted on the next overflow.
#[derive(Debug)]
pub struct LfuCache<V> {
    inner: RwLock<EntryMap<V>>,
}

impl<V> LfuCache<V> {
    // == Constructor ==
    /// Creates an LFU cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(EntryMap::new(clamp_capacity(capacity))),
        }
    }
}

impl<V> Cache<V> for LfuCache<V>
where
    V: Clone + Send + Sync,
{
    fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.inner.write();
        let entry = entries.get_mut(key)?;
        entry.marker = entry.marker.saturating_add(1);
        Some(entry.value.clone())
    }

    fn set(&self, key: String, value: V) {
        let mut entries = self.inner.write();
        entries.make_room(&key);
        entries.insert(key, CacheEntry::new(value, 0));
    }

    fn has(&self, key: &str) -> bool {
        self.inner.read().contains(key)
    }

    fn remove(&self, key: &str) {
        self.inner.write().remove(key);
    }

    fn purge(&self) {
        self.inner.write().clear();
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Lfu
    }
}
