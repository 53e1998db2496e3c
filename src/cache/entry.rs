//! Cache Entry Module
//!
//! Entry layout and the bounded entry map shared by the LRU, LFU and TLRU
//! caches. Eviction is a full scan for the smallest usage marker.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::trace;

// == Cache Entry ==
/// A single cached value with its usage marker.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Microsecond timestamp (LRU, TLRU) or access counter (LFU)
    pub marker: u64,
    /// Expiration instant, only set by time-aware caches
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, marker: u64) -> Self {
        Self {
            value,
            marker,
            expires_at: None,
        }
    }

    pub fn with_ttl(value: V, marker: u64, ttl: Duration) -> Self {
        Self {
            value,
            marker,
            expires_at: Some(Instant::now() + ttl),
        }
    }

    // == Is Expired ==
    /// An entry is expired once `now >= expires_at`; entries without a TTL
    /// never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }
}

// == Usage Clock ==
/// Microsecond clock for recency markers.
///
/// Readings are strictly increasing per clock, so two touches within the
/// same microsecond still order correctly.
#[derive(Debug)]
pub(crate) struct UsageClock {
    origin: Instant,
    last: u64,
}

impl UsageClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            last: 0,
        }
    }

    /// Microseconds since the clock was created, saturating at `u64::MAX`.
    pub fn now_micros(&mut self) -> u64 {
        let elapsed = u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.last = elapsed.max(self.last.saturating_add(1));
        self.last
    }
}

// == Entry Map ==
/// Key to entry map with a fixed capacity.
#[derive(Debug)]
pub(crate) struct EntryMap<V> {
    entries: HashMap<String, CacheEntry<V>>,
    capacity: usize,
}

impl<V> EntryMap<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    // == Make Room ==
    /// Evicts the entry with the smallest marker when `key` is new and the
    /// map is full. Returns the evicted key.
    ///
    /// Among equal markers the first one visited by map iteration loses.
    pub fn make_room(&mut self, key: &str) -> Option<String> {
        if self.entries.contains_key(key) || self.entries.len() < self.capacity {
            return None;
        }

        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.marker)
            .map(|(victim, entry)| (victim.clone(), entry.marker));

        let (victim, marker) = victim?;
        self.entries.remove(&victim);
        trace!(key = %victim, marker, "Evicted cache entry");
        Some(victim)
    }

    pub fn insert(&mut self, key: String, entry: CacheEntry<V>) {
        self.entries.insert(key, entry);
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CacheEntry<V>> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
