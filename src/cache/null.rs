//! Null Cache Module

use std::marker::PhantomData;

use crate::cache::{Cache, CachePolicy};

// == Null Cache ==
/// Cache that stores nothing. Lets callers disable caching without
/// branching at every call site.
#[derive(Debug)]
pub struct NullCache<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> NullCache<V> {
    /// Creates a cache that discards every write.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V> Default for NullCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Cache<V> for NullCache<V> {
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn set(&self, _key: String, _value: V) {}

    fn has(&self, _key: &str) -> bool {
        false
    }

    fn remove(&self, _key: &str) {}

    fn purge(&self) {}

    fn len(&self) -> usize {
        0
    }

    fn capacity(&self) -> usize {
        0
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Null
    }
}
