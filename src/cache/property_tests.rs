//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check behaviour shared by every bounded policy.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{Cache, LfuCache, LruCache, NullCache, TlruCache};

// == Test Configuration ==
const TEST_CAPACITY: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Has { key: String },
    Remove { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Has { key }),
        key_strategy().prop_map(|key| CacheOp::Remove { key }),
    ]
}

fn bounded_caches(capacity: usize) -> Vec<Box<dyn Cache<String>>> {
    vec![
        Box::new(LruCache::new(capacity)),
        Box::new(LfuCache::new(capacity)),
        Box::new(TlruCache::new(capacity, TEST_TTL, false)),
        Box::new(TlruCache::new(capacity, TEST_TTL, true)),
    ]
}

fn apply(cache: &dyn Cache<String>, op: &CacheOp) {
    match op {
        CacheOp::Set { key, value } => cache.set(key.clone(), value.clone()),
        CacheOp::Get { key } => {
            cache.get(key);
        }
        CacheOp::Has { key } => {
            cache.has(key);
        }
        CacheOp::Remove { key } => cache.remove(key),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The number of entries never exceeds capacity, whatever the mix of
    // operations and whatever the policy.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        for cache in bounded_caches(capacity) {
            for op in &ops {
                apply(cache.as_ref(), op);
                prop_assert!(
                    cache.len() <= capacity,
                    "{} cache size {} exceeds capacity {}",
                    cache.policy(),
                    cache.len(),
                    capacity
                );
            }
        }
    }

    // Storing then reading (before any eviction) returns the same value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        for cache in bounded_caches(TEST_CAPACITY) {
            cache.set(key.clone(), value.clone());
            prop_assert_eq!(cache.get(&key), Some(value.clone()));
        }
    }

    // A second set for the same key replaces the value and does not grow
    // the cache.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        for cache in bounded_caches(TEST_CAPACITY) {
            cache.set(key.clone(), value1.clone());
            cache.set(key.clone(), value2.clone());

            prop_assert_eq!(cache.get(&key), Some(value2.clone()));
            prop_assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn prop_remove_deletes_entry(key in key_strategy(), value in value_strategy()) {
        for cache in bounded_caches(TEST_CAPACITY) {
            cache.set(key.clone(), value.clone());
            prop_assert!(cache.has(&key));

            cache.remove(&key);

            prop_assert!(!cache.has(&key));
            prop_assert_eq!(cache.get(&key), None);
        }
    }

    #[test]
    fn prop_purge_clears_everything(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..50)
    ) {
        for cache in bounded_caches(TEST_CAPACITY) {
            for (key, value) in &entries {
                cache.set(key.clone(), value.clone());
            }

            cache.purge();

            prop_assert!(cache.is_empty());
            for (key, _) in &entries {
                prop_assert!(!cache.has(key), "{} still present after purge", key);
            }
        }
    }

    #[test]
    fn prop_null_cache_never_stores(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let cache = NullCache::<String>::new();
        for op in &ops {
            apply(&cache, op);
            prop_assert!(cache.is_empty());
        }
        for op in &ops {
            if let CacheOp::Set { key, .. } = op {
                prop_assert!(!cache.has(key));
                prop_assert_eq!(cache.get(key), None);
            }
        }
    }
}

// Recency tracking for the LRU-based policies
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // When a full cache overflows, the entry written first and never read
    // is evicted; all others survive.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(key_strategy(), 2..10),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = dedup(initial_keys);
        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let capacity = unique_keys.len();
        let caches: Vec<Box<dyn Cache<String>>> = vec![
            Box::new(LruCache::new(capacity)),
            Box::new(TlruCache::new(capacity, TEST_TTL, false)),
        ];

        for cache in caches {
            for key in &unique_keys {
                cache.set(key.clone(), format!("value_{}", key));
            }
            cache.set(new_key.clone(), new_value.clone());

            prop_assert_eq!(cache.len(), capacity);
            prop_assert!(!cache.has(&unique_keys[0]), "Oldest key should be evicted");
            prop_assert!(cache.has(&new_key));
            for key in unique_keys.iter().skip(1) {
                prop_assert!(cache.has(key), "Key '{}' should survive", key);
            }
        }
    }

    // Reading the oldest key protects it; the next oldest goes instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(key_strategy(), 3..8),
        new_key in key_strategy(),
        new_value in value_strategy()
    ) {
        let unique_keys: Vec<String> = dedup(keys);
        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let cache = LruCache::new(unique_keys.len());
        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key));
        }

        let accessed_key = &unique_keys[0];
        let expected_evicted = &unique_keys[1];
        prop_assert!(cache.get(accessed_key).is_some());

        cache.set(new_key.clone(), new_value);

        prop_assert!(cache.has(accessed_key), "Accessed key should survive");
        prop_assert!(!cache.has(expected_evicted), "Next oldest should be evicted");
        prop_assert!(cache.has(&new_key));
    }
}

// Keeps first occurrence order, unlike collecting into a HashSet.
fn dedup(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}
