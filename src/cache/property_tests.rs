//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check capacity, eviction order and key derivation
//! properties over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::cache::{
    CacheStrategy, EntryStore, EvictionPolicy, LruCacheStrategy, TimeBasedCacheStrategy,
};
use crate::manager::{generate_cache_key, KeyOptions, QueryParams};

// == Test Configuration ==
const TEST_TTL: u64 = 300;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:]{1,32}"
}

fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn policy_strategy() -> impl Strategy<Value = EvictionPolicy> {
    prop_oneof![
        Just(EvictionPolicy::InsertionOrder),
        Just(EvictionPolicy::RecentUse),
    ]
}

/// Distinct keys, in generation order.
fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence and either policy, the store never holds
    // more than its capacity after any call.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        policy in policy_strategy(),
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut store = EntryStore::new(NonZeroUsize::new(capacity).unwrap(), policy);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(&key, value, TEST_TTL, None).unwrap();
                }
                CacheOp::Get { key } => {
                    store.get(&key);
                }
                CacheOp::Delete { key } => {
                    store.delete(&key);
                }
            }
            prop_assert!(store.len() <= capacity, "size {} exceeds {}", store.len(), capacity);
        }
    }

    // Set then immediate get returns the stored value.
    #[test]
    fn prop_roundtrip_storage(
        policy in policy_strategy(),
        key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        let mut store = EntryStore::new(NonZeroUsize::new(8).unwrap(), policy);

        store.set(&key, value.clone(), TEST_TTL, None).unwrap();

        prop_assert_eq!(store.get(&key).map(|e| e.value), Some(value));
    }

    // Deleting an absent key changes nothing.
    #[test]
    fn prop_delete_absent_is_noop(
        keys in prop::collection::vec(valid_key_strategy(), 0..10),
        absent in valid_key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(!keys.contains(&absent));

        let mut store = EntryStore::new(NonZeroUsize::new(16).unwrap(), EvictionPolicy::RecentUse);
        for key in &keys {
            store.set(key, key.clone(), TEST_TTL, None).unwrap();
        }

        prop_assert!(!store.delete(&absent));
        prop_assert_eq!(store.len(), keys.len());
    }

    // Insertion order: the (n+1)th distinct insert evicts the first key,
    // even if every key was read in between.
    #[test]
    fn prop_fifo_evicts_least_recently_inserted(
        keys in prop::collection::vec(valid_key_strategy(), 2..10),
        new_key in valid_key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let mut store = EntryStore::new(
            NonZeroUsize::new(keys.len()).unwrap(),
            EvictionPolicy::InsertionOrder,
        );
        for key in &keys {
            store.set(key, key.clone(), TEST_TTL, None).unwrap();
        }
        for key in &keys {
            store.get(key);
        }

        let evicted = store.set(&new_key, new_key.clone(), TEST_TTL, None).unwrap();

        prop_assert_eq!(evicted, Some(keys[0].clone()));
        prop_assert_eq!(store.len(), keys.len());
    }

    // Recency order: reading the oldest key protects it, and the next
    // untouched key is evicted instead.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(valid_key_strategy(), 3..8),
        new_key in valid_key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 3);
        prop_assume!(!keys.contains(&new_key));

        let mut store = EntryStore::new(
            NonZeroUsize::new(keys.len()).unwrap(),
            EvictionPolicy::RecentUse,
        );
        for key in &keys {
            store.set(key, key.clone(), TEST_TTL, None).unwrap();
        }

        prop_assert!(store.get(&keys[0]).is_some());
        let evicted = store.set(&new_key, new_key.clone(), TEST_TTL, None).unwrap();

        prop_assert_eq!(evicted, Some(keys[1].clone()));
        prop_assert!(store.get(&keys[0]).is_some());
        prop_assert!(store.get(&new_key).is_some());
    }

    // Query parameters in any insertion order derive the same key.
    #[test]
    fn prop_key_generation_is_order_independent(
        params in prop::collection::vec(("[a-z]{1,8}", "[a-z0-9]{0,8}"), 0..8),
        resource in "[a-z]{1,10}",
        id in proptest::option::of("[0-9]{1,6}")
    ) {
        let forward: QueryParams = params
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(v.clone())))
            .collect();
        let mut backward = QueryParams::new();
        for (k, v) in params.iter().rev() {
            // keep the value `forward` ended up with for duplicate names
            backward.entry(k.clone()).or_insert_with(|| forward[k].clone());
        }

        let options = KeyOptions::with_query_params();
        let first = generate_cache_key(&resource, id.as_deref(), Some(&forward), options);
        let second = generate_cache_key(&resource, id.as_deref(), Some(&backward), options);

        prop_assert_eq!(&first, &second);
        let prefix = format!("{}:", resource);
        prop_assert!(first.starts_with(&prefix));
    }
}

// Strategy-level properties, driven without a runtime so no sweep is armed.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_strategies_respect_capacity(
        capacity in 1usize..10,
        keys in prop::collection::vec(valid_key_strategy(), 1..60)
    ) {
        let max_entries = NonZeroUsize::new(capacity).unwrap();
        let time_based: TimeBasedCacheStrategy<String> = TimeBasedCacheStrategy::new(max_entries);
        let lru: LruCacheStrategy<String> = LruCacheStrategy::new(max_entries);

        tokio_test::block_on(async {
            for key in &keys {
                time_based.set(key, key.clone(), TEST_TTL, None).await.unwrap();
                lru.set(key, key.clone(), TEST_TTL, None).await.unwrap();
                assert!(time_based.size().await <= capacity);
                assert!(lru.size().await <= capacity);
            }
        });

        prop_assert!(!time_based.is_sweeping());
    }
}
