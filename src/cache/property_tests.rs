//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the budget, accounting and eviction-order
//! guarantees of `BoundedCache` over arbitrary operation sequences.

use std::collections::HashMap;

use proptest::prelude::*;

use crate::cache::{BoundedCache, EntryWeight};

// == Test Configuration ==
const TEST_BUDGET: usize = 100;

/// Test value with an explicit weight.
#[derive(Debug, Clone, PartialEq)]
struct TestValue(usize);

impl EntryWeight for TestValue {
    fn weight(&self) -> usize {
        self.0
    }
}

// == Strategies ==
/// Keys drawn from a small fixed-length alphabet so collisions and
/// re-insertions actually happen, and every key weighs the same.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{4}".prop_map(|s| s)
}

/// Value weights small enough that no single entry exceeds the budget.
fn value_strategy() -> impl Strategy<Value = TestValue> {
    (0usize..30).prop_map(TestValue)
}

/// A sequence of cache operations for model-based testing.
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: TestValue },
    Get { key: String },
    Evict { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Evict { key }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // After every operation the accounted weight stays within the budget,
    // and it equals the sum of the insert-time weights of the entries that
    // are actually present. Any drift between add-side and remove-side
    // accounting shows up here.
    #[test]
    fn prop_weight_accounting_is_exact(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut cache: BoundedCache<String, TestValue> = BoundedCache::new(TEST_BUDGET);
        // Weight recorded for the most recent accepted put per key
        let mut recorded: HashMap<String, usize> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    recorded.insert(key.clone(), key.weight() + value.weight());
                    cache.put(key, value);
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Evict { key } => {
                    cache.evict(&key);
                }
                CacheOp::Clear => {
                    cache.clear();
                }
            }

            prop_assert!(
                cache.weight() <= TEST_BUDGET,
                "weight {} exceeds budget {}",
                cache.weight(),
                TEST_BUDGET
            );

            let expected: usize = recorded
                .iter()
                .filter(|(key, _)| cache.contains(key))
                .map(|(_, weight)| *weight)
                .sum();
            prop_assert_eq!(cache.weight(), expected, "accounting drifted");
        }
    }

    // A sequence of puts whose cumulative weight fits the budget evicts
    // nothing: every inserted key stays retrievable.
    #[test]
    fn prop_puts_within_budget_remain_retrievable(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..10)
    ) {
        let total: usize = entries
            .iter()
            .map(|(key, value)| key.weight() + value.weight())
            .sum();
        prop_assume!(total <= TEST_BUDGET);

        let mut cache: BoundedCache<String, TestValue> = BoundedCache::new(TEST_BUDGET);
        for (key, value) in &entries {
            cache.put(key.clone(), value.clone());
        }

        for (key, value) in &entries {
            prop_assert_eq!(cache.get(key), Some(value.clone()), "key {} lost", key);
        }
        prop_assert_eq!(cache.weight(), total);
    }

    // With equal-weight entries the budget behaves like an entry-count
    // capacity; filling it and inserting one more must evict exactly the
    // least recently used key.
    #[test]
    fn prop_eviction_removes_least_recently_used(
        keys in prop::collection::hash_set("[a-z]{4}", 2..8),
        newcomer in "[0-9]{4}",
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        // Key weight 4 + value weight 16 = 20 units per entry
        let per_entry = 20;
        let mut cache: BoundedCache<String, TestValue> =
            BoundedCache::new(per_entry * keys.len());

        for key in &keys {
            cache.put(key.clone(), TestValue(16));
        }
        prop_assert_eq!(cache.len(), keys.len());

        cache.put(newcomer.clone(), TestValue(16));

        // Oldest key evicted, everything else intact
        prop_assert!(!cache.contains(&keys[0]), "LRU key {} survived", keys[0]);
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains(key), "key {} evicted out of order", key);
        }
        prop_assert!(cache.contains(&newcomer));
    }

    // A get refreshes recency, shifting the eviction victim to the next
    // least recently used entry.
    #[test]
    fn prop_get_protects_entry_from_eviction(
        keys in prop::collection::hash_set("[a-z]{4}", 3..8),
        newcomer in "[0-9]{4}",
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let per_entry = 20;
        let mut cache: BoundedCache<String, TestValue> =
            BoundedCache::new(per_entry * keys.len());

        for key in &keys {
            cache.put(key.clone(), TestValue(16));
        }

        // Rescue the would-be victim
        prop_assert!(cache.get(&keys[0]).is_some());

        cache.put(newcomer.clone(), TestValue(16));

        prop_assert!(cache.contains(&keys[0]), "refreshed key {} evicted", keys[0]);
        prop_assert!(!cache.contains(&keys[1]), "expected victim {} survived", keys[1]);
    }

    // An entry that cannot fit alone is rejected without disturbing the
    // cache.
    #[test]
    fn prop_oversized_put_is_a_noop(
        key in key_strategy(),
        value in value_strategy(),
        oversized_key in "[x-z]{4}",
        excess in 0usize..50,
    ) {
        let mut cache: BoundedCache<String, TestValue> = BoundedCache::new(TEST_BUDGET);
        cache.put(key.clone(), value);
        let weight_before = cache.weight();
        let len_before = cache.len();

        cache.put(oversized_key.clone(), TestValue(TEST_BUDGET + excess));

        prop_assert!(!cache.contains(&oversized_key));
        prop_assert_eq!(cache.weight(), weight_before);
        prop_assert_eq!(cache.len(), len_before);
    }

    // clear() always lands the cache back on zero.
    #[test]
    fn prop_clear_resets_to_empty(ops in prop::collection::vec(cache_op_strategy(), 0..40)) {
        let mut cache: BoundedCache<String, TestValue> = BoundedCache::new(TEST_BUDGET);
        let mut seen: Vec<String> = Vec::new();

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    seen.push(key.clone());
                    cache.put(key, value);
                }
                CacheOp::Get { key } => {
                    let _ = cache.get(&key);
                }
                CacheOp::Evict { key } => cache.evict(&key),
                CacheOp::Clear => cache.clear(),
            }
        }

        cache.clear();

        prop_assert_eq!(cache.weight(), 0);
        prop_assert!(cache.is_empty());
        for key in &seen {
            prop_assert_eq!(cache.get(key), None);
        }
    }
}
