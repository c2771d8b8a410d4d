//! Property-Based Tests for the Map Module
//!
//! Uses proptest to verify the persistence and namespacing properties of the
//! map engine against the in-memory reference store.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::map::DatabaseMap;
use crate::store::MemoryStore;

// == Strategies ==
/// Generates valid map keys (non-empty, separator-free)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Generates stored values
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

/// Generates valid instance ids
fn id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

/// Generates a sequence of map operations for testing
#[derive(Debug, Clone)]
enum MapOp {
    Set { key: String, value: String },
    Delete { key: String },
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| MapOp::Set { key, value }),
        key_strategy().prop_map(|key| MapOp::Delete { key }),
    ]
}

fn apply(db: &mut DatabaseMap<String, MemoryStore>, ops: &[MapOp]) {
    for op in ops {
        match op {
            MapOp::Set { key, value } => db.set(key.clone(), value.clone()),
            MapOp::Delete { key } => {
                db.delete(key);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* key-value pair, setting then getting returns the stored value.
    #[test]
    fn prop_roundtrip(key in key_strategy(), value in value_strategy()) {
        let mut db = DatabaseMap::new("prop", MemoryStore::new());

        db.set(key.clone(), value.clone());

        prop_assert_eq!(db.get(&key), Some(&value), "Round-trip value mismatch");
    }

    // *For any* key that was set, deleting it makes it absent both in memory
    // and after reconstruction from the same store.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let store = MemoryStore::new();
        let mut db: DatabaseMap<String, _> = DatabaseMap::new("prop", store.clone());

        db.set(key.clone(), value);
        db.delete(&key);

        prop_assert!(!db.contains_key(&key));

        let reloaded: DatabaseMap<String, _> = DatabaseMap::new("prop", store);
        prop_assert!(!reloaded.contains_key(&key), "Delete must persist");
    }

    // *For any* sequence of operations, a fresh instance over the same store
    // holds exactly the entries the first instance holds.
    #[test]
    fn prop_reload_matches_memory(ops in prop::collection::vec(map_op_strategy(), 1..40)) {
        let store = MemoryStore::new();
        let mut db: DatabaseMap<String, _> = DatabaseMap::new("prop", store.clone());

        apply(&mut db, &ops);

        let expected: HashMap<String, String> = db
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let reloaded: DatabaseMap<String, _> = DatabaseMap::new("prop", store);
        let actual: HashMap<String, String> = reloaded
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        prop_assert_eq!(actual, expected, "Reloaded state diverged from memory");
    }

    // *For any* sequence of operations, write-through leaves nothing for
    // reconciliation to repair, and a repeated update writes nothing.
    #[test]
    fn prop_update_idempotent(ops in prop::collection::vec(map_op_strategy(), 1..40)) {
        let mut db = DatabaseMap::new("prop", MemoryStore::new());

        apply(&mut db, &ops);

        prop_assert_eq!(db.update(), 0, "Write-through should have persisted all entries");
        prop_assert_eq!(db.update(), 0, "Repeated update must be a no-op");
    }

    // *For any* two distinct ids sharing one store, each instance only ever
    // observes its own entries.
    #[test]
    fn prop_namespace_isolation(
        first_id in id_strategy(),
        second_id in id_strategy(),
        key in key_strategy(),
        first_value in value_strategy(),
        second_value in value_strategy(),
    ) {
        prop_assume!(first_id != second_id);

        let store = MemoryStore::new();
        let mut first: DatabaseMap<String, _> = DatabaseMap::new(first_id.clone(), store.clone());
        let mut second: DatabaseMap<String, _> = DatabaseMap::new(second_id, store.clone());

        first.set(key.clone(), first_value.clone());
        second.set(key.clone(), second_value);

        prop_assert_eq!(first.get(&key), Some(&first_value));

        let reloaded: DatabaseMap<String, _> = DatabaseMap::new(first_id, store);
        prop_assert_eq!(reloaded.get(&key), Some(&first_value), "Foreign namespace leaked in");
    }

    // *For any* sequence of sets with duplicate keys, iteration follows the
    // order of first insertion.
    #[test]
    fn prop_iteration_follows_insertion_order(
        ops in prop::collection::vec((key_strategy(), value_strategy()), 1..30)
    ) {
        let mut db = DatabaseMap::new("prop", MemoryStore::new());
        let mut expected_order: Vec<String> = Vec::new();

        for (key, value) in &ops {
            if !expected_order.contains(key) {
                expected_order.push(key.clone());
            }
            db.set(key.clone(), value.clone());
        }

        let actual_order: Vec<String> = db.keys().map(str::to_string).collect();
        prop_assert_eq!(actual_order, expected_order, "Iteration order mismatch");
    }
}
