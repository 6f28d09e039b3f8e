//! Store Tests
//!
//! Tests verify:
//! - Single-key Add / Update / Get / Delete / Clear
//! - Accept/reject decisions and classification order
//! - Bulk rejection lists and store contents
//! - Concurrent access patterns

use std::sync::Arc;
use std::thread;

use psstore::store::{classify, decide, BulkRequest, InsertRequest, Mode, Store};
use psstore::StoreError;

fn entries<V: Clone>(pairs: &[(&str, V)]) -> Vec<InsertRequest<V>> {
    pairs
        .iter()
        .map(|(k, v)| InsertRequest::new(*k, v.clone()))
        .collect()
}

// =============================================================================
// Decision Tests
// =============================================================================

#[test]
fn test_decide_add() {
    assert!(decide(false, Mode::Add));
    assert!(!decide(true, Mode::Add));
}

#[test]
fn test_decide_update() {
    assert!(decide(true, Mode::Update));
    assert!(!decide(false, Mode::Update));
}

#[test]
fn test_classify_preserves_order() {
    let present = ["a", "b"];
    let checked = classify(
        entries(&[("a", 1), ("c", 2), ("b", 3), ("d", 4)]),
        Mode::Add,
        |k| present.contains(&k),
    );

    let keys: Vec<_> = checked.iter().map(|e| (e.key.as_str(), e.insert)).collect();
    assert_eq!(keys, vec![("a", false), ("c", true), ("b", false), ("d", true)]);
    assert_eq!(checked[1].value, 2);
}

#[test]
fn test_classify_update_mode() {
    let checked = classify(entries(&[("x", 1), ("y", 2)]), Mode::Update, |k| k == "y");

    assert!(!checked[0].insert);
    assert!(checked[1].insert);
}

// =============================================================================
// Single-key Operation Tests
// =============================================================================

#[test]
fn test_new_store_is_empty() {
    let store = Store::<i32>::new();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_add_and_get() {
    let store = Store::new();

    store.add("key1", 42).unwrap();

    assert_eq!(store.get("key1").unwrap(), 42);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_add_rejects_duplicate() {
    let store = Store::new();

    store.add("key1", 1).unwrap();
    let err = store.add("key1", 2).unwrap_err();

    assert!(matches!(err, StoreError::KeyExists { ref key } if key == "key1"));
    assert_eq!(store.get("key1").unwrap(), 1);
}

#[test]
fn test_get_nonexistent_key() {
    let store = Store::<String>::new();

    let err = store.get("missing").unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound { ref key } if key == "missing"));
}

#[test]
fn test_update_existing() {
    let store = Store::new();

    store.add("key1", "old".to_string()).unwrap();
    store.update("key1", "new".to_string()).unwrap();

    assert_eq!(store.get("key1").unwrap(), "new");
}

#[test]
fn test_update_requires_presence() {
    let store = Store::new();

    let err = store.update("ghost", 7).unwrap_err();

    assert!(matches!(err, StoreError::KeyNotFound { ref key } if key == "ghost"));
    assert!(!store.contains("ghost"));
    assert!(store.is_empty());
}

#[test]
fn test_update_with_unchanged_value_succeeds() {
    // Rewriting the same value is still an accepted update
    let store = Store::new();

    store.add("same", 5).unwrap();
    store.update("same", 5).unwrap();

    assert_eq!(store.get("same").unwrap(), 5);
}

#[test]
fn test_delete_then_get() {
    let store = Store::new();

    store.add("key1", 1).unwrap();
    store.delete("key1").unwrap();

    assert!(matches!(store.get("key1"), Err(StoreError::KeyNotFound { .. })));
    assert!(store.is_empty());
}

#[test]
fn test_delete_nonexistent_key() {
    let store = Store::<i32>::new();

    let err = store.delete("nope").unwrap_err();
    assert!(matches!(err, StoreError::KeyNotFound { ref key } if key == "nope"));
}

#[test]
fn test_add_after_delete() {
    let store = Store::new();

    store.add("key1", 1).unwrap();
    store.delete("key1").unwrap();
    store.add("key1", 2).unwrap();

    assert_eq!(store.get("key1").unwrap(), 2);
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear_empties_store() {
    let store = Store::new();

    store.add("a", 1).unwrap();
    store.add("b", 2).unwrap();
    store.clear().unwrap();

    assert!(store.is_empty());
    assert!(matches!(store.get("a"), Err(StoreError::KeyNotFound { .. })));
}

#[test]
fn test_clear_is_not_repeatable() {
    let store = Store::new();

    store.add("a", 1).unwrap();
    store.clear().unwrap();

    assert!(matches!(store.clear(), Err(StoreError::EmptyStore)));
}

#[test]
fn test_clear_on_fresh_store_fails() {
    let store = Store::<String>::new();
    assert!(matches!(store.clear(), Err(StoreError::EmptyStore)));
}

#[test]
fn test_store_usable_after_clear() {
    let store = Store::new();

    store.add("a", 1).unwrap();
    store.clear().unwrap();
    store.add("a", 2).unwrap();

    assert_eq!(store.get("a").unwrap(), 2);
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Bulk Operation Tests
// =============================================================================

#[test]
fn test_bulk_add_classification() {
    let store = Store::new();
    store.add("a", 10).unwrap();
    store.add("b", 20).unwrap();

    let reply = store.bulk_add(entries(&[("a", 1), ("c", 2), ("b", 3)]));

    assert_eq!(reply.rejects, entries(&[("a", 1), ("b", 3)]));
    assert_eq!(store.get("c").unwrap(), 2);
    assert_eq!(store.get("a").unwrap(), 10);
    assert_eq!(store.get("b").unwrap(), 20);
}

#[test]
fn test_bulk_add_all_accepted() {
    let store = Store::new();

    let reply = store.bulk_add(entries(&[("x", 1), ("y", 2)]));

    assert!(reply.all_applied());
    assert_eq!(store.keys(), vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn test_bulk_add_empty_request() {
    let store = Store::<i32>::new();

    let reply = store.bulk_add(Vec::new());

    assert!(reply.all_applied());
    assert!(store.is_empty());
}

#[test]
fn test_bulk_add_duplicate_keys_in_one_request() {
    // Both entries are classified against the same snapshot, so both are
    // accepted and the later one wins
    let store = Store::new();

    let reply = store.bulk_add(entries(&[("dup", 1), ("dup", 2)]));

    assert!(reply.all_applied());
    assert_eq!(store.get("dup").unwrap(), 2);
}

#[test]
fn test_bulk_update_classification() {
    let store = Store::new();
    store.add("a", "1".to_string()).unwrap();
    store.add("c", "3".to_string()).unwrap();

    let reply = store.bulk_update(entries(&[
        ("a", "one".to_string()),
        ("b", "two".to_string()),
        ("c", "three".to_string()),
        ("d", "four".to_string()),
    ]));

    assert_eq!(
        reply.rejects,
        entries(&[("b", "two".to_string()), ("d", "four".to_string())])
    );
    assert_eq!(store.get("a").unwrap(), "one");
    assert_eq!(store.get("c").unwrap(), "three");
    assert!(!store.contains("b"));
    assert!(!store.contains("d"));
}

#[test]
fn test_bulk_rejects_preserve_submission_order() {
    let store = Store::new();
    for key in ["k1", "k3", "k5", "k7"] {
        store.add(key, 0).unwrap();
    }

    let request = entries(&[
        ("k7", 7),
        ("k2", 2),
        ("k1", 1),
        ("k4", 4),
        ("k5", 5),
        ("k6", 6),
        ("k3", 3),
    ]);
    let reply = store.bulk_add(request);

    let rejected: Vec<_> = reply.rejects.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(rejected, vec!["k7", "k1", "k5", "k3"]);
}

#[test]
fn test_bulk_request_from_pairs() {
    let request: BulkRequest<i32> = vec![("a", 1), ("b", 2)].into_iter().collect();

    assert_eq!(request.entries, entries(&[("a", 1), ("b", 2)]));
    assert!(!request.compressed);
}

// =============================================================================
// Snapshot / Load Tests
// =============================================================================

#[test]
fn test_snapshot_and_load() {
    let source = Store::new();
    source.add("b", 2).unwrap();
    source.add("a", 1).unwrap();

    let snapshot = source.snapshot();
    assert_eq!(snapshot.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    let target = Store::new();
    assert_eq!(target.load(snapshot), 2);
    assert_eq!(target.get("a").unwrap(), 1);
    assert_eq!(target.get("b").unwrap(), 2);
}

// =============================================================================
// Domain Isolation
// =============================================================================

#[test]
fn test_domains_are_independent() {
    let ints = Store::<i32>::new();
    let strs = Store::<String>::new();

    ints.add("x", 1).unwrap();

    assert!(!strs.contains("x"));
    assert!(strs.is_empty());
    strs.add("x", "one".to_string()).unwrap();
    assert_eq!(ints.get("x").unwrap(), 1);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_adds_disjoint_keys() {
    let store = Arc::new(Store::new());

    let mut handles = vec![];
    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..250 {
                store.add(&format!("t{}_k{}", t, i), i).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let mut expected: Vec<String> = (0..8)
        .flat_map(|t| (0..250).map(move |i| format!("t{}_k{}", t, i)))
        .collect();
    expected.sort();
    assert_eq!(store.keys(), expected);
}

#[test]
fn test_concurrent_adds_same_key_single_winner() {
    let store = Arc::new(Store::new());

    let mut handles = vec![];
    for t in 0..8 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || store.add("contended", t).is_ok()));
    }

    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|won| *won)
        .count();

    assert_eq!(winners, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_bulk_adds_disjoint_batches() {
    let store = Arc::new(Store::new());

    let mut handles = vec![];
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let batch = (0..100)
                .map(|i| InsertRequest::new(format!("b{}_{}", t, i), i))
                .collect();
            store.bulk_add(batch)
        }));
    }

    for handle in handles {
        assert!(handle.join().unwrap().all_applied());
    }
    assert_eq!(store.len(), 400);
}

#[test]
fn test_concurrent_reads_during_writes() {
    let store = Arc::new(Store::new());
    for i in 0..100 {
        store.add(&format!("key{}", i), i).unwrap();
    }

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 100..200 {
                store.add(&format!("key{}", i), i).unwrap();
            }
        })
    };

    let mut readers = vec![];
    for _ in 0..4 {
        let store = Arc::clone(&store);
        readers.push(thread::spawn(move || {
            for i in 0..100 {
                assert_eq!(store.get(&format!("key{}", i)).unwrap(), i);
            }
        }));
    }

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.len(), 200);
}
