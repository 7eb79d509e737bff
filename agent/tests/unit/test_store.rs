//! Log store unit tests

use std::collections::HashSet;

use autodeploy::models::log_entry::Severity;
use autodeploy::store::log_store::LogStore;
use crate::is_clock_string;

#[test]
fn test_store_starts_empty() {
    let store = LogStore::new();
    assert!(store.is_empty());
    assert!(store.read_all().is_empty());
}

#[test]
fn test_append_returns_stored_entry() {
    let store = LogStore::new();
    let entry = store.append("Verifying build integrity...", Severity::Warning);

    assert_eq!(store.read_all(), vec![entry.clone()]);
    assert_eq!(entry.severity, Severity::Warning);
    assert!(is_clock_string(&entry.timestamp));
}

#[test]
fn test_ids_are_unique() {
    let store = LogStore::new();
    for i in 0..200 {
        store.append_info(format!("line {}", i));
    }

    let ids: HashSet<String> = store.read_all().into_iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_read_all_is_a_copy() {
    let store = LogStore::new();
    store.append_info("one");
    let before = store.read_all();
    store.append_info("two");

    assert_eq!(before.len(), 1);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_subscribers_receive_in_append_order() {
    let store = LogStore::new();
    let mut rx = store.subscribe();

    store.append_info("a");
    store.append("b", Severity::Success);

    assert_eq!(rx.recv().await.unwrap().message, "a");
    assert_eq!(rx.recv().await.unwrap().message, "b");
}
