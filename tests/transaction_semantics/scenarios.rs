//! Basic operations and nested transaction walkthroughs

use crate::get;
use layerkv::TransactionalStore;

fn setup() -> TransactionalStore {
    TransactionalStore::new()
}

#[test]
fn test_basic_operations() {
    let mut kvs = setup();
    kvs.set("x", "10");
    assert_eq!(get(&kvs, "x").as_deref(), Some("10"));

    kvs.set("x", "20");
    assert_eq!(get(&kvs, "x").as_deref(), Some("20"));

    kvs.delete("x");
    assert_eq!(get(&kvs, "x"), None);
}

#[test]
fn test_commit_changes_persist() {
    let mut kvs = setup();
    kvs.begin();
    kvs.set("y", "50");
    assert_eq!(get(&kvs, "y").as_deref(), Some("50"));

    assert!(kvs.commit());
    assert_eq!(get(&kvs, "y").as_deref(), Some("50"));

    // Nothing left to roll back
    assert!(!kvs.rollback());
    assert_eq!(get(&kvs, "y").as_deref(), Some("50"));
}

#[test]
fn test_rollback_discards_changes() {
    let mut kvs = setup();
    kvs.begin();
    kvs.set("z", "30");
    assert_eq!(get(&kvs, "z").as_deref(), Some("30"));

    assert!(kvs.rollback());
    assert_eq!(get(&kvs, "z"), None);
}

#[test]
fn test_nested_transactions_merge() {
    let mut kvs = setup();
    kvs.begin();
    kvs.set("a", "5");
    assert_eq!(get(&kvs, "a").as_deref(), Some("5"));

    kvs.begin();
    kvs.set("a", "15");
    assert_eq!(get(&kvs, "a").as_deref(), Some("15"));

    assert!(kvs.commit()); // inner merges into outer
    assert_eq!(get(&kvs, "a").as_deref(), Some("15"));

    assert!(kvs.commit()); // outer merges into base
    assert_eq!(get(&kvs, "a").as_deref(), Some("15"));
}

#[test]
fn test_nested_transactions_rollback() {
    let mut kvs = setup();
    kvs.begin();
    kvs.set("b", "100");
    assert_eq!(get(&kvs, "b").as_deref(), Some("100"));

    kvs.begin();
    kvs.set("b", "200");
    assert_eq!(get(&kvs, "b").as_deref(), Some("200"));

    assert!(kvs.rollback());
    assert_eq!(get(&kvs, "b").as_deref(), Some("100"));

    assert!(kvs.commit());
    assert_eq!(get(&kvs, "b").as_deref(), Some("100"));
}

#[test]
fn test_delete_within_transaction_rolled_back() {
    let mut kvs = setup();
    kvs.set("c", "500");
    assert_eq!(get(&kvs, "c").as_deref(), Some("500"));

    kvs.begin();
    kvs.delete("c");
    assert_eq!(get(&kvs, "c"), None);

    assert!(kvs.rollback());
    assert_eq!(get(&kvs, "c").as_deref(), Some("500"));
}

#[test]
fn test_commit_delete() {
    let mut kvs = setup();
    kvs.set("d", "900");
    assert_eq!(get(&kvs, "d").as_deref(), Some("900"));

    kvs.begin();
    kvs.delete("d");
    assert_eq!(get(&kvs, "d"), None);

    assert!(kvs.commit());
    assert_eq!(get(&kvs, "d"), None);
    assert!(kvs.committed().get("d").is_none());
}

#[test]
fn test_rollback_with_no_transaction() {
    let mut kvs = setup();
    assert!(!kvs.rollback());
}

#[test]
fn test_commit_with_no_transaction() {
    let mut kvs = setup();
    assert!(!kvs.commit());
}

#[test]
fn test_rollback_does_not_affect_parent() {
    let mut kvs = setup();
    kvs.set("e", "1000");
    assert_eq!(get(&kvs, "e").as_deref(), Some("1000"));

    kvs.begin();
    kvs.set("e", "2000");
    assert_eq!(get(&kvs, "e").as_deref(), Some("2000"));

    kvs.begin();
    kvs.set("e", "3000");
    assert_eq!(get(&kvs, "e").as_deref(), Some("3000"));

    assert!(kvs.rollback());
    assert_eq!(get(&kvs, "e").as_deref(), Some("2000"));

    assert!(kvs.rollback());
    assert_eq!(get(&kvs, "e").as_deref(), Some("1000"));
}

#[test]
fn test_commit_matches_direct_application() {
    let mut direct = setup();
    let mut transacted = setup();
    for s in [&mut direct, &mut transacted] {
        s.set("keep", "1");
        s.set("drop", "2");
    }

    direct.set("keep", "changed");
    direct.delete("drop");
    direct.set("new", "3");

    transacted.begin();
    transacted.set("keep", "changed");
    transacted.delete("drop");
    transacted.set("new", "3");
    assert!(transacted.commit());

    assert_eq!(direct.snapshot(), transacted.snapshot());
    assert_eq!(direct.committed(), transacted.committed());
}
