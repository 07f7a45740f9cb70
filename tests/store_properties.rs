//! Store-level properties through the public facade
//!
//! One test per guarantee the store makes to its callers:
//! read-after-commit, isolation, rollback, first-committer-wins, unset
//! visibility, overlay-aware counting and the session placeholder.

use std::sync::Arc;

use proptest::prelude::*;
use txkv::{Error, Session, Store, TransactionExt};

fn new_store() -> Arc<Store> {
    Arc::new(Store::new())
}

proptest! {
    #[test]
    fn committed_value_is_read_by_fresh_transaction(key in "[a-z]{1,8}", value in "[a-z0-9]{0,8}") {
        let store = new_store();
        let mut txn = store.begin();
        txn.set(key.as_str(), value.as_str());
        txn.commit().unwrap();

        prop_assert_eq!(store.begin().get(&key).unwrap(), value);
    }

    #[test]
    fn rollback_restores_prior_view(key in "[a-z]{1,8}", before in "[a-z]{1,4}", after in "[a-z]{1,4}") {
        let store = Arc::new(Store::with_entries([(key.clone(), before.clone())]));
        let mut txn = store.begin();
        txn.set(key.as_str(), after.as_str());
        txn.rollback();

        prop_assert_eq!(store.get(&key), Some(before.clone()));
        prop_assert_eq!(txn.get(&key).unwrap(), before);
    }
}

#[test]
fn test_isolation_until_commit() {
    let store = new_store();
    let mut t1 = store.begin();
    let t2 = store.begin();

    t1.set("k", "v");
    assert!(t2.get("k").unwrap_err().is_key_not_found());

    t1.commit().unwrap();
    assert_eq!(t2.get("k").unwrap(), "v");
}

#[test]
fn test_occ_conflict_and_winner_visible() {
    let store = new_store();
    let mut t1 = store.begin();
    let mut t2 = store.begin();

    t1.set("k", "first");
    t2.set("k", "second");
    t1.commit().unwrap();

    assert!(matches!(t2.commit(), Err(Error::TransactionConflict { .. })));
    assert_eq!(store.begin().get("k").unwrap(), "first");
}

#[test]
fn test_unset_visibility() {
    let store = new_store();
    let mut txn = store.begin();
    txn.set("k", "v");
    txn.unset("k");
    assert!(txn.get("k").unwrap_err().is_key_not_found());

    txn.commit().unwrap();
    assert_eq!(store.get("k"), None);
}

#[test]
fn test_count_without_double_counting() {
    let store = Arc::new(Store::with_entries([("a", "42"), ("b", "42"), ("c", "7")]));
    let mut txn = store.begin();
    txn.set("a", "42");
    txn.set("d", "42");
    txn.unset("b");
    txn.set("c", "42");

    // a (rewritten, same value), c (overwritten), d (new); b hidden
    assert_eq!(txn.number_of_keys_with_value("42"), 3);
    assert_eq!(txn.number_of_keys_with_value("7"), 0);
    assert_eq!(store.count_equal("42"), 2);
}

#[test]
fn test_session_placeholder_before_begin() {
    let mut session = Session::new(new_store());
    assert_eq!(
        session.transaction().get("k").unwrap_err(),
        Error::NoActiveTransaction
    );

    session.begin();
    session.transaction().set("k", "v").unwrap();
    session.transaction().commit().unwrap();
    session.end();

    assert_eq!(
        session.transaction().commit().unwrap_err(),
        Error::NoActiveTransaction
    );
    assert_eq!(session.store().get("k").as_deref(), Some("v"));
}
