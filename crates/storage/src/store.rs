//! Store: the committed baseline shared by all transactions
//!
//! This module implements the single shared key → value mapping using:
//! - `FxHashMap<Key, Value>` for unordered point storage
//! - `parking_lot::RwLock` for thread-safe access
//!
//! # Design Notes
//!
//! - **Guarded mutation only**: the baseline changes exclusively through
//!   [`Store::apply_guarded`] and [`Store::commit_all`], which compare the
//!   current value against the value the committing transaction observed.
//! - **Linearized commits**: `commit_all` holds the write lock for the whole
//!   batch, so concurrent commits never interleave their edits.
//! - **Partial application**: the first conflicting edit stops the replay,
//!   but edits applied before it stay applied. There is no undo.
//! - **No value index**: `count_equal` scans every entry (O(store size)).

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use txkv_core::{Edit, EditKind, Error, Key, Result, Value};

/// Result of replaying a batch of edits against the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyResult {
    /// Number of set edits applied
    pub sets_applied: usize,
    /// Number of unset edits applied
    pub unsets_applied: usize,
}

impl ApplyResult {
    /// Total number of edits applied
    pub fn total(&self) -> usize {
        self.sets_applied + self.unsets_applied
    }
}

/// Shared committed baseline
///
/// Thread-safe through `parking_lot::RwLock`. Create one per process (or per
/// test) with [`Store::new`]; independent stores never share state.
#[derive(Debug, Default)]
pub struct Store {
    data: RwLock<FxHashMap<Key, Value>>,
}

impl Store {
    /// Create a new empty Store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Store seeded with the given entries
    ///
    /// Later duplicates of a key overwrite earlier ones.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Point lookup, `None` if the key is absent
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    /// Point lookup that fails with `KeyNotFound` if the key is absent
    pub fn lookup(&self, key: &str) -> Result<Value> {
        self.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Point lookup that returns `default` if the key is absent
    pub fn lookup_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Count keys whose committed value equals `value`
    ///
    /// Scans the whole baseline.
    pub fn count_equal(&self, value: &str) -> usize {
        self.data.read().values().filter(|v| v.as_str() == value).count()
    }

    /// Number of committed keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Sorted copy of the committed baseline
    pub fn snapshot(&self) -> BTreeMap<Key, Value> {
        self.data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Apply one edit if its observed prior value still matches
    ///
    /// # Errors
    /// Returns `Error::TransactionConflict` and leaves the store unchanged if
    /// the current value differs from `edit.observed()`.
    pub fn apply_guarded(&self, edit: &Edit) -> Result<()> {
        let mut data = self.data.write();
        apply_locked(&mut data, edit)
    }

    /// Replay a transaction's edits in order
    ///
    /// The write lock is held for the entire batch. The first conflict aborts
    /// the replay and is returned; edits before it remain applied.
    pub fn commit_all(&self, edits: &[Edit]) -> Result<ApplyResult> {
        let mut data = self.data.write();
        let mut result = ApplyResult::default();

        for edit in edits {
            if let Err(e) = apply_locked(&mut data, edit) {
                tracing::debug!(
                    key = edit.key(),
                    applied = result.total(),
                    remaining = edits.len() - result.total(),
                    "Commit stopped at conflicting edit"
                );
                return Err(e);
            }
            match edit.kind() {
                EditKind::Set(_) => result.sets_applied += 1,
                EditKind::Unset => result.unsets_applied += 1,
            }
        }

        tracing::debug!(
            sets = result.sets_applied,
            unsets = result.unsets_applied,
            "Commit applied"
        );
        Ok(result)
    }
}

/// Compare-and-apply under an already held write lock
fn apply_locked(data: &mut FxHashMap<Key, Value>, edit: &Edit) -> Result<()> {
    let current = data.get(edit.key());
    if current != edit.observed() {
        return Err(Error::conflict(
            edit.key(),
            edit.observed().cloned(),
            current.cloned(),
        ));
    }

    match edit.kind() {
        EditKind::Set(value) => {
            data.insert(edit.key().to_string(), value.clone());
        }
        // Removing an absent key is a no-op
        EditKind::Unset => {
            data.remove(edit.key());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Store: Send, Sync);

    fn some(v: &str) -> Option<Value> {
        Some(v.to_string())
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_lookup_missing_key() {
        let store = Store::new();
        let err = store.lookup("missing").unwrap_err();
        assert_eq!(err, Error::key_not_found("missing"));
        assert_eq!(store.lookup_or("missing", "fallback"), "fallback");
    }

    #[test]
    fn test_with_entries() {
        let store = Store::with_entries([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("a").unwrap(), "3");
        assert_eq!(store.lookup_or("b", "x"), "2");
    }

    #[test]
    fn test_count_equal() {
        let store = Store::with_entries([("a", "42"), ("b", "42"), ("c", "7")]);
        assert_eq!(store.count_equal("42"), 2);
        assert_eq!(store.count_equal("7"), 1);
        assert_eq!(store.count_equal("nope"), 0);
    }

    #[test]
    fn test_apply_guarded_set_new_key() {
        let store = Store::new();
        store.apply_guarded(&Edit::set("k", "v", None)).unwrap();
        assert_eq!(store.get("k"), some("v"));
    }

    #[test]
    fn test_apply_guarded_overwrite_with_matching_prior() {
        let store = Store::with_entries([("k", "old")]);
        store.apply_guarded(&Edit::set("k", "new", some("old"))).unwrap();
        assert_eq!(store.get("k"), some("new"));
    }

    #[test]
    fn test_apply_guarded_conflict_leaves_store_unchanged() {
        let store = Store::with_entries([("k", "current")]);
        let err = store
            .apply_guarded(&Edit::set("k", "new", some("stale")))
            .unwrap_err();
        assert_eq!(err, Error::conflict("k", some("stale"), some("current")));
        assert_eq!(store.get("k"), some("current"));
    }

    #[test]
    fn test_apply_guarded_conflict_on_created_key() {
        // Observed absent, but someone created it since
        let store = Store::with_entries([("k", "v")]);
        let err = store.apply_guarded(&Edit::set("k", "w", None)).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_apply_guarded_unset() {
        let store = Store::with_entries([("k", "v")]);
        store.apply_guarded(&Edit::unset("k", some("v"))).unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_apply_guarded_unset_absent_key_is_noop() {
        let store = Store::new();
        store.apply_guarded(&Edit::unset("k", None)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_guarded_unset_conflict_on_deleted_key() {
        let store = Store::new();
        let err = store.apply_guarded(&Edit::unset("k", some("v"))).unwrap_err();
        assert_eq!(err, Error::conflict("k", some("v"), None));
    }

    #[test]
    fn test_commit_all_counts() {
        let store = Store::with_entries([("gone", "x")]);
        let edits = vec![
            Edit::set("a", "1", None),
            Edit::set("a", "2", some("1")),
            Edit::unset("gone", some("x")),
        ];
        let result = store.commit_all(&edits).unwrap();
        assert_eq!(result.sets_applied, 2);
        assert_eq!(result.unsets_applied, 1);
        assert_eq!(result.total(), 3);
        assert_eq!(store.get("a"), some("2"));
        assert_eq!(store.get("gone"), None);
    }

    #[test]
    fn test_commit_all_empty_batch() {
        let store = Store::new();
        let result = store.commit_all(&[]).unwrap();
        assert_eq!(result, ApplyResult::default());
    }

    #[test]
    fn test_commit_all_keeps_edits_before_conflict() {
        // Known limitation: no undo of edits applied before the conflict
        let store = Store::with_entries([("b", "theirs")]);
        let edits = vec![
            Edit::set("a", "1", None),
            Edit::set("b", "2", None),
            Edit::set("c", "3", None),
        ];
        let err = store.commit_all(&edits).unwrap_err();
        assert_eq!(err, Error::conflict("b", None, some("theirs")));
        assert_eq!(store.get("a"), some("1"));
        assert_eq!(store.get("b"), some("theirs"));
        assert_eq!(store.get("c"), None);
    }

    #[test]
    fn test_snapshot_is_sorted_copy() {
        let store = Store::with_entries([("b", "2"), ("a", "1")]);
        let snapshot = store.snapshot();
        store.apply_guarded(&Edit::set("c", "3", None)).unwrap();

        let keys: Vec<_> = snapshot.keys().cloned().collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(store.len(), 3);
    }
}
