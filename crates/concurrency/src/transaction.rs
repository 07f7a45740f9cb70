//! Transaction overlay for OCC
//!
//! This module implements the per-session transaction. A Transaction tracks
//! pending writes and deletes in a flat overlay and records every mutation as
//! an [`Edit`] carrying the value it observed, so the store can detect stale
//! writes when the edits are replayed at commit.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use txkv_core::{Edit, Error, Key, Result, Value};
use txkv_storage::{ApplyResult, Store};

/// Summary of pending operations that would be discarded on rollback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingOperations {
    /// Number of keys with a pending set
    pub sets: usize,
    /// Number of keys with a pending unset
    pub unsets: usize,
}

impl PendingOperations {
    /// Total number of keys touched
    pub fn total(&self) -> usize {
        self.sets + self.unsets
    }

    /// Check if there are no pending operations
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Extension trait for opening transactions on a shared store
pub trait TransactionExt {
    /// Allocate a new transaction bound to this store
    fn begin(&self) -> Transaction;
}

impl TransactionExt for Arc<Store> {
    fn begin(&self) -> Transaction {
        Transaction::new(Arc::clone(self))
    }
}

/// Transaction context with a flat write/delete overlay
///
/// # Read-Your-Writes Semantics
///
/// When reading a key, the transaction checks in order:
/// 1. **pending_deletes**: key is absent
/// 2. **pending_writes**: returns the uncommitted value
/// 3. **store**: returns the committed value
///
/// A key is never in both `pending_writes` and `pending_deletes`.
///
/// # Conflict Capture
///
/// `set` and `unset` compute the value visible to this transaction *before*
/// touching the overlay and store it in the edit. For the first touch of a key
/// that value comes from the store; later touches observe this transaction's
/// own earlier write, which is exactly what the store holds once the earlier
/// edit has been replayed. Only a store change made by someone else can
/// therefore fail the replay.
///
/// # Lifecycle
///
/// There is no terminal state. `commit` (on success) and `rollback` clear the
/// overlay and the same instance can run another cycle.
#[derive(Debug)]
pub struct Transaction {
    store: Arc<Store>,
    pending_writes: FxHashMap<Key, Value>,
    pending_deletes: FxHashSet<Key>,
    edits: Vec<Edit>,
}

impl Transaction {
    /// Create an empty transaction over `store`
    pub fn new(store: Arc<Store>) -> Self {
        tracing::trace!("Transaction begun");
        Self {
            store,
            pending_writes: FxHashMap::default(),
            pending_deletes: FxHashSet::default(),
            edits: Vec::new(),
        }
    }

    /// Store this transaction commits into
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    // === Read Operations ===

    /// Value visible to this transaction, `None` if absent
    pub fn observe(&self, key: &str) -> Option<Value> {
        if self.pending_deletes.contains(key) {
            return None;
        }
        if let Some(value) = self.pending_writes.get(key) {
            return Some(value.clone());
        }
        self.store.get(key)
    }

    /// Get a value from the transaction's view
    ///
    /// # Errors
    /// Returns `Error::KeyNotFound` if the key is absent or pending unset.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.observe(key).ok_or_else(|| Error::key_not_found(key))
    }

    /// Get a value from the transaction's view, or `default` if absent
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.observe(key).unwrap_or_else(|| default.into())
    }

    /// Count keys whose visible value equals `value`
    ///
    /// Starts from the store's count, then corrects for every key in the
    /// overlay: a pending set or unset hides the committed value of its key,
    /// and a pending set contributes its own value.
    pub fn number_of_keys_with_value(&self, value: &str) -> usize {
        let committed = self.store.count_equal(value);

        let mut added = 0;
        let mut hidden = 0;
        for (key, pending) in &self.pending_writes {
            if pending == value {
                added += 1;
            }
            if self.store.get(key).as_deref() == Some(value) {
                hidden += 1;
            }
        }
        for key in &self.pending_deletes {
            if self.store.get(key).as_deref() == Some(value) {
                hidden += 1;
            }
        }

        // A commit landing between the reads above can make `hidden` outrun
        // `committed`
        (committed + added).saturating_sub(hidden)
    }

    // === Write Operations ===

    /// Buffer a write
    ///
    /// Not visible to other transactions until commit.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let observed = self.observe(&key);

        self.edits.push(Edit::set(key.clone(), value.clone(), observed));
        self.pending_deletes.remove(&key);
        self.pending_writes.insert(key, value);
    }

    /// Buffer a delete
    ///
    /// Reading the key in this transaction fails with `KeyNotFound` until
    /// it is set again.
    pub fn unset(&mut self, key: impl Into<Key>) {
        let key = key.into();
        let observed = self.observe(&key);

        self.edits.push(Edit::unset(key.clone(), observed));
        self.pending_writes.remove(&key);
        self.pending_deletes.insert(key);
    }

    // === Commit / Rollback ===

    /// Replay the edit log against the store
    ///
    /// On success the overlay is cleared. On `TransactionConflict` the error
    /// is returned and the overlay is left as it was; edits replayed before
    /// the conflicting one stay applied to the store.
    pub fn commit(&mut self) -> Result<ApplyResult> {
        match self.store.commit_all(&self.edits) {
            Ok(result) => {
                self.clear();
                Ok(result)
            }
            Err(e) => {
                tracing::debug!(error = %e, pending = self.edits.len(), "Commit rejected");
                Err(e)
            }
        }
    }

    /// Discard the overlay without touching the store
    pub fn rollback(&mut self) {
        tracing::trace!(discarded = self.edits.len(), "Transaction rolled back");
        self.clear();
    }

    // === Introspection ===

    /// Edits in issue order
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Summary of the pending overlay
    pub fn pending(&self) -> PendingOperations {
        PendingOperations {
            sets: self.pending_writes.len(),
            unsets: self.pending_deletes.len(),
        }
    }

    /// Check if nothing has been issued since the last commit/rollback
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    fn clear(&mut self) {
        self.pending_writes.clear();
        self.pending_deletes.clear();
        self.edits.clear();
    }
}
