//! Session state for begin/commit/rollback cycles
//!
//! Callers that drive transactions from a command stream need an explicit
//! "no transaction yet" state. Instead of checking for one before every call,
//! the session hands out a [`TransactionOps`] object: either the live
//! [`Transaction`] or the [`Inactive`] placeholder, whose every operation
//! fails with `Error::NoActiveTransaction`.

use std::sync::Arc;

use txkv_core::{Error, Result, Value};
use txkv_storage::{ApplyResult, Store};

use crate::transaction::{Transaction, TransactionExt};

/// Transaction operations as seen by a session
pub trait TransactionOps {
    /// Get a value, `KeyNotFound` if absent
    fn get(&self, key: &str) -> Result<Value>;

    /// Buffer a write
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Buffer a delete
    fn unset(&mut self, key: &str) -> Result<()>;

    /// Count keys whose visible value equals `value`
    fn number_of_keys_with_value(&self, value: &str) -> Result<usize>;

    /// Replay pending edits into the store
    fn commit(&mut self) -> Result<ApplyResult>;

    /// Discard pending edits
    fn rollback(&mut self) -> Result<()>;
}

impl TransactionOps for Transaction {
    fn get(&self, key: &str) -> Result<Value> {
        Transaction::get(self, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Transaction::set(self, key, value);
        Ok(())
    }

    fn unset(&mut self, key: &str) -> Result<()> {
        Transaction::unset(self, key);
        Ok(())
    }

    fn number_of_keys_with_value(&self, value: &str) -> Result<usize> {
        Ok(Transaction::number_of_keys_with_value(self, value))
    }

    fn commit(&mut self) -> Result<ApplyResult> {
        Transaction::commit(self)
    }

    fn rollback(&mut self) -> Result<()> {
        Transaction::rollback(self);
        Ok(())
    }
}

/// Placeholder used while no transaction is active
#[derive(Debug, Clone, Copy, Default)]
pub struct Inactive;

impl TransactionOps for Inactive {
    fn get(&self, _key: &str) -> Result<Value> {
        Err(Error::NoActiveTransaction)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::NoActiveTransaction)
    }

    fn unset(&mut self, _key: &str) -> Result<()> {
        Err(Error::NoActiveTransaction)
    }

    fn number_of_keys_with_value(&self, _value: &str) -> Result<usize> {
        Err(Error::NoActiveTransaction)
    }

    fn commit(&mut self) -> Result<ApplyResult> {
        Err(Error::NoActiveTransaction)
    }

    fn rollback(&mut self) -> Result<()> {
        Err(Error::NoActiveTransaction)
    }
}

#[derive(Debug)]
enum Slot {
    Inactive(Inactive),
    Active(Transaction),
}

/// One line of control over a shared store
///
/// Starts inactive. `begin` installs a fresh transaction (dropping any
/// current one along with its overlay); `end` returns to inactive.
#[derive(Debug)]
pub struct Session {
    store: Arc<Store>,
    slot: Slot,
}

impl Session {
    /// Create an inactive session over `store`
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            slot: Slot::Inactive(Inactive),
        }
    }

    /// Store this session's transactions commit into
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Start a fresh transaction
    pub fn begin(&mut self) {
        self.slot = Slot::Active(self.store.begin());
    }

    /// Drop the current transaction, if any
    pub fn end(&mut self) {
        self.slot = Slot::Inactive(Inactive);
    }

    /// Whether a transaction is currently active
    pub fn is_active(&self) -> bool {
        matches!(self.slot, Slot::Active(_))
    }

    /// Current transaction, or the inactive placeholder
    pub fn transaction(&mut self) -> &mut dyn TransactionOps {
        match &mut self.slot {
            Slot::Inactive(inactive) => inactive,
            Slot::Active(txn) => txn,
        }
    }
}
