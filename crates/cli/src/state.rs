//! Session wrapper for the interpreter.
//!
//! Holds the shared store and a `Session` whose current transaction is either
//! live or the inactive placeholder, and maps parsed commands onto it.

use std::sync::Arc;

use txkv_concurrency::Session;
use txkv_core::{Error, Result, Value};
use txkv_storage::Store;

use crate::parse::Command;

/// Successful result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Plain acknowledgement
    Ok,
    /// A buffered SET
    Assigned { key: String, value: Value },
    /// A GET that found a value
    Value(Value),
    /// A GET on an absent key
    Null,
    /// A NUMEQUALTO result
    Count(usize),
    /// The help text was requested
    Help,
    /// END was issued
    Goodbye,
}

/// Wraps the session and tracks whether a transaction is open.
pub struct SessionState {
    session: Session,
}

impl SessionState {
    /// Create an inactive SessionState over `store`.
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            session: Session::new(store),
        }
    }

    /// Execute a command against the current transaction.
    ///
    /// COMMIT ends the transaction on success; ROLLBACK keeps it open.
    /// A conflicting COMMIT leaves the transaction open with its edits.
    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::Begin => {
                self.session.begin();
                Ok(Output::Ok)
            }
            Command::Set { key, value } => {
                self.session.transaction().set(&key, &value)?;
                Ok(Output::Assigned { key, value })
            }
            Command::Get { key } => match self.session.transaction().get(&key) {
                Ok(value) => Ok(Output::Value(value)),
                Err(Error::KeyNotFound(_)) => Ok(Output::Null),
                Err(e) => Err(e),
            },
            Command::Unset { key } => {
                self.session.transaction().unset(&key)?;
                Ok(Output::Ok)
            }
            Command::NumEqualTo { value } => {
                let count = self.session.transaction().number_of_keys_with_value(&value)?;
                Ok(Output::Count(count))
            }
            Command::Commit => {
                let applied = self.session.transaction().commit()?;
                tracing::debug!(applied = applied.total(), "COMMIT");
                self.session.end();
                Ok(Output::Ok)
            }
            Command::Rollback => {
                self.session.transaction().rollback()?;
                Ok(Output::Ok)
            }
            Command::Help => Ok(Output::Help),
            Command::End => Ok(Output::Goodbye),
        }
    }

    /// Whether a transaction is currently active.
    pub fn in_transaction(&self) -> bool {
        self.session.is_active()
    }

    /// Store shared by this session.
    pub fn store(&self) -> &Arc<Store> {
        self.session.store()
    }

    /// Generate the REPL prompt string.
    pub fn prompt(&self, base: &str) -> String {
        if self.in_transaction() {
            format!("{}(txn)> ", base)
        } else {
            format!("{}> ", base)
        }
    }
}
