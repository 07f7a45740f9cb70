//! Buffered mutation records
//!
//! Every `set`/`unset` issued inside a transaction produces one [`Edit`].
//! The transaction keeps them in issue order and the store replays them at
//! commit, checking each edit's observed prior value against its current
//! state before applying it.

use crate::types::{Key, Value};

/// What an edit does to its key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Write the given value
    Set(Value),
    /// Remove the key
    Unset,
}

/// Immutable record of one logical mutation
///
/// `observed` is the value the issuing transaction saw for the key at the
/// moment the edit was issued (`None` if the key did not exist). The store
/// only applies the edit if its current value still equals `observed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    key: Key,
    kind: EditKind,
    observed: Option<Value>,
}

impl Edit {
    /// Create a set edit
    pub fn set(key: impl Into<Key>, value: impl Into<Value>, observed: Option<Value>) -> Self {
        Self {
            key: key.into(),
            kind: EditKind::Set(value.into()),
            observed,
        }
    }

    /// Create an unset edit
    pub fn unset(key: impl Into<Key>, observed: Option<Value>) -> Self {
        Self {
            key: key.into(),
            kind: EditKind::Unset,
            observed,
        }
    }

    /// Key this edit targets
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Kind of mutation
    pub fn kind(&self) -> &EditKind {
        &self.kind
    }

    /// Prior value expected in the store at apply time
    pub fn observed(&self) -> Option<&Value> {
        self.observed.as_ref()
    }

    /// New value for a set, `None` for an unset
    pub fn new_value(&self) -> Option<&Value> {
        match &self.kind {
            EditKind::Set(value) => Some(value),
            EditKind::Unset => None,
        }
    }

    /// Check if this edit removes its key
    pub fn is_unset(&self) -> bool {
        matches!(self.kind, EditKind::Unset)
    }
}
