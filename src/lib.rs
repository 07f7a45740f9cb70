//! txkv - in-memory transactional key-value store
//!
//! Clients open isolated transactions over one shared [`Store`], read and
//! write against the committed baseline plus their own pending edits, and
//! then commit (replaying the edits with optimistic conflict detection) or
//! roll back.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use txkv::{Store, TransactionExt};
//!
//! let store = Arc::new(Store::new());
//!
//! let mut txn = store.begin();
//! txn.set("hello", "world");
//! txn.commit().unwrap();
//!
//! assert_eq!(store.begin().get("hello").unwrap(), "world");
//! ```
//!
//! # Architecture
//!
//! - `txkv-core`: keys, values, edit records, errors
//! - `txkv-storage`: the committed baseline and its guarded mutation path
//! - `txkv-concurrency`: transactions and sessions

pub use txkv_concurrency::{
    Inactive, PendingOperations, Session, Transaction, TransactionExt, TransactionOps,
};
pub use txkv_core::{Edit, EditKind, Error, Key, Result, Value};
pub use txkv_storage::{ApplyResult, Store};
