//! Error types for txkv
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{Key, Value};
use thiserror::Error;

/// Result type alias for txkv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for txkv
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Key is absent from the reader's view
    ///
    /// Also raised for keys hidden by a pending unset in the reading
    /// transaction.
    #[error("Key not found: {0:?}")]
    KeyNotFound(Key),

    /// The store no longer holds the value a transaction observed
    ///
    /// `None` on either side means the key did not exist.
    #[error("Transaction conflict on key {key:?}: expected {expected:?}, found {actual:?}")]
    TransactionConflict {
        /// The key whose guarded write failed
        key: Key,
        /// Value the transaction observed when it first touched the key
        expected: Option<Value>,
        /// Value currently held by the store
        actual: Option<Value>,
    },

    /// Operation issued on a session that has not begun a transaction
    #[error("No active transaction")]
    NoActiveTransaction,
}

impl Error {
    /// Create a KeyNotFound error
    pub fn key_not_found(key: impl Into<Key>) -> Self {
        Error::KeyNotFound(key.into())
    }

    /// Create a TransactionConflict error
    pub fn conflict(key: impl Into<Key>, expected: Option<Value>, actual: Option<Value>) -> Self {
        Error::TransactionConflict {
            key: key.into(),
            expected,
            actual,
        }
    }

    /// Check if this is a KeyNotFound error
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound(_))
    }

    /// Check if this is a TransactionConflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::TransactionConflict { .. })
    }

    /// Check if this is a NoActiveTransaction error
    pub fn is_no_active_transaction(&self) -> bool {
        matches!(self, Error::NoActiveTransaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_key_not_found() {
        let err = Error::key_not_found("hello");
        let msg = err.to_string();
        assert!(msg.contains("Key not found"));
        assert!(msg.contains("hello"));
    }

    #[test]
    fn test_error_display_conflict() {
        let err = Error::conflict("k", Some("old".to_string()), None);
        let msg = err.to_string();
        assert!(msg.contains("Transaction conflict"));
        assert!(msg.contains("old"));
        assert!(msg.contains("None"));
    }

    #[test]
    fn test_error_display_no_active_transaction() {
        let err = Error::NoActiveTransaction;
        assert_eq!(err.to_string(), "No active transaction");
    }

    #[test]
    fn test_predicates() {
        assert!(Error::key_not_found("k").is_key_not_found());
        assert!(!Error::key_not_found("k").is_conflict());
        assert!(Error::conflict("k", None, None).is_conflict());
        assert!(Error::NoActiveTransaction.is_no_active_transaction());
        assert!(!Error::NoActiveTransaction.is_key_not_found());
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
