//! Key and value types
//!
//! The store holds string keys mapped to string values. Absence is modelled
//! with `Option<Value>` throughout: `None` is the "no such key" sentinel that
//! conflict detection compares against.

/// Key of an entry in the store
pub type Key = String;

/// Value of an entry in the store
pub type Value = String;
