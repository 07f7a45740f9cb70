//! Storage layer for txkv
//!
//! This crate implements the committed baseline shared by all transactions:
//! - Store: FxHashMap-based storage behind a `parking_lot::RwLock`
//! - Guarded point writes/deletes that fail on a stale observed value
//! - Batch replay of a transaction's edits under a single write lock
//! - Value-count aggregation (linear scan, no secondary index)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod store;

pub use store::{ApplyResult, Store};
