//! Concurrency layer for txkv
//!
//! This crate implements optimistic concurrency control (OCC) with:
//! - Transaction: pending write/delete overlay over the committed store
//! - Observed-value capture at every set/unset, validated at commit time
//! - Session: tagged active/inactive state for callers that drive a
//!   begin/commit/rollback cycle

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod transaction;

pub use session::{Inactive, Session, TransactionOps};
pub use transaction::{PendingOperations, Transaction, TransactionExt};
