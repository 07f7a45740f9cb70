//! Core types for txkv
//!
//! This crate defines the foundational types shared by every layer:
//! - Key / Value: string-keyed, string-valued pairs
//! - Edit: immutable record of one buffered mutation, replayed at commit
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edit;
pub mod error;
pub mod types;

pub use edit::{Edit, EditKind};
pub use error::{Error, Result};
pub use types::{Key, Value};
