//! txkv CLI: line-oriented command interpreter over a transactional store.
//!
//! Two modes:
//! - **REPL mode**: interactive prompt with history (if stdin is a TTY)
//! - **Pipe mode**: `printf 'BEGIN\nSET a 1\n' | txkv`, replies only

pub mod commands;
pub mod format;
pub mod parse;
pub mod repl;
pub mod state;

pub use parse::{parse_line, Command, ParseError};
pub use repl::{run_pipe, run_repl, ReplConfig};
pub use state::{Output, SessionState};
