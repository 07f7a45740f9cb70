//! Line → Command parsing.
//!
//! Lines are tokenized shell-style with `shlex`, so quoted values may contain
//! whitespace. Command names are case-insensitive. Argument counts are checked
//! here, before any transaction state is consulted.

use thiserror::Error;

/// A parsed interpreter command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh transaction
    Begin,
    /// Buffer a write
    Set { key: String, value: String },
    /// Read a key
    Get { key: String },
    /// Buffer a delete
    Unset { key: String },
    /// Count keys holding a value
    NumEqualTo { value: String },
    /// Commit the current transaction
    Commit,
    /// Discard the current transaction's edits
    Rollback,
    /// Show the help text
    Help,
    /// Stop the interpreter
    End,
}

/// Errors produced while parsing a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Command name not recognised (stored upper-cased)
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    /// Wrong number of arguments for a known command
    #[error("Expected {expected} arguments but got {got}")]
    WrongArity { expected: usize, got: usize },

    /// Unbalanced quotes or a dangling escape
    #[error("Invalid quoting")]
    InvalidQuoting,
}

/// Parse one input line. Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let tokens = shlex::split(trimmed).ok_or(ParseError::InvalidQuoting)?;
    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let name = name.to_uppercase();
    let command = match name.as_str() {
        "BEGIN" => {
            arity(args, 0)?;
            Command::Begin
        }
        "SET" => {
            arity(args, 2)?;
            Command::Set {
                key: args[0].clone(),
                value: args[1].clone(),
            }
        }
        "GET" => {
            arity(args, 1)?;
            Command::Get {
                key: args[0].clone(),
            }
        }
        "UNSET" => {
            arity(args, 1)?;
            Command::Unset {
                key: args[0].clone(),
            }
        }
        "NUMEQUALTO" => {
            arity(args, 1)?;
            Command::NumEqualTo {
                value: args[0].clone(),
            }
        }
        "COMMIT" => {
            arity(args, 0)?;
            Command::Commit
        }
        "ROLLBACK" => {
            arity(args, 0)?;
            Command::Rollback
        }
        "HELP" => {
            arity(args, 0)?;
            Command::Help
        }
        "END" => {
            arity(args, 0)?;
            Command::End
        }
        _ => return Err(ParseError::UnknownCommand(name)),
    };

    Ok(Some(command))
}

fn arity(args: &[String], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::WrongArity {
            expected,
            got: args.len(),
        })
    }
}
