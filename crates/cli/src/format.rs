//! Output → reply line formatting.
//!
//! Every command produces exactly one reply; errors are prefixed with
//! `ERROR: `.

use txkv_core::Error;

use crate::parse::ParseError;
use crate::state::Output;

/// Marker printed for a GET on an absent key.
pub const NULL_MARKER: &str = "(NULL)";

/// Help text shown by HELP and as the interactive banner.
pub const HELP: &str = "\
Welcome to the txkv transactional key-value store!

You can use the following commands:

    BEGIN                start a new transaction
        SET <key> <value>    set a key to a value
        UNSET <key>          unset a key
        GET <key>            get the value associated with a key
        NUMEQUALTO <value>   count the keys associated with the given value
    COMMIT               commit the current transaction
    ROLLBACK             discard the changes of the current transaction
    HELP                 show this help message
    END                  end the program";

/// Format a successful output.
pub fn format_output(output: &Output) -> String {
    match output {
        Output::Ok => "OK".to_string(),
        Output::Assigned { key, value } => format!("{}={}", key, value),
        Output::Value(value) => value.clone(),
        Output::Null => NULL_MARKER.to_string(),
        Output::Count(n) => n.to_string(),
        Output::Help => HELP.to_string(),
        Output::Goodbye => "Good bye".to_string(),
    }
}

/// Format an execution error.
pub fn format_error(err: &Error) -> String {
    match err {
        Error::NoActiveTransaction => "ERROR: Enter BEGIN command to start".to_string(),
        Error::TransactionConflict { key, .. } => {
            format!("ERROR: Transaction conflict on key '{}'", key)
        }
        Error::KeyNotFound(key) => format!("ERROR: Key not found '{}'", key),
    }
}

/// Format a parse error.
pub fn format_parse_error(err: &ParseError) -> String {
    format!("ERROR: {}", err)
}
