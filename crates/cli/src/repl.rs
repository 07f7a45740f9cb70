//! REPL loop with rustyline.
//!
//! Interactive mode: banner, prompt, history.
//! Pipe mode: read lines from any `BufRead`, write one reply per command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::format::{format_error, format_output, format_parse_error, HELP};
use crate::parse::parse_line;
use crate::state::{Output, SessionState};

/// Interpreter settings resolved from the command line.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Print the help text before the first prompt (interactive mode only)
    pub banner: bool,
    /// Prompt prefix; `(txn)` is appended while a transaction is open
    pub prompt: String,
    /// Load and save line history in `~/.txkv_history`
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            banner: true,
            prompt: "txkv".to_string(),
            history: true,
        }
    }
}

impl ReplConfig {
    /// Create a ReplConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the banner is shown
    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }

    /// Set the prompt prefix
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set whether history is persisted
    pub fn with_history(mut self, history: bool) -> Self {
        self.history = history;
        self
    }
}

/// Outcome of feeding one line to the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Blank line, nothing to print
    Skip,
    /// Print the reply and keep reading
    Reply(String),
    /// Print the reply and stop
    Exit(String),
}

/// Parse and execute one line.
pub fn execute_line(state: &mut SessionState, line: &str) -> Step {
    let cmd = match parse_line(line) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return Step::Skip,
        Err(e) => return Step::Reply(format_parse_error(&e)),
    };

    match state.execute(cmd) {
        Ok(Output::Goodbye) => Step::Exit(format_output(&Output::Goodbye)),
        Ok(output) => Step::Reply(format_output(&output)),
        Err(e) => {
            tracing::debug!(error = %e, line = line.trim(), "Command failed");
            Step::Reply(format_error(&e))
        }
    }
}

/// Run in pipe mode: read lines from `input`, write replies to `output`.
///
/// Stops at END or end of input.
pub fn run_pipe<R: BufRead, W: Write>(
    state: &mut SessionState,
    input: R,
    mut output: W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match execute_line(state, &line) {
            Step::Skip => continue,
            Step::Reply(reply) => writeln!(output, "{}", reply)?,
            Step::Exit(reply) => {
                writeln!(output, "{}", reply)?;
                break;
            }
        }
    }
    output.flush()
}

/// Run the interactive REPL.
pub fn run_repl(state: &mut SessionState, config: &ReplConfig) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    let history_path = if config.history { history_file() } else { None };
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    if config.banner {
        println!("{}", HELP);
    }

    loop {
        let prompt = state.prompt(&config.prompt);
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match execute_line(state, trimmed) {
                    Step::Skip => {}
                    Step::Reply(reply) => println!("{}", reply),
                    Step::Exit(reply) => {
                        println!("{}", reply);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C — just show new prompt
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D — exit
                break;
            }
            Err(err) => return Err(err),
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
    Ok(())
}

fn history_file() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".txkv_history"))
}
