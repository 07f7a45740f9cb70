//! txkv CLI — line-oriented interpreter for the txkv store.
//!
//! - **REPL mode**: `txkv [flags]` with stdin on a TTY
//! - **Pipe mode**: `printf 'BEGIN\nSET a 1\nCOMMIT\n' | txkv`

use std::io::{self, IsTerminal};
use std::process;
use std::sync::Arc;

use txkv_cli::commands::build_cli;
use txkv_cli::{run_pipe, run_repl, ReplConfig, SessionState};
use txkv_storage::Store;

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_flag("verbose"));

    let prompt = matches
        .get_one::<String>("prompt")
        .cloned()
        .unwrap_or_else(|| "txkv".to_string());
    let config = ReplConfig::new()
        .with_banner(!matches.get_flag("no-banner"))
        .with_history(!matches.get_flag("no-history"))
        .with_prompt(prompt);

    let mut state = SessionState::new(Arc::new(Store::new()));

    if io::stdin().is_terminal() {
        if let Err(e) = run_repl(&mut state, &config) {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        if let Err(e) = run_pipe(&mut state, stdin.lock(), stdout.lock()) {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}
