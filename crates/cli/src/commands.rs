//! Clap command definition.

use clap::{Arg, ArgAction, Command};

/// Build the command-line interface.
pub fn build_cli() -> Command {
    Command::new("txkv")
        .about("Interactive transactional key-value store")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log transaction activity to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-banner")
                .long("no-banner")
                .help("Do not print the help text on startup")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-history")
                .long("no-history")
                .help("Do not load or save line history")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prompt")
                .long("prompt")
                .help("Prompt prefix (default: txkv)")
                .default_value("txkv"),
        )
}
