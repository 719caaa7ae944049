//! webhotkeys CLI - drive the hotkeys engine from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Install logging on stderr.
//! - Build the hotkeys options and run the selected command.
//!
//! Does NOT handle:
//! - Matching or registration logic (see `crates/hotkeys`).
//!
//! Invariants:
//! - Results go to stdout; logs, warnings and errors go to stderr.
//! - Command-line options beat `WEBHOTKEYS_*` environment variables.

mod args;
mod commands;
mod dispatch;
mod error;
mod formatters;

use args::{Cli, LogFormat};
use clap::Parser;
use dispatch::run_command;
use error::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}
