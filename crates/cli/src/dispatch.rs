//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the hotkeys options from the environment and global flags.
//! - Route parsed CLI arguments to the command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//!
//! Invariants:
//! - Global flags are applied after the environment, so they win.

use anyhow::{Context, Result};
use webhotkeys_config::{HintMode, Options, OptionsLoader};

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    let options = build_options(&cli)?;
    match cli.command {
        Commands::Parse { specs, strict } => commands::parse::run(&specs, strict, cli.output),
        Commands::Simulate {
            binds,
            group,
            focus_input,
            keys,
        } => commands::simulate::run(
            options,
            &binds,
            group.as_deref(),
            focus_input,
            &keys,
            cli.output,
        ),
        Commands::List { binds, group } => {
            commands::list::run(options, &binds, group.as_deref(), cli.output)
        }
    }
}

fn build_options(cli: &Cli) -> Result<Options> {
    let mut loader = OptionsLoader::new()
        .from_env()
        .context("Failed to load options from environment")?;

    if let Some(name) = &cli.hint {
        let hint = HintMode::from_name(name)
            .with_context(|| format!("Invalid hint mode '{name}'. Valid options: title, text, off"))?;
        loader = loader.with_hint(hint);
    }
    if let Some(key) = &cli.help_key {
        loader = loader.with_help_key(key.clone());
    }
    if cli.no_help_key {
        loader = loader.with_grab_help_key(false);
    }

    loader.build().context("Invalid options")
}
