//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `--bind SPEC=HINT` values.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use clap::{Parser, Subcommand, ValueEnum};

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "webhotkeys-cli")]
#[command(about = "Parse key combinations and simulate hotkey dispatch", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  webhotkeys-cli parse Alt+Digit1 'Shift+?' Ctrl++\n  webhotkeys-cli simulate --bind 'Ctrl+s=Save' Ctrl+s F1\n  webhotkeys-cli simulate --bind 'Alt+Digit1=Inbox' '{\"code\":\"Digit1\",\"altKey\":true}'\n  webhotkeys-cli list --group Editing --bind 'Ctrl+c=Copy' --bind 'Ctrl+v=Paste'\n"
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Where element hints go (title, text, off); overrides WEBHOTKEYS_HINT_MODE
    #[arg(long, global = true, value_name = "MODE")]
    pub hint: Option<String>,

    /// Combination that shows the binding list; overrides WEBHOTKEYS_HELP_KEY
    #[arg(long, global = true, value_name = "SPEC")]
    pub help_key: Option<String>,

    /// Do not reserve the help key
    #[arg(long, global = true)]
    pub no_help_key: bool,

    /// Log line format on stderr (filter with RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse key combinations and show how they are looked up
    Parse {
        /// Combinations such as 'a', 'Alt+Digit1', 'Ctrl++'
        #[arg(required = true)]
        specs: Vec<String>,

        /// Reject unknown modifiers instead of ignoring them
        #[arg(long)]
        strict: bool,
    },

    /// Register bindings on an in-memory document and dispatch keys
    Simulate {
        /// Binding as SPEC=HINT (repeatable)
        #[arg(short, long = "bind", value_name = "SPEC=HINT", value_parser = parse_bind)]
        binds: Vec<BindArg>,

        /// Register the bindings into this group
        #[arg(short, long)]
        group: Option<String>,

        /// Focus a text input before dispatching
        #[arg(long)]
        focus_input: bool,

        /// Keys to dispatch: combinations or raw JSON keydown events
        #[arg(required = true, value_name = "KEY")]
        keys: Vec<String>,
    },

    /// Print the enabled binding list
    List {
        /// Binding as SPEC=HINT (repeatable)
        #[arg(short, long = "bind", value_name = "SPEC=HINT", value_parser = parse_bind)]
        binds: Vec<BindArg>,

        /// Register the bindings into this group
        #[arg(short, long)]
        group: Option<String>,
    },
}

/// One `--bind` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindArg {
    pub spec: String,
    pub hint: String,
}

/// Split `SPEC=HINT` at the first `=` that is not the key itself.
///
/// `=` is the key when it starts the value or follows a `+`, so
/// `Ctrl+==Zoom in` binds `Ctrl+=`. A value without a separator has no hint.
pub fn parse_bind(value: &str) -> Result<BindArg, String> {
    let separator = value
        .char_indices()
        .find(|&(i, c)| c == '=' && i > 0 && !value[..i].ends_with('+'))
        .map(|(i, _)| i);
    let (spec, hint) = match separator {
        Some(i) => (&value[..i], &value[i + 1..]),
        None => (value, ""),
    };
    if spec.trim().is_empty() {
        return Err(format!("binding '{value}' has no combination"));
    }
    Ok(BindArg {
        spec: spec.to_string(),
        hint: hint.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bind_splits_hint() {
        assert_eq!(
            parse_bind("Ctrl+s=Save all").unwrap(),
            BindArg {
                spec: "Ctrl+s".to_string(),
                hint: "Save all".to_string()
            }
        );
    }

    #[test]
    fn test_parse_bind_equals_key() {
        let bind = parse_bind("Ctrl+==Zoom in").unwrap();
        assert_eq!(bind.spec, "Ctrl+=");
        assert_eq!(bind.hint, "Zoom in");

        let bind = parse_bind("==Equals").unwrap();
        assert_eq!(bind.spec, "=");
        assert_eq!(bind.hint, "Equals");
    }

    #[test]
    fn test_parse_bind_without_hint() {
        let bind = parse_bind("F2").unwrap();
        assert_eq!(bind.spec, "F2");
        assert_eq!(bind.hint, "");
    }

    #[test]
    fn test_parse_bind_rejects_missing_spec() {
        assert!(parse_bind("").is_err());
        assert!(parse_bind(" =x").is_err());
    }
}
