//! Error types for options loading.
//!
//! Responsibilities:
//! - Define error variants for every options loading failure.
//!
//! Does NOT handle:
//! - Key combination parse errors on their own (see `keybind`); they are wrapped here.
//!
//! Invariants:
//! - All error variants name the option or environment variable at fault.

use thiserror::Error;

use crate::keybind::KeybindError;

/// Errors that can occur while building `Options`.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid attribute name for {option}: '{name}'")]
    InvalidAttributeName { option: &'static str, name: String },

    #[error("Invalid help key '{key}': {source}")]
    InvalidHelpKey {
        key: String,
        #[source]
        source: KeybindError,
    },
}
