//! Error types for the hotkeys engine.
//!
//! Responsibilities:
//! - Define registration failures returned by `Hotkeys::register_binding`.
//! - Define selector and raw key event decoding errors.
//!
//! Does NOT handle:
//! - Unknown modifier warnings (see `webhotkeys_config::keybind::ParseWarning`).
//! - Scope resolution failures at trigger time; those only skip a candidate.

use thiserror::Error;
use webhotkeys_config::KeybindError;

/// Errors that prevent a binding from being registered.
///
/// A failed registration leaves no trace in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The key combination is empty or has no key token.
    #[error("Invalid key combination '{spec}': {source}")]
    InvalidCombination {
        spec: String,
        #[source]
        source: KeybindError,
    },

    /// A selector given as the action matched no element.
    #[error("Unknown action: selector '{selector}' matches no element")]
    ActionNotFound { selector: String },

    /// A selector given as the action could not be parsed.
    #[error("Invalid action selector: {0}")]
    InvalidSelector(#[from] SelectorError),
}

/// Errors produced while parsing a selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected '{found}' at position {position} in selector '{selector}'")]
    UnexpectedChar {
        found: char,
        position: usize,
        selector: String,
    },

    #[error("Unsupported pseudo-class ':{name}' in selector '{selector}'")]
    UnsupportedPseudoClass { name: String, selector: String },

    #[error("Unexpected end of selector '{selector}'")]
    UnexpectedEnd { selector: String },

    #[error("Unterminated attribute selector in '{selector}'")]
    Unterminated { selector: String },
}

/// Errors produced while decoding a raw key event.
#[derive(Error, Debug)]
pub enum RawEventError {
    /// The JSON text is malformed or has wrongly typed fields.
    #[error("Malformed key event JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither `key` nor `code` was present.
    #[error("Key event has neither 'key' nor 'code'")]
    MissingKey,
}
