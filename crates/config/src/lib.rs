//! Configuration and key combination handling for webhotkeys.
//!
//! This crate provides the key combination parser/renderer and the options
//! recognized by a hotkeys instance, with a loader that merges explicit
//! values and environment variables.

pub mod constants;
pub mod keybind;
mod loader;
pub mod types;

pub use keybind::{
    KeyDescriptor, KeyKind, KeybindError, Modifiers, ParseWarning, parse_combination,
    parse_strict, parse_with_warnings,
};
pub use loader::{ConfigError, OptionsLoader, env_var_or_none};
pub use types::{HintMode, Options};
