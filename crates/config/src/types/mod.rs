//! Configuration types for webhotkeys.
//!
//! Responsibilities:
//! - Define the plain-data `Options` recognized by a hotkeys instance.
//! - Define `HintMode` for hint text placement.
//!
//! Does NOT handle:
//! - Loading or validating options (see `loader`).
//! - Closures such as the binding toggle hook (installed on the instance itself).

mod options;

pub use options::{HintMode, Options};
