//! Options loader for builder values and environment variables.
//!
//! Responsibilities:
//! - Provide a builder-pattern `OptionsLoader` merging explicit values with the environment.
//! - Validate attribute names and the help key before producing `Options`.
//!
//! Does NOT handle:
//! - Reading or writing option files (options are never serialized).
//! - Installing closures such as the binding toggle hook.
//!
//! Invariants / Assumptions:
//! - Builder values take precedence over environment variables.
//! - Empty or whitespace-only environment variables are treated as unset.

mod builder;
mod env;
mod error;

#[cfg(test)]
mod tests;

pub use builder::OptionsLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
