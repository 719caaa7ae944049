//! Environment variable parsing for options.
//!
//! Responsibilities:
//! - Read and parse `WEBHOTKEYS_*` environment variables.
//! - Apply them to an `OptionsLoader` for every option not already set.
//!
//! Does NOT handle:
//! - Building or validating the final `Options` (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid boolean or hint mode values return `ConfigError::InvalidValue`.

use super::builder::OptionsLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_GRAB_HELP_KEY, ENV_GROUP_ATTRIBUTE, ENV_HELP_KEY, ENV_HINT_MODE, ENV_MARKER_ATTRIBUTE,
    ENV_OBSERVE_MUTATIONS, ENV_REPLACE_ACCESS_KEYS,
};
use crate::types::HintMode;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            message: "must be true or false".to_string(),
        }),
    }
}

fn env_bool(var: &str) -> Result<Option<bool>, ConfigError> {
    env_var_or_none(var)
        .map(|value| parse_bool(var, &value))
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Options already set on the loader are left alone.
pub fn apply_env(loader: &mut OptionsLoader) -> Result<(), ConfigError> {
    if !loader.has_replace_access_keys() {
        loader.set_replace_access_keys(env_bool(ENV_REPLACE_ACCESS_KEYS)?);
    }
    if !loader.has_grab_help_key() {
        loader.set_grab_help_key(env_bool(ENV_GRAB_HELP_KEY)?);
    }
    if !loader.has_help_key() {
        loader.set_help_key(env_var_or_none(ENV_HELP_KEY));
    }
    if !loader.has_observe_mutations() {
        loader.set_observe_mutations(env_bool(ENV_OBSERVE_MUTATIONS)?);
    }
    if !loader.has_marker_attribute() {
        loader.set_marker_attribute(env_var_or_none(ENV_MARKER_ATTRIBUTE));
    }
    if !loader.has_group_attribute() {
        loader.set_group_attribute(env_var_or_none(ENV_GROUP_ATTRIBUTE));
    }
    if !loader.has_hint()
        && let Some(value) = env_var_or_none(ENV_HINT_MODE)
    {
        let hint = HintMode::from_name(&value).ok_or_else(|| ConfigError::InvalidValue {
            var: ENV_HINT_MODE.to_string(),
            message: "must be one of title, text, false".to_string(),
        })?;
        loader.set_hint(Some(hint));
    }

    Ok(())
}
