//! Options loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `OptionsLoader` for layered option merging.
//! - Build and validate the final `Options`.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - Values set through `with_*` methods are never overwritten by `from_env()`.
//! - Unset values fall back to `Options::default()`.

use super::env::apply_env;
use super::error::ConfigError;
use crate::keybind::parse_strict;
use crate::types::{HintMode, Options};

/// Loader that builds `Options` from explicit values and environment variables.
#[derive(Debug, Default)]
pub struct OptionsLoader {
    replace_access_keys: Option<bool>,
    grab_help_key: Option<bool>,
    help_key: Option<String>,
    observe_mutations: Option<bool>,
    marker_attribute: Option<String>,
    group_attribute: Option<String>,
    hint: Option<HintMode>,
}

impl OptionsLoader {
    /// Create a new options loader with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every option not already set from `WEBHOTKEYS_*` environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set whether `accesskey` attributes are migrated on `init()`.
    pub fn with_replace_access_keys(mut self, replace: bool) -> Self {
        self.replace_access_keys = Some(replace);
        self
    }

    /// Set whether the help key is reserved.
    pub fn with_grab_help_key(mut self, grab: bool) -> Self {
        self.grab_help_key = Some(grab);
        self
    }

    /// Set the help key combination.
    pub fn with_help_key(mut self, key: impl Into<String>) -> Self {
        self.help_key = Some(key.into());
        self
    }

    /// Set whether document mutations are observed.
    pub fn with_observe_mutations(mut self, observe: bool) -> Self {
        self.observe_mutations = Some(observe);
        self
    }

    /// Set the marker attribute name.
    pub fn with_marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.marker_attribute = Some(name.into());
        self
    }

    /// Set the group attribute name.
    pub fn with_group_attribute(mut self, name: impl Into<String>) -> Self {
        self.group_attribute = Some(name.into());
        self
    }

    /// Set the hint mode.
    pub fn with_hint(mut self, hint: HintMode) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Build the final options.
    ///
    /// # Errors
    ///
    /// Returns an error if an attribute name is not a valid attribute name, if
    /// the marker and group attributes are the same, or if the help key does
    /// not parse (unknown modifiers are rejected here).
    pub fn build(self) -> Result<Options, ConfigError> {
        let defaults = Options::default();
        let options = Options {
            replace_access_keys: self
                .replace_access_keys
                .unwrap_or(defaults.replace_access_keys),
            grab_help_key: self.grab_help_key.unwrap_or(defaults.grab_help_key),
            help_key: self.help_key.unwrap_or(defaults.help_key),
            observe_mutations: self
                .observe_mutations
                .unwrap_or(defaults.observe_mutations),
            marker_attribute: self.marker_attribute.unwrap_or(defaults.marker_attribute),
            group_attribute: self.group_attribute.unwrap_or(defaults.group_attribute),
            hint: self.hint.unwrap_or(defaults.hint),
        };

        validate_attribute_name("marker_attribute", &options.marker_attribute)?;
        validate_attribute_name("group_attribute", &options.group_attribute)?;
        if options
            .marker_attribute
            .eq_ignore_ascii_case(&options.group_attribute)
        {
            return Err(ConfigError::InvalidValue {
                var: "group_attribute".to_string(),
                message: format!(
                    "must differ from marker_attribute ('{}')",
                    options.marker_attribute
                ),
            });
        }

        if options.grab_help_key {
            parse_strict(&options.help_key).map_err(|source| ConfigError::InvalidHelpKey {
                key: options.help_key.clone(),
                source,
            })?;
        }

        Ok(options)
    }

    // Internal accessor methods for use by env.rs

    pub(crate) fn has_replace_access_keys(&self) -> bool {
        self.replace_access_keys.is_some()
    }

    pub(crate) fn has_grab_help_key(&self) -> bool {
        self.grab_help_key.is_some()
    }

    pub(crate) fn has_help_key(&self) -> bool {
        self.help_key.is_some()
    }

    pub(crate) fn has_observe_mutations(&self) -> bool {
        self.observe_mutations.is_some()
    }

    pub(crate) fn has_marker_attribute(&self) -> bool {
        self.marker_attribute.is_some()
    }

    pub(crate) fn has_group_attribute(&self) -> bool {
        self.group_attribute.is_some()
    }

    pub(crate) fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    pub(crate) fn set_replace_access_keys(&mut self, value: Option<bool>) {
        self.replace_access_keys = value;
    }

    pub(crate) fn set_grab_help_key(&mut self, value: Option<bool>) {
        self.grab_help_key = value;
    }

    pub(crate) fn set_help_key(&mut self, value: Option<String>) {
        self.help_key = value;
    }

    pub(crate) fn set_observe_mutations(&mut self, value: Option<bool>) {
        self.observe_mutations = value;
    }

    pub(crate) fn set_marker_attribute(&mut self, value: Option<String>) {
        self.marker_attribute = value;
    }

    pub(crate) fn set_group_attribute(&mut self, value: Option<String>) {
        self.group_attribute = value;
    }

    pub(crate) fn set_hint(&mut self, value: Option<HintMode>) {
        self.hint = value;
    }
}

/// Validates an attribute name.
///
/// Validation rules:
/// - Not empty
/// - No whitespace or control characters
/// - None of `"`, `'`, `>`, `/`, `=`
fn validate_attribute_name(option: &'static str, name: &str) -> Result<(), ConfigError> {
    let invalid = name.is_empty()
        || name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '=')
        });
    if invalid {
        return Err(ConfigError::InvalidAttributeName {
            option,
            name: name.to_string(),
        });
    }
    Ok(())
}
