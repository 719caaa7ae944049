//! Options recognized by a hotkeys instance.
//!
//! Invariants:
//! - Defaults enable access-key migration, the help key, and mutation observation.
//! - `HintMode::Title` is the default hint placement.

use std::fmt;

use crate::constants::{DEFAULT_GROUP_ATTRIBUTE, DEFAULT_HELP_KEY, DEFAULT_MARKER_ATTRIBUTE};

/// Where the rendered combination is appended on element-backed bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintMode {
    /// Append to the element's `title` attribute.
    #[default]
    Title,
    /// Append to the element's text (or its first label for form fields).
    Text,
    /// Leave elements untouched.
    Off,
}

impl HintMode {
    /// Parse a hint mode name (case-insensitive).
    ///
    /// `false`, `off` and `none` all disable hints.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "text" => Some(Self::Text),
            "false" | "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }
}

impl fmt::Display for HintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Text => write!(f, "text"),
            Self::Off => write!(f, "off"),
        }
    }
}

/// Options for a hotkeys instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Migrate `accesskey` attributes into marker attributes on `init()`.
    pub replace_access_keys: bool,
    /// Reserve `help_key` for showing the binding list.
    pub grab_help_key: bool,
    /// Combination used by the help key.
    pub help_key: String,
    /// Keep bindings in sync with marker attributes as the document mutates.
    pub observe_mutations: bool,
    /// Attribute linking elements to key combinations.
    pub marker_attribute: String,
    /// Attribute placing element bindings into named groups.
    pub group_attribute: String,
    /// Hint text placement.
    pub hint: HintMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            replace_access_keys: true,
            grab_help_key: true,
            help_key: DEFAULT_HELP_KEY.to_string(),
            observe_mutations: true,
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            group_attribute: DEFAULT_GROUP_ATTRIBUTE.to_string(),
            hint: HintMode::Title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.replace_access_keys);
        assert!(options.grab_help_key);
        assert!(options.observe_mutations);
        assert_eq!(options.help_key, "F1");
        assert_eq!(options.marker_attribute, "data-hotkey");
        assert_eq!(options.group_attribute, "data-hotkey-group");
        assert_eq!(options.hint, HintMode::Title);
    }

    #[test]
    fn test_hint_mode_from_name() {
        assert_eq!(HintMode::from_name("title"), Some(HintMode::Title));
        assert_eq!(HintMode::from_name("TEXT"), Some(HintMode::Text));
        assert_eq!(HintMode::from_name("false"), Some(HintMode::Off));
        assert_eq!(HintMode::from_name(" off "), Some(HintMode::Off));
        assert_eq!(HintMode::from_name("tooltip"), None);
    }

    #[test]
    fn test_hint_mode_display_round_trips() {
        for mode in [HintMode::Title, HintMode::Text, HintMode::Off] {
            assert_eq!(HintMode::from_name(&mode.to_string()), Some(mode));
        }
    }
}
