//! Centralized constants for the webhotkeys workspace.
//!
//! This module contains default values used across crates to avoid
//! magic string duplication.

// =============================================================================
// Attribute Defaults
// =============================================================================

/// Attribute linking an element to its key combination.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-hotkey";

/// Attribute placing an element's binding into a named group.
pub const DEFAULT_GROUP_ATTRIBUTE: &str = "data-hotkey-group";

/// Native access-key attribute migrated on startup.
pub const ACCESS_KEY_ATTRIBUTE: &str = "accesskey";

/// Modifier prefixed to migrated access keys.
pub const ACCESS_KEY_MODIFIER: &str = "Alt";

/// Attribute read for element hints.
pub const TITLE_ATTRIBUTE: &str = "title";

// =============================================================================
// Help Key Defaults
// =============================================================================

/// Key combination reserved for the binding list.
pub const DEFAULT_HELP_KEY: &str = "F1";

/// Hint shown next to the help key.
pub const DEFAULT_HELP_HINT: &str = "Help";

// =============================================================================
// Hint Defaults
// =============================================================================

/// Maximum number of characters taken from element text when no hint is given.
pub const MAX_HINT_TEXT_CHARS: usize = 50;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_REPLACE_ACCESS_KEYS: &str = "WEBHOTKEYS_REPLACE_ACCESS_KEYS";
pub const ENV_GRAB_HELP_KEY: &str = "WEBHOTKEYS_GRAB_HELP_KEY";
pub const ENV_HELP_KEY: &str = "WEBHOTKEYS_HELP_KEY";
pub const ENV_OBSERVE_MUTATIONS: &str = "WEBHOTKEYS_OBSERVE_MUTATIONS";
pub const ENV_MARKER_ATTRIBUTE: &str = "WEBHOTKEYS_MARKER_ATTRIBUTE";
pub const ENV_GROUP_ATTRIBUTE: &str = "WEBHOTKEYS_GROUP_ATTRIBUTE";
pub const ENV_HINT_MODE: &str = "WEBHOTKEYS_HINT_MODE";
