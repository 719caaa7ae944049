//! Key combination parsing and rendering.
//!
//! Responsibilities:
//! - Parse human-readable combinations ("Alt+Digit1", "?", "Ctrl++") into a `KeyDescriptor`.
//! - Render descriptors back to canonical text and to a readable label.
//!
//! Does NOT handle:
//! - Lookup encoding (see `KeyState` in the hotkeys crate).
//! - Runtime key event matching.
//!
//! Invariants:
//! - A single-character key token is a layout key (`KeyKind::Key`); anything
//!   longer is a physical key code (`KeyKind::Code`).
//! - Unknown modifier tokens never abort a parse. They surface as `ParseWarning`s
//!   and are otherwise ignored.
//! - `Modifiers` bit values are the lookup encoding: `shift<<3 | alt<<2 | ctrl<<1 | meta`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

/// Errors that make a key combination unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeybindError {
    /// The combination text was empty.
    #[error("Empty key combination. Expected format like 'a', 'Alt+Digit1', 'Ctrl++'")]
    Empty,

    /// Only modifiers were given (e.g. "Ctrl+").
    #[error("Missing key in combination '{spec}'. Expected format like 'a', 'Alt+Digit1', 'Ctrl++'")]
    MissingKey {
        /// The offending combination
        spec: String,
    },

    /// A modifier token was not recognized (strict parsing only).
    #[error("Unknown modifier '{token}' in combination '{spec}'")]
    UnknownModifier {
        /// The unrecognized token
        token: String,
        /// The combination it appeared in
        spec: String,
    },
}

/// A non-fatal problem found while parsing a combination.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown modifier '{token}' in combination '{spec}', ignoring it")]
pub struct ParseWarning {
    /// The unrecognized token
    pub token: String,
    /// The combination it appeared in
    pub spec: String,
}

impl From<ParseWarning> for KeybindError {
    fn from(warning: ParseWarning) -> Self {
        KeybindError::UnknownModifier {
            token: warning.token,
            spec: warning.spec,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const META = 1;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

/// Display order for modifiers, matching the conventional "Ctrl+Shift+Alt" label.
const DISPLAY_ORDER: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "Ctrl"),
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::ALT, "Alt"),
    (Modifiers::META, "Meta"),
];

impl Modifiers {
    /// Build a modifier set from the four DOM-style booleans.
    pub fn from_flags(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::SHIFT, shift);
        modifiers.set(Modifiers::ALT, alt);
        modifiers.set(Modifiers::CTRL, ctrl);
        modifiers.set(Modifiers::META, meta);
        modifiers
    }

    /// Look up a modifier by its name in a combination (case-insensitive).
    ///
    /// `control` is accepted as an alias of `ctrl`.
    pub fn from_token(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "alt" => Some(Modifiers::ALT),
            "shift" => Some(Modifiers::SHIFT),
            "meta" => Some(Modifiers::META),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            _ => None,
        }
    }

    /// The compact 4-bit lookup encoding.
    pub fn encode(self) -> u8 {
        self.bits()
    }

    fn write_prefix(self, out: &mut String) {
        for (flag, label) in DISPLAY_ORDER {
            if self.contains(flag) {
                out.push_str(label);
                out.push('+');
            }
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = DISPLAY_ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect();
        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

/// How a descriptor identifies its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Physical key, independent of the keyboard layout (e.g. `Digit1`, `ArrowUp`, `F1`).
    Code,
    /// Character produced by the active layout (e.g. `1`, `?`, `ř`).
    Key,
}

impl KeyKind {
    /// Classify a key token: exactly one character is a layout key, anything else a code.
    pub fn classify(id: &str) -> Self {
        let mut chars = id.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => KeyKind::Key,
            _ => KeyKind::Code,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Key => write!(f, "key"),
        }
    }
}

/// A parsed key combination: one key identifier plus a modifier set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyDescriptor {
    id: String,
    kind: KeyKind,
    modifiers: Modifiers,
}

impl KeyDescriptor {
    /// Create a descriptor, classifying the id by its length.
    pub fn new(id: impl Into<String>, modifiers: Modifiers) -> Self {
        let id = id.into();
        let kind = KeyKind::classify(&id);
        Self {
            id,
            kind,
            modifiers,
        }
    }

    /// The key identifier (`Digit1`, `?`, `F1`...).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the id names a physical code or a layout key.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The modifier set.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Human-readable label, e.g. `Ctrl+Alt+1` for `Alt+Ctrl+Digit1`.
    ///
    /// Unlike `Display`, digit codes are shortened to the digit itself, so the
    /// label does not always parse back to the same descriptor kind.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.modifiers.write_prefix(&mut out);
        out.push_str(readable_id(&self.id, self.kind));
        out
    }
}

/// Canonical form: modifiers in display order followed by the full key id.
/// Parsing this text yields an equal descriptor.
impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.modifiers.write_prefix(&mut out);
        out.push_str(&self.id);
        f.write_str(&out)
    }
}

impl FromStr for KeyDescriptor {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_combination(s)
    }
}

fn readable_id(id: &str, kind: KeyKind) -> &str {
    if kind == KeyKind::Code
        && let Some(digit) = id.strip_prefix("Digit")
        && digit.len() == 1
        && digit.bytes().all(|b| b.is_ascii_digit())
    {
        return digit;
    }
    id
}

/// Parse a combination, logging and ignoring unknown modifiers.
///
/// # Examples
///
/// ```
/// use webhotkeys_config::keybind::{parse_combination, KeyKind, Modifiers};
///
/// let key = parse_combination("Alt+Digit1").unwrap();
/// assert_eq!(key.id(), "Digit1");
/// assert_eq!(key.kind(), KeyKind::Code);
/// assert_eq!(key.modifiers(), Modifiers::ALT);
///
/// let key = parse_combination("Ctrl++").unwrap();
/// assert_eq!(key.id(), "+");
/// assert_eq!(key.kind(), KeyKind::Key);
/// ```
pub fn parse_combination(spec: &str) -> Result<KeyDescriptor, KeybindError> {
    let (descriptor, warnings) = parse_with_warnings(spec)?;
    for warning in &warnings {
        tracing::warn!(
            token = %warning.token,
            spec = %warning.spec,
            "Unknown modifier in key combination, ignoring it"
        );
    }
    Ok(descriptor)
}

/// Parse a combination, rejecting unknown modifiers.
pub fn parse_strict(spec: &str) -> Result<KeyDescriptor, KeybindError> {
    let (descriptor, mut warnings) = parse_with_warnings(spec)?;
    if warnings.is_empty() {
        Ok(descriptor)
    } else {
        Err(warnings.swap_remove(0).into())
    }
}

/// Parse a combination and return the warnings alongside the descriptor.
pub fn parse_with_warnings(spec: &str) -> Result<(KeyDescriptor, Vec<ParseWarning>), KeybindError> {
    if spec.is_empty() {
        return Err(KeybindError::Empty);
    }

    let mut parts: Vec<&str> = spec.split('+').collect();
    // "Alt++" splits into ["Alt", "", ""]: the two trailing blanks are the plus key.
    let len = parts.len();
    if len >= 2 && parts[len - 1].is_empty() && parts[len - 2].is_empty() {
        parts.truncate(len - 2);
        parts.push("+");
    }

    let key = match parts.pop() {
        Some(key) if !key.is_empty() => key,
        _ => {
            return Err(KeybindError::MissingKey {
                spec: spec.to_string(),
            });
        }
    };

    let mut modifiers = Modifiers::empty();
    let mut warnings = Vec::new();
    for part in parts {
        match Modifiers::from_token(part) {
            Some(modifier) => modifiers |= modifier,
            None => warnings.push(ParseWarning {
                token: part.to_string(),
                spec: spec.to_string(),
            }),
        }
    }

    Ok((KeyDescriptor::new(key, modifiers), warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_character_is_layout_key() {
        let key = parse_combination("q").unwrap();
        assert_eq!(key.id(), "q");
        assert_eq!(key.kind(), KeyKind::Key);
        assert!(key.modifiers().is_empty());
    }

    #[test]
    fn test_parse_named_key_is_code() {
        for name in ["Digit1", "ArrowUp", "F1", "KeyA", "Escape"] {
            let key = parse_combination(name).unwrap();
            assert_eq!(key.kind(), KeyKind::Code, "{name} should be a code");
            assert_eq!(key.id(), name);
        }
    }

    #[test]
    fn test_parse_modifiers_any_order_and_case() {
        let a = parse_combination("Ctrl+Shift+Alt+x").unwrap();
        let b = parse_combination("alt+SHIFT+control+x").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.modifiers(),
            Modifiers::CTRL | Modifiers::SHIFT | Modifiers::ALT
        );
    }

    #[test]
    fn test_parse_meta() {
        let key = parse_combination("Meta+k").unwrap();
        assert_eq!(key.modifiers(), Modifiers::META);
    }

    #[test]
    fn test_parse_plus_key() {
        let key = parse_combination("Alt++").unwrap();
        assert_eq!(key.id(), "+");
        assert_eq!(key.modifiers(), Modifiers::ALT);

        let key = parse_combination("+").unwrap();
        assert_eq!(key.id(), "+");
        assert!(key.modifiers().is_empty());
    }

    #[test]
    fn test_parse_space_key_is_not_trimmed() {
        let key = parse_combination("Ctrl+ ").unwrap();
        assert_eq!(key.id(), " ");
        assert_eq!(key.kind(), KeyKind::Key);
    }

    #[test]
    fn test_unknown_modifier_is_ignored_with_warning() {
        let (key, warnings) = parse_with_warnings("Hyper+Alt+x").unwrap();
        assert_eq!(key.modifiers(), Modifiers::ALT);
        assert_eq!(key.id(), "x");
        assert_eq!(
            warnings,
            vec![ParseWarning {
                token: "Hyper".to_string(),
                spec: "Hyper+Alt+x".to_string(),
            }]
        );

        // The lenient entry point still yields a descriptor.
        assert!(parse_combination("Hyper+x").is_ok());
    }

    #[test]
    fn test_strict_parse_rejects_unknown_modifier() {
        let result = parse_strict("Hyper+x");
        assert!(matches!(
            result,
            Err(KeybindError::UnknownModifier { ref token, .. }) if token == "Hyper"
        ));
    }

    #[test]
    fn test_empty_combination() {
        assert_eq!(parse_combination(""), Err(KeybindError::Empty));
    }

    #[test]
    fn test_missing_key() {
        let result = parse_combination("Ctrl+");
        assert!(matches!(result, Err(KeybindError::MissingKey { .. })));
    }

    #[test]
    fn test_encode_matches_bit_layout() {
        assert_eq!(Modifiers::from_flags(true, false, false, false).encode(), 8);
        assert_eq!(Modifiers::from_flags(false, true, false, false).encode(), 4);
        assert_eq!(Modifiers::from_flags(false, false, true, false).encode(), 2);
        assert_eq!(Modifiers::from_flags(false, false, false, true).encode(), 1);
        assert_eq!(Modifiers::from_flags(true, true, true, true).encode(), 15);
    }

    #[test]
    fn test_render_fixed_modifier_order() {
        let key = parse_combination("Alt+Shift+Ctrl+Digit1").unwrap();
        assert_eq!(key.render(), "Ctrl+Shift+Alt+1");
        assert_eq!(key.to_string(), "Ctrl+Shift+Alt+Digit1");
    }

    #[test]
    fn test_render_keeps_other_codes() {
        assert_eq!(parse_combination("Digit10").unwrap().render(), "Digit10");
        assert_eq!(parse_combination("Numpad1").unwrap().render(), "Numpad1");
        assert_eq!(parse_combination("Meta+F5").unwrap().render(), "Meta+F5");
    }

    #[test]
    fn test_display_modifiers() {
        assert_eq!(Modifiers::empty().to_string(), "None");
        assert_eq!(Modifiers::CTRL.to_string(), "Ctrl");
        assert_eq!(
            (Modifiers::ALT | Modifiers::CTRL | Modifiers::SHIFT).to_string(),
            "Ctrl+Shift+Alt"
        );
    }

    #[test]
    fn test_from_str() {
        let key: KeyDescriptor = "Shift+?".parse().unwrap();
        assert_eq!(key.id(), "?");
        assert_eq!(key.modifiers(), Modifiers::SHIFT);
    }

    #[test]
    fn test_modifier_tokens() {
        assert_eq!(Modifiers::from_token("control"), Some(Modifiers::CTRL));
        assert_eq!(Modifiers::from_token(" Ctrl "), Some(Modifiers::CTRL));
        assert_eq!(Modifiers::from_token("META"), Some(Modifiers::META));
        assert_eq!(Modifiers::from_token("Hyper"), None);
        // Flag names stay available for bitflags' own lookup.
        assert_eq!(Modifiers::from_name("SHIFT"), Some(Modifiers::SHIFT));
    }
}
