//! Key events as seen by the dispatcher.
//!
//! Responsibilities:
//! - Define `KeyEvent`, the DOM-like keydown shape (`key`, `code`, modifier flags).
//! - Decode raw JSON events; every field is optional.
//! - Build events from combination text for `Hotkeys::simulate`.
//!
//! Invariants:
//! - An event built from a combination carries `key` for single characters
//!   and `code` for named keys, never both.

use serde::Deserialize;
use webhotkeys_config::{KeyDescriptor, KeyKind, KeybindError, Modifiers, parse_combination};

use crate::error::RawEventError;

/// A keydown event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyEvent {
    /// Character or named key produced by the active layout.
    pub key: Option<String>,
    /// Physical key code, independent of the layout.
    pub code: Option<String>,
    pub shift_key: bool,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub meta_key: bool,
}

impl KeyEvent {
    /// Event carrying only a layout key.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Event carrying only a physical code.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Event carrying both, as a browser reports a real key press.
    pub fn press(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.shift_key = modifiers.contains(Modifiers::SHIFT);
        self.alt_key = modifiers.contains(Modifiers::ALT);
        self.ctrl_key = modifiers.contains(Modifiers::CTRL);
        self.meta_key = modifiers.contains(Modifiers::META);
        self
    }

    /// The event a descriptor describes.
    pub fn from_descriptor(descriptor: &KeyDescriptor) -> Self {
        let event = match descriptor.kind() {
            KeyKind::Key => Self::key(descriptor.id()),
            KeyKind::Code => Self::code(descriptor.id()),
        };
        event.with_modifiers(descriptor.modifiers())
    }

    /// Decode a raw JSON event such as `{"code": "Digit1", "altKey": true}`.
    ///
    /// # Errors
    ///
    /// Returns `RawEventError::Json` for malformed JSON and
    /// `RawEventError::MissingKey` when neither `key` nor `code` is present.
    pub fn from_json(json: &str) -> Result<Self, RawEventError> {
        let event: KeyEvent = serde_json::from_str(json)?;
        if event.key.is_none() && event.code.is_none() {
            return Err(RawEventError::MissingKey);
        }
        Ok(event)
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_flags(self.shift_key, self.alt_key, self.ctrl_key, self.meta_key)
    }
}

/// Input accepted by `Hotkeys::simulate`: combination text or a ready event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Combination(String),
    Event(KeyEvent),
}

impl KeyInput {
    /// Resolve to an event, parsing combination text leniently.
    pub fn into_event(self) -> Result<KeyEvent, KeybindError> {
        match self {
            KeyInput::Combination(spec) => {
                Ok(KeyEvent::from_descriptor(&parse_combination(&spec)?))
            }
            KeyInput::Event(event) => Ok(event),
        }
    }
}

impl From<&str> for KeyInput {
    fn from(spec: &str) -> Self {
        KeyInput::Combination(spec.to_string())
    }
}

impl From<String> for KeyInput {
    fn from(spec: String) -> Self {
        KeyInput::Combination(spec)
    }
}

impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        KeyInput::Event(event)
    }
}

impl From<&KeyEvent> for KeyInput {
    fn from(event: &KeyEvent) -> Self {
        KeyInput::Event(event.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial_event() {
        let event = KeyEvent::from_json(r#"{"code": "Digit1", "altKey": true}"#).unwrap();
        assert_eq!(event.code.as_deref(), Some("Digit1"));
        assert_eq!(event.key, None);
        assert!(event.alt_key);
        assert!(!event.shift_key);
        assert_eq!(event.modifiers(), Modifiers::ALT);
    }

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let event =
            KeyEvent::from_json(r#"{"key": "?", "shiftKey": true, "repeat": false}"#).unwrap();
        assert_eq!(event.key.as_deref(), Some("?"));
        assert!(event.shift_key);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            KeyEvent::from_json("{\"key\": "),
            Err(RawEventError::Json(_))
        ));
        assert!(matches!(
            KeyEvent::from_json(r#"{"altKey": "yes"}"#),
            Err(RawEventError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_requires_key_or_code() {
        assert!(matches!(
            KeyEvent::from_json(r#"{"ctrlKey": true}"#),
            Err(RawEventError::MissingKey)
        ));
    }

    #[test]
    fn test_from_descriptor() {
        let event = KeyEvent::from_descriptor(&parse_combination("Ctrl+Shift+F5").unwrap());
        assert_eq!(event.code.as_deref(), Some("F5"));
        assert_eq!(event.key, None);
        assert!(event.ctrl_key && event.shift_key);

        let event = KeyEvent::from_descriptor(&parse_combination("?").unwrap());
        assert_eq!(event.key.as_deref(), Some("?"));
        assert_eq!(event.code, None);
    }

    #[test]
    fn test_key_input_conversions() {
        let event = KeyInput::from("Alt+a").into_event().unwrap();
        assert_eq!(event, KeyEvent::key("a").with_modifiers(Modifiers::ALT));
        assert!(KeyInput::from("").into_event().is_err());
        assert_eq!(
            KeyInput::from(KeyEvent::code("F1")).into_event().unwrap(),
            KeyEvent::code("F1")
        );
    }
}
