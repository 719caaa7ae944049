//! Validation tests for the options loader.

use crate::keybind::KeybindError;
use crate::loader::builder::OptionsLoader;
use crate::loader::error::ConfigError;

#[test]
fn test_empty_marker_attribute_rejected() {
    let result = OptionsLoader::new().with_marker_attribute("").build();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidAttributeName {
            option: "marker_attribute",
            ..
        })
    ));
}

#[test]
fn test_attribute_with_whitespace_rejected() {
    let result = OptionsLoader::new()
        .with_group_attribute("data hotkey group")
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidAttributeName {
            option: "group_attribute",
            ..
        })
    ));
}

#[test]
fn test_attribute_with_quote_rejected() {
    let result = OptionsLoader::new()
        .with_marker_attribute("data-\"hotkey")
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidAttributeName { .. })
    ));
}

#[test]
fn test_marker_and_group_attribute_must_differ() {
    let result = OptionsLoader::new()
        .with_marker_attribute("data-k")
        .with_group_attribute("DATA-K")
        .build();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_help_key_with_unknown_modifier_rejected() {
    let result = OptionsLoader::new().with_help_key("Hyper+F1").build();
    match result {
        Err(ConfigError::InvalidHelpKey { key, source }) => {
            assert_eq!(key, "Hyper+F1");
            assert!(matches!(source, KeybindError::UnknownModifier { .. }));
        }
        other => panic!("expected InvalidHelpKey, got {other:?}"),
    }
}

#[test]
fn test_invalid_help_key_ignored_when_not_grabbed() {
    let options = OptionsLoader::new()
        .with_grab_help_key(false)
        .with_help_key("Ctrl+")
        .build()
        .unwrap();
    assert!(!options.grab_help_key);
}
