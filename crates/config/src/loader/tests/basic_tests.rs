//! Basic builder tests for the options loader.

use crate::loader::builder::OptionsLoader;
use crate::types::{HintMode, Options};

#[test]
fn test_empty_loader_builds_defaults() {
    let options = OptionsLoader::new().build().unwrap();
    assert_eq!(options, Options::default());
}

#[test]
fn test_builder_values_are_applied() {
    let options = OptionsLoader::new()
        .with_replace_access_keys(false)
        .with_grab_help_key(false)
        .with_observe_mutations(false)
        .with_marker_attribute("data-key")
        .with_group_attribute("data-key-group")
        .with_hint(HintMode::Text)
        .build()
        .unwrap();

    assert!(!options.replace_access_keys);
    assert!(!options.grab_help_key);
    assert!(!options.observe_mutations);
    assert_eq!(options.marker_attribute, "data-key");
    assert_eq!(options.group_attribute, "data-key-group");
    assert_eq!(options.hint, HintMode::Text);
}

#[test]
fn test_custom_help_key() {
    let options = OptionsLoader::new()
        .with_help_key("Shift+?")
        .build()
        .unwrap();
    assert_eq!(options.help_key, "Shift+?");
}
