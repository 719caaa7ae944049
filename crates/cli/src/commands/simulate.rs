//! `simulate` command: dispatch keys against an in-memory document.

use anyhow::{Context, Result};
use webhotkeys::{Dispatch, Document, Hotkeys, KeyEvent, KeyInput, MemoryDocument, Options};

use crate::args::BindArg;
use crate::commands::register_binds;
use crate::formatters::{DispatchRow, OutputFormat, get_formatter};

pub fn run(
    options: Options,
    binds: &[BindArg],
    group: Option<&str>,
    focus_input: bool,
    keys: &[String],
    format: OutputFormat,
) -> Result<()> {
    let mut document = MemoryDocument::new();
    if focus_input {
        let body = document.body();
        let input = document.append_element(body, "input", &[("type", "text")]);
        document.focus(input);
    }

    let mut hotkeys = Hotkeys::new(document, options);
    hotkeys.init();
    register_binds(&mut hotkeys, binds, group)?;

    let mut rows = Vec::with_capacity(keys.len());
    for key in keys {
        let input = key_input(key)?;
        let shown = hotkeys.document().help_messages().len();
        let outcome = hotkeys
            .simulate(input)
            .with_context(|| format!("Invalid key '{key}'"))?;

        let binding = outcome.binding().and_then(|id| hotkeys.binding(id));
        rows.push(DispatchRow {
            input: key.clone(),
            outcome: match outcome {
                Dispatch::Handled { .. } => "handled",
                Dispatch::Unmatched => "unmatched",
                Dispatch::TextEditing => "text-editing",
            },
            binding: binding.map(|binding| binding.descriptor().render()),
            hint: binding.map(|binding| binding.hint().to_string()),
            help: hotkeys.document().help_messages().get(shown).cloned(),
        });
    }

    let output = get_formatter(format)
        .format_dispatches(&rows)
        .context("Failed to format dispatch results")?;
    println!("{output}");
    Ok(())
}

/// Raw JSON events start with `{`; anything else is combination text.
fn key_input(key: &str) -> Result<KeyInput> {
    if key.trim_start().starts_with('{') {
        let event = KeyEvent::from_json(key)
            .with_context(|| format!("Invalid key event '{key}'"))?;
        Ok(KeyInput::Event(event))
    } else {
        Ok(KeyInput::from(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_input_detects_json() {
        assert_eq!(
            key_input("Alt+Digit1").unwrap(),
            KeyInput::Combination("Alt+Digit1".to_string())
        );
        assert!(matches!(
            key_input(r#"{"code": "KeyA"}"#).unwrap(),
            KeyInput::Event(_)
        ));
        assert!(key_input("{not json").is_err());
    }
}
