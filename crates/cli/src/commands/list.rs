//! `list` command: print the enabled binding list.

use anyhow::{Context, Result};
use webhotkeys::{Hotkeys, MemoryDocument, Options};

use crate::args::BindArg;
use crate::commands::register_binds;
use crate::formatters::{BindingList, BindingRow, OutputFormat, get_formatter};

pub fn run(
    options: Options,
    binds: &[BindArg],
    group: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut hotkeys = Hotkeys::new(MemoryDocument::new(), options);
    hotkeys.init();
    register_binds(&mut hotkeys, binds, group)?;

    let bindings = hotkeys
        .bindings()
        .filter(|binding| binding.is_enabled())
        .map(|binding| BindingRow {
            combination: binding.descriptor().render(),
            hint: binding.hint().to_string(),
            group: hotkeys
                .groups()
                .iter()
                .find(|group| group.contains(binding.id()))
                .map(|group| group.name().to_string()),
        })
        .collect();
    let list = BindingList {
        bindings,
        help_text: hotkeys.list_enabled_bindings_as_text(),
    };

    let output = get_formatter(format)
        .format_binding_list(&list)
        .context("Failed to format binding list")?;
    println!("{output}");
    Ok(())
}
