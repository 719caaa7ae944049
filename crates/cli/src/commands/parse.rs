//! `parse` command: show how combinations are understood.

use anyhow::{Context, Result};
use webhotkeys::KeyState;
use webhotkeys_config::{parse_strict, parse_with_warnings};

use crate::formatters::{OutputFormat, ParsedCombination, get_formatter};

pub fn run(specs: &[String], strict: bool, format: OutputFormat) -> Result<()> {
    let mut parsed = Vec::with_capacity(specs.len());
    for spec in specs {
        let parsed_spec = if strict {
            parse_strict(spec).map(|descriptor| (descriptor, Vec::new()))
        } else {
            parse_with_warnings(spec)
        };
        let (descriptor, warnings) =
            parsed_spec.with_context(|| format!("Failed to parse '{spec}'"))?;
        for warning in &warnings {
            eprintln!("Warning: {warning}");
        }
        parsed.push(ParsedCombination {
            input: spec.clone(),
            canonical: descriptor.to_string(),
            kind: descriptor.kind().to_string(),
            state: KeyState::for_descriptor(&descriptor).to_string(),
            rendered: descriptor.render(),
            warnings: warnings.iter().map(ToString::to_string).collect(),
        });
    }

    let output = get_formatter(format)
        .format_combinations(&parsed)
        .context("Failed to format combinations")?;
    println!("{output}");
    Ok(())
}
