//! Output formatters for CLI commands.
//!
//! Provides two output formats: plain text and JSON.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Combination details printed by `parse`.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedCombination {
    pub input: String,
    pub canonical: String,
    pub kind: String,
    pub state: String,
    pub rendered: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Result of one simulated key press.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRow {
    pub input: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// One line of the binding list.
#[derive(Debug, Clone, Serialize)]
pub struct BindingRow {
    pub combination: String,
    pub hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Binding list printed by `list`.
#[derive(Debug, Clone, Serialize)]
pub struct BindingList {
    pub bindings: Vec<BindingRow>,
    pub help_text: String,
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_combinations(&self, combinations: &[ParsedCombination]) -> Result<String>;

    fn format_dispatches(&self, rows: &[DispatchRow]) -> Result<String>;

    fn format_binding_list(&self, list: &BindingList) -> Result<String>;
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_combinations(&self, combinations: &[ParsedCombination]) -> Result<String> {
        Ok(serde_json::to_string_pretty(combinations)?)
    }

    fn format_dispatches(&self, rows: &[DispatchRow]) -> Result<String> {
        Ok(serde_json::to_string_pretty(rows)?)
    }

    fn format_binding_list(&self, list: &BindingList) -> Result<String> {
        Ok(serde_json::to_string_pretty(list)?)
    }
}

/// Plain text formatter, tab separated.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_combinations(&self, combinations: &[ParsedCombination]) -> Result<String> {
        let lines: Vec<String> = combinations
            .iter()
            .map(|c| format!("{}\t{}\t{}\t{}", c.canonical, c.kind, c.state, c.rendered))
            .collect();
        Ok(lines.join("\n"))
    }

    fn format_dispatches(&self, rows: &[DispatchRow]) -> Result<String> {
        let mut output = Vec::new();
        for row in rows {
            let mut line = format!("{}\t{}", row.input, row.outcome);
            if let Some(binding) = &row.binding {
                line.push('\t');
                line.push_str(binding);
            }
            if let Some(hint) = row.hint.as_deref().filter(|hint| !hint.is_empty()) {
                line.push('\t');
                line.push_str(hint);
            }
            output.push(line);
            if let Some(help) = &row.help {
                output.push(help.clone());
            }
        }
        Ok(output.join("\n"))
    }

    fn format_binding_list(&self, list: &BindingList) -> Result<String> {
        Ok(list.help_text.clone())
    }
}

/// Get a formatter for the given output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
