//! Hint text for element-backed bindings.
//!
//! Responsibilities:
//! - Derive a default hint from an element's title or text.
//! - Append the rendered combination to the title, the text, or the first label.
//! - Remember hinted elements so each one is hinted once.
//!
//! Invariants:
//! - The suffix appended to an element is stripped again whenever the title
//!   or text is read back as a hint.

use std::collections::HashMap;

use webhotkeys_config::HintMode;
use webhotkeys_config::constants::{MAX_HINT_TEXT_CHARS, TITLE_ATTRIBUTE};

use crate::document::{Document, ElementId};

/// Elements already carrying a hint suffix, with the suffix appended.
#[derive(Debug, Default)]
pub(crate) struct HintedElements {
    suffixes: HashMap<ElementId, String>,
}

impl HintedElements {
    pub(crate) fn is_hinted(&self, element: ElementId) -> bool {
        self.suffixes.contains_key(&element)
    }

    fn strip<'a>(&self, element: ElementId, text: &'a str) -> &'a str {
        self.suffixes
            .get(&element)
            .and_then(|suffix| text.strip_suffix(suffix.as_str()))
            .unwrap_or(text)
    }

    /// Hint used when none was given: the title, else the leading text.
    pub(crate) fn default_hint<D: Document>(&self, doc: &D, element: ElementId) -> String {
        let title = doc.attribute(element, TITLE_ATTRIBUTE).unwrap_or_default();
        let title = self.strip(element, &title);
        if !title.is_empty() {
            return title.to_string();
        }
        let text = doc.text(element);
        self.strip(element, &text)
            .chars()
            .take(MAX_HINT_TEXT_CHARS)
            .collect()
    }

    /// Append ` (<rendered>)` to the element per `mode`, once per element.
    pub(crate) fn apply<D: Document>(
        &mut self,
        doc: &mut D,
        element: ElementId,
        mode: HintMode,
        rendered: &str,
    ) {
        if mode == HintMode::Off || self.is_hinted(element) {
            return;
        }
        let suffix = format!(" ({rendered})");
        match mode {
            HintMode::Title => {
                let title = doc.attribute(element, TITLE_ATTRIBUTE).unwrap_or_default();
                doc.set_attribute(element, TITLE_ATTRIBUTE, &format!("{title}{suffix}"));
            }
            HintMode::Text if doc.is_form_field(element) => {
                let label = doc.labels(element).into_iter().next();
                match label {
                    Some(label) if !doc.text(label).is_empty() => doc.append_text(label, &suffix),
                    _ => tracing::debug!(%element, "Form field has no label to hint"),
                }
            }
            HintMode::Text => doc.append_text(element, &suffix),
            HintMode::Off => {}
        }
        tracing::trace!(%element, %suffix, "Hinted element");
        self.suffixes.insert(element, suffix);
    }
}
