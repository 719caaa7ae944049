//! Document abstraction the engine runs against.
//!
//! Responsibilities:
//! - Define `ElementId`, the stable identity of an element.
//! - Define `MutationRecord` and the `Document` trait hosts implement.
//! - Provide `MemoryDocument`, an arena-backed implementation with a small
//!   selector engine.
//!
//! Does NOT handle:
//! - Event listener registration; hosts call `Hotkeys::handle_keydown`.
//! - Stylesheets or layout.
//!
//! Invariants:
//! - An `ElementId` keeps identifying the same element after it leaves the tree.
//! - Mutation records are only queued between `observe` and `disconnect`.

mod memory;
mod selector;

pub use memory::MemoryDocument;
pub use selector::Selector;

use std::fmt;

use crate::error::SelectorError;

/// Form tags that take focus instead of a click and receive typed text.
pub const FORM_TAGS: [&str; 3] = ["INPUT", "SELECT", "TEXTAREA"];

/// Stable identity of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One observed change of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// An observed attribute was set or removed on `target`.
    Attributes {
        target: ElementId,
        attribute: String,
        old_value: Option<String>,
    },
    /// Children were inserted into or removed from `target`.
    ChildList {
        target: ElementId,
        added: Vec<ElementId>,
        removed: Vec<ElementId>,
    },
}

/// Host document operations needed by the engine.
///
/// Methods with default implementations are expressed through the required
/// ones; hosts with a native equivalent may override them.
pub trait Document {
    /// The currently focused element, if any.
    fn active_element(&self) -> Option<ElementId>;

    /// Whether the element is currently attached to the tree.
    fn contains(&self, element: ElementId) -> bool;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// All descendants of `element` in document order, excluding `element`.
    fn descendants(&self, element: ElementId) -> Vec<ElementId>;

    /// Upper-case tag name (`INPUT`, `A`...).
    fn tag_name(&self, element: ElementId) -> String;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    /// Attached elements matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>, SelectorError>;

    fn matches(&self, element: ElementId, selector: &str) -> Result<bool, SelectorError>;

    /// Whether the element's text is editable in place.
    fn is_content_editable(&self, element: ElementId) -> bool;

    fn focus(&mut self, element: ElementId);

    fn click(&mut self, element: ElementId);

    /// Rendered text of the element and its descendants.
    fn text(&self, element: ElementId) -> String;

    fn append_text(&mut self, element: ElementId, text: &str);

    /// Labels associated with a form field, in document order.
    fn labels(&self, element: ElementId) -> Vec<ElementId>;

    /// Present the binding list to the user.
    fn show_help(&mut self, text: &str);

    /// Start queueing mutation records for child list changes and for the
    /// attributes named in `attribute_filter`.
    fn observe(&mut self, attribute_filter: &[String]);

    /// Stop queueing mutation records and drop the pending ones.
    fn disconnect(&mut self);

    /// Drain the queued mutation records in notification order.
    fn take_mutations(&mut self) -> Vec<MutationRecord>;

    /// Where key events land: the focused element, else `<body>`.
    fn event_target(&self) -> Option<ElementId> {
        self.active_element()
            .or_else(|| self.query_selector("body").ok().flatten())
    }

    /// First attached element matching `selector`.
    fn query_selector(&self, selector: &str) -> Result<Option<ElementId>, SelectorError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// Nearest inclusive ancestor of `element` matching `selector`.
    fn closest(
        &self,
        element: ElementId,
        selector: &str,
    ) -> Result<Option<ElementId>, SelectorError> {
        let mut current = Some(element);
        while let Some(candidate) = current {
            if self.matches(candidate, selector)? {
                return Ok(Some(candidate));
            }
            current = self.parent(candidate);
        }
        Ok(None)
    }

    /// Whether `ancestor` is `element` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.parent(candidate);
        }
        false
    }

    fn is_disabled(&self, element: ElementId) -> bool {
        self.attribute(element, "disabled").is_some()
    }

    /// Whether the element is a form field (`INPUT`, `SELECT`, `TEXTAREA`).
    fn is_form_field(&self, element: ElementId) -> bool {
        FORM_TAGS.contains(&self.tag_name(element).as_str())
    }

    /// Whether typing into the element edits text: form fields other than
    /// checkboxes, and content-editable elements.
    fn accepts_text(&self, element: ElementId) -> bool {
        if self.is_content_editable(element) {
            return true;
        }
        self.is_form_field(element)
            && !self
                .attribute(element, "type")
                .is_some_and(|kind| kind.eq_ignore_ascii_case("checkbox"))
    }
}
