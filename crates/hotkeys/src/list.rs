//! Sequential navigation over the elements matching a query.
//!
//! Responsibilities:
//! - Find the selected item: the last item matching the current selector.
//! - Move the selection forward or back, clamped to the list bounds.
//! - Mark the new item by focus, by class or by attribute.
//!
//! Does NOT handle:
//! - Styling the selected item.
//!
//! Invariants:
//! - The selection is read back from the document on every call, so focus or
//!   markers changed by the user are honored.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::binding::{Action, BindingId};
use crate::document::{Document, ElementId};
use crate::error::RegistrationError;
use crate::hotkeys::Hotkeys;

const DEFAULT_QUERY: &str = "div";
const DEFAULT_CURRENT_SELECTOR: &str = ":focus";
const FOCUS_MARKER: &str = ":focus";

/// Veto for a move: `(doc, new, old)`; returning `false` keeps the selection.
pub type ChangeFn<D> = Rc<dyn Fn(&D, ElementId, Option<ElementId>) -> bool>;

/// Told about the newly selected item after each successful move.
pub type MoveCallback<D> = Rc<dyn Fn(&mut D, ElementId)>;

/// How the selected item is marked, derived from the current selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Focus,
    Class(String),
    Attribute(String),
}

impl Marker {
    fn from_selector(selector: &str) -> Option<Self> {
        if let Some(class) = selector.strip_prefix('.') {
            return Some(Marker::Class(class.to_string()));
        }
        if let Some(rest) = selector.strip_prefix('[') {
            let name = rest.strip_suffix(']').unwrap_or(rest);
            return Some(Marker::Attribute(name.to_string()));
        }
        selector.starts_with(FOCUS_MARKER).then_some(Marker::Focus)
    }

    fn unmark<D: Document>(&self, doc: &mut D, element: ElementId) {
        match self {
            Marker::Focus => {}
            Marker::Class(class) => {
                let classes = doc.attribute(element, "class").unwrap_or_default();
                let remaining: Vec<&str> = classes
                    .split_whitespace()
                    .filter(|token| *token != class.as_str())
                    .collect();
                doc.set_attribute(element, "class", &remaining.join(" "));
            }
            Marker::Attribute(name) => doc.remove_attribute(element, name),
        }
    }

    fn mark<D: Document>(&self, doc: &mut D, element: ElementId) {
        match self {
            Marker::Focus => doc.focus(element),
            Marker::Class(class) => {
                let classes = doc.attribute(element, "class").unwrap_or_default();
                if !classes.split_whitespace().any(|token| token == class.as_str()) {
                    let joined = if classes.trim().is_empty() {
                        class.clone()
                    } else {
                        format!("{} {class}", classes.trim())
                    };
                    doc.set_attribute(element, "class", &joined);
                }
            }
            Marker::Attribute(name) => doc.set_attribute(element, name, "1"),
        }
    }
}

/// Walks the elements matching `query`, one selection at a time.
pub struct ListNavigator<D> {
    query: String,
    current_selector: String,
    change_fn: Option<ChangeFn<D>>,
    callback: Option<MoveCallback<D>>,
}

impl<D: Document> ListNavigator<D> {
    /// Navigator over `query`, selecting by focus.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            current_selector: DEFAULT_CURRENT_SELECTOR.to_string(),
            change_fn: None,
            callback: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_selector(&self) -> &str {
        &self.current_selector
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = query.into();
        self
    }

    /// `:focus`, `.class` or `[attribute]`.
    pub fn set_current_selector(&mut self, selector: impl Into<String>) -> &mut Self {
        self.current_selector = selector.into();
        self
    }

    pub fn set_change_fn<F>(&mut self, change_fn: F) -> &mut Self
    where
        F: Fn(&D, ElementId, Option<ElementId>) -> bool + 'static,
    {
        self.change_fn = Some(Rc::new(change_fn));
        self
    }

    pub fn set_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&mut D, ElementId) + 'static,
    {
        self.callback = Some(Rc::new(callback));
        self
    }

    /// The selected item, if any.
    pub fn current(&self, doc: &D) -> Option<ElementId> {
        let items = self.items(doc)?;
        self.selected(doc, &items)
    }

    pub fn go_next(&self, doc: &mut D, steps: usize) -> bool {
        self.go(doc, true, steps)
    }

    pub fn go_prev(&self, doc: &mut D, steps: usize) -> bool {
        self.go(doc, false, steps)
    }

    /// Move the selection `steps` items, clamped to the list bounds.
    ///
    /// Returns `false` when there is nothing to navigate or the current
    /// selector cannot be applied; a vetoed move still returns `true`.
    pub fn go(&self, doc: &mut D, forward: bool, steps: usize) -> bool {
        let Some(items) = self.items(doc) else {
            return false;
        };
        let (target, old) = match self.selected(doc, &items) {
            Some(selected) => {
                let position = items
                    .iter()
                    .position(|item| *item == selected)
                    .unwrap_or_default();
                let index = if forward {
                    position.saturating_add(steps).min(items.len() - 1)
                } else {
                    position.saturating_sub(steps)
                };
                (items[index], Some(selected))
            }
            None => (items[0], None),
        };
        self.change(doc, target, old)
    }

    /// Select `element`, replacing the current selection.
    pub fn set_current(&self, doc: &mut D, element: ElementId) -> bool {
        let old = self.current(doc);
        self.change(doc, element, old)
    }

    /// Non-empty item list, or `None` with a warning.
    fn items(&self, doc: &D) -> Option<Vec<ElementId>> {
        match doc.query_selector_all(&self.query) {
            Ok(items) if !items.is_empty() => Some(items),
            Ok(_) => {
                tracing::warn!(query = %self.query, "No list items to navigate");
                None
            }
            Err(error) => {
                tracing::warn!(%error, query = %self.query, "Could not query list items");
                None
            }
        }
    }

    fn selected(&self, doc: &D, items: &[ElementId]) -> Option<ElementId> {
        items
            .iter()
            .rev()
            .copied()
            .find(|item| match doc.matches(*item, &self.current_selector) {
                Ok(matched) => matched,
                Err(error) => {
                    tracing::debug!(%error, "Current selector unresolved");
                    false
                }
            })
    }

    fn change(&self, doc: &mut D, new: ElementId, old: Option<ElementId>) -> bool {
        let Some(marker) = Marker::from_selector(&self.current_selector) else {
            tracing::warn!(
                selector = %self.current_selector,
                "Unsupported current selector, list move refused"
            );
            return false;
        };

        if let Some(change_fn) = &self.change_fn
            && !change_fn(doc, new, old)
        {
            tracing::debug!(%new, "List move vetoed");
            return true;
        }

        if let Some(old) = old {
            marker.unmark(doc, old);
        }
        marker.mark(doc, new);
        tracing::trace!(%new, "List selection moved");

        if let Some(callback) = &self.callback {
            callback(doc, new);
        }
        true
    }
}

impl<D: Document + 'static> ListNavigator<D> {
    /// Drive the navigator with `ArrowUp` ("Lists up") and `ArrowDown`
    /// ("Lists down"). A move with nothing to navigate declines the key.
    ///
    /// # Errors
    ///
    /// Returns the `RegistrationError` of the first binding that fails.
    pub fn handle_up_down(
        navigator: &Rc<RefCell<Self>>,
        hotkeys: &mut Hotkeys<D>,
    ) -> Result<(BindingId, BindingId), RegistrationError> {
        let up = Rc::clone(navigator);
        let up = hotkeys.register_binding(
            "ArrowUp",
            Some("Lists up"),
            Action::callback(move |doc: &mut D| up.borrow().go_prev(doc, 1)),
            None,
        )?;
        let down = Rc::clone(navigator);
        let down = hotkeys.register_binding(
            "ArrowDown",
            Some("Lists down"),
            Action::callback(move |doc: &mut D| down.borrow().go_next(doc, 1)),
            None,
        )?;
        Ok((up, down))
    }
}

impl<D: Document> Default for ListNavigator<D> {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}

impl<D> fmt::Debug for ListNavigator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListNavigator")
            .field("query", &self.query)
            .field("current_selector", &self.current_selector)
            .field("change_fn", &self.change_fn.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use std::cell::Cell;

    fn list() -> (MemoryDocument, Vec<ElementId>) {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let ul = doc.append_element(body, "ul", &[]);
        let items = (0..4).map(|_| doc.append_element(ul, "li", &[])).collect();
        (doc, items)
    }

    #[test]
    fn test_go_without_selection_selects_first() {
        let (mut doc, items) = list();
        let nav = ListNavigator::new("ul li");
        assert_eq!(nav.current(&doc), None);
        assert!(nav.go_next(&mut doc, 1));
        assert_eq!(doc.active_element(), Some(items[0]));
    }

    #[test]
    fn test_go_clamps_to_bounds() {
        let (mut doc, items) = list();
        let nav = ListNavigator::new("ul li");
        doc.focus(items[1]);

        assert!(nav.go_next(&mut doc, 10));
        assert_eq!(nav.current(&doc), Some(items[3]));
        assert!(nav.go_prev(&mut doc, 2));
        assert_eq!(nav.current(&doc), Some(items[1]));
        assert!(nav.go(&mut doc, false, 5));
        assert_eq!(nav.current(&doc), Some(items[0]));
    }

    #[test]
    fn test_class_marker_moves() {
        let (mut doc, items) = list();
        doc.set_attribute(items[0], "class", "row active");
        let mut nav = ListNavigator::new("li");
        nav.set_current_selector(".active");

        assert!(nav.go_next(&mut doc, 1));
        assert_eq!(doc.attribute(items[0], "class").as_deref(), Some("row"));
        assert_eq!(doc.attribute(items[1], "class").as_deref(), Some("active"));
        assert_eq!(nav.current(&doc), Some(items[1]));
    }

    #[test]
    fn test_attribute_marker_moves() {
        let (mut doc, items) = list();
        let mut nav = ListNavigator::new("li");
        nav.set_current_selector("[data-selected]");

        nav.go_next(&mut doc, 1);
        nav.go_next(&mut doc, 1);
        assert_eq!(doc.attribute(items[0], "data-selected"), None);
        assert_eq!(doc.attribute(items[1], "data-selected").as_deref(), Some("1"));
    }

    #[test]
    fn test_veto_keeps_selection() {
        let (mut doc, items) = list();
        doc.focus(items[0]);
        let mut nav = ListNavigator::new("li");
        nav.set_change_fn(|_doc, _new, old| old.is_none());

        assert!(nav.go_next(&mut doc, 1));
        assert_eq!(nav.current(&doc), Some(items[0]));
    }

    #[test]
    fn test_callback_told_about_moves() {
        let (mut doc, items) = list();
        let moved = Rc::new(Cell::new(None));
        let seen = Rc::clone(&moved);
        let mut nav = ListNavigator::new("li");
        nav.set_callback(move |_doc, element| seen.set(Some(element)));

        assert!(nav.set_current(&mut doc, items[2]));
        assert_eq!(moved.get(), Some(items[2]));
    }

    #[test]
    fn test_refuses_empty_list_and_unknown_selector() {
        let (mut doc, _items) = list();
        let nav = ListNavigator::new("table tr");
        assert!(!nav.go_next(&mut doc, 1));

        let mut nav = ListNavigator::new("li");
        nav.set_current_selector("#picked");
        assert!(!nav.go_next(&mut doc, 1));
    }

    #[test]
    fn test_handle_up_down_registers_arrows() {
        let (doc, items) = list();
        let mut hotkeys = Hotkeys::new(doc, webhotkeys_config::Options::default());
        let nav = Rc::new(RefCell::new(ListNavigator::new("li")));
        let (up, down) = ListNavigator::handle_up_down(&nav, &mut hotkeys).unwrap();

        assert_eq!(hotkeys.binding(up).unwrap().hint(), "Lists up");
        assert_eq!(hotkeys.simulate("ArrowDown").unwrap().binding(), Some(down));
        hotkeys.simulate("ArrowDown").unwrap();
        assert_eq!(hotkeys.document().active_element(), Some(items[1]));
        assert_eq!(hotkeys.simulate("ArrowUp").unwrap().binding(), Some(up));
        assert_eq!(hotkeys.document().active_element(), Some(items[0]));
    }
}
