//! In-memory document used by tests, automation and the CLI.
//!
//! Responsibilities:
//! - Store elements in an arena addressed by `ElementId`.
//! - Queue mutation records while observing, the way a browser observer would.
//! - Record clicks and help messages so callers can assert on them.
//!
//! Invariants:
//! - Index 0 is the `HTML` root and index 1 its `BODY` child; neither is ever removed.
//! - Attribute names are stored lower-cased.
//! - Records are only queued for attached targets and, for attributes, only
//!   for names in the observed filter.

use super::selector::Selector;
use super::{Document, ElementId, MutationRecord};
use crate::error::SelectorError;

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: String,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_uppercase(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
            text: String::new(),
        }
    }
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    focused: Option<ElementId>,
    attribute_filter: Option<Vec<String>>,
    pending: Vec<MutationRecord>,
    clicks: Vec<ElementId>,
    help_messages: Vec<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document holding an empty `<html><body></body></html>` tree.
    pub fn new() -> Self {
        let mut html = Node::new("html");
        let mut body = Node::new("body");
        html.children.push(ElementId::new(1));
        body.parent = Some(ElementId::new(0));
        Self {
            nodes: vec![html, body],
            focused: None,
            attribute_filter: None,
            pending: Vec::new(),
            clicks: Vec::new(),
            help_messages: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        ElementId::new(0)
    }

    pub fn body(&self) -> ElementId {
        ElementId::new(1)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId::new(self.nodes.len() - 1)
    }

    /// Create an element with attributes and append it to `parent`.
    pub fn append_element(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let element = self.create_element(tag);
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.attributes = attributes
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect();
        }
        self.append_child(parent, element);
        element
    }

    /// Append `child` to `parent`, detaching it from its current parent first.
    ///
    /// Appending an element into its own subtree is ignored.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.exists(parent) || !self.exists(child) || self.is_inclusive_ancestor(child, parent)
        {
            tracing::warn!(%parent, %child, "Refusing to append element");
            return;
        }
        self.remove(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        self.record_child_list(parent, vec![child], Vec::new());
    }

    /// Detach `element` (and its subtree) from the tree.
    pub fn remove(&mut self, element: ElementId) {
        let Some(parent) = self.nodes.get(element.index()).and_then(|node| node.parent) else {
            return;
        };
        self.nodes[parent.index()]
            .children
            .retain(|child| *child != element);
        self.nodes[element.index()].parent = None;
        self.record_child_list(parent, Vec::new(), vec![element]);
    }

    /// Replace the element's own text.
    pub fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.text = text.to_string();
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.attached()
            .into_iter()
            .find(|element| self.attribute(*element, "id").as_deref() == Some(id))
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Elements clicked so far, oldest first.
    pub fn clicks(&self) -> &[ElementId] {
        &self.clicks
    }

    /// Help texts shown so far, oldest first.
    pub fn help_messages(&self) -> &[String] {
        &self.help_messages
    }

    pub fn is_observing(&self) -> bool {
        self.attribute_filter.is_some()
    }

    pub fn pending_mutations(&self) -> &[MutationRecord] {
        &self.pending
    }

    fn exists(&self, element: ElementId) -> bool {
        element.index() < self.nodes.len()
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.exists(element) && self.is_inclusive_ancestor(self.root(), element)
    }

    /// Attached elements in document order, root included.
    fn attached(&self) -> Vec<ElementId> {
        let root = self.root();
        let mut all = vec![root];
        all.extend(self.descendants(root));
        all
    }

    fn record_child_list(
        &mut self,
        target: ElementId,
        added: Vec<ElementId>,
        removed: Vec<ElementId>,
    ) {
        if self.attribute_filter.is_some() && self.is_connected(target) {
            self.pending.push(MutationRecord::ChildList {
                target,
                added,
                removed,
            });
        }
    }

    fn record_attribute(&mut self, target: ElementId, name: &str, old_value: Option<String>) {
        let observed = self
            .attribute_filter
            .as_ref()
            .is_some_and(|filter| filter.iter().any(|attribute| attribute == name));
        if observed && self.is_connected(target) {
            self.pending.push(MutationRecord::Attributes {
                target,
                attribute: name.to_string(),
                old_value,
            });
        }
    }
}

impl Document for MemoryDocument {
    fn active_element(&self) -> Option<ElementId> {
        self.focused.filter(|element| self.is_connected(*element))
    }

    fn contains(&self, element: ElementId) -> bool {
        self.is_connected(element)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element.index()).and_then(|node| node.parent)
    }

    fn descendants(&self, element: ElementId) -> Vec<ElementId> {
        let mut result = Vec::new();
        let Some(node) = self.nodes.get(element.index()) else {
            return result;
        };
        let mut stack: Vec<ElementId> = node.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.nodes[current.index()].children.iter().rev().copied());
        }
        result
    }

    fn tag_name(&self, element: ElementId) -> String {
        self.nodes
            .get(element.index())
            .map(|node| node.tag.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.nodes.get(element.index()).and_then(|node| {
            node.attributes
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.clone())
        })
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        let old_value = match node.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value.to_string())),
            None => {
                node.attributes.push((name.clone(), value.to_string()));
                None
            }
        };
        self.record_attribute(element, &name, old_value);
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        let name = name.to_ascii_lowercase();
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        let Some(position) = node.attributes.iter().position(|(key, _)| *key == name) else {
            return;
        };
        let (_, old_value) = node.attributes.remove(position);
        self.record_attribute(element, &name, Some(old_value));
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .attached()
            .into_iter()
            .filter(|element| selector.matches(self, *element))
            .collect())
    }

    fn matches(&self, element: ElementId, selector: &str) -> Result<bool, SelectorError> {
        Ok(self.exists(element) && Selector::parse(selector)?.matches(self, element))
    }

    fn is_content_editable(&self, element: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(candidate) = current {
            match self.attribute(candidate, "contenteditable") {
                Some(value) if value.eq_ignore_ascii_case("false") => return false,
                Some(value)
                    if value.is_empty()
                        || value.eq_ignore_ascii_case("true")
                        || value.eq_ignore_ascii_case("plaintext-only") =>
                {
                    return true;
                }
                _ => current = self.parent(candidate),
            }
        }
        false
    }

    fn focus(&mut self, element: ElementId) {
        if self.is_connected(element) {
            self.focused = Some(element);
        }
    }

    fn click(&mut self, element: ElementId) {
        self.clicks.push(element);
    }

    fn text(&self, element: ElementId) -> String {
        let Some(node) = self.nodes.get(element.index()) else {
            return String::new();
        };
        let mut text = node.text.clone();
        for child in &node.children {
            text.push_str(&self.text(*child));
        }
        text
    }

    fn append_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.text.push_str(text);
        }
    }

    fn labels(&self, element: ElementId) -> Vec<ElementId> {
        let id = self.attribute(element, "id");
        self.attached()
            .into_iter()
            .filter(|candidate| self.tag_name(*candidate) == "LABEL")
            .filter(|label| {
                let by_for = id.is_some() && self.attribute(*label, "for") == id;
                by_for || self.is_inclusive_ancestor(*label, element)
            })
            .collect()
    }

    fn show_help(&mut self, text: &str) {
        self.help_messages.push(text.to_string());
    }

    fn observe(&mut self, attribute_filter: &[String]) {
        self.attribute_filter = Some(
            attribute_filter
                .iter()
                .map(|name| name.to_ascii_lowercase())
                .collect(),
        );
    }

    fn disconnect(&mut self) {
        self.attribute_filter = None;
        self.pending.clear();
    }

    fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.pending)
    }
}
