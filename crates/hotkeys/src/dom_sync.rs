//! Keeps bindings in step with marked elements.
//!
//! Responsibilities:
//! - Link every element carrying a non-empty marker attribute to one binding.
//! - Apply mutation records: attribute changes, subtree insertions and removals.
//! - Retire the binding of an element that leaves the tree or loses its marker.
//!
//! Does NOT handle:
//! - Observing the document; the `Document` implementation queues records.
//!
//! Invariants:
//! - An element holds at most one linked binding at a time.
//! - A linked binding's element is attached; detached elements are unlinked
//!   and their bindings retired.
//! - Records are applied strictly in notification order.

use std::collections::HashMap;

use crate::binding::{Action, BindingId};
use crate::document::{Document, ElementId, MutationRecord};
use crate::hotkeys::Hotkeys;

/// Side table from element identity to the binding it owns.
#[derive(Debug, Default)]
pub struct ElementLinkage {
    links: HashMap<ElementId, BindingId>,
}

impl ElementLinkage {
    pub fn get(&self, element: ElementId) -> Option<BindingId> {
        self.links.get(&element).copied()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.links.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub(crate) fn link(&mut self, element: ElementId, id: BindingId) {
        self.links.insert(element, id);
    }

    pub(crate) fn unlink(&mut self, element: ElementId) -> Option<BindingId> {
        self.links.remove(&element)
    }

    fn elements(&self) -> Vec<ElementId> {
        let mut elements: Vec<ElementId> = self.links.keys().copied().collect();
        elements.sort();
        elements
    }
}

impl<D: Document> Hotkeys<D> {
    /// Apply mutation records in order.
    pub fn handle_mutations(&mut self, records: Vec<MutationRecord>) {
        for record in records {
            match record {
                MutationRecord::Attributes {
                    target, attribute, ..
                } => {
                    if !attribute.eq_ignore_ascii_case(&self.options.marker_attribute) {
                        continue;
                    }
                    // The old binding goes before the new value is considered.
                    self.unlink_element(target);
                    if self.qualifies(target) {
                        self.link_element(target);
                    }
                }
                MutationRecord::ChildList { added, removed, .. } => {
                    for root in removed {
                        for element in subtree(&self.document, root) {
                            self.unlink_element(element);
                        }
                    }
                    for root in added {
                        for element in subtree(&self.document, root) {
                            if self.qualifies(element) && !self.linkage.contains(element) {
                                self.link_element(element);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Drain and apply the document's queued records. Runs before every dispatch.
    pub fn process_pending_mutations(&mut self) {
        if !self.observing {
            return;
        }
        let records = self.document.take_mutations();
        if !records.is_empty() {
            tracing::trace!(count = records.len(), "Processing mutation records");
            self.handle_mutations(records);
        }
    }

    /// Link every qualifying element not linked yet, and retire links whose
    /// element no longer qualifies.
    pub(crate) fn scan_marked_elements(&mut self) {
        for element in self.linkage.elements() {
            if !self.qualifies(element) {
                self.unlink_element(element);
            }
        }

        let selector = format!("[{}]", self.options.marker_attribute);
        let elements = match self.document.query_selector_all(&selector) {
            Ok(elements) => elements,
            Err(error) => {
                tracing::error!(%error, "Could not query marked elements");
                return;
            }
        };
        for element in elements {
            if self.qualifies(element) && !self.linkage.contains(element) {
                self.link_element(element);
            }
        }
        tracing::debug!(linked = self.linkage.len(), "Scanned marked elements");
    }

    /// Attached and carrying a non-empty marker.
    fn qualifies(&self, element: ElementId) -> bool {
        self.document.contains(element)
            && self
                .document
                .attribute(element, &self.options.marker_attribute)
                .is_some_and(|value| !value.is_empty())
    }

    fn link_element(&mut self, element: ElementId) {
        let Some(spec) = self
            .document
            .attribute(element, &self.options.marker_attribute)
        else {
            return;
        };
        let Ok(id) = self.register_binding(&spec, None, Action::Element(element), None) else {
            return;
        };
        self.linkage.link(element, id);

        let group = self
            .document
            .attribute(element, &self.options.group_attribute)
            .filter(|name| !name.is_empty());
        if let Some(name) = group {
            let index = self.group_index_or_insert(&name);
            self.groups[index].push(id);
        }
        tracing::debug!(%element, %id, combination = %spec, "Linked element");
    }

    fn unlink_element(&mut self, element: ElementId) {
        if let Some(id) = self.linkage.unlink(element) {
            tracing::debug!(%element, %id, "Unlinked element");
            self.retire(id);
        }
    }
}

/// `root` followed by its descendants.
fn subtree<D: Document>(doc: &D, root: ElementId) -> Vec<ElementId> {
    let mut elements = vec![root];
    elements.extend(doc.descendants(root));
    elements
}
