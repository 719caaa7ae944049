//! Named binding groups.
//!
//! A group only indexes bindings for bulk control and help presentation;
//! the bindings themselves live in the instance's store and registry.

use crate::binding::BindingId;

/// A named, ordered list of binding ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: Vec<BindingId>,
}

impl Group {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in the order they were added.
    pub fn members(&self) -> &[BindingId] {
        &self.members
    }

    pub fn contains(&self, id: BindingId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn push(&mut self, id: BindingId) {
        if !self.contains(id) {
            self.members.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: BindingId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| *member != id);
        self.members.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order_and_skips_duplicates() {
        let mut group = Group::new("Editing");
        group.push(BindingId::new(3));
        group.push(BindingId::new(1));
        group.push(BindingId::new(3));
        assert_eq!(group.members(), &[BindingId::new(3), BindingId::new(1)]);
        assert_eq!(group.name(), "Editing");
    }

    #[test]
    fn test_remove_member() {
        let mut group = Group::new("Lists");
        group.push(BindingId::new(1));
        assert!(group.remove(BindingId::new(1)));
        assert!(!group.remove(BindingId::new(1)));
        assert!(group.is_empty());
    }
}
