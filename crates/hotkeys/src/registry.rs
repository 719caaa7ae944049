//! Key state to binding mapping.
//!
//! Responsibilities:
//! - Keep one ordered bucket of binding ids per `KeyState`.
//! - Front-insert so the most recently enabled binding wins ties.
//!
//! Does NOT handle:
//! - The enabled flag of bindings; the registry only holds membership.
//!
//! Invariants:
//! - A binding id appears at most once per bucket.
//! - Empty buckets are dropped.

use std::collections::HashMap;

use crate::binding::{BindingId, KeyState};

/// Ordered buckets of binding ids keyed by `KeyState`.
#[derive(Debug, Default)]
pub struct Registry {
    buckets: HashMap<KeyState, Vec<BindingId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front of the bucket. Returns `false` if already present.
    pub fn insert(&mut self, state: &KeyState, id: BindingId) -> bool {
        let bucket = self.buckets.entry(state.clone()).or_default();
        if bucket.contains(&id) {
            return false;
        }
        bucket.insert(0, id);
        true
    }

    /// Remove by identity. Returns `false` if absent.
    pub fn remove(&mut self, state: &KeyState, id: BindingId) -> bool {
        let Some(bucket) = self.buckets.get_mut(state) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|candidate| *candidate == id) else {
            return false;
        };
        bucket.remove(position);
        if bucket.is_empty() {
            self.buckets.remove(state);
        }
        true
    }

    /// Bucket for `state`, highest priority first; empty if none.
    pub fn lookup(&self, state: &KeyState) -> &[BindingId] {
        self.buckets.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, state: &KeyState, id: BindingId) -> bool {
        self.lookup(state).contains(&id)
    }

    /// Total number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webhotkeys_config::Modifiers;

    fn state(id: &str) -> KeyState {
        KeyState::code(id, Modifiers::ALT)
    }

    #[test]
    fn test_insert_front_and_idempotent() {
        let mut registry = Registry::new();
        let first = BindingId::new(1);
        let second = BindingId::new(2);

        assert!(registry.insert(&state("Digit1"), first));
        assert!(registry.insert(&state("Digit1"), second));
        assert!(!registry.insert(&state("Digit1"), first));

        assert_eq!(registry.lookup(&state("Digit1")), &[second, first]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_reveals_next_and_drops_empty_bucket() {
        let mut registry = Registry::new();
        let first = BindingId::new(1);
        let second = BindingId::new(2);
        registry.insert(&state("KeyQ"), first);
        registry.insert(&state("KeyQ"), second);

        assert!(registry.remove(&state("KeyQ"), second));
        assert_eq!(registry.lookup(&state("KeyQ")), &[first]);
        assert!(!registry.remove(&state("KeyQ"), second));

        assert!(registry.remove(&state("KeyQ"), first));
        assert!(registry.is_empty());
        assert_eq!(registry.bucket_count(), 0);
    }

    #[test]
    fn test_lookup_missing_state_is_empty() {
        let registry = Registry::new();
        assert!(registry.lookup(&state("F1")).is_empty());
        assert!(!registry.contains(&state("F1"), BindingId::new(7)));
    }
}
