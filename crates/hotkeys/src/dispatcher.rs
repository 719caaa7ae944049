//! Keydown dispatch.
//!
//! Responsibilities:
//! - Leave keystrokes that edit text in a focused field alone.
//! - Resolve candidates: the physical code bucket first, then the layout key bucket.
//! - Check each candidate's scope, invoke its action, fall through on decline.
//!
//! Does NOT handle:
//! - Calling preventDefault/stopPropagation; the host does that when
//!   `Dispatch::prevents_default` says so.
//!
//! Invariants:
//! - Pending mutation records are applied before candidates are resolved.
//! - A binding reachable through both lookups is tried once, at its first position.
//! - At most one action reports success per event.

use webhotkeys_config::{KeybindError, Modifiers};

use crate::binding::{Action, BindingId, KeyState, Outcome, Scope};
use crate::document::{Document, ElementId};
use crate::event::{KeyEvent, KeyInput};
use crate::hotkeys::Hotkeys;

/// Keys that move the caret or edit text, with or without Ctrl.
const EDIT_KEYS: [&str; 8] = [
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "Home",
    "End",
    "Delete",
    "Backspace",
];

/// Keys that edit text only without Ctrl.
const PLAIN_EDIT_KEYS: [&str; 2] = ["Tab", "Enter"];

/// Result of dispatching one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A binding handled the event; default behavior must be suppressed.
    Handled { binding: BindingId },
    /// No candidate handled the event.
    Unmatched,
    /// The event edits text in the focused field and was not matched.
    TextEditing,
}

impl Dispatch {
    /// Whether the host should call preventDefault and stopPropagation.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Dispatch::Handled { .. })
    }

    pub fn binding(&self) -> Option<BindingId> {
        match self {
            Dispatch::Handled { binding } => Some(*binding),
            _ => None,
        }
    }
}

/// Whether the event would edit text in the focused element.
pub fn is_text_editing<D: Document>(doc: &D, event: &KeyEvent) -> bool {
    if event.alt_key || event.meta_key {
        return false;
    }
    let Some(key) = event.key.as_deref().or(event.code.as_deref()) else {
        return false;
    };
    let edits = key.chars().count() == 1
        || EDIT_KEYS.contains(&key)
        || (PLAIN_EDIT_KEYS.contains(&key) && !event.ctrl_key);
    edits
        && doc
            .active_element()
            .is_some_and(|focused| doc.accepts_text(focused))
}

/// Lookup keys for an event: the physical code first, then the layout key.
pub fn candidate_states(event: &KeyEvent) -> Vec<KeyState> {
    let modifiers: Modifiers = event.modifiers();
    let mut states = Vec::with_capacity(2);
    if let Some(code) = event.code.as_deref() {
        states.push(KeyState::code(code, modifiers));
    }
    if let Some(key) = event.key.as_deref() {
        states.push(KeyState::pressed_key(key, modifiers));
    }
    states
}

/// Whether the scope allows firing with the document's current focus.
pub fn scope_allows<D: Document>(doc: &D, scope: &Scope<D>) -> bool {
    match scope {
        Scope::Predicate(predicate) => predicate(doc),
        Scope::Selector(selector) => {
            let Some(focused) = doc.event_target() else {
                return false;
            };
            match doc.closest(focused, selector) {
                Ok(found) => found.is_some(),
                Err(error) => {
                    tracing::debug!(%error, "Scope selector unresolved, skipping candidate");
                    false
                }
            }
        }
        Scope::Element(element) => {
            if !doc.contains(*element) {
                tracing::debug!(%element, "Scope element left the tree, skipping candidate");
                return false;
            }
            doc.event_target()
                .is_some_and(|focused| doc.is_inclusive_ancestor(*element, focused))
        }
    }
}

impl<D: Document> Hotkeys<D> {
    /// Handle a keydown from the host. Does nothing while detached.
    pub fn handle_keydown(&mut self, event: &KeyEvent) -> Dispatch {
        if !self.attached {
            tracing::trace!("Keydown ignored while detached");
            return Dispatch::Unmatched;
        }
        self.dispatch(event)
    }

    /// Run dispatch as if the key was pressed, attached or not.
    ///
    /// # Errors
    ///
    /// Returns a `KeybindError` when combination text has no key.
    pub fn simulate(&mut self, input: impl Into<KeyInput>) -> Result<Dispatch, KeybindError> {
        let event = input.into().into_event()?;
        Ok(self.dispatch(&event))
    }

    /// Enabled candidates for an event, in priority order, each once.
    pub fn candidates(&self, event: &KeyEvent) -> Vec<BindingId> {
        let mut candidates: Vec<BindingId> = Vec::new();
        for state in candidate_states(event) {
            for id in self.registry.lookup(&state) {
                let enabled = self
                    .bindings
                    .get(id)
                    .is_some_and(|binding| binding.is_enabled());
                if enabled && !candidates.contains(id) {
                    candidates.push(*id);
                }
            }
        }
        candidates
    }

    fn dispatch(&mut self, event: &KeyEvent) -> Dispatch {
        self.process_pending_mutations();

        if is_text_editing(&self.document, event) {
            tracing::trace!(key = ?event.key, "Key left to the focused field");
            return Dispatch::TextEditing;
        }

        for id in self.candidates(event) {
            let Some(binding) = self.bindings.get(&id) else {
                continue;
            };
            // An earlier action may have disabled this one.
            if !binding.is_enabled() {
                continue;
            }
            if let Some(scope) = binding.scope()
                && !scope_allows(&self.document, scope)
            {
                tracing::trace!(%id, "Binding out of scope");
                continue;
            }
            let action = binding.action().clone();
            match self.invoke(action) {
                Outcome::Handled => {
                    tracing::debug!(%id, "Binding handled key");
                    return Dispatch::Handled { binding: id };
                }
                Outcome::Declined => tracing::trace!(%id, "Binding declined key"),
            }
        }
        Dispatch::Unmatched
    }

    fn invoke(&mut self, action: Action<D>) -> Outcome {
        match action {
            Action::Element(element) => self.activate(element),
            Action::Selector(selector) => match self.document.query_selector(&selector) {
                Ok(Some(element)) => self.activate(element),
                Ok(None) => Outcome::Declined,
                Err(error) => {
                    tracing::debug!(%error, "Action selector unresolved");
                    Outcome::Declined
                }
            },
            Action::Callback(callback) => callback(&mut self.document),
            Action::ShowHelp => {
                let text = self.list_enabled_bindings_as_text();
                self.document.show_help(&text);
                Outcome::Handled
            }
        }
    }

    /// Focus form fields, click anything else; detached or disabled
    /// elements decline.
    fn activate(&mut self, element: ElementId) -> Outcome {
        if !self.document.contains(element) {
            tracing::debug!(%element, "Action element left the tree");
            return Outcome::Declined;
        }
        if self.document.is_disabled(element) {
            return Outcome::Declined;
        }
        if self.document.is_form_field(element) {
            self.document.focus(element);
        } else {
            self.document.click(element);
        }
        Outcome::Handled
    }
}
