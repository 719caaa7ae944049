//! Bindings: one registered action per key combination.
//!
//! Responsibilities:
//! - Define `Binding`, its `Action` and `Scope` variants, and `Outcome`.
//! - Define `KeyState`, the normalized lookup key shared by registration and
//!   dispatch.
//!
//! Does NOT handle:
//! - Registry membership (see `registry.rs`); enabling and disabling go
//!   through `Hotkeys` so the registry and the toggle hook stay in step.
//!
//! Invariants:
//! - Single-character ids are normalized the same way at registration and at
//!   lookup: upper-case letters are lower-cased and Shift is dropped for
//!   non-letter symbols.
//! - `Action::Selector` never survives registration; it is resolved to
//!   `Action::Element`.

use std::fmt;
use std::rc::Rc;

use webhotkeys_config::{KeyDescriptor, KeyKind, Modifiers};

use crate::document::ElementId;

/// Handle to a binding owned by a `Hotkeys` instance.
///
/// Ids grow with registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u64);

impl BindingId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of running a callback action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The key was handled; the host's default behavior is suppressed.
    Handled,
    /// The action passed; dispatch moves on to the next candidate.
    Declined,
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::Handled
    }
}

impl From<bool> for Outcome {
    fn from(handled: bool) -> Self {
        if handled {
            Outcome::Handled
        } else {
            Outcome::Declined
        }
    }
}

/// Callback invoked with the document when its binding triggers.
pub type Callback<D> = Rc<dyn Fn(&mut D) -> Outcome>;

/// Predicate deciding at trigger time whether a binding may fire.
pub type ScopePredicate<D> = Rc<dyn Fn(&D) -> bool>;

/// What happens when a binding triggers.
pub enum Action<D> {
    /// Focus the element if it is a form field, click it otherwise.
    Element(ElementId),
    /// Selector resolved to its first matching element at registration.
    Selector(String),
    /// Run a callback.
    Callback(Callback<D>),
    /// Show the binding list through the document.
    ShowHelp,
}

impl<D> Action<D> {
    /// Wrap a closure returning `()`, `bool` or `Outcome`.
    ///
    /// # Examples
    ///
    /// ```
    /// use webhotkeys::{Action, MemoryDocument};
    ///
    /// let handled: Action<MemoryDocument> = Action::callback(|_doc: &mut MemoryDocument| {});
    /// let declines: Action<MemoryDocument> = Action::callback(|_doc: &mut MemoryDocument| false);
    /// # let _ = (handled, declines);
    /// ```
    pub fn callback<F, R>(callback: F) -> Self
    where
        D: 'static,
        F: Fn(&mut D) -> R + 'static,
        R: Into<Outcome>,
    {
        Action::Callback(Rc::new(move |doc: &mut D| callback(doc).into()))
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Action::Selector(selector.into())
    }

    /// The element acted on, for element actions.
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Action::Element(element) => Some(*element),
            _ => None,
        }
    }
}

impl<D> Clone for Action<D> {
    fn clone(&self) -> Self {
        match self {
            Action::Element(element) => Action::Element(*element),
            Action::Selector(selector) => Action::Selector(selector.clone()),
            Action::Callback(callback) => Action::Callback(Rc::clone(callback)),
            Action::ShowHelp => Action::ShowHelp,
        }
    }
}

impl<D> fmt::Debug for Action<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Action::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Action::Callback(_) => f.write_str("Callback(..)"),
            Action::ShowHelp => f.write_str("ShowHelp"),
        }
    }
}

/// Where a binding is allowed to trigger.
pub enum Scope<D> {
    /// Focus must be inside this element, which must still be attached.
    Element(ElementId),
    /// Focus must be inside an element matching this selector.
    Selector(String),
    /// Checked at trigger time; allows negative scopes.
    Predicate(ScopePredicate<D>),
}

impl<D> Scope<D> {
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&D) -> bool + 'static,
    {
        Scope::Predicate(Rc::new(predicate))
    }

    pub fn selector(selector: impl Into<String>) -> Self {
        Scope::Selector(selector.into())
    }
}

impl<D> Clone for Scope<D> {
    fn clone(&self) -> Self {
        match self {
            Scope::Element(element) => Scope::Element(*element),
            Scope::Selector(selector) => Scope::Selector(selector.clone()),
            Scope::Predicate(predicate) => Scope::Predicate(Rc::clone(predicate)),
        }
    }
}

impl<D> fmt::Debug for Scope<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Scope::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Scope::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Registry lookup key: a key id plus the modifier bits.
///
/// Kept as a pair so that ids ending in digits cannot collide with the
/// modifier encoding (`F1` + `10` vs `F11` + `0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyState {
    id: String,
    modifiers: Modifiers,
}

impl KeyState {
    /// Lookup key for a physical code; no normalization applies.
    pub fn code(code: &str, modifiers: Modifiers) -> Self {
        Self {
            id: code.to_string(),
            modifiers,
        }
    }

    /// Lookup key a layout key registers under.
    ///
    /// Single upper-case letters are lower-cased; modifiers are kept as given.
    pub fn key(key: &str, modifiers: Modifiers) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => Self {
                id: c.to_lowercase().collect(),
                modifiers,
            },
            (Some(_), None) => Self {
                id: key.to_string(),
                modifiers,
            },
            _ => Self::code(key, modifiers),
        }
    }

    /// Lookup key for the layout key of a pressed key.
    ///
    /// Like `key`, but Shift is dropped for single characters that are not
    /// letters, since producing them may need Shift on one layout and not on
    /// another.
    pub fn pressed_key(key: &str, modifiers: Modifiers) -> Self {
        let state = Self::key(key, modifiers);
        if is_symbol(&state.id) {
            Self {
                modifiers: state.modifiers - Modifiers::SHIFT,
                ..state
            }
        } else {
            state
        }
    }

    /// Whether a pressed key can never produce this state: Shift held with a
    /// single non-letter character.
    pub fn is_unreachable(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT) && is_symbol(&self.id)
    }

    /// Lookup key a descriptor registers under.
    pub fn for_descriptor(descriptor: &KeyDescriptor) -> Self {
        match descriptor.kind() {
            KeyKind::Code => Self::code(descriptor.id(), descriptor.modifiers()),
            KeyKind::Key => Self::key(descriptor.id(), descriptor.modifiers()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

fn is_symbol(id: &str) -> bool {
    let mut chars = id.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphabetic())
}

/// `<id>/<bits>`, e.g. `Digit1/4` for `Alt+Digit1`.
impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.modifiers.encode())
    }
}

/// One registered action.
pub struct Binding<D> {
    id: BindingId,
    descriptor: KeyDescriptor,
    state: KeyState,
    hint: String,
    action: Action<D>,
    scope: Option<Scope<D>>,
    pub(crate) enabled: bool,
}

impl<D> Binding<D> {
    /// A new, disabled binding.
    pub(crate) fn new(
        id: BindingId,
        descriptor: KeyDescriptor,
        hint: String,
        action: Action<D>,
        scope: Option<Scope<D>>,
    ) -> Self {
        let state = KeyState::for_descriptor(&descriptor);
        Self {
            id,
            descriptor,
            state,
            hint,
            action,
            scope,
            enabled: false,
        }
    }

    pub fn id(&self) -> BindingId {
        self.id
    }

    pub fn descriptor(&self) -> &KeyDescriptor {
        &self.descriptor
    }

    pub fn key_state(&self) -> &KeyState {
        &self.state
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn action(&self) -> &Action<D> {
        &self.action
    }

    pub fn scope(&self) -> Option<&Scope<D>> {
        self.scope.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The element this binding acts on, if its action is an element.
    pub fn element(&self) -> Option<ElementId> {
        self.action.element()
    }

    /// Help line: `<rendered combination>: <hint>`.
    pub fn help_line(&self) -> String {
        format!("{}: {}", self.descriptor.render(), self.hint)
    }
}

impl<D> fmt::Debug for Binding<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("descriptor", &self.descriptor)
            .field("hint", &self.hint)
            .field("action", &self.action)
            .field("scope", &self.scope)
            .field("enabled", &self.enabled)
            .finish()
    }
}
