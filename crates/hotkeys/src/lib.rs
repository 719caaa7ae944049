//! Keyboard shortcut registry and dispatcher for web documents.
//!
//! A `Hotkeys` instance owns a `Document` implementation, registers bindings
//! from combination text (`"Alt+Digit1"`, `"Shift+?"`, `"F1"`), keeps bindings
//! for marked elements in step with the document, and resolves keydown events
//! to at most one action. `MemoryDocument` is a small in-memory document for
//! tests and automation.

mod access_keys;
pub mod binding;
pub mod dispatcher;
pub mod document;
pub mod dom_sync;
pub mod error;
pub mod event;
pub mod group;
mod help;
mod hints;
pub mod hotkeys;
pub mod list;
pub mod registry;

pub use binding::{Action, Binding, BindingId, Callback, KeyState, Outcome, Scope, ScopePredicate};
pub use dispatcher::Dispatch;
pub use document::{Document, ElementId, FORM_TAGS, MemoryDocument, MutationRecord, Selector};
pub use dom_sync::ElementLinkage;
pub use error::{RawEventError, RegistrationError, SelectorError};
pub use event::{KeyEvent, KeyInput};
pub use group::Group;
pub use hotkeys::{BindingDef, Hotkeys, ToggleHook};
pub use list::{ChangeFn, ListNavigator, MoveCallback};
pub use registry::Registry;

pub use webhotkeys_config::{
    HintMode, KeyDescriptor, KeyKind, KeybindError, Modifiers, Options, OptionsLoader,
    parse_combination,
};
