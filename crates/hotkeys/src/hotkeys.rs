//! The hotkeys instance.
//!
//! Responsibilities:
//! - Own the document handle, the binding store, the registry, the groups and
//!   the element linkage.
//! - Register bindings and groups; enable, disable and toggle them.
//! - Run the `init()` / `teardown()` lifecycle.
//!
//! Does NOT handle:
//! - Matching key events (see `dispatcher.rs`).
//! - Mutation records (see `dom_sync.rs`).
//!
//! Invariants:
//! - A binding is in its registry bucket iff it is enabled.
//! - The toggle hook fires once per enabled/disabled transition, never on
//!   idempotent calls.
//! - A failed registration leaves no binding, bucket entry or group member.

use std::collections::BTreeMap;
use std::rc::Rc;

use webhotkeys_config::constants::DEFAULT_HELP_HINT;
use webhotkeys_config::{Options, parse_combination};

use crate::access_keys::migrate_access_keys;
use crate::binding::{Action, Binding, BindingId, KeyState, Scope};
use crate::document::{Document, ElementId};
use crate::dom_sync::ElementLinkage;
use crate::error::RegistrationError;
use crate::group::Group;
use crate::help::render_help;
use crate::hints::HintedElements;
use crate::registry::Registry;

/// Hook told about every binding state transition: `(element, enabled)`.
pub type ToggleHook = Rc<dyn Fn(Option<ElementId>, bool)>;

/// One entry of `Hotkeys::register_group`.
pub struct BindingDef<D> {
    pub spec: String,
    pub hint: Option<String>,
    pub action: Action<D>,
    pub scope: Option<Scope<D>>,
}

impl<D> BindingDef<D> {
    pub fn new(spec: impl Into<String>, action: Action<D>) -> Self {
        Self {
            spec: spec.into(),
            hint: None,
            action,
            scope: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope<D>) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// Keybinding registry and dispatcher bound to one document.
pub struct Hotkeys<D: Document> {
    pub(crate) document: D,
    pub(crate) options: Options,
    pub(crate) bindings: BTreeMap<BindingId, Binding<D>>,
    pub(crate) registry: Registry,
    pub(crate) groups: Vec<Group>,
    pub(crate) linkage: ElementLinkage,
    pub(crate) hinted: HintedElements,
    on_binding_toggle: Option<ToggleHook>,
    help_binding: Option<BindingId>,
    next_id: u64,
    pub(crate) attached: bool,
    pub(crate) observing: bool,
}

impl<D: Document> Hotkeys<D> {
    /// Create a detached instance. Nothing is scanned or registered until `init()`.
    pub fn new(document: D, options: Options) -> Self {
        Self {
            document,
            options,
            bindings: BTreeMap::new(),
            registry: Registry::new(),
            groups: Vec::new(),
            linkage: ElementLinkage::default(),
            hinted: HintedElements::default(),
            on_binding_toggle: None,
            help_binding: None,
            next_id: 1,
            attached: false,
            observing: false,
        }
    }

    /// Start handling keys.
    ///
    /// Migrates access keys, links every marked element, reserves the help
    /// key and starts observing mutations, as the options ask. Calling it
    /// again while attached does nothing.
    pub fn init(&mut self) {
        if self.attached {
            tracing::debug!("Hotkeys already attached");
            return;
        }

        if self.options.replace_access_keys {
            let migrated =
                migrate_access_keys(&mut self.document, &self.options.marker_attribute);
            tracing::debug!(migrated, "Access keys migrated");
        }

        self.scan_marked_elements();

        if self.options.grab_help_key && self.help_binding.is_none() {
            let help_key = self.options.help_key.clone();
            self.help_binding = self
                .register_binding(&help_key, Some(DEFAULT_HELP_HINT), Action::ShowHelp, None)
                .ok();
        }

        if self.options.observe_mutations {
            let filter = [self.options.marker_attribute.clone()];
            self.document.observe(&filter);
            self.observing = true;
        }

        self.attached = true;
        tracing::info!(
            bindings = self.bindings.len(),
            observing = self.observing,
            "Hotkeys attached"
        );
    }

    /// Stop observing and stop handling keys. Registered bindings stay.
    pub fn teardown(&mut self) {
        if self.observing {
            self.document.disconnect();
            self.observing = false;
        }
        if self.attached {
            self.attached = false;
            tracing::info!("Hotkeys detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Register a binding and enable it.
    ///
    /// A missing or empty hint on an element action is replaced by the
    /// element's title or leading text, and the element receives a hint suffix
    /// per the hint mode. Unknown modifiers are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns a `RegistrationError` (also logged) when the combination has no
    /// key or the action selector is invalid or matches nothing.
    pub fn register_binding(
        &mut self,
        spec: &str,
        hint: Option<&str>,
        action: Action<D>,
        scope: Option<Scope<D>>,
    ) -> Result<BindingId, RegistrationError> {
        self.try_register(spec, hint, action, scope)
            .inspect_err(|error| tracing::error!(%error, spec, "Could not register binding"))
    }

    fn try_register(
        &mut self,
        spec: &str,
        hint: Option<&str>,
        action: Action<D>,
        scope: Option<Scope<D>>,
    ) -> Result<BindingId, RegistrationError> {
        let descriptor =
            parse_combination(spec).map_err(|source| RegistrationError::InvalidCombination {
                spec: spec.to_string(),
                source,
            })?;

        if KeyState::for_descriptor(&descriptor).is_unreachable() {
            tracing::warn!(
                combination = %descriptor,
                "Shift with a symbol key never matches; bind the symbol alone"
            );
        }

        let action = match action {
            Action::Selector(selector) => match self.document.query_selector(&selector)? {
                Some(element) => Action::Element(element),
                None => return Err(RegistrationError::ActionNotFound { selector }),
            },
            other => other,
        };

        let element = action.element();
        let hint = match (hint.filter(|hint| !hint.is_empty()), element) {
            (Some(hint), _) => hint.to_string(),
            (None, Some(element)) => self.hinted.default_hint(&self.document, element),
            (None, None) => String::new(),
        };

        let id = BindingId::new(self.next_id);
        self.next_id += 1;
        let rendered = descriptor.render();
        tracing::debug!(%id, combination = %descriptor, hint = %hint, "Registering binding");
        self.bindings
            .insert(id, Binding::new(id, descriptor, hint, action, scope));
        self.enable(id);

        if let Some(element) = element {
            self.hinted
                .apply(&mut self.document, element, self.options.hint, &rendered);
        }
        Ok(id)
    }

    /// Register several bindings into the group `name`, creating it if needed.
    ///
    /// Definitions that fail to register are logged and skipped.
    pub fn register_group(&mut self, name: &str, definitions: Vec<BindingDef<D>>) -> &Group {
        let index = self.group_index_or_insert(name);
        for definition in definitions {
            if let Ok(id) = self.register_binding(
                &definition.spec,
                definition.hint.as_deref(),
                definition.action,
                definition.scope,
            ) {
                self.groups[index].push(id);
            }
        }
        &self.groups[index]
    }

    pub(crate) fn group_index_or_insert(&mut self, name: &str) -> usize {
        match self.groups.iter().position(|group| group.name() == name) {
            Some(index) => index,
            None => {
                self.groups.push(Group::new(name));
                self.groups.len() - 1
            }
        }
    }

    /// Enable a binding. Returns `true` on a disabled → enabled transition.
    pub fn enable(&mut self, id: BindingId) -> bool {
        let Some(binding) = self.bindings.get_mut(&id) else {
            tracing::debug!(%id, "Enable requested for unknown binding");
            return false;
        };
        self.registry.insert(binding.key_state(), id);
        if binding.enabled {
            return false;
        }
        binding.enabled = true;
        let element = binding.element();
        self.notify_toggle(element, true);
        true
    }

    /// Disable a binding. Returns `true` on an enabled → disabled transition.
    pub fn disable(&mut self, id: BindingId) -> bool {
        let Some(binding) = self.bindings.get_mut(&id) else {
            tracing::debug!(%id, "Disable requested for unknown binding");
            return false;
        };
        self.registry.remove(binding.key_state(), id);
        if !binding.enabled {
            return false;
        }
        binding.enabled = false;
        let element = binding.element();
        self.notify_toggle(element, false);
        true
    }

    /// Set the state to `explicit`, or flip it when `None`.
    pub fn toggle(&mut self, id: BindingId, explicit: Option<bool>) -> bool {
        let Some(current) = self.bindings.get(&id).map(Binding::is_enabled) else {
            return false;
        };
        if explicit.unwrap_or(!current) {
            self.enable(id)
        } else {
            self.disable(id)
        }
    }

    /// Enable every member of a group. Returns `false` for unknown groups.
    pub fn enable_group(&mut self, name: &str) -> bool {
        self.for_each_member(name, |hotkeys, id| {
            hotkeys.enable(id);
        })
    }

    /// Disable every member of a group. Returns `false` for unknown groups.
    pub fn disable_group(&mut self, name: &str) -> bool {
        self.for_each_member(name, |hotkeys, id| {
            hotkeys.disable(id);
        })
    }

    /// Toggle every member of a group individually.
    pub fn toggle_group(&mut self, name: &str, explicit: Option<bool>) -> bool {
        self.for_each_member(name, |hotkeys, id| {
            hotkeys.toggle(id, explicit);
        })
    }

    fn for_each_member(&mut self, name: &str, mut apply: impl FnMut(&mut Self, BindingId)) -> bool {
        let Some(members) = self.group(name).map(|group| group.members().to_vec()) else {
            tracing::debug!(group = name, "Unknown group");
            return false;
        };
        for id in members {
            apply(self, id);
        }
        true
    }

    /// Disable a binding and forget it everywhere.
    pub(crate) fn retire(&mut self, id: BindingId) {
        self.disable(id);
        self.bindings.remove(&id);
        for group in &mut self.groups {
            group.remove(id);
        }
        tracing::debug!(%id, "Retired binding");
    }

    /// Install the hook told about every binding state transition.
    pub fn set_on_binding_toggle<F>(&mut self, hook: F)
    where
        F: Fn(Option<ElementId>, bool) + 'static,
    {
        self.on_binding_toggle = Some(Rc::new(hook));
    }

    fn notify_toggle(&self, element: Option<ElementId>, enabled: bool) {
        if let Some(hook) = &self.on_binding_toggle {
            let hook = Rc::clone(hook);
            hook(element, enabled);
        }
    }

    /// Enabled bindings as help text; see `help.rs` for the layout.
    pub fn list_enabled_bindings_as_text(&self) -> String {
        render_help(&self.bindings, &self.groups)
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding<D>> {
        self.bindings.get(&id)
    }

    /// All live bindings in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding<D>> {
        self.bindings.values()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name() == name)
    }

    /// Groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The binding registered for a marked element, if any.
    pub fn linked_binding(&self, element: ElementId) -> Option<BindingId> {
        self.linkage.get(element)
    }

    /// Element to binding links maintained for marked elements.
    pub fn linkage(&self) -> &ElementLinkage {
        &self.linkage
    }

    /// The help key binding, once `init()` registered it.
    pub fn help_binding(&self) -> Option<BindingId> {
        self.help_binding
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document. Changes made here reach the bindings
    /// through the mutation records, drained before the next dispatch.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
