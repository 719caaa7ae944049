//! Property-based tests for registry ordering.
//!
//! Test coverage:
//! - Enabling pushes a binding to the front of its bucket; re-enabling does not move it.
//! - Any sequence of enable/disable keeps bucket membership equal to the
//!   enabled set, and dispatch picks the most recently enabled binding.

use std::collections::HashSet;

use proptest::prelude::*;

use webhotkeys::{Action, BindingId, Hotkeys, KeyState, MemoryDocument, Modifiers, Options};

#[derive(Debug, Clone)]
enum Op {
    Enable(usize),
    Disable(usize),
    Toggle(usize),
}

fn op_strategy(bindings: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..bindings).prop_map(Op::Enable),
        (0..bindings).prop_map(Op::Disable),
        (0..bindings).prop_map(Op::Toggle),
    ]
}

proptest! {
    #[test]
    fn test_bucket_tracks_enabled_set(ops in prop::collection::vec(op_strategy(4), 0..40)) {
        let mut hotkeys = Hotkeys::new(MemoryDocument::new(), Options::default());
        let ids: Vec<BindingId> = (0..4)
            .map(|_| {
                hotkeys
                    .register_binding("Ctrl+k", None, Action::callback(|_doc: &mut MemoryDocument| {}), None)
                    .unwrap()
            })
            .collect();

        // Model: front of the vector is the most recently enabled binding.
        let mut model: Vec<BindingId> = ids.iter().rev().copied().collect();
        for op in ops {
            let (id, enable) = match op {
                Op::Enable(i) => (ids[i], true),
                Op::Disable(i) => (ids[i], false),
                Op::Toggle(i) => (ids[i], !model.contains(&ids[i])),
            };
            match op {
                Op::Toggle(_) => { hotkeys.toggle(id, None); }
                _ if enable => { hotkeys.enable(id); }
                _ => { hotkeys.disable(id); }
            }
            if !enable {
                model.retain(|candidate| *candidate != id);
            } else if !model.contains(&id) {
                model.insert(0, id);
            }
        }

        let bucket = hotkeys.registry().lookup(&KeyState::key("k", Modifiers::CTRL));
        prop_assert_eq!(bucket, model.as_slice());

        let enabled: HashSet<BindingId> = hotkeys
            .bindings()
            .filter(|binding| binding.is_enabled())
            .map(|binding| binding.id())
            .collect();
        prop_assert_eq!(enabled, model.iter().copied().collect::<HashSet<_>>());

        let outcome = hotkeys.simulate("Ctrl+k").unwrap();
        prop_assert_eq!(outcome.binding(), model.first().copied());
    }
}
