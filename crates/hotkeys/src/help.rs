//! Help text listing the enabled bindings.
//!
//! Layout: ungrouped bindings first in registration order, one
//! `<combination>: <hint>` line each, then every group with at least one
//! enabled member as a `**<name>**` block. The whole text is trimmed.

use std::collections::{BTreeMap, HashSet};

use crate::binding::{Binding, BindingId};
use crate::group::Group;

pub(crate) fn render_help<D>(bindings: &BTreeMap<BindingId, Binding<D>>, groups: &[Group]) -> String {
    let mut seen: HashSet<BindingId> = HashSet::new();
    let mut blocks = Vec::new();

    for group in groups {
        let lines: Vec<String> = group
            .members()
            .iter()
            .filter_map(|id| bindings.get(id))
            .filter(|binding| binding.is_enabled())
            .map(|binding| {
                seen.insert(binding.id());
                binding.help_line()
            })
            .collect();
        if !lines.is_empty() {
            blocks.push(format!("\n**{}**\n{}", group.name(), lines.join("\n")));
        }
    }

    let mut parts: Vec<String> = bindings
        .values()
        .filter(|binding| binding.is_enabled() && !seen.contains(&binding.id()))
        .map(Binding::help_line)
        .collect();
    parts.extend(blocks);
    parts.join("\n").trim().to_string()
}
