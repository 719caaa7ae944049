//! CLI command implementations.

pub mod list;
pub mod parse;
pub mod simulate;

use anyhow::{Context, Result};
use webhotkeys::{Action, BindingDef, Hotkeys, MemoryDocument, parse_combination};

use crate::args::BindArg;

/// Register `--bind` values, into `group` when given.
///
/// Every combination is validated first so a typo fails the command
/// instead of being skipped.
pub(crate) fn register_binds(
    hotkeys: &mut Hotkeys<MemoryDocument>,
    binds: &[BindArg],
    group: Option<&str>,
) -> Result<()> {
    for bind in binds {
        parse_combination(&bind.spec)
            .with_context(|| format!("Invalid binding '{}'", bind.spec))?;
    }

    match group {
        Some(name) => {
            let definitions = binds
                .iter()
                .map(|bind| {
                    BindingDef::new(bind.spec.clone(), reporting_action(bind))
                        .with_hint(bind.hint.clone())
                })
                .collect();
            hotkeys.register_group(name, definitions);
        }
        None => {
            for bind in binds {
                hotkeys
                    .register_binding(&bind.spec, Some(&bind.hint), reporting_action(bind), None)
                    .with_context(|| format!("Failed to register '{}'", bind.spec))?;
            }
        }
    }
    Ok(())
}

/// Callback that only logs that it ran.
fn reporting_action(bind: &BindArg) -> Action<MemoryDocument> {
    let spec = bind.spec.clone();
    Action::callback(move |_doc: &mut MemoryDocument| {
        tracing::info!(combination = %spec, "Binding fired");
    })
}
