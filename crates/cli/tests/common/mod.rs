//! Shared test utilities for webhotkeys-cli integration tests.
//!
//! Invariants / Assumptions:
//! - Commands built here never see `WEBHOTKEYS_*` variables from the host.

use assert_cmd::Command;

const OPTION_VARS: [&str; 7] = [
    "WEBHOTKEYS_REPLACE_ACCESS_KEYS",
    "WEBHOTKEYS_GRAB_HELP_KEY",
    "WEBHOTKEYS_HELP_KEY",
    "WEBHOTKEYS_OBSERVE_MUTATIONS",
    "WEBHOTKEYS_MARKER_ATTRIBUTE",
    "WEBHOTKEYS_GROUP_ATTRIBUTE",
    "WEBHOTKEYS_HINT_MODE",
];

/// Returns a hermetic `webhotkeys-cli` command for integration testing.
pub fn webhotkeys_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("webhotkeys-cli");
    for var in OPTION_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}
