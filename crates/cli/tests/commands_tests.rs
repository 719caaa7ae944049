//! Integration tests for the webhotkeys-cli subcommands.
//!
//! Test coverage:
//! - `parse`: canonical form, lookup state, rendered label, warnings on stderr.
//! - `simulate`: handled/unmatched/text-editing outcomes, raw JSON events, help key.
//! - `list`: help text layout with and without a group.
//! - Exit codes: 0 on success, 1 on invalid input.

mod common;

use common::webhotkeys_cmd;
use predicates::prelude::*;

#[test]
fn test_parse_prints_lookup_details() {
    webhotkeys_cmd()
        .args(["parse", "Alt+Digit1", "Shift+?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alt+Digit1\tcode\tDigit1/4\tAlt+1"))
        .stdout(predicate::str::contains("Shift+?\tkey\t?/8\tShift+?"));
}

#[test]
fn test_parse_warns_about_unknown_modifiers() {
    webhotkeys_cmd()
        .args(["parse", "Hyper+k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("k\tkey\tk/0\tk"))
        .stderr(predicate::str::contains("Unknown modifier 'Hyper'"));
}

#[test]
fn test_parse_strict_rejects_unknown_modifiers() {
    webhotkeys_cmd()
        .args(["parse", "--strict", "Hyper+k"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse 'Hyper+k'"));
}

#[test]
fn test_parse_json_output() {
    let output = webhotkeys_cmd()
        .args(["parse", "-o", "json", "Ctrl++"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["canonical"], "Ctrl++");
    assert_eq!(value[0]["kind"], "key");
}

#[test]
fn test_simulate_reports_outcomes() {
    webhotkeys_cmd()
        .args(["simulate", "--bind", "Ctrl+s=Save", "Ctrl+s", "Ctrl+q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ctrl+s\thandled\tCtrl+s\tSave"))
        .stdout(predicate::str::contains("Ctrl+q\tunmatched"));
}

#[test]
fn test_simulate_raw_json_event() {
    webhotkeys_cmd()
        .args([
            "simulate",
            "--bind",
            "Alt+Digit1=Inbox",
            r#"{"key":"+","code":"Digit1","altKey":true}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("handled\tAlt+1\tInbox"));
}

#[test]
fn test_simulate_leaves_typing_to_focused_input() {
    webhotkeys_cmd()
        .args(["simulate", "--focus-input", "--bind", "a=Archive", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a\ttext-editing"));
}

#[test]
fn test_simulate_help_key_prints_binding_list() {
    webhotkeys_cmd()
        .args(["simulate", "--group", "Files", "--bind", "Ctrl+s=Save", "F1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("F1\thandled\tF1\tHelp"))
        .stdout(predicate::str::contains("**Files**\nCtrl+s: Save"));
}

#[test]
fn test_simulate_rejects_invalid_binding() {
    webhotkeys_cmd()
        .args(["simulate", "--bind", "Shift+", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid binding"));
}

#[test]
fn test_list_without_help_key() {
    webhotkeys_cmd()
        .args([
            "list",
            "--no-help-key",
            "--bind",
            "Alt+Digit1=Inbox",
            "--bind",
            "Escape=Close",
        ])
        .assert()
        .success()
        .stdout(predicate::eq("Alt+1: Inbox\nEscape: Close\n"));
}

#[test]
fn test_list_respects_environment_help_key() {
    webhotkeys_cmd()
        .env("WEBHOTKEYS_HELP_KEY", "Shift+?")
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::eq("Shift+?: Help\n"));
}

#[test]
fn test_invalid_hint_mode_fails() {
    webhotkeys_cmd()
        .args(["--hint", "sideways", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid hint mode 'sideways'"));
}
