//! Architecture tests for panic hygiene in library and binary code.
//!
//! Non-test source under `crates/*/src` must propagate errors instead of
//! calling `.unwrap()` or `.expect(`. Everything after the first
//! `#[cfg(test)]` in a file is treated as test code, as are files that only
//! exist as test modules (`*_tests.rs`, anything under a `tests/` directory).

mod common;

use std::fs;
use std::path::Path;

use common::{find_workspace_root, rust_files};

const FORBIDDEN: &[&str] = &[".unwrap()", ".expect("];

fn is_test_only_file(path: &Path) -> bool {
    let in_tests_dir = path
        .components()
        .any(|component| component.as_os_str() == "tests");
    let is_tests_module = path
        .file_stem()
        .is_some_and(|stem| stem.to_string_lossy().ends_with("_tests"));
    in_tests_dir || is_tests_module
}

/// Returns `(line_number, line)` for each forbidden call in non-test code.
fn violations(content: &str) -> Vec<(usize, String)> {
    let mut found = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") {
            continue;
        }
        if FORBIDDEN.iter().any(|pattern| trimmed.contains(pattern)) {
            found.push((index + 1, trimmed.to_string()));
        }
    }
    found
}

#[test]
fn no_unwrap_in_non_test_code() {
    let workspace_root = find_workspace_root();
    let crates_dir = workspace_root.join("crates");

    let mut failures = Vec::new();
    let mut checked = 0;

    for file_path in rust_files(&crates_dir) {
        let relative = file_path
            .strip_prefix(&workspace_root)
            .unwrap_or(&file_path)
            .to_path_buf();
        let under_src = relative
            .components()
            .any(|component| component.as_os_str() == "src");
        if !under_src || is_test_only_file(&relative) {
            continue;
        }

        let content = fs::read_to_string(&file_path).expect("Failed to read file");
        checked += 1;
        for (line_number, line) in violations(&content) {
            failures.push(format!("{}:{}: {}", relative.display(), line_number, line));
        }
    }

    assert!(checked > 0, "no source files checked under {:?}", crates_dir);
    assert!(
        failures.is_empty(),
        "\n=== Architecture Test Failed: unwrap/expect in non-test code ===\n\n{}\n\n\
         Propagate the error with `?` or handle it explicitly.\n",
        failures.join("\n")
    );
}

#[test]
fn test_violations_stop_at_test_module() {
    let source = r#"
fn parse(input: &str) -> Option<u8> {
    // input.parse().unwrap() would panic here
    input.parse().ok()
}

#[cfg(test)]
mod tests {
    fn t() { "1".parse::<u8>().unwrap(); }
}
"#;
    assert!(violations(source).is_empty());
}

#[test]
fn test_violations_report_line_numbers() {
    let source = "fn a() {}\nfn b() { Some(1).expect(\"one\"); }\n";
    let found = violations(source);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, 2);
}

#[test]
fn test_is_test_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let helper = dir.path().join("src/loader/tests/env_tests.rs");
    assert!(is_test_only_file(&helper));
    assert!(is_test_only_file(Path::new("crates/hotkeys/src/builder_tests.rs")));
    assert!(!is_test_only_file(Path::new("crates/hotkeys/src/registry.rs")));
}
