//! Shared helpers for architecture tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the `[workspace]` manifest, searched upward from the
/// current directory.
pub fn find_workspace_root() -> PathBuf {
    let start = std::env::current_dir().unwrap();
    let found = start
        .ancestors()
        .find(|dir| {
            fs::read_to_string(dir.join("Cargo.toml"))
                .is_ok_and(|manifest| manifest.contains("[workspace]"))
        })
        .map(Path::to_path_buf);
    found.unwrap_or(start)
}

/// All .rs files under `dir`, skipping build output and this crate.
pub fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "rs"))
        .map(walkdir::DirEntry::into_path)
        .collect()
}
