//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A 2x2 macro pad in KLE download JSON.
pub const MACRO_PAD_JSON: &str = r#"[
  {"name": "Macro pad"},
  ["Num Lock", "/"],
  ["7\nHome", "8\n↑"]
]"#;

/// A small staggered layout in KLE raw data format.
pub const STAGGERED_RAW: &str = r#"["Esc","!\n1","@\n2"],
[{w:1.5},"Tab","Q","W"],
[{w:1.75},"Caps Lock","A","S"],
[{w:6.25},""]"#;

/// Path to the klepcb binary
pub fn klepcb_bin() -> &'static str {
    env!("CARGO_BIN_EXE_klepcb")
}

/// Writes `content` to `name` inside a new temporary directory.
///
/// # Returns
/// The file path and the `TempDir` guard, which must be kept alive.
pub fn create_temp_layout_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write layout file");
    (path, temp_dir)
}

/// Path of a config file inside `dir` that does not exist yet.
pub fn isolated_config_path(dir: &Path) -> PathBuf {
    dir.join("config").join("config.toml")
}

/// Reads a generated script to a string.
pub fn read_script(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}
