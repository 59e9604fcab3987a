#![allow(dead_code)]

use anyhow::Result;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn bundled_sidebar_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/object_write.sidebar-items.js")
}

// Writes `contents` to a temp file that lives as long as the returned handle.
pub fn write_fixture(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub fn write_json_fixture(value: &Value) -> Result<NamedTempFile> {
    write_fixture(&serde_json::to_string(value)?)
}

pub fn sidebar_index_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sidebar-index"));
    cmd.env_remove("SIDEBAR_INDEX_FILE")
        .env_remove("SIDEBAR_EXTRA_CATEGORIES")
        .env_remove("RUST_LOG");
    cmd
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
