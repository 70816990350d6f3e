//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

use swimtally::{parse, ParseResult};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path to a named fixture
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Parse a fixture file
pub fn parse_fixture(name: &str) -> ParseResult {
    parse(&load_fixture(name))
}

/// Assert two distances agree to well below a centimetre
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// The swimtally binary with an isolated HOME, so no user config leaks in.
pub fn swimtally(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("swimtally").expect("swimtally binary is built");
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("SWIMTALLY_LOG");
    cmd
}

/// Write a config file under an isolated HOME
pub fn write_config(home: &TempDir, contents: &str) -> PathBuf {
    let dir = home.path().join(".config").join("swimtally");
    fs::create_dir_all(&dir).expect("Failed to create config dir");
    let path = dir.join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    path
}
