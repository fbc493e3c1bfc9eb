//! End-to-end tests for `folio config` commands.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::Mutex;

mod fixtures;
use fixtures::*;

// Mutex to ensure config tests that modify state don't run in parallel
static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

/// Path to the folio binary
fn folio_bin() -> String {
    std::env::var("CARGO_BIN_EXE_folio").unwrap_or_else(|_| "target/release/folio".to_string())
}

/// Creates a Command with isolated config directory for testing.
/// Pass in a config directory path to share between multiple commands in the same test.
fn isolated_config_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(folio_bin());
    cmd.env("FOLIO_CONFIG_DIR", config_dir);
    cmd.args(args);
    cmd
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let dir = temp_dir();
    let output = isolated_config_command(&["config", "show"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Activation Margin: 150px"));
    assert!(stdout.contains("Mode: download"));
}

#[test]
fn test_config_show_json_schema() {
    let dir = temp_dir();
    let output = isolated_config_command(&["config", "show", "--json"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["scroll"]["activation_margin"], 150.0);
    assert_eq!(result["scroll"]["navbar_offset"], 100.0);
    assert_eq!(result["scroll"]["debounce_ms"], 10);
    assert_eq!(result["scroll"]["debounce_leading"], true);
    assert_eq!(result["pointer"]["cursor_ease"], 0.1);
    assert_eq!(result["resume"]["mode"], "download");
    assert!(result["site"].is_object());
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let dir = temp_dir();

    let output = isolated_config_command(
        &[
            "config",
            "set",
            "--navbar-offset",
            "64",
            "--resume-mode",
            "print",
            "--owner",
            "Ada Lovelace",
        ],
        dir.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Set should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("config.toml").exists());

    let output = isolated_config_command(&["config", "show", "--json"], dir.path())
        .output()
        .expect("Failed to execute command");
    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert_eq!(result["scroll"]["navbar_offset"], 64.0);
    assert_eq!(result["resume"]["mode"], "print");
    assert_eq!(result["site"]["owner"], "Ada Lovelace");
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let dir = temp_dir();

    let output = isolated_config_command(&["config", "set", "--cursor-ease", "1.5"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cursor_ease"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_requires_an_option() {
    let dir = temp_dir();
    let output = isolated_config_command(&["config", "set"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_show_rejects_corrupt_file() {
    let dir = temp_dir();
    fs::write(dir.path().join("config.toml"), "[pointer]\ncursor_ease = 0.0\n").unwrap();

    let output = isolated_config_command(&["config", "show"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// Path Command Tests
// ============================================================================

#[test]
fn test_config_path_respects_override() {
    let dir = temp_dir();
    let output = isolated_config_command(&["config", "path"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        dir.path().join("config.toml").display().to_string()
    );
}
