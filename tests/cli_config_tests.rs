//! End-to-end tests for `klepcb config` commands.

use std::path::Path;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Creates a `klepcb config` command pointed at an isolated config file.
fn config_command(args: &[&str], config: &Path) -> Command {
    let mut cmd = Command::new(klepcb_bin());
    cmd.arg("config");
    cmd.args(args);
    cmd.args(["--config", config.to_str().unwrap()]);
    cmd
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());

    let output = config_command(&["show"], &config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Diode: tht"));
    assert!(stdout.contains("Key switch: mx"));
    assert!(stdout.contains("Directory: (next to input)"));
    assert!(!config.exists(), "show must not create the file");
}

#[test]
fn test_config_show_json_format() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());

    let output = config_command(&["show", "--json"], &config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Output should be JSON");
    assert_eq!(json["defaults"]["diode"], "tht");
    assert_eq!(json["defaults"]["switch"], "mx");
    assert_eq!(json["defaults"]["center_switches"], false);
    assert!(json["path"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn test_config_show_malformed_file_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[defaults\n").unwrap();

    let output = config_command(&["show"], &config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_and_show() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());

    let output = config_command(
        &["set", "--diode", "smd", "--key-switch", "chocX", "--center-switches", "true"],
        &config,
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Set config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config.exists());

    let output = config_command(&["show", "--json"], &config)
        .output()
        .expect("Failed to execute command");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["defaults"]["diode"], "smd");
    assert_eq!(json["defaults"]["switch"], "chocX");
    assert_eq!(json["defaults"]["center_switches"], true);
    assert_eq!(json["defaults"]["validate_order"], false);
}

#[test]
fn test_config_set_out_dir() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());
    let out_dir = temp.path().join("scripts");

    let output = config_command(&["set", "--out-dir", out_dir.to_str().unwrap()], &config)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let output = config_command(&["show"], &config)
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Directory: {}", out_dir.display())));
}

#[test]
fn test_config_set_requires_an_option() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());

    let output = config_command(&["set"], &config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option must be specified"));
}

#[test]
fn test_config_set_unknown_switch_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = isolated_config_path(temp.path());

    let output = config_command(&["set", "--key-switch", "topre"], &config)
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown default switch 'topre'"));
    assert!(!config.exists(), "invalid values must not be saved");
}

#[test]
fn test_config_set_then_generate_uses_defaults() {
    let (layout_path, temp) = create_temp_layout_file("macro.json", MACRO_PAD_JSON);
    let config = isolated_config_path(temp.path());

    let output = config_command(&["set", "--key-switch", "mxHs"], &config)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let output = Command::new(klepcb_bin())
        .args([
            "generate",
            layout_path.to_str().unwrap(),
            "--stdout",
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ADD KEYSWITCH-PLAIN-MXHS-1U SLASH (1.00 0.00);"));
}
