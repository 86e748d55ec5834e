use std::fs;
use std::path::Path;
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Runs `hole` in `dir` with no inherited config.
fn hole(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hole"))
        .args(args)
        .current_dir(dir)
        .env_remove("HOLE_CONFIG")
        .env_remove("HOLE_LOG")
        .output()
        .expect("failed to run hole")
}

fn hole_with_config(dir: &Path, config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hole"))
        .args(args)
        .current_dir(dir)
        .env("HOLE_CONFIG", config)
        .env_remove("HOLE_LOG")
        .output()
        .expect("failed to run hole")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ---------------------------------------------------------------------------
// Default handler
// ---------------------------------------------------------------------------

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    for flag in ["--version", "-v"] {
        let output = hole(dir.path(), &[flag]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), format!("Hole v{}", env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["--help"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Usage: hole"));
    for command in ["config", "item", "key", "new"] {
        assert!(text.contains(command), "manual misses {command}: {text}");
    }
}

#[test]
fn test_grouped_short_options_rejected_for_unknown_label() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["-vx"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: "));
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[test]
fn test_new_with_key_value() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["new", "color", "red"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Entry created: 1 (color = red)");
}

#[test]
fn test_insufficient_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["item"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("error:"));
}

#[test]
fn test_unknown_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["frobnicate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("handler not found: frobnicate"));
}

#[test]
fn test_item_missing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["item", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("entry not found: 1"));
}

// ---------------------------------------------------------------------------
// Configuration files
// ---------------------------------------------------------------------------

#[test]
fn test_config_shows_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = hole(dir.path(), &["config", "time.format"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "millis");
}

#[test]
fn test_project_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".hole.yaml"), "time.format: rfc3339\n").unwrap();

    let output = hole(dir.path(), &["config", "time.format"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "rfc3339");

    let level = hole(dir.path(), &["config", "-l", "DEFAULT", "time.format"]);
    assert_eq!(stdout(&level), "millis");
}

#[test]
fn test_user_config_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("user.json");
    fs::write(&config, r#"{"plugin.enabled": ["time"]}"#).unwrap();

    let output = hole_with_config(dir.path(), &config, &["config", "plugin.enabled"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), r#"["time"]"#);

    // keyvalue is disabled, so `new` takes no arguments again
    let created = hole_with_config(dir.path(), &config, &["new"]);
    assert_eq!(stdout(&created), "Entry created: 1");
}

#[test]
fn test_illegal_key_in_config_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".hole.json"), r#"{"password": "123456"}"#).unwrap();

    let output = hole(dir.path(), &["--version"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("key does not exist in the key set: password"));
}
