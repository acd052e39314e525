use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const BLOCKED: &str = "Parity does not support restoring backups into your production \
                       environment. Use `--force` to override.";

fn parity(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("parity").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PARITY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_text_is_comprehensive() {
    let dir = TempDir::new().unwrap();
    let result = parity(&dir).arg("--help").output().unwrap();

    let output_str = String::from_utf8(result.stdout).unwrap();
    assert!(output_str.contains("ENVIRONMENT"), "Should name the environment argument");
    assert!(output_str.contains("--config"), "Should list the config flag");
    assert!(result.status.success(), "Help should succeed");
}

#[test]
fn test_environment_is_required() {
    let dir = TempDir::new().unwrap();
    let result = parity(&dir).output().unwrap();

    assert!(!result.status.success());
    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(error_str.contains("ENVIRONMENT"));
}

#[test]
fn test_production_restore_is_blocked() {
    let dir = TempDir::new().unwrap();
    let result = parity(&dir)
        .args(["production", "restore", "staging"])
        .output()
        .unwrap();

    assert!(!result.status.success(), "Blocked restore should fail");
    let output_str = String::from_utf8(result.stdout).unwrap();
    assert_eq!(output_str.trim(), BLOCKED);
    assert!(result.stderr.is_empty(), "The blocked message should be the only output");
}

#[test]
fn test_production_binstub_blocks_restore() {
    let dir = TempDir::new().unwrap();
    let result = Command::cargo_bin("production")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("PARITY_CONFIG")
        .args(["restore", "staging"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert_eq!(String::from_utf8(result.stdout).unwrap().trim(), BLOCKED);
}

#[test]
fn test_restore_without_source_fails() {
    let dir = TempDir::new().unwrap();
    let result = parity(&dir).args(["staging", "restore"]).output().unwrap();

    assert!(!result.status.success());
    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(error_str.contains("source environment"));
    assert_eq!(error_str.matches("source environment").count(), 1);
}

#[test]
fn test_development_restore_without_database_fails() {
    let dir = TempDir::new().unwrap();
    let result = Command::cargo_bin("development")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("PARITY_CONFIG")
        .env_remove("RUST_LOG")
        .args(["restore", "production"])
        .output()
        .unwrap();

    assert!(!result.status.success(), "Nothing was restored");
    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(error_str.contains("No development database configured"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("parity.toml"), "[platform\ncli = ").unwrap();

    let result = parity(&dir)
        .args(["production", "restore", "staging"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    let error_str = String::from_utf8(result.stderr).unwrap();
    assert!(error_str.contains("Failed to load"));
    assert!(result.stdout.is_empty(), "Nothing should run with a broken config");
}

#[test]
fn test_config_flag_points_at_another_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("custom.toml"), "[app]\nunknown = true\n").unwrap();

    let result = parity(&dir)
        .args(["--config", "custom.toml", "production", "restore", "staging"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8(result.stderr).unwrap().contains("custom.toml"));
}
