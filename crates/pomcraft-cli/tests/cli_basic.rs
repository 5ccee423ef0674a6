//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run with POMCRAFT_DATA_DIR pointed at
//! a per-test temp dir, so they never touch real user files.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "pomcraft-cli", "--"])
        .args(args)
        .env("POMCRAFT_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_get_default() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "work_duration"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");
}

#[test]
fn test_config_set_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "work_duration", "50"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "work_duration"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "50");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "bogus"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_task_add_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["task", "add", "Write report"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Task created:"));

    let (stdout, _, code) = run_cli(dir.path(), &["task", "list", "--json"]);
    assert_eq!(code, 0);
    let tasks: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(tasks[0]["title"], "Write report");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn test_task_toggle_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, _) = run_cli(dir.path(), &["task", "add", "Toggle me"]);
    let id = stdout.trim().rsplit(' ').next().unwrap().to_string();

    let (_, _, code) = run_cli(dir.path(), &["task", "toggle", &id]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli(dir.path(), &["task", "stats"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1 tasks, 1 completed");
}

#[test]
fn test_task_import() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("seeds.json");
    std::fs::write(
        &file,
        r#"[{"title": "a"}, {"title": "b", "description": "second"}]"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["task", "import", file.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Imported 2 tasks"));
}
