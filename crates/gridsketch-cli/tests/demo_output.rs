//! Runs the built binary end to end

use std::process::Command;

use tempfile::tempdir;

fn gridsketch() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gridsketch"));
    cmd.env("GRIDSKETCH_LOG_LEVEL", "off");
    cmd
}

#[test]
fn test_demo_prints_to_stdout() {
    let output = gridsketch().arg("demo").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with('┌'));
    assert!(stdout.ends_with('\n'));
    assert!(stdout.contains("server"));
}

#[test]
fn test_demo_json_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("demo.json");

    let status = gridsketch()
        .args(["demo", "--format", "json", "--style", "ascii", "-o"])
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["lines"].as_array().unwrap().len(), 3);
    assert!(json["text"].as_str().unwrap().starts_with('+'));
}

#[test]
fn test_demo_canvas_too_small_is_clipped() {
    let output = gridsketch()
        .args(["demo", "--columns", "12", "--rows", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.lines().all(|row| row.chars().count() == 12));
}

#[test]
fn test_zero_sized_canvas_fails() {
    let output = gridsketch()
        .args(["demo", "--columns", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error"));
}
