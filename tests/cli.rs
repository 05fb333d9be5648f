//! Tests for the command-line surface: exit codes and diagnostics.

use std::process::Command;

// Path of the compiled executable.
const EXE: &str = env!("CARGO_BIN_EXE_loom-installer");

#[test]
fn missing_target_dir_exits_nonzero() {
    let output = Command::new(EXE).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn nonexistent_target_dir_exits_nonzero() {
    let tempdir = tempfile::tempdir().unwrap();
    let gone = tempdir.path().join("gone");

    let output = Command::new(EXE).arg(&gone).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gone"));
}

#[test]
fn version_flag_exits_zero() {
    let output = Command::new(EXE).arg("-V").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Starting Loom Installer v"));
}
