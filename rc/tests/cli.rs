#![cfg(feature = "libraw")]

use std::process::{Command, Output};

fn rc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rc"))
        .args(args)
        .output()
        .expect("Failed to run rc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_cameras() {
    let output = rc(&["-L"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).lines().count() > 1);
}

#[test]
fn list_cameras_with_a_missing_file() {
    let output = rc(&["-L", "/no/such/file.nef"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout(&output).is_empty());
}

#[test]
fn missing_file() {
    let output = rc(&["/no/such/file.nef"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("File /no/such/file.nef not found"));
}

#[test]
fn no_raw_file() {
    let output = rc(&["-T"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Please specify raw file"));
}

#[test]
fn not_a_raw_file() {
    let input = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
    let output = rc(&[input]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains(&format!("Cannot open {input}: ")));
}

#[test]
fn bare_invocation_shows_usage() {
    let output = rc(&[]);
    assert_eq!(output.status.code(), Some(0));
    let usage = stdout(&output);
    assert!(usage.contains("Based on LibRaw, version: "));
    assert!(usage.contains("rc [OPTIONS] raw-file > target.ppm"));
}

#[test]
fn help_and_version() {
    let help = rc(&["--help"]);
    assert_eq!(help.status.code(), Some(0));
    assert!(stdout(&help).contains("-h <HEIGHT>"));

    let version = rc(&["--version"]);
    assert_eq!(version.status.code(), Some(0));
    assert!(stdout(&version).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag() {
    let output = rc(&["-q", "photo.nef"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr(&output).is_empty());
}
