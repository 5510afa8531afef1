use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Check if running as root
fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// A temp file spanning a couple of pages
fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
    file.write_all(&vec![0x5Au8; 3 * 4096 + 7]).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_help_command() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page cache observer"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("ns"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn test_version_flag() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pagescope"));
}

#[test]
fn test_version_command() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pagescope"))
        .stdout(predicate::str::contains("mincore"));
}

#[test]
fn test_invalid_command() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_scan_without_files() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_scan_own_view() {
    let file = sample_file();

    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Page cache residency"))
        .stdout(predicate::str::contains("Total: 1 files"));
}

#[test]
fn test_scan_json_output() {
    let file = sample_file();

    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg("--json")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resident\""))
        .stdout(predicate::str::contains("\"pages\""));
}

#[test]
fn test_scan_missing_file() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg("/nonexistent/really-not-here")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan"));
}

#[test]
fn test_scan_own_pid_needs_no_root() {
    let file = sample_file();

    // Our own process trivially shares our namespace, so no entry runs
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg("--pid")
        .arg(std::process::id().to_string())
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 files"));
}

#[test]
fn test_scan_negative_pid() {
    let file = sample_file();

    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg("--pid=-5")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn test_scan_foreign_namespace_requires_root() {
    // Skip if running as root
    if is_root() {
        return;
    }

    let file = sample_file();

    // Unprivileged, PID 1's namespace link is normally unreadable, which
    // counts as a distinct namespace and trips the root requirement. In
    // rootless containers init may be ours and share our namespace, in
    // which case the scan legitimately runs in place.
    let output = Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("scan")
        .arg("--pid")
        .arg("1")
        .arg(file.path())
        .output()
        .expect("Failed to execute command");

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(
            stdout.contains("Total: 1 files"),
            "Expected scan output, got: {stdout}"
        );
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Must run as root"),
            "Expected root requirement, got: {stderr}"
        );
    }
}

#[test]
fn test_ns_command() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("ns")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mount namespace"))
        .stdout(predicate::str::contains("mnt:["));
}

#[test]
fn test_ns_for_dead_process() {
    Command::new(env!("CARGO_BIN_EXE_pagescope"))
        .arg("ns")
        .arg("--pid")
        .arg(i32::MAX.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("undetermined"));
}
