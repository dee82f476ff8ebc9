//! The installed binary end to end: argument handling, exit codes and the
//! printed summary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn sower() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sower"))
}

/// A materialize-only run creates the base directory, fills the job
/// directories and prints the summary line.
#[test]
fn materialize_only_run_prints_a_summary() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("params.txt");
    fs::write(&table, "alpha\n0.1\n0.9\n").unwrap();
    let src = dir.path().join("run.in");
    fs::write(&src, "alpha = {alpha}\n").unwrap();
    let base = dir.path().join("runs");

    let output = sower()
        .arg(&table)
        .arg("--file")
        .arg(format!("{}:run.in", src.display()))
        .arg("--base-dir")
        .arg(&base)
        .arg("--no-submit")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "run should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "2 jobs: 0 skipped, 2 materialized, 0 submitted, 0 failed"
    );
    assert_eq!(
        fs::read_to_string(base.join("1/run.in")).unwrap(),
        "alpha = 0.9\n"
    );
}

/// A pause too large for a Duration is a clean CLI error, not a crash.
#[test]
fn an_out_of_range_pause_is_rejected_cleanly() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("params.txt");
    fs::write(&table, "alpha\n0.1\n").unwrap();

    let output = sower()
        .arg(&table)
        .arg("--no-submit")
        .arg("--pause-seconds")
        .arg("2e19")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--pause-seconds"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

/// Negative pauses are rejected with the same message.
#[test]
fn a_negative_pause_is_rejected_cleanly() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("params.txt");
    fs::write(&table, "alpha\n0.1\n").unwrap();

    let output = sower()
        .arg(&table)
        .arg("--no-submit")
        .arg("--pause-seconds=-0.5")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--pause-seconds"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

/// An unreadable table is a batch-fatal error before any job is touched.
#[test]
fn a_missing_table_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("runs");

    let output = sower()
        .arg(dir.path().join("no-such-table.txt"))
        .arg("--base-dir")
        .arg(&base)
        .arg("--no-submit")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(fs::read_dir(&base).unwrap().next().is_none());
}
