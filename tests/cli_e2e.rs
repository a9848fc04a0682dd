//! End-to-end CLI tests for the pdf-finder binary.
//!
//! These run the compiled binary with a scrubbed environment, so the only
//! reachable paths are argument parsing and configuration resolution; no
//! network request is ever issued.

use assert_cmd::Command;
use predicates::prelude::*;

fn binary() -> Command {
    let mut cmd = Command::cargo_bin("pdf-finder").expect("binary should build");
    // Scrub credentials so no test can accidentally reach the real API.
    cmd.env_remove("API_KEY")
        .env_remove("CX")
        .env_remove("QUERIES")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    binary()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search the web for PDF documents"))
        .stdout(predicate::str::contains("--max-pages"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    binary()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pdf-finder"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    binary()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that missing credentials abort before any work, with code 1.
#[test]
fn test_binary_missing_credentials_exits_nonzero() {
    binary().arg("some query").assert().failure().code(1);
}

/// Test that an unreachable search endpoint aborts with the manifest and
/// the log file flushed.
#[test]
fn test_binary_unreachable_endpoint_flushes_manifest_and_log() {
    let workspace = tempfile::TempDir::new().expect("failed to create temp dir");
    let manifest_dir = workspace.path().join("manifests");
    binary()
        .env("API_KEY", "test-key")
        .env("CX", "test-cx")
        .env("API_ENDPOINT", "http://127.0.0.1:9/customsearch")
        .env("OUT_DIR", workspace.path().join("pdfs"))
        .env("MANIFEST_DIR", &manifest_dir)
        .env("DELAY", "0")
        .arg("some query")
        .assert()
        .failure()
        .code(1);

    assert!(
        manifest_dir.join("manifest.json").exists(),
        "aborted run must still flush the manifest"
    );
    assert!(
        manifest_dir.join("run.log").exists(),
        "a log copy must be written next to the manifests"
    );
}

/// Test that out-of-range --max-pages is rejected at parse time.
#[test]
fn test_binary_rejects_out_of_range_max_pages() {
    binary()
        .args(["-p", "11", "some query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("11"));
}
