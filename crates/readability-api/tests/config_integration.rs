//! Configuration integration tests.
//!
//! Each test lays out a config tree in a temp directory, runs the binary
//! there and reads the effective settings back from `info --json`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn effective_config(dir: &Path, extra: &[&str]) -> Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap()])
        .args(extra)
        .args(["info", "--json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "info failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    json["config"].clone()
}

fn port_in(dir: &Path) -> Value {
    effective_config(dir, &[])["port"].clone()
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn defaults_without_any_file() {
    let tmp = TempDir::new().unwrap();
    let config = effective_config(tmp.path(), &[]);

    assert!(config["config_file"].is_null());
    assert_eq!(config["host"], "127.0.0.1");
    assert_eq!(config["port"], 5000);
    assert_eq!(config["max_input_bytes"], 10_000);
    assert_eq!(config["log_level"], "info");
    assert!(config["cors_origins"].is_null());
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn project_file_sets_service_settings() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".readability-api.toml"),
        "host = \"0.0.0.0\"\nport = 8080\nmax_input_bytes = 2048\n\
         cors_origins = [\"https://example.org\"]\n",
    )
    .unwrap();

    let config = effective_config(tmp.path(), &[]);
    assert_eq!(config["host"], "0.0.0.0");
    assert_eq!(config["port"], 8080);
    assert_eq!(config["max_input_bytes"], 2048);
    assert_eq!(config["cors_origins"], serde_json::json!(["https://example.org"]));
    assert!(
        config["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".readability-api.toml")
    );
}

#[test]
fn yaml_file_can_disable_the_limit() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("readability.yaml"), "disable_input_limit: true\n").unwrap();

    assert!(effective_config(tmp.path(), &[])["max_input_bytes"].is_null());
}

#[test]
fn walks_up_from_nested_directory() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("docs").join("drafts");
    fs::create_dir_all(&nested).unwrap();
    fs::write(tmp.path().join("readability-api.json"), r#"{"port": 6001}"#).unwrap();

    assert_eq!(port_in(&nested), 6001);
}

#[test]
fn nearest_directory_wins() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("service");
    fs::create_dir(&nested).unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = 6001\n").unwrap();
    fs::write(nested.join(".readability-api.toml"), "port = 6002\n").unwrap();

    assert_eq!(port_in(&nested), 6002);
}

#[test]
fn file_name_precedence_within_a_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability.toml"), "port = 7000\n").unwrap();
    assert_eq!(port_in(tmp.path()), 7000);

    fs::write(tmp.path().join("readability.toml"), "port = 7001\n").unwrap();
    assert_eq!(port_in(tmp.path()), 7001);

    fs::write(tmp.path().join(".readability-api.toml"), "port = 7002\n").unwrap();
    assert_eq!(port_in(tmp.path()), 7002);

    fs::write(tmp.path().join("readability-api.toml"), "port = 7003\n").unwrap();
    assert_eq!(port_in(tmp.path()), 7003);
}

#[test]
fn search_stops_at_repository_root() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = 6100\n").unwrap();

    let config = effective_config(&src, &[]);
    assert_eq!(config["port"], 5000);
    assert!(config["config_file"].is_null());
}

#[test]
fn file_at_repository_root_is_found() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::create_dir(tmp.path().join(".git")).unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = 6200\n").unwrap();

    assert_eq!(port_in(&src), 6200);
}

// =============================================================================
// Overrides
// =============================================================================

#[test]
fn explicit_file_overrides_discovered_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = 7000\nhost = \"::1\"\n").unwrap();
    let explicit = tmp.path().join("deploy.toml");
    fs::write(&explicit, "port = 9000\n").unwrap();

    let config = effective_config(tmp.path(), &["--config", explicit.to_str().unwrap()]);
    assert_eq!(config["port"], 9000);
    assert_eq!(config["host"], "::1", "unset keys still come from the project file");
    assert!(config["config_file"].as_str().unwrap().ends_with("deploy.toml"));
}

#[test]
fn environment_overrides_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = 7000\n").unwrap();

    let output = cmd()
        .env("READABILITY_API_PORT", "9100")
        .args(["-C", tmp.path().to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["port"], 9100);
}

// =============================================================================
// Failures and effects
// =============================================================================

#[test]
fn malformed_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = [[[").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}

#[test]
fn wrongly_typed_port_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "port = \"five thousand\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn configured_limit_applies_to_analyze() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".readability-api.toml"), "max_input_bytes = 8\n").unwrap();
    fs::write(tmp.path().join("doc.txt"), "This sentence is too long.").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "analyze", "doc.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}
