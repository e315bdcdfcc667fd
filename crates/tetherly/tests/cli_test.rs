//! Integration tests for the `tetherly` CLI binary.
//!
//! Every test runs against the seeded demo dataset, either in memory
//! (`--ephemeral`) or in a throwaway data directory.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tetherly` binary with env isolation.
///
/// Clears all `TETHERLY_*` env vars and points config and data
/// directories at `home` so tests never touch the user's real state.
fn tetherly_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tetherly");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("TETHERLY_OUTPUT")
        .env_remove("TETHERLY_DATA_DIR")
        .env_remove("TETHERLY_STORAGE__POLICY")
        .env_remove("TETHERLY_VOUCHERS__CODE_LENGTH")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let output = tetherly_cmd(home).args(args).args(["-o", "json"]).output().unwrap();
    assert!(
        output.status.success(),
        "command {args:?} failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = tetherly_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("devices")
            .and(predicate::str::contains("vouchers"))
            .and(predicate::str::contains("hotspot")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tetherly"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "devices", "list", "-o", "xml"])
        .assert()
        .failure()
        .code(2);
}

// ── Devices ─────────────────────────────────────────────────────────

#[test]
fn test_devices_list_json_has_seeded_devices() {
    let home = TempDir::new().unwrap();
    let devices = run_json(home.path(), &["--ephemeral", "devices", "list"]);
    assert_eq!(devices.as_array().unwrap().len(), 20);

    let blocked = run_json(home.path(), &["--ephemeral", "devices", "list", "--status", "blocked"]);
    assert_eq!(blocked.as_array().unwrap().len(), 2);
}

#[test]
fn test_unknown_device_exits_not_found() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "devices", "get", "dev-999"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_kick_without_yes_is_refused() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "devices", "kick", "dev-001"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_device_commands_plain() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "devices", "commands", "dev-001", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iptables").and(predicate::str::contains("wlan0")));
}

// ── Persistence ─────────────────────────────────────────────────────

#[test]
fn test_block_persists_across_runs() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("state");
    let data = data.to_str().unwrap();

    tetherly_cmd(home.path())
        .args(["--data-dir", data, "devices", "block", "dev-002"])
        .assert()
        .success();

    let device = run_json(home.path(), &["--data-dir", data, "devices", "get", "dev-002"]);
    assert_eq!(device["status"], "blocked");
    assert_eq!(device["signalStrength"], 0);
}

#[test]
fn test_export_then_import_restores_devices() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("state");
    let data = data.to_str().unwrap();
    let bundle = home.path().join("backup.json");
    let bundle = bundle.to_str().unwrap();

    tetherly_cmd(home.path())
        .args(["--data-dir", data, "export", "--file", bundle])
        .assert()
        .success();
    tetherly_cmd(home.path())
        .args(["--data-dir", data, "--yes", "devices", "kick", "dev-001"])
        .assert()
        .success();
    assert_eq!(
        run_json(home.path(), &["--data-dir", data, "devices", "list"])
            .as_array()
            .unwrap()
            .len(),
        19
    );

    tetherly_cmd(home.path())
        .args(["--data-dir", data, "--yes", "import", "--file", bundle])
        .assert()
        .success();
    assert_eq!(
        run_json(home.path(), &["--data-dir", data, "devices", "list"])
            .as_array()
            .unwrap()
            .len(),
        20
    );
}

#[test]
fn test_import_rejects_malformed_bundle() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "--yes", "import"])
        .write_stdin("{\"devices\": []}")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Import rejected"));
}

// ── Vouchers ────────────────────────────────────────────────────────

#[test]
fn test_voucher_create_from_preset() {
    let home = TempDir::new().unwrap();
    let created = run_json(
        home.path(),
        &["--ephemeral", "vouchers", "create", "--preset", "trial", "--count", "3"],
    );
    let created = created.as_array().unwrap();
    assert_eq!(created.len(), 3);
    assert!(created.iter().all(|v| v["durationHours"] == 1 && v["status"] == "unused"));
}

#[test]
fn test_voucher_revoke_by_code() {
    let home = TempDir::new().unwrap();
    let data = home.path().join("state");
    let data = data.to_str().unwrap();

    tetherly_cmd(home.path())
        .args(["--data-dir", data, "vouchers", "revoke", "FAST2024"])
        .assert()
        .success();
    let voucher = run_json(home.path(), &["--data-dir", data, "vouchers", "get", "voucher-001"]);
    assert_eq!(voucher["status"], "revoked");
}

// ── Hotspot ─────────────────────────────────────────────────────────

#[test]
fn test_invalid_ssid_exits_usage() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["--ephemeral", "hotspot", "set", "--ssid", &"x".repeat(40)])
        .assert()
        .code(2);
}

#[test]
fn test_stats_json() {
    let home = TempDir::new().unwrap();
    let stats = run_json(home.path(), &["--ephemeral", "stats", "--history"]);
    assert_eq!(stats["devices"]["blocked"], 2);
    assert_eq!(stats["history"].as_array().unwrap().len(), 24);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_set_then_show() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["config", "set", "shell.interface", "ap0"])
        .assert()
        .success();
    tetherly_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ap0"));
    tetherly_cmd(home.path())
        .args(["--ephemeral", "hotspot", "commands", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dev ap0"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let home = TempDir::new().unwrap();
    tetherly_cmd(home.path())
        .args(["config", "set", "vouchers.code_length", "2"])
        .assert()
        .code(2);
}
