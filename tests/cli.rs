//! End-to-end tests for the netsnap binary
//!
//! None of these reach the Dashboard API: they work on backup files in a
//! temporary directory, or stop before the first request.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn netsnap(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("netsnap").unwrap();
    cmd.env("NETSNAP_HOME", home.path())
        .env_remove("MERAKI_API_KEY")
        .env_remove("MERAKI_NETWORK_ID")
        .env_remove("RUST_LOG");
    cmd
}

fn write_backup(dir: &Path, filename: &str, timestamp: &str, corp_name: &str) {
    let backup = json!({
        "metadata": {
            "timestamp": timestamp,
            "network_id": "L_646829496481105433",
            "network_name": "Chicago Branch Office",
            "backup_version": "1.0"
        },
        "appliance": {
            "vlans": [
                {"id": "1", "name": "Default", "subnet": "192.168.1.0/24", "applianceIp": "192.168.1.1"},
                {"id": "10", "name": corp_name, "subnet": "10.10.10.0/24", "applianceIp": "10.10.10.1"}
            ],
            "firewall_l3": {"rules": [
                {"comment": "Default rule", "policy": "allow", "destCidr": "Any"}
            ]}
        },
        "wireless": {"ssids": [{"number": 0, "name": "Corp WiFi", "enabled": true}]}
    });
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(filename), serde_json::to_string_pretty(&backup).unwrap()).unwrap();
}

/// Home with two backups of the same network; the newer renames VLAN 10
fn home_with_backups() -> TempDir {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("backups");
    write_backup(
        &dir,
        "backup_Chicago_Branch_Office_20251120_090000.json",
        "2025-11-20T09:00:00-06:00",
        "Corp",
    );
    write_backup(
        &dir,
        "backup_Chicago_Branch_Office_20251127_143022.json",
        "2025-11-27T14:30:22-06:00",
        "Corporate",
    );
    home
}

#[test]
fn list_shows_newest_first() {
    let home = home_with_backups();

    let output = netsnap(&home).arg("list").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    let newer = stdout.find("2025-11-27 14:30:22").unwrap();
    let older = stdout.find("2025-11-20 09:00:00").unwrap();
    assert!(newer < older);
    assert!(stdout.contains("Total: 2 backup(s)"));
}

#[test]
fn list_reports_unreadable_files() {
    let home = home_with_backups();
    fs::write(
        home.path().join("backups").join("backup_Broken_20251201_000000.json"),
        "{\"metadata\":",
    )
    .unwrap();

    netsnap(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 backup(s)"))
        .stdout(predicate::str::contains("backup_Broken_20251201_000000.json"));
}

#[test]
fn list_honours_backup_dir_flag() {
    let home = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    write_backup(
        elsewhere.path(),
        "backup_Lab_20250101_080000.json",
        "2025-01-01T08:00:00",
        "Corp",
    );

    netsnap(&home)
        .args(["list", "--backup-dir"])
        .arg(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 1 backup(s)"));
}

#[test]
fn list_without_backup_dir_is_config_error() {
    let home = TempDir::new().unwrap();

    netsnap(&home)
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn show_latest_summarizes_backup() {
    let home = home_with_backups();

    netsnap(&home)
        .args(["show", "latest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chicago Branch Office"))
        .stdout(predicate::str::contains("VLAN 10: Corporate (10.10.10.0/24)"));
}

#[test]
fn show_unknown_backup_fails() {
    let home = home_with_backups();

    netsnap(&home)
        .args(["show", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Backup not found"));
}

#[test]
fn compare_by_numbers() {
    let home = home_with_backups();

    netsnap(&home)
        .args(["compare", "2", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Δ VLAN 10 renamed: 'Corp' → 'Corporate'",
        ))
        .stdout(predicate::str::contains("Total: 1 change(s)"));
}

#[test]
fn compare_prompts_for_numbers() {
    let home = home_with_backups();

    netsnap(&home)
        .arg("compare")
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The two backups are identical"));
}

#[test]
fn restore_aborts_without_exact_phrase() {
    let home = home_with_backups();

    netsnap(&home)
        .env("MERAKI_API_KEY", "test-key")
        .args(["restore", "1"])
        .write_stdin("restore\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restore cancelled"))
        .stdout(predicate::str::contains("Restore Complete").not());
}

#[test]
fn restore_requires_api_key() {
    let home = home_with_backups();

    netsnap(&home)
        .args(["restore", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MERAKI_API_KEY"));
}

#[test]
fn backup_requires_api_key() {
    let home = TempDir::new().unwrap();

    netsnap(&home)
        .arg("backup")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("MERAKI_API_KEY"));

    assert!(!home.path().join("backups").exists());
}

#[test]
fn bad_settings_file_is_config_error() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.json"), "{not json").unwrap();

    netsnap(&home).arg("config").assert().code(2);
}

#[test]
fn config_shows_paths() {
    let home = TempDir::new().unwrap();

    netsnap(&home)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup directory:"))
        .stdout(predicate::str::contains("API key:             not set"));

    assert!(home.path().join("config.json").exists());
}
