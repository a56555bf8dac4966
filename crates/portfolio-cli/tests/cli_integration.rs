//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! They test the "wiring" between the CLI and the core library.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a temporary data directory
fn cli_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("portfolio").expect("Failed to find portfolio binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

const CARDS_JSON: &str = r#"{
    "projects": [
        {
            "title": "Tarkov Clock",
            "icon": "clock.svg",
            "short_description": "In-game time",
            "description": ["Two zones half a day apart.", "Live countdown."],
            "link": "/tarkov"
        }
    ],
    "about": [
        {
            "title": "Resume",
            "icon": "cv.svg",
            "short_description": "Experience",
            "description": [],
            "link": "/resume"
        }
    ]
}"#;

/// Write the sample catalog into the data directory and return its path
fn write_cards(data_dir: &TempDir) -> std::path::PathBuf {
    let path = data_dir.path().join("cards.json");
    std::fs::write(&path, CARDS_JSON).unwrap();
    path
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_command() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Portfolio Widgets v{}",
            env!("CARGO_PKG_VERSION")
        )))
        .stdout(predicate::str::contains("Data directory:"))
        .stdout(predicate::str::contains("Left zone:"))
        .stdout(predicate::str::contains("Right zone:"));
}

#[test]
fn test_version_flag_matches_package() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Tarkov Command Tests
// ============================================================================

#[test]
fn test_status_shows_both_zones() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["tarkov", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Left zone"))
        .stdout(predicate::str::contains("Right zone"))
        .stdout(predicate::str::contains("Terminal:"))
        .stdout(predicate::str::contains("Window:"));
}

#[test]
fn test_status_single_zone() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["tarkov", "status", "--zone", "right"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Right zone"))
        .stdout(predicate::str::contains("Left zone").not());
}

#[test]
fn test_status_invalid_zone() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["tarkov", "status", "--zone", "middle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid zone"));
}

#[test]
fn test_status_planning_at_epoch() {
    let data_dir = TempDir::new().unwrap();

    // 1970-01-01T00:00Z: left zone reads 03:00, window closes in 9 minutes
    cli_cmd(&data_dir)
        .args([
            "--utc",
            "--lang",
            "en",
            "tarkov",
            "status",
            "--zone",
            "left",
            "--at",
            "1970-01-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning for"))
        .stdout(predicate::str::contains("Time: 03:00:00 (night)"))
        .stdout(predicate::str::contains("Terminal: OPEN"))
        .stdout(predicate::str::contains("Closes in 00:09 (at 00:09)"))
        .stdout(predicate::str::contains("Window: 23:18 - 00:09"));
}

#[test]
fn test_status_default_labels_are_russian() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args([
            "--utc",
            "tarkov",
            "status",
            "--zone",
            "right",
            "--at",
            "1970-01-01T00:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 15:00:00 (day)"))
        .stdout(predicate::str::contains("ЗАКРЫТО"))
        .stdout(predicate::str::contains("Открытие через"));
}

#[test]
fn test_status_invalid_time() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["tarkov", "status", "--at", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn test_invalid_language() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["--lang", "fr", "tarkov", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_watch_stops_after_ticks() {
    let data_dir = TempDir::new().unwrap();

    let output = cli_cmd(&data_dir)
        .args(["tarkov", "watch", "--interval-ms", "10", "--ticks", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("L ")).count(), 3);
    assert!(stdout.contains(" | R "));
}

// ============================================================================
// Craft Command Tests
// ============================================================================

#[test]
fn test_craft_show_idle_defaults() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["craft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 39h 00m 00s"))
        .stdout(predicate::str::contains("Status: idle"));
}

#[test]
fn test_craft_lifecycle() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["craft", "set-duration", "2", "30", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Craft duration set to 2h 30m 00s"));

    cli_cmd(&data_dir)
        .args(["craft", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Craft started (2h 30m 00s)"))
        .stdout(predicate::str::contains("Completes:"));

    cli_cmd(&data_dir)
        .args(["craft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: crafting"))
        .stdout(predicate::str::contains("Remaining: 02:"))
        .stdout(predicate::str::contains("Progress:"));

    cli_cmd(&data_dir)
        .args(["craft", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Craft reset."));

    cli_cmd(&data_dir)
        .args(["craft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 2h 30m 00s"))
        .stdout(predicate::str::contains("Status: idle"));
}

#[test]
fn test_craft_zero_duration_is_ready() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["craft", "set-duration", "0", "0", "0"])
        .assert()
        .success();

    cli_cmd(&data_dir).args(["craft", "start"]).assert().success();

    cli_cmd(&data_dir)
        .args(["craft", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: ready"))
        .stdout(predicate::str::contains("Progress: 100.0%"));
}

#[test]
fn test_craft_invalid_duration() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["craft", "set-duration", "1", "75", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid craft duration"));
}

// ============================================================================
// Cards Command Tests
// ============================================================================

#[test]
fn test_cards_list() {
    let data_dir = TempDir::new().unwrap();
    let path = write_cards(&data_dir);

    cli_cmd(&data_dir)
        .args(["cards", "list"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards (2):"))
        .stdout(predicate::str::contains("projects (1):"))
        .stdout(predicate::str::contains(
            "Tarkov Clock - In-game time [/tarkov]",
        ));
}

#[test]
fn test_cards_list_keeps_file_order() {
    let data_dir = TempDir::new().unwrap();
    let path = write_cards(&data_dir);

    let output = cli_cmd(&data_dir)
        .args(["cards", "list"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let projects = stdout.find("projects (1):").expect("projects section");
    let about = stdout.find("about (1):").expect("about section");
    assert!(projects < about, "sections out of file order:\n{}", stdout);
}

#[test]
fn test_cards_show() {
    let data_dir = TempDir::new().unwrap();
    let path = write_cards(&data_dir);

    cli_cmd(&data_dir)
        .args(["cards", "show"])
        .arg(&path)
        .arg("tarkov clock")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tarkov Clock"))
        .stdout(predicate::str::contains("Link: /tarkov"))
        .stdout(predicate::str::contains("Live countdown."));
}

#[test]
fn test_cards_show_missing() {
    let data_dir = TempDir::new().unwrap();
    let path = write_cards(&data_dir);

    cli_cmd(&data_dir)
        .args(["cards", "show"])
        .arg(&path)
        .arg("Nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card not found"));
}

#[test]
fn test_cards_missing_file() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["cards", "list"])
        .arg(data_dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load cards"));
}
