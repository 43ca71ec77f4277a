//! Smoke tests for the haulroute CLI
//!
//! Runs the binary end to end against trip files in temp directories.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TRIP: &str = r#"{
    "route": [
        {"origin_city": "Dallas", "origin_state": "TX", "destination_city": "Austin",
         "destination_state": "TX", "distance": 195, "rate_per_mile_est": 2.1,
         "ship_date": "2024-03-01", "receive_date": "2024-03-02", "weight": 42000,
         "equipment_type": "V"},
        {"origin_city": "Austin", "origin_state": "TX", "destination_city": "Dallas",
         "destination_state": "TX", "distance": 195, "is_deadhead": true}
    ],
    "total_revenue": 409.5, "total_miles": 390, "total_deadhead": 195,
    "rate_per_mile": 2.1, "total_days": 2, "total_loads": 1
}"#;

/// Get a command for the haulroute binary
fn haulroute() -> Command {
    Command::cargo_bin("haulroute").expect("haulroute binary should exist")
}

fn trip_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("trip.json");
    fs::write(&path, TRIP).unwrap();
    path
}

/// YAML config pointing the context file into `dir`
fn config_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("haulroute.yaml");
    let context = dir.path().join("context.json");
    fs::write(&path, format!("context_file: '{}'\n", context.display())).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    haulroute()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    haulroute()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("freight trip routes"))
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_no_args_fails() {
    haulroute().assert().failure();
}

#[test]
fn test_render_subcommand_help() {
    haulroute()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--frames"))
        .stdout(predicate::str::contains("--loading"));
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_layout_text() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    haulroute()
        .args(["--color", "never", "layout"])
        .arg(&trip)
        .assert()
        .success()
        .stdout(predicate::str::contains("Waypoints (2)"))
        .stdout(predicate::str::contains("Dallas, TX -> Austin, TX  195 mi - $2.10/mi"))
        .stdout(predicate::str::contains("195 mi (Deadhead)"));
}

#[test]
fn test_layout_json() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    let output = haulroute()
        .args(["layout", "--format", "json"])
        .arg(&trip)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value.is_object());
}

#[test]
fn test_missing_route_file() {
    haulroute()
        .args(["layout", "/nonexistent/trip.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Route file not found"));
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_render_svg_to_stdout() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    haulroute()
        .args(["render", "--frames", "10"])
        .arg(&trip)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<svg"))
        .stdout(predicate::str::contains("Dallas, TX"));
}

#[test]
fn test_render_svg_to_file() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    let out = dir.path().join("frames").join("last.svg");
    haulroute()
        .args(["render", "--theme", "light", "-o"])
        .arg(&out)
        .arg(&trip)
        .assert()
        .success()
        .stderr(predicate::str::contains("written to"));
    let svg = fs::read_to_string(out).unwrap();
    assert!(svg.contains("</svg>"));
}

#[test]
fn test_render_loading_placeholder() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    haulroute()
        .args(["render", "--loading", "--frames", "3"])
        .arg(&trip)
        .assert()
        .success()
        .stdout(predicate::str::contains("Planning your route..."));
}

#[test]
fn test_render_rejects_empty_surface() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    haulroute()
        .args(["render", "--width", "0"])
        .arg(&trip)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid surface size"));
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_text() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    haulroute()
        .args(["--color", "never", "summary"])
        .arg(&trip)
        .assert()
        .success()
        .stdout(predicate::str::contains("Revenue:       $410"))
        .stdout(predicate::str::contains("Load #1"))
        .stdout(predicate::str::contains("Deadhead Move"));
}

#[test]
fn test_summary_json() {
    let dir = TempDir::new().unwrap();
    let trip = trip_file(&dir);
    let output = haulroute()
        .args(["summary", "--format", "json"])
        .arg(&trip)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["total_miles"], "390");
    assert_eq!(value["segments"][1]["title"], "Deadhead Move");
}

// ============================================================================
// Theme and Config
// ============================================================================

#[test]
fn test_theme_set_and_show() {
    let dir = TempDir::new().unwrap();
    let config = config_file(&dir);

    haulroute()
        .arg("--config")
        .arg(&config)
        .args(["theme", "light"])
        .assert()
        .success();
    assert!(dir.path().join("context.json").exists());

    haulroute()
        .arg("--config")
        .arg(&config)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));

    haulroute()
        .arg("--config")
        .arg(&config)
        .args(["-q", "theme", "--toggle"])
        .assert()
        .success();

    haulroute()
        .arg("--config")
        .arg(&config)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_config_yaml() {
    haulroute()
        .args(["config", "--yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width: 800"))
        .stdout(predicate::str::contains("context_file:"));
}

#[test]
fn test_bad_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "surface: huge\n").unwrap();
    haulroute()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
