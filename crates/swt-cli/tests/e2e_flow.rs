//! End-to-end integration tests for the calendar flow.
//!
//! Drives the `swt` binary through set → month → report → status against a
//! temporary database and config file.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn swt_binary() -> String {
    env!("CARGO_BIN_EXE_swt").to_string()
}

/// Writes a config file pointing at a database inside `temp` and returns
/// its path.
fn write_config(temp: &Path) -> std::path::PathBuf {
    let config_path = temp.join("config.toml");
    let database_path = temp.join("swt.db");
    std::fs::write(
        &config_path,
        format!("database_path = {:?}\nyear = 2025\n", database_path),
    )
    .unwrap();
    config_path
}

fn swt(config: &Path, args: &[&str]) -> Output {
    Command::new(swt_binary())
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run swt")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn set_then_report_roundtrip() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    // Jan 2, 2025 is a Thursday; 4 PAR hours split with CASA by default.
    let set = swt(&config, &["set", "2025-01-02", "par", "--hours", "4"]);
    assert!(
        set.status.success(),
        "set should succeed: {}",
        String::from_utf8_lossy(&set.stderr)
    );
    assert!(stdout(&set).contains("CASA 4h + PAR 4h"));

    // The classification survives a fresh process.
    let report = swt(&config, &["report", "--month", "1"]);
    assert!(report.status.success());
    let report_out = stdout(&report);
    assert!(report_out.contains("CASA days:     1"));
    assert!(report_out.contains("PAR hours:     4"));
    assert!(report_out.contains("Working days:  21"));
}

#[test]
fn json_report_exposes_summary_and_days() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    assert!(swt(&config, &["set", "2025-01-02", "casa"]).status.success());
    assert!(swt(&config, &["set", "2025-01-03", "ferie"]).status.success());

    let report = swt(&config, &["report", "--json"]);
    assert!(report.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&report)).unwrap();

    assert_eq!(parsed["summary"]["year"], 2025);
    assert_eq!(parsed["summary"]["monthly"][0]["casa_days"], 1);
    assert_eq!(parsed["summary"]["monthly"][0]["ferie_hours"], 8);
    let days = parsed["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2025-01-02");
    assert_eq!(days[0]["type"], "CASA");
    assert_eq!(days[1]["type"], "FERIE");
    assert_eq!(days[1]["hours"], 8);
}

#[test]
fn month_view_shows_defaults_and_classifications() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    assert!(swt(&config, &["set", "2025-01-02", "azienda"]).status.success());

    let month = swt(&config, &["month", "1"]);
    assert!(month.status.success());
    let month_out = stdout(&month);
    assert!(month_out.contains("January 2025"));
    assert!(month_out.contains("2025-01-01  Wed  FESTIVO (holiday)"));
    assert!(month_out.contains("2025-01-02  Thu  AZIENDA"));
    assert!(month_out.contains("1 of 21 working days classified"));
}

#[test]
fn zero_hour_leave_is_rejected_and_not_stored() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let set = swt(&config, &["set", "2025-01-02", "par", "--hours", "0"]);
    assert!(!set.status.success());
    assert!(String::from_utf8_lossy(&set.stderr).contains("hours"));

    let report = swt(&config, &["report", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&report)).unwrap();
    assert!(parsed["days"].as_array().unwrap().is_empty());
}

#[test]
fn weekend_classification_is_refused() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let set = swt(&config, &["set", "2025-01-04", "casa"]);
    assert!(!set.status.success());
    assert!(String::from_utf8_lossy(&set.stderr).contains("weekend or holiday"));
}

#[test]
fn status_reports_database_and_counts() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    assert!(swt(&config, &["set", "2025-01-02", "casa"]).status.success());

    let status = swt(&config, &["status"]);
    assert!(status.status.success());
    let status_out = stdout(&status);
    assert!(status_out.contains("swt.db"));
    assert!(status_out.contains("Year: 2025"));
    assert!(status_out.contains("Classified days: 1 of"));
}

#[test]
fn holidays_lists_configured_dates() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());

    let holidays = swt(&config, &["holidays"]);
    assert!(holidays.status.success());
    let holidays_out = stdout(&holidays);
    assert!(holidays_out.contains("Holidays for 2025"));
    assert!(holidays_out.contains("2025-01-01"));
    assert!(holidays_out.contains("2025-12-25"));
}
