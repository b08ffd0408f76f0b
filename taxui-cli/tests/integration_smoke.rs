//! Smoke tests to verify command wiring and the fixture simulation path

use assert_cmd::Command;
use predicates::prelude::*;

fn taxui() -> Command {
    let mut cmd = Command::cargo_bin("taxui").unwrap();
    cmd.env("TAXUI_QUIET", "1");
    cmd
}

// === Help wiring ===

#[test]
fn test_top_level_help_lists_commands() {
    taxui()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("years"));
}

#[test]
fn test_simulate_help() {
    taxui()
        .args(["simulate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event script"))
        .stdout(predicate::str::contains("Year fixtures"));
}

#[test]
fn test_years_help() {
    taxui()
        .args(["years", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form flavor"))
        .stdout(predicate::str::contains("Association id"));
}

// === Fixture runs ===

#[test]
fn test_inspect_reports_active_enhancers() {
    taxui()
        .args(["inspect", "tests/fixtures/extension_page.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search-select"))
        .stdout(predicate::str::contains("year-loader/extension"))
        .stdout(predicate::str::contains("currency-fields"));
}

#[test]
fn test_inspect_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.json");
    std::fs::write(&path, r#"{"elements": []}"#).unwrap();

    taxui()
        .args(["inspect"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no enhancers activate"));
}

#[test]
fn test_simulate_extension_flow_navigates() {
    taxui()
        .args([
            "simulate",
            "tests/fixtures/extension_page.json",
            "--script",
            "tests/fixtures/events.json",
            "--years-fixture",
            "tests/fixtures/years.json",
        ])
        .assert()
        .success()
        // the start click navigated with both values filled in
        .stdout(predicate::str::contains(
            "/extension-form/?association_id=2&tax_year=2023",
        ))
        // the dollar input was seeded and formatted at load
        .stdout(predicate::str::contains("$1,000.00"))
        // balance due recomputed after the payments keystroke
        .stdout(predicate::str::contains("600.00"));
}

#[test]
fn test_simulate_without_script_still_prints_snapshot() {
    taxui()
        .args(["simulate", "tests/fixtures/extension_page.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"location\""));
}

#[test]
fn test_missing_snapshot_fails_with_path() {
    taxui()
        .args(["inspect", "does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.json"));
}
