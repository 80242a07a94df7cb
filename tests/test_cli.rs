//! Tests for CLI argument parsing and the one-shot report binary

use assert_cmd::Command;
use clap::Parser;
use paxsat::cli::Cli;
use paxsat::pipeline::{CategoryFilter, DashboardSession};
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv"]);

    assert_eq!(cli.input, PathBuf::from("survey.csv"));
    assert_eq!(cli.age_min, None);
    assert_eq!(cli.age_max, None);
    assert_eq!(cli.class, "All", "Default class should be All");
    assert_eq!(cli.travel_type, "All", "Default travel type should be All");
    assert_eq!(cli.highlight, "None", "Default highlight should be None");
    assert_eq!(cli.bins, 20, "Default bins should be 20");
    assert!(!cli.no_interactive);
    assert!(cli.json.is_none());
    assert!(cli.log_file.is_none());
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
}

#[test]
fn test_cli_custom_selections() {
    let cli = Cli::parse_from([
        "paxsat",
        "-i",
        "survey.csv",
        "--age-min",
        "25",
        "--age-max",
        "40",
        "-c",
        "Business",
        "-t",
        "Personal Travel",
        "--highlight",
        "Seat Comfort",
        "--bins",
        "10",
        "--no-interactive",
        "--json",
        "out.json",
    ]);

    assert_eq!(cli.age_min, Some(25));
    assert_eq!(cli.age_max, Some(40));
    assert_eq!(cli.class, "Business");
    assert_eq!(cli.travel_type, "Personal Travel");
    assert_eq!(cli.highlight, "Seat Comfort");
    assert_eq!(cli.bins, 10);
    assert!(cli.no_interactive);
    assert_eq!(cli.json, Some(PathBuf::from("out.json")));
}

#[test]
fn test_cli_rejects_zero_bins() {
    let result = Cli::try_parse_from(["paxsat", "-i", "survey.csv", "--bins", "0"]);

    let err = result.unwrap_err().to_string();
    assert!(err.contains("bins must be at least 1"), "Unexpected error: {}", err);
}

#[test]
fn test_cli_requires_input() {
    assert!(Cli::try_parse_from(["paxsat"]).is_err());
}

#[test]
fn test_apply_selections_sets_session() {
    let dataset = dataset_from(&[(20, true), (35, false), (50, true)]);
    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from([
        "paxsat",
        "-i",
        "survey.csv",
        "--age-min",
        "30",
        "-c",
        "Eco",
        "--highlight",
        "cleanliness",
    ]);

    cli.apply_selections(&mut session).unwrap();

    assert_eq!(session.criteria().age_min(), 30);
    assert_eq!(session.criteria().age_max(), 50, "Missing bound comes from the data");
    assert_eq!(session.criteria().class(), &CategoryFilter::Only("Eco".to_string()));
    assert_eq!(session.highlight(), Some("Cleanliness"));
}

#[test]
fn test_apply_selections_rejects_unknown_class() {
    let dataset = dataset_from(&[(20, true), (35, false)]);
    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "-c", "First"]);

    let err = cli.apply_selections(&mut session).unwrap_err().to_string();

    assert!(err.contains("Unknown class 'First'"), "Unexpected error: {}", err);
}

#[test]
fn test_apply_selections_rejects_unknown_highlight() {
    let dataset = dataset_from(&[(20, true), (35, false)]);
    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "--highlight", "Legroom"]);

    let err = cli.apply_selections(&mut session).unwrap_err().to_string();

    assert!(err.contains("Unknown highlight feature 'Legroom'"));
}

#[test]
fn test_apply_selections_rejects_inverted_range() {
    let dataset = dataset_from(&[(20, true), (35, false)]);
    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "--age-min", "40", "--age-max", "30"]);

    assert!(cli.apply_selections(&mut session).is_err());
}

#[test]
fn test_apply_selections_rejects_ages_outside_dataset() {
    let dataset = dataset_from(&[(20, true), (30, false)]);

    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "--age-min", "0", "--age-max", "500"]);
    let err = cli.apply_selections(&mut session).unwrap_err().to_string();
    assert!(
        err.contains("Age age-min '0' is outside the dataset range 20-30"),
        "Unexpected error: {}",
        err
    );
    assert_eq!(session.criteria().age_min(), 20, "Rejected ages must not reach the session");

    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "--age-max", "31"]);
    let err = cli.apply_selections(&mut session).unwrap_err().to_string();
    assert!(err.contains("age-max '31'"), "Unexpected error: {}", err);
    assert_eq!(session.criteria().age_max(), 30);
}

#[test]
fn test_apply_selections_accepts_dataset_bounds() {
    let dataset = dataset_from(&[(20, true), (30, false)]);
    let mut session = DashboardSession::new(&dataset);
    let cli = Cli::parse_from(["paxsat", "-i", "survey.csv", "--age-min", "20", "--age-max", "30"]);

    cli.apply_selections(&mut session).unwrap();

    assert_eq!(session.criteria().age_min(), 20);
    assert_eq!(session.criteria().age_max(), 30);
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_binary_prints_report() {
    let (_temp_dir, csv_path) = write_survey_csv(&sample_survey_rows());

    Command::cargo_bin("paxsat")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .arg("--no-interactive")
        .assert()
        .success()
        .stdout(predicate::str::contains("APPLIED FILTERS"))
        .stdout(predicate::str::contains("AGE DISTRIBUTION BY SATISFACTION"))
        .stdout(predicate::str::contains("SERVICE FEATURE CORRELATION WITH SATISFACTION"));
}

#[test]
fn test_binary_writes_json_snapshot() {
    let (temp_dir, csv_path) = write_survey_csv(&sample_survey_rows());
    let json_path = temp_dir.path().join("snapshot.json");

    Command::cargo_bin("paxsat")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--no-interactive", "-c", "Business", "--json"])
        .arg(&json_path)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["snapshot"]["criteria"]["class"], "Business");
    assert_eq!(json["snapshot"]["filtered_records"], 2);
    assert_eq!(json["metadata"]["load_stats"]["records"], 6);
}

#[test]
fn test_binary_reports_empty_filter() {
    let (_temp_dir, csv_path) = write_survey_csv(&sample_survey_rows());

    Command::cargo_bin("paxsat")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--no-interactive", "-c", "Eco Plus", "--age-max", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data available"));
}

#[test]
fn test_binary_fails_on_missing_file() {
    Command::cargo_bin("paxsat")
        .unwrap()
        .args(["-i", "/nonexistent/survey.csv", "--no-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dataset"));
}

#[test]
fn test_binary_fails_on_age_outside_dataset() {
    let (_temp_dir, csv_path) = write_survey_csv(&sample_survey_rows());

    Command::cargo_bin("paxsat")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--no-interactive", "--age-min", "0", "--age-max", "500"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the dataset range 19-61"));
}

#[test]
fn test_binary_fails_on_unknown_class() {
    let (_temp_dir, csv_path) = write_survey_csv(&sample_survey_rows());

    Command::cargo_bin("paxsat")
        .unwrap()
        .arg("-i")
        .arg(&csv_path)
        .args(["--no-interactive", "-c", "First"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown class 'First'"));
}
