//! `swimtally parse` end to end

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture_path, load_fixture, swimtally, write_config};

#[test]
fn parse_file_prints_totals() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .arg("parse")
        .arg(fixture_path("club_session.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Front Crawl"))
        .stdout(predicate::str::contains("2,400"))
        .stdout(predicate::str::contains(
            "Lines: 4 parsed, 2 with warnings, 3 unparsed",
        ));
}

#[test]
fn parse_reads_stdin_without_files() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .arg("parse")
        .write_stdin("4 x 100m FC Swim\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Front Crawl"))
        .stdout(predicate::str::contains("400"));
}

#[test]
fn dash_reads_stdin() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "--format", "json", "-"])
        .write_stdin(load_fixture("unsupported.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"source\": \"<stdin>\""))
        .stdout(predicate::str::contains("\"unparsed_count\": 3"));
}

#[test]
fn json_for_several_files_is_one_array() {
    let home = TempDir::new().unwrap();
    let output = swimtally(&home)
        .args(["parse", "--format", "json"])
        .arg(fixture_path("club_session.txt"))
        .arg(fixture_path("drills_and_patterns.txt"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = value.as_array().expect("array of reports");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["total_distance"], 2400.0);
    assert_eq!(reports[1]["total_distance"], 1400.0);
    assert_eq!(reports[1]["multiple_of_pool"], true);
}

#[test]
fn several_text_reports_have_headers() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .arg("parse")
        .arg(fixture_path("club_session.txt"))
        .arg(fixture_path("unsupported.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("club_session.txt =="))
        .stdout(predicate::str::contains("unsupported.txt =="));
}

#[test]
fn strict_fails_on_unparsed_lines() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "--strict"])
        .arg(fixture_path("unsupported.txt"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Backstroke"))
        .stderr(predicate::str::contains("3 unparsed line(s)"));
}

#[test]
fn strict_passes_clean_sessions() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "--strict"])
        .write_stdin("4 x 100m FC Swim\n200m bk kick\n")
        .assert()
        .success();
}

#[test]
fn lines_flag_adds_audit() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "--lines"])
        .arg(fixture_path("unsupported.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Line audit:"))
        .stdout(predicate::str::contains("nested multipliers are not supported"));
}

#[test]
fn pool_flag_changes_the_note() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "--pool", "50"])
        .write_stdin("3 x 25m fc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Note: total 75m is not a multiple of the 50m pool",
        ));
}

#[test]
fn missing_file_is_an_error() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read session file"));
}

#[test]
fn binary_input_is_an_error() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .arg("parse")
        .arg(fixture_path("not_text.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn config_sets_default_format() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[report]\nformat = \"json\"\n");
    swimtally(&home)
        .arg("parse")
        .write_stdin("200m bk\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn format_flag_beats_config() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[report]\nformat = \"json\"\n");
    swimtally(&home)
        .args(["parse", "--format", "text"])
        .write_stdin("200m bk\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Stroke"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[report]\npool_length = 0\n");
    swimtally(&home)
        .arg("parse")
        .write_stdin("200m bk\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool_length"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["parse", "-v", "--format", "json"])
        .write_stdin("200m bk\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("parsed session"));
}

#[test]
fn log_env_var_enables_tracing() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .env("SWIMTALLY_LOG", "swimtally=trace")
        .arg("parse")
        .write_stdin("4 x 50m fly\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("stroke keyword"));
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    swimtally(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("swimtally"));
}
