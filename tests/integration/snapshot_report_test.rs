//! Report output snapshot tests
//!
//! Runs the binary so the whole pipeline (input, config, rendering) is covered.

use tempfile::TempDir;

use crate::helpers::{fixture_path, swimtally};

fn run(home: &TempDir, args: &[&str]) -> String {
    let output = swimtally(home).args(args).output().expect("Failed to run swimtally");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn snapshot_club_session_text() {
    let home = TempDir::new().unwrap();
    let path = fixture_path("club_session.txt");
    let stdout = run(&home, &["parse", path.to_str().unwrap()]);
    insta::assert_snapshot!(stdout, @r###"
    Stroke                 Swim    Drill     Kick     Pull    Total
    Front Crawl           1,200      200      200      200    1,800
    No.1                    400        0      200        0      600
    ---------------------------------------------------------------
    Total                 1,600      200      400      200    2,400

    Lines: 4 parsed, 2 with warnings, 3 unparsed
    Warning (line 8): Repeated previous 2 line(s)
    Warning (line 11): No stroke specified, defaulted to Front Crawl
    "###);
}

#[test]
fn snapshot_config_path() {
    let home = TempDir::new().unwrap();
    let stdout = run(&home, &["config", "path"]);
    let home_pattern = regex::escape(&home.path().display().to_string());
    insta::with_settings!({filters => vec![(home_pattern.as_str(), "[HOME]")]}, {
        insta::assert_snapshot!(stdout, @"[HOME]/.config/swimtally/config.toml");
    });
}
