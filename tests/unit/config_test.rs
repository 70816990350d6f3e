//! Config file handling

use std::fs;
use tempfile::TempDir;

use swimtally::{Config, OutputFormat, ReportOptions};

#[test]
fn partial_file_keeps_other_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[report]\nshow_lines = true\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(config.report.show_lines);
    assert_eq!(config.report.pool_length, 25);
    assert_eq!(config.report.format, OutputFormat::Text);
    assert_eq!(config.log.level, "warn");
}

#[test]
fn malformed_toml_is_an_error_naming_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[report\npool_length = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));
}

#[test]
fn unknown_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[report]\nformat = \"yaml\"\n").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn report_options_follow_config() {
    let mut config = Config::default();
    config.report.pool_length = 50;
    config.report.decimals = 1;
    let options = ReportOptions::from(&config.report);
    assert_eq!(options.pool_length, 50);
    assert_eq!(options.decimals, 1);
    assert!(!options.show_lines);
}
