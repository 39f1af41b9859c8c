use std::fs;

use clap::ValueEnum;
use projectust::config::{Config, Theme};
use projectust::error::ConfigError;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api_url, "http://localhost:8000");
    assert_eq!(config.theme, Theme::Light);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme = \"dark\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.api_url, "http://localhost:8000");
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config { api_url: "http://example.test:9000/api".into(), theme: Theme::Dark };
    config.save_to(&path).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("theme = \"dark\""));
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_invalid_toml_is_reported_with_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "theme = \"purple\"\n").unwrap();

    match Config::load_from(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_theme_toggle() {
    assert_eq!(Theme::Light.toggle(), Theme::Dark);
    assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
}

#[test]
fn test_theme_command_line_values() {
    assert_eq!(Theme::from_str("dark", false), Ok(Theme::Dark));
    assert_eq!(Theme::from_str("Light", true), Ok(Theme::Light));
    assert!(Theme::from_str("purple", true).is_err());
    let names: Vec<String> = Theme::value_variants()
        .iter()
        .filter_map(|t| t.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect();
    assert_eq!(names, vec!["light", "dark"]);
}
