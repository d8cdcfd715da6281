use rstest::rstest;
use std::fs;
use swipe_protocol::config::{ConfigError, GameConfig};
use tempfile::tempdir;

#[rstest]
#[case(r#"{"rules": {"fake_chance_cap": -0.1}}"#)]
#[case(r#"{"rules": {"streak_per_level": 0}}"#)]
#[case(r#"{"rules": {"max_difficulty": 0}}"#)]
#[case(r#"{"rules": {"celebrate_every": 0}}"#)]
#[case(r#"{"timing": {"fake_delay_min_ms": 900, "fake_delay_max_ms": 100}}"#)]
#[case(r#"{"timing": {"failure_text_ms": 100}}"#)]
fn test_invalid_files_are_rejected(#[case] json: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, json).unwrap();

    assert!(matches!(
        GameConfig::load_from_file(&path),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_file_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");

    let mut cfg = GameConfig::default();
    cfg.rules.trap_chance = 0.35;
    cfg.timing.failure_reset_ms = 4000;
    cfg.sync.username = "ana".into();
    fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

    assert_eq!(GameConfig::load_from_file(&path).unwrap(), cfg);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        GameConfig::load_from_file(dir.path().join("nope.json")),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("game.json");
    fs::write(&path, "{ rules: ").unwrap();
    assert!(matches!(
        GameConfig::load_from_file(&path),
        Err(ConfigError::Json(_))
    ));
}
