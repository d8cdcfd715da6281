use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn swipe(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("swipe").unwrap();
    cmd.current_dir(dir)
        .env_remove("SWIPE_SYNC_URL")
        .env_remove("SWIPE_SYNC_KEY");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_simulate_prints_summary() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(swipe(dir.path()).args(["simulate", "--swipes", "60", "--seed", "7"]));

    assert!(out.contains("SIMULATION"));
    assert!(out.contains("Swipes"));
    assert!(!dir.path().join("data").exists(), "simulation must not persist");
}

#[test]
fn test_simulate_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let args = ["simulate", "--swipes", "80", "--seed", "3", "--accuracy", "0.85"];
    let first = stdout_of(swipe(dir.path()).args(args));
    let second = stdout_of(swipe(dir.path()).args(args));
    assert_eq!(first, second);
}

#[test]
fn test_simulate_rejects_bad_accuracy() {
    let dir = TempDir::new().unwrap();
    swipe(dir.path())
        .args(["simulate", "--accuracy", "1.5"])
        .assert()
        .failure();
}

#[test]
fn test_score_creates_record() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(swipe(dir.path()).args(["score", "--score-file", "score.json"]));

    assert!(out.contains("High"));
    let saved = fs::read_to_string(dir.path().join("score.json")).unwrap();
    assert!(saved.contains("\"high_score\": 0"));
}

#[test]
fn test_score_reset_high() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("score.json");
    fs::write(
        &path,
        r#"{"current_score": 3, "high_score": 9, "last_updated": "2024-05-01T12:00:00Z"}"#,
    )
    .unwrap();

    swipe(dir.path())
        .args(["score", "--score-file", "score.json", "--reset-high"])
        .assert()
        .success();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"high_score\": 0"));
    assert!(saved.contains("\"current_score\": 3"));
}

#[test]
fn test_play_quits_cleanly() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(
        swipe(dir.path())
            .args(["play", "--score-file", "score.json"])
            .write_stdin("?\nnonsense\nq\n"),
    );

    assert!(out.contains("#1"));
    assert!(out.contains("State"));
    assert!(dir.path().join("score.json").exists());
}

#[test]
fn test_play_ends_on_eof() {
    let dir = TempDir::new().unwrap();
    swipe(dir.path())
        .args(["play", "--score-file", "score.json"])
        .write_stdin("w\na\ns\nd\n")
        .assert()
        .success();
}

#[test]
fn test_leaderboard_needs_sync_settings() {
    let dir = TempDir::new().unwrap();
    swipe(dir.path()).arg("leaderboard").assert().failure();
}

#[test]
fn test_register_needs_sync_settings() {
    let dir = TempDir::new().unwrap();
    swipe(dir.path()).args(["register", "bob"]).assert().failure();
}

#[test]
fn test_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("game.json");
    fs::write(&cfg, r#"{"rules": {"trap_chance": 3.0}}"#).unwrap();

    swipe(dir.path())
        .args(["--config", "game.json", "simulate", "--swipes", "5"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("game.json"),
        r#"{"rules": {"trap_chance": 0.0, "fake_chance_per_level": 0.0}}"#,
    )
    .unwrap();

    let out = stdout_of(swipe(dir.path()).args([
        "--config",
        "game.json",
        "simulate",
        "--swipes",
        "40",
        "--accuracy",
        "1.0",
    ]));
    assert!(out.contains("SIMULATION"));
}
