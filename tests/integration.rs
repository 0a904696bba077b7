use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn trivium(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trivium").unwrap();
    cmd.arg("--config-dir").arg(config_dir.path());
    cmd
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Timed trivia quizzes"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("trivium 0.1.0"));
}

#[test]
fn test_help_subcommand() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_debug_shows_default_settings() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .arg("debug")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Config directory")
                .and(predicate::str::contains("Theme: default"))
                .and(predicate::str::contains("Questions: 10"))
                .and(predicate::str::contains("Difficulty: any"))
                .and(predicate::str::contains("15s answer, 4s feedback")),
        );
}

#[test]
fn test_debug_reflects_timing_flags() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .args(["--answer-seconds", "30", "--feedback-seconds", "2", "debug"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30s answer, 2s feedback"));
}

#[test]
fn test_debug_merges_stored_settings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"theme":"matrix","amount":500,"difficulty":"extreme"}"#,
    )
    .unwrap();

    trivium(&dir)
        .arg("debug")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Theme: matrix")
                .and(predicate::str::contains("Questions: 50"))
                .and(predicate::str::contains("Difficulty: any")),
        );
}

#[test]
fn test_reset_writes_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"theme":"pink"}"#).unwrap();

    trivium(&dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings reset."));

    let contents = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(contents.contains("\"theme\": \"default\""));
    assert!(contents.contains("\"amount\": 10"));
}

#[test]
fn test_reset_is_idempotent() {
    let dir = TempDir::new().unwrap();
    trivium(&dir).arg("reset").assert().success();
    trivium(&dir).arg("reset").assert().success();
}

#[test]
fn test_unknown_subcommand() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .arg("foobar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_timing_flag() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .args(["--answer-seconds", "soon", "debug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_categories_subcommand_help() {
    let dir = TempDir::new().unwrap();
    trivium(&dir)
        .args(["categories", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config-dir"));
}
