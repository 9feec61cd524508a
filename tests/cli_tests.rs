//! End-to-end checks of the `floatarb` binary that need no network.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn floatarb() -> Command {
    let mut cmd = Command::cargo_bin("floatarb").expect("binary built");
    cmd.env_remove("TELEGRAM_BOT_TOKEN").env_remove("RUST_LOG");
    cmd
}

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn pipelines_lists_every_identifier() {
    floatarb()
        .arg("pipelines")
        .assert()
        .success()
        .stdout(predicate::str::contains("csmoney-wiki"))
        .stdout(predicate::str::contains("steam-browser"))
        .stdout(predicate::str::contains("steam-api"));
}

#[test]
fn pipelines_json_emits_one_line_each() {
    let output = floatarb()
        .args(["pipelines", "--json"])
        .output()
        .expect("run floatarb");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().filter(|l| l.contains("\"pipeline\"")).count(), 4);
}

#[test]
fn check_config_accepts_valid_file() {
    let file = write_temp_config("[matching]\nthreshold_percent = 20\n");
    floatarb()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"));
}

#[test]
fn check_config_returns_nonzero_on_invalid_value() {
    let file = write_temp_config("[matching]\nthreshold_percent = 150\n");
    floatarb()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold_percent"));
}

#[test]
fn check_config_returns_nonzero_on_missing_file() {
    floatarb()
        .args(["check", "config", "--config", "/nonexistent/floatarb.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn search_requires_item_and_pattern() {
    floatarb()
        .args(["search", "--item-class", "AK-47"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pattern"));
}

#[test]
fn watch_without_recipient_is_a_config_error() {
    let file = write_temp_config("");
    floatarb()
        .args(["watch", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("telegram.recipients"));
}
