use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("codeblock")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("print"))
        .stdout(predicate::str::contains("themes"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("codeblock")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}

#[test]
fn test_invalid_mode_is_rejected() {
    cargo_bin_cmd!("codeblock")
        .args(["print", "--mode", "sepia"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sepia"));
}

#[test]
fn test_themes_lists_defaults() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("codeblock")
        .env("CODEBLOCK_HOME", dir.path())
        .arg("themes")
        .assert()
        .success()
        .stdout(predicate::str::contains("base16-ocean.dark"))
        .stdout(predicate::str::contains("InspiredGitHub"));
}
