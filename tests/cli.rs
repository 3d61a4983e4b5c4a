use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn snipmark_cmd() -> Command {
    Command::cargo_bin("snipmark").expect("binary exists")
}

#[test]
fn help_prints_description() {
    snipmark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Screenshot capture and annotation engine",
        ));
}

#[test]
fn no_args_prints_usage() {
    snipmark_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--check-config"));
}

#[test]
fn check_config_accepts_missing_file() {
    let temp = TempDir::new().unwrap();

    snipmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .arg("--check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn check_config_reads_the_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("snipmark");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[drawing]\ndefault_tool = \"arrow\"\n",
    )
    .unwrap();

    snipmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .arg("--check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default tool: arrow"));
}

#[test]
fn check_config_rejects_invalid_toml() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("snipmark");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "not valid toml [").unwrap();

    snipmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .arg("--check-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn config_path_points_into_snipmark() {
    let temp = TempDir::new().unwrap();

    snipmark_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .arg("--config-path")
        .assert()
        .success()
        .stdout(predicate::str::contains("snipmark"))
        .stdout(predicate::str::contains("config.toml"));
}
