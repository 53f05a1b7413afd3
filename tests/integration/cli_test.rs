//! CLI tests for the imgwarm binary

use super::helpers::{imgwarm, write_garbage, write_png};

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Help and completions
// ============================================================================

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    imgwarm(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("warm"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn completions_generate_script() {
    let home = TempDir::new().unwrap();
    imgwarm(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("imgwarm"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_path_is_under_home() {
    let home = TempDir::new().unwrap();
    let expected = home
        .path()
        .join(".config")
        .join("imgwarm")
        .join("config.toml");

    imgwarm(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_string_lossy().to_string()));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    imgwarm(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[cache]"))
        .stdout(predicate::str::contains("max_entries = 100"))
        .stdout(predicate::str::contains("batch_size = 3"))
        .stdout(predicate::str::contains("[fetch]"));
}

#[test]
fn config_init_writes_once() {
    let home = TempDir::new().unwrap();
    let path = home.path().join(".config/imgwarm/config.toml");

    imgwarm(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(path.exists());

    imgwarm(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists"));
}

#[test]
fn default_config_file_is_loaded() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("imgwarm");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[cache]\nbatch_size = 5\n").unwrap();

    imgwarm(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("batch_size = 5"))
        .stdout(predicate::str::contains("max_entries = 100"));
}

#[test]
fn explicit_config_file_is_used() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    fs::write(&path, "[cache]\nmax_entries = 7\n").unwrap();

    imgwarm(&home)
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("max_entries = 7"));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    fs::write(&path, "[cache]\nbatch_size = 0\n").unwrap();

    imgwarm(&home)
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

// ============================================================================
// Warm
// ============================================================================

#[test]
fn warm_reports_warmed_and_cold_urls() {
    let home = TempDir::new().unwrap();
    let a = write_png(home.path(), "a.png");
    let b = write_png(home.path(), "b.png");
    let bad = write_garbage(home.path(), "bad.png");

    imgwarm(&home)
        .args(["warm", "--delay-ms", "0"])
        .arg(&a)
        .arg(&bad)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("Warmed 2 of 3 URLs"))
        .stdout(predicate::str::contains("1 failed"))
        .stdout(predicate::str::contains(format!(
            "not warmed: {}",
            bad.display()
        )));
}

#[test]
fn warm_reads_url_file() {
    let home = TempDir::new().unwrap();
    let a = write_png(home.path(), "a.png");
    let b = write_png(home.path(), "b.png");
    let list = home.path().join("urls.txt");
    fs::write(
        &list,
        format!("# gallery\n{}\n\nfile://{}\n", a.display(), b.display()),
    )
    .unwrap();

    imgwarm(&home)
        .args(["warm", "--delay-ms", "0", "--file"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("Warmed 2 of 2 URLs"));
}

#[test]
fn warm_without_urls_fails() {
    let home = TempDir::new().unwrap();
    imgwarm(&home)
        .arg("warm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No URLs given"));
}

#[test]
fn warm_rejects_zero_batch_size() {
    let home = TempDir::new().unwrap();
    let a = write_png(home.path(), "a.png");

    imgwarm(&home)
        .args(["warm", "--batch-size", "0"])
        .arg(&a)
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch_size"));
}

// ============================================================================
// Fetch
// ============================================================================

#[test]
fn fetch_reports_success() {
    let home = TempDir::new().unwrap();
    let a = write_png(home.path(), "a.png");

    imgwarm(&home)
        .arg("fetch")
        .arg(&a)
        .assert()
        .success()
        .stdout(predicate::str::contains("Preloaded"));
}

#[test]
fn fetch_failure_exits_non_zero() {
    let home = TempDir::new().unwrap();
    let bad = write_garbage(home.path(), "bad.png");

    imgwarm(&home)
        .arg("fetch")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to preload"));
}
