#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn mw() -> Command {
    cargo_bin_cmd!("mealwarden")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_mealwarden.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema (test mode leaves the real config file alone).
pub fn init_db(db_path: &str) {
    mw().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize and register a couple of residents used by many tests.
pub fn init_db_with_residents(db_path: &str) {
    init_db(db_path);

    mw().args([
        "--db", db_path, "resident", "--add", "r1", "--name", "Asha", "--room", "101",
    ])
    .assert()
    .success();

    mw().args([
        "--db", db_path, "resident", "--add", "r2", "--name", "Bea", "--room", "102",
    ])
    .assert()
    .success();
}
