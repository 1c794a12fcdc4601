#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Utc};
use shiftclock::db::initialize::init_db;
use shiftclock::db::pool::DbPool;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sc() -> Command {
    cargo_bin_cmd!("shiftclock")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn at(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 instant")
}

/// Initialize a DB through the CLI, register an admin (first profile) and a
/// regular user, and sign in as the regular user.
pub fn init_db_with_users(db_path: &str) {
    sc().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    sc().args([
        "--db",
        db_path,
        "user",
        "add",
        "--name",
        "Grace Hopper",
        "--email",
        "grace@example.com",
        "--role",
        "admin",
    ])
    .assert()
    .success();

    login(db_path, "grace@example.com");

    sc().args([
        "--db",
        db_path,
        "user",
        "add",
        "--name",
        "Ada Lovelace",
        "--email",
        "ada@example.com",
    ])
    .assert()
    .success();

    login(db_path, "ada@example.com");
}

pub fn login(db_path: &str, who: &str) {
    sc().args(["--db", db_path, "login", who]).assert().success();
}

/// Run a clock command at a fixed instant.
pub fn clock_at(db_path: &str, command: &str, now: &str) -> assert_cmd::assert::Assert {
    sc().args(["--db", db_path, "--now", now, command]).assert()
}

/// Open a fresh library-level DB with the schema applied.
pub fn open_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}
