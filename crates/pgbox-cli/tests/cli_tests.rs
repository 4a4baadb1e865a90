//! End-to-end tests for the pgbox binary that do not need a container
//! runtime: catalog listing and compose export.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pgbox() -> Command {
    Command::cargo_bin("pgbox").unwrap()
}

#[test]
fn no_args_prints_hint() {
    pgbox()
        .assert()
        .success()
        .stdout(predicate::str::contains("pgbox --help"));
}

#[test]
fn list_shows_known_extensions() {
    pgbox()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("pgvector"))
        .stdout(predicate::str::contains("pg_cron"));
}

#[test]
fn list_json_is_parseable() {
    let output = pgbox().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = parsed.as_array().unwrap();
    assert!(entries.iter().any(|e| e["name"] == "pgvector"));
}

#[test]
fn export_writes_compose_project() {
    let dir = TempDir::new().unwrap();
    pgbox()
        .args(["export"])
        .arg(dir.path())
        .args(["--ext", "pgvector", "--ext", "pg_cron"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docker-compose.yml"));

    assert!(dir.path().join("docker-compose.yml").exists());
    assert!(dir.path().join("Dockerfile").exists());
    assert!(dir.path().join("init.sql").exists());
    assert!(dir.path().join("postgresql.conf.pgbox").exists());
}

#[test]
fn unknown_extensions_fail_with_complete_list() {
    let dir = TempDir::new().unwrap();
    pgbox()
        .args(["export"])
        .arg(dir.path())
        .args(["--ext", "bogus1", "--ext", "bogus2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus1").and(predicate::str::contains("bogus2")));
}

#[test]
fn psql_without_runtime_or_container_fails_cleanly() {
    // Whether or not docker is installed, there is no running
    // container with this name; the command must fail non-zero.
    pgbox()
        .args(["psql", "-V", "99"])
        .assert()
        .failure();
}
