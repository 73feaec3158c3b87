//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn issuedesk(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("issuedesk").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PG_CONNECTION_STRING")
        .env_remove("PORT")
        .env_remove("ISSUEDESK_HOST");
    cmd
}

#[test]
fn test_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    issuedesk(&dir)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PostgreSQL connection string"))
        .stdout(predicate::str::contains("PG_CONNECTION_STRING"));
}

#[test]
fn test_serve_requires_database_url() {
    let dir = tempfile::tempdir().unwrap();
    issuedesk(&dir)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PG_CONNECTION_STRING not set"));
}

#[test]
fn test_dotenv_feeds_arguments() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "PORT=not-a-port\n").unwrap();

    issuedesk(&dir)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-a-port"));
}

#[test]
fn test_unknown_command_fails() {
    let dir = tempfile::tempdir().unwrap();
    issuedesk(&dir).arg("migrate").assert().failure();
}
