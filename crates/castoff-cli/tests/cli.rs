#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn castoff(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("castoff").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GIT_USER_PREFIX")
        .env_remove("CASTOFF_TRUNK_BRANCHES");
    cmd
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo(dir: &TempDir) {
    run_git(dir.path(), &["init"]);
    run_git(dir.path(), &["config", "user.name", "test-user"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["commit", "--allow-empty", "-m", "initial"]);
    run_git(dir.path(), &["checkout", "-B", "main"]);
}

// ---------------------------------------------------------------------------
// Precondition gate
// ---------------------------------------------------------------------------

#[test]
fn refuses_to_run_outside_a_repository() {
    let dir = TempDir::new().unwrap();
    castoff(&dir)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not inside a git repository"));
}

#[test]
fn refuses_to_run_from_a_feature_branch() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    run_git(dir.path(), &["checkout", "-B", "feature-x"]);
    std::fs::write(dir.path().join("notes.txt"), "pending\n").unwrap();

    castoff(&dir)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("expected a trunk branch"));
}

#[test]
fn refuses_a_clean_work_tree() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);

    castoff(&dir)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nothing to commit"));
}

#[test]
fn trunk_override_admits_other_branches() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    run_git(dir.path(), &["checkout", "-B", "develop"]);

    // The branch check passes and the run fails on the next gate instead.
    castoff(&dir)
        .env("CASTOFF_TRUNK_BRANCHES", "develop")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("nothing to commit"));
}

// ---------------------------------------------------------------------------
// Flag surface
// ---------------------------------------------------------------------------

#[test]
fn help_lists_the_flag_surface() {
    let dir = TempDir::new().unwrap();
    castoff(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--skip-jira"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn version_flag_reports_the_binary() {
    let dir = TempDir::new().unwrap();
    castoff(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("castoff"));
}
