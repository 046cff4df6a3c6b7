//! Git and GitHub CLI invocations backing the workflow's repository and
//! action seams.

use castoff_core::error::PreconditionError;
use castoff_core::workflow::{Actions, Repository};
use std::path::PathBuf;
use std::process::{Command, Output};

/// Shells out to `git` (and `gh` for pull requests) in a fixed working
/// directory.
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        GitCli { dir: dir.into() }
    }

    fn git_output(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
    }

    /// Runs a command and reduces any failure to a single message with the
    /// trimmed stderr attached.
    fn run_checked(&self, program: &str, args: &[&str]) -> Result<(), String> {
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| format!("failed to run {program}: {e}"))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{program} {} failed: {}",
                args.join(" "),
                stderr.trim()
            ));
        }
        Ok(())
    }
}

impl Repository for GitCli {
    fn is_work_tree(&self) -> bool {
        self.git_output(&["rev-parse", "--is-inside-work-tree"])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn current_branch(&self) -> Result<String, PreconditionError> {
        let output = self
            .git_output(&["branch", "--show-current"])
            .map_err(|e| PreconditionError::CheckFailed(format!("failed to run git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PreconditionError::CheckFailed(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn has_pending_changes(&self) -> Result<bool, PreconditionError> {
        let output = self
            .git_output(&["status", "--porcelain"])
            .map_err(|e| PreconditionError::CheckFailed(format!("failed to run git: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PreconditionError::CheckFailed(stderr.trim().to_string()));
        }
        Ok(!output.stdout.is_empty())
    }
}

impl Actions for GitCli {
    fn create_branch(&self, name: &str) -> Result<(), String> {
        self.run_checked("git", &["checkout", "-b", name])
    }

    fn stage_all(&self) -> Result<(), String> {
        self.run_checked("git", &["add", "--all"])
    }

    fn commit(&self, subject: &str) -> Result<(), String> {
        self.run_checked("git", &["commit", "-m", subject])
    }

    fn push(&self, branch: &str) -> Result<(), String> {
        self.run_checked("git", &["push", "origin", branch])
    }

    fn open_pr(&self, title: &str) -> Result<(), String> {
        which::which("gh").map_err(|_| "gh not found on PATH".to_string())?;
        self.run_checked("gh", &["pr", "create", "--title", title, "--web"])
    }
}
