//! The run orchestrator: precondition checks, summary collection, prefix
//! gathering, metadata derivation, then either a dry-run report or the
//! git/gh action sequence.

use crate::branch::ChangePlan;
use crate::config::RunConfig;
use crate::error::{CastoffError, PreconditionError, Result};
use crate::summary::ChangeSummary;
use crate::tracker::{CandidatePicker, CandidateSource, SelectionOutcome};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Collaborator seams
// ---------------------------------------------------------------------------

/// Repository-state queries backing the precondition gate.
pub trait Repository {
    /// True when the working directory sits inside a git work tree.
    fn is_work_tree(&self) -> bool;

    fn current_branch(&self) -> Result<String, PreconditionError>;

    /// True when staged or unstaged changes exist.
    fn has_pending_changes(&self) -> Result<bool, PreconditionError>;
}

/// Blocking single-line prompt for the change summary.
pub trait SummaryPrompt {
    /// Returns the accepted line, or `None` when the user backs out.
    fn read_summary(&self) -> std::io::Result<Option<String>>;
}

/// The side effects of a normal run, invoked in declaration order. Errors
/// are plain messages; the orchestrator decides which ones end the run.
pub trait Actions {
    fn create_branch(&self, name: &str) -> Result<(), String>;
    fn stage_all(&self) -> Result<(), String>;
    fn commit(&self, subject: &str) -> Result<(), String>;
    fn push(&self, branch: &str) -> Result<(), String>;
    fn open_pr(&self, title: &str) -> Result<(), String>;
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The full action sequence ran against the repository.
    Completed(ChangePlan),
    /// Nothing was touched; the report carries what would have happened.
    DryRun { config: RunConfig, plan: ChangePlan },
}

pub struct Workflow<'a> {
    config: &'a RunConfig,
    repo: &'a dyn Repository,
    prompt: &'a dyn SummaryPrompt,
    source: &'a dyn CandidateSource,
    picker: &'a dyn CandidatePicker,
    actions: &'a dyn Actions,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a RunConfig,
        repo: &'a dyn Repository,
        prompt: &'a dyn SummaryPrompt,
        source: &'a dyn CandidateSource,
        picker: &'a dyn CandidatePicker,
        actions: &'a dyn Actions,
    ) -> Self {
        Workflow {
            config,
            repo,
            prompt,
            source,
            picker,
            actions,
        }
    }

    /// Drives one run front to back. The first failure ends the run; no
    /// step is retried and nothing done so far is rolled back.
    pub fn run(&self) -> Result<RunOutcome> {
        self.check_preconditions()?;
        let summary = self.collect_summary()?;
        let prefixes = self.gather_prefixes()?;
        let plan = ChangePlan::derive(&summary, &prefixes)?;
        debug!(
            branch = %plan.branch_name,
            subject = %plan.commit_subject,
            title = %plan.pr_title,
            "derived change metadata"
        );

        if self.config.dry_run {
            return Ok(RunOutcome::DryRun {
                config: self.config.clone(),
                plan,
            });
        }

        self.execute(&plan)?;
        Ok(RunOutcome::Completed(plan))
    }

    /// All three checks must pass before the user is prompted for
    /// anything.
    fn check_preconditions(&self) -> Result<()> {
        if !self.repo.is_work_tree() {
            return Err(PreconditionError::NotARepository.into());
        }
        let branch = self.repo.current_branch()?;
        if !self.config.is_trunk(&branch) {
            return Err(PreconditionError::NotOnTrunk {
                current: branch,
                expected: self.config.trunk_branches.clone(),
            }
            .into());
        }
        if !self.repo.has_pending_changes()? {
            return Err(PreconditionError::NothingToCommit.into());
        }
        Ok(())
    }

    fn collect_summary(&self) -> Result<ChangeSummary> {
        match self.prompt.read_summary()? {
            Some(text) => {
                debug!(summary = %text, "collected change summary");
                Ok(ChangeSummary::new(text))
            }
            None => Err(CastoffError::InputCancelled),
        }
    }

    /// Username prefix first, then the lower-cased issue key if one is
    /// chosen. Declining the picker leaves the issue segment out without
    /// failing the run.
    fn gather_prefixes(&self) -> Result<Vec<String>> {
        let mut prefixes = Vec::new();
        if let Some(user) = &self.config.user_prefix {
            debug!(prefix = %user, "using configured username prefix");
            prefixes.push(user.clone());
        }
        if self.config.tracker_enabled {
            let candidates = self.source.fetch()?;
            debug!(count = candidates.len(), "fetched issue candidates");
            match self.picker.pick(&candidates)? {
                SelectionOutcome::Chosen(candidate) => {
                    debug!(key = %candidate.key, "issue selected");
                    prefixes.push(candidate.prefix_segment());
                }
                SelectionOutcome::Cancelled => {
                    debug!("no issue selected");
                }
            }
        }
        Ok(prefixes)
    }

    /// Runs the action sequence. Branch creation and PR opening only warn
    /// on failure; staging, committing, and pushing are fatal.
    fn execute(&self, plan: &ChangePlan) -> Result<()> {
        if let Err(message) = self.actions.create_branch(&plan.branch_name) {
            warn!(branch = %plan.branch_name, %message, "branch creation failed, continuing on the current branch");
        }
        self.actions.stage_all().map_err(|message| CastoffError::Execution {
            action: "stage changes".into(),
            message,
        })?;
        self.actions
            .commit(&plan.commit_subject)
            .map_err(|message| CastoffError::Execution {
                action: "commit staged changes".into(),
                message,
            })?;
        self.actions
            .push(&plan.branch_name)
            .map_err(|message| CastoffError::Execution {
                action: "push the branch".into(),
                message,
            })?;
        if let Err(message) = self.actions.open_pr(&plan.pr_title) {
            warn!(%message, "could not open a pull request, open it manually");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
