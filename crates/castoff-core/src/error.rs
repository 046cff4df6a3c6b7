use thiserror::Error;

/// Repository-state checks that must hold before any prompting starts.
#[derive(Debug, Error)]
pub enum PreconditionError {
    #[error("not inside a git repository")]
    NotARepository,

    #[error("on branch '{current}', expected a trunk branch ({})", .expected.join(", "))]
    NotOnTrunk {
        current: String,
        expected: Vec<String>,
    },

    #[error("working tree is clean, nothing to commit")]
    NothingToCommit,

    #[error("could not inspect repository state: {0}")]
    CheckFailed(String),
}

/// Violations of the derived-metadata rules (subject length, slug charset).
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("summary is empty")]
    Empty,

    #[error("summary is {len} characters, the limit is {limit}")]
    TooLong { len: usize, limit: usize },

    #[error("branch name '{0}' contains invalid characters")]
    InvalidCharacters(String),
}

/// Failures while fetching or choosing an issue candidate. A user backing
/// out of the picker is not an error; see `SelectionOutcome::Cancelled`.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("issue selection aborted: {0}")]
    Aborted(String),

    #[error("issue selection I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CastoffError {
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    #[error("summary entry cancelled")]
    InputCancelled,

    #[error("metadata validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("failed to {action}: {message}")]
    Execution { action: String, message: String },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CastoffError {
    /// Stable mapping from error kind to process exit status, so callers
    /// can script against the binary without parsing stderr.
    pub fn exit_code(&self) -> i32 {
        match self {
            CastoffError::Execution { .. } | CastoffError::Io(_) => 1,
            CastoffError::Precondition(_) => 2,
            CastoffError::Validation(_) => 3,
            CastoffError::Selection(_) => 4,
            CastoffError::InputCancelled => 130,
        }
    }
}

pub type Result<T, E = CastoffError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let cases: Vec<(CastoffError, i32)> = vec![
            (
                CastoffError::Execution {
                    action: "push the branch".into(),
                    message: "remote hung up".into(),
                },
                1,
            ),
            (CastoffError::Precondition(PreconditionError::NothingToCommit), 2),
            (CastoffError::Validation(ValidationError::Empty), 3),
            (
                CastoffError::Selection(SelectionError::Aborted("no credentials".into())),
                4,
            ),
            (CastoffError::InputCancelled, 130),
        ];
        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "wrong exit code for {err}");
        }
    }

    #[test]
    fn not_on_trunk_lists_expected_branches() {
        let err = PreconditionError::NotOnTrunk {
            current: "feature-x".into(),
            expected: vec!["main".into(), "master".into()],
        };
        assert_eq!(
            err.to_string(),
            "on branch 'feature-x', expected a trunk branch (main, master)"
        );
    }

    #[test]
    fn too_long_reports_both_lengths() {
        let err = ValidationError::TooLong { len: 62, limit: 50 };
        assert_eq!(err.to_string(), "summary is 62 characters, the limit is 50");
    }

    #[test]
    fn execution_error_names_the_action() {
        let err = CastoffError::Execution {
            action: "commit staged changes".into(),
            message: "exit status 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to commit staged changes: exit status 1"
        );
    }
}
