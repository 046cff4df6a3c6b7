//! Issue-tracker candidates and the seams the interactive picker and the
//! tracker backend plug into.

use crate::error::SelectionError;
use serde::{Deserialize, Serialize};

/// One selectable issue. `key` is the tracker identifier and is unique
/// within a fetched batch; `payload` is the untouched tracker record,
/// rendered verbatim in the preview pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: String,
    pub summary: String,
    pub payload: serde_json::Value,
}

impl Candidate {
    /// Row label shown in the picker list.
    pub fn label(&self) -> String {
        format!("{}: {}", self.key, self.summary)
    }

    /// The key as it appears in branch names.
    pub fn prefix_segment(&self) -> String {
        self.key.to_lowercase()
    }
}

/// How an interactive selection ended. Backing out is an ordinary outcome,
/// not an error; callers must treat the two arms differently.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    Chosen(Candidate),
    Cancelled,
}

/// Where candidates come from. Implementations block; a failed fetch is
/// fatal to the run.
pub trait CandidateSource {
    fn fetch(&self) -> Result<Vec<Candidate>, SelectionError>;
}

/// Interactive single-choice picker over a fetched batch.
pub trait CandidatePicker {
    fn pick(&self, candidates: &[Candidate]) -> Result<SelectionOutcome, SelectionError>;
}
