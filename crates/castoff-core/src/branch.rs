//! Branch-name composition and the bundle of derived metadata a run
//! produces.

use crate::error::ValidationError;
use crate::summary::ChangeSummary;
use serde::Serialize;

/// Joins prefix segments and the slug into a `/`-separated branch path.
/// With no prefixes the slug stands alone; segment order is preserved.
pub fn compose_branch_name(prefixes: &[String], slug: &str) -> String {
    let mut parts: Vec<&str> = prefixes.iter().map(String::as_str).collect();
    parts.push(slug);
    parts.join("/")
}

/// The three artifacts derived from one change summary. Serialized as-is
/// for the dry-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePlan {
    pub commit_subject: String,
    pub branch_name: String,
    pub pr_title: String,
}

impl ChangePlan {
    /// Derives all three artifacts from the summary, failing on the first
    /// rule violation.
    pub fn derive(
        summary: &ChangeSummary,
        prefixes: &[String],
    ) -> Result<Self, ValidationError> {
        let commit_subject = summary.commit_subject()?;
        let slug = summary.branch_slug()?;
        let pr_title = summary.pr_title()?;
        Ok(ChangePlan {
            commit_subject,
            branch_name: compose_branch_name(prefixes, &slug),
            pr_title,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
