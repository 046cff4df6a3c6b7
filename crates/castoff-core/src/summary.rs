//! Turns a free-text change summary into the three derived artifacts:
//! commit subject, branch slug, and pull-request title.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::OnceLock;

/// Upper bound on the commit subject, counted in characters.
pub const SUMMARY_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Conventional-commit prefix stripping
// ---------------------------------------------------------------------------

static CONVENTIONAL_RE: OnceLock<Regex> = OnceLock::new();
static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn conventional_re() -> &'static Regex {
    CONVENTIONAL_RE.get_or_init(|| {
        Regex::new(r"^(feat|fix|docs|build|style|refactor|perf|test|ci|chore)(\([^)]*\))?:\s*")
            .unwrap()
    })
}

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9._/-]+$").unwrap())
}

/// Removes leading `type:` or `type(scope):` markers and trims surrounding
/// whitespace. Only the closed set of conventional types is recognized, so
/// words like "fixes:" pass through untouched. Stacked markers are stripped
/// until none remains, which keeps the function idempotent.
pub fn strip_conventional_prefix(text: &str) -> String {
    let mut rest = text.trim();
    while let Some(m) = conventional_re().find(rest) {
        rest = rest[m.end()..].trim_start();
    }
    rest.trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Change summary
// ---------------------------------------------------------------------------

/// A raw one-line summary as entered by the user, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary(String);

impl ChangeSummary {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The summary verbatim, validated to 1..=50 characters. Length is
    /// counted in characters, not bytes, so multi-byte input is not
    /// penalized.
    pub fn commit_subject(&self) -> Result<String, ValidationError> {
        let len = self.0.chars().count();
        if len == 0 {
            return Err(ValidationError::Empty);
        }
        if len > SUMMARY_LIMIT {
            return Err(ValidationError::TooLong {
                len,
                limit: SUMMARY_LIMIT,
            });
        }
        Ok(self.0.clone())
    }

    /// Prefix-stripped summary with spaces hyphenated, restricted to
    /// `[A-Za-z0-9._/-]`. The charset check runs after substitution, so a
    /// summary that hyphenates cleanly is accepted even if the raw text had
    /// spaces. An empty result is rejected by the same check.
    pub fn branch_slug(&self) -> Result<String, ValidationError> {
        let slug = strip_conventional_prefix(&self.0).replace(' ', "-");
        if !slug_re().is_match(&slug) {
            return Err(ValidationError::InvalidCharacters(slug));
        }
        Ok(slug)
    }

    /// Prefix-stripped summary with the first letter upper-cased. Rejects
    /// input that strips down to nothing rather than indexing into it.
    pub fn pr_title(&self) -> Result<String, ValidationError> {
        let stripped = strip_conventional_prefix(&self.0);
        let mut chars = stripped.chars();
        match chars.next() {
            None => Err(ValidationError::Empty),
            Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_conventional_type() {
        for kind in [
            "feat", "fix", "docs", "build", "style", "refactor", "perf", "test", "ci", "chore",
        ] {
            let input = format!("{kind}: add login page");
            assert_eq!(
                strip_conventional_prefix(&input),
                "add login page",
                "failed to strip: {input}"
            );
        }
    }

    #[test]
    fn strips_scoped_prefixes() {
        assert_eq!(
            strip_conventional_prefix("fix(api): handle empty body"),
            "handle empty body"
        );
        assert_eq!(
            strip_conventional_prefix("feat(ui-forms): focus first field"),
            "focus first field"
        );
    }

    #[test]
    fn stripping_is_idempotent() {
        for input in [
            "fix: add retries",
            "  feat(core): tidy up  ",
            "fix: feat: stacked markers",
            "no prefix at all",
        ] {
            let once = strip_conventional_prefix(input);
            let twice = strip_conventional_prefix(&once);
            assert_eq!(once, twice, "not idempotent for: {input}");
        }
    }

    #[test]
    fn unknown_types_pass_through() {
        for input in ["fixes: typo", "feature: new thing", "wip: later"] {
            assert_eq!(strip_conventional_prefix(input), input.trim());
        }
    }

    #[test]
    fn mid_string_markers_are_left_alone() {
        assert_eq!(
            strip_conventional_prefix("revert the fix: login"),
            "revert the fix: login"
        );
    }

    #[test]
    fn commit_subject_keeps_the_prefix() {
        let summary = ChangeSummary::new("fix: handle empty body");
        assert_eq!(summary.commit_subject().unwrap(), "fix: handle empty body");
    }

    #[test]
    fn commit_subject_boundaries() {
        assert!(matches!(
            ChangeSummary::new("").commit_subject(),
            Err(ValidationError::Empty)
        ));

        let at_limit = "a".repeat(SUMMARY_LIMIT);
        assert_eq!(ChangeSummary::new(at_limit.clone()).commit_subject().unwrap(), at_limit);

        let over = "a".repeat(SUMMARY_LIMIT + 1);
        assert!(matches!(
            ChangeSummary::new(over).commit_subject(),
            Err(ValidationError::TooLong { len: 51, limit: 50 })
        ));
    }

    #[test]
    fn commit_subject_counts_characters_not_bytes() {
        // 50 two-byte characters must still fit.
        let summary = ChangeSummary::new("é".repeat(SUMMARY_LIMIT));
        assert!(summary.commit_subject().is_ok());
    }

    #[test]
    fn branch_slug_hyphenates_and_strips() {
        let summary = ChangeSummary::new("feat: add login page");
        assert_eq!(summary.branch_slug().unwrap(), "add-login-page");
    }

    #[test]
    fn branch_slug_accepts_the_full_charset() {
        let summary = ChangeSummary::new("bump v1.2.3 to_next/rc-4");
        assert_eq!(summary.branch_slug().unwrap(), "bump-v1.2.3-to_next/rc-4");
    }

    #[test]
    fn branch_slug_rejects_bad_characters() {
        for input in ["what?!", "fix: comma, separated", "emoji ☃ here", ""] {
            assert!(
                matches!(
                    ChangeSummary::new(input).branch_slug(),
                    Err(ValidationError::InvalidCharacters(_))
                ),
                "expected rejection: {input}"
            );
        }
    }

    #[test]
    fn pr_title_capitalizes_after_stripping() {
        let summary = ChangeSummary::new("fix: handle empty body");
        assert_eq!(summary.pr_title().unwrap(), "Handle empty body");

        let summary = ChangeSummary::new("handle empty body");
        assert_eq!(summary.pr_title().unwrap(), "Handle empty body");
    }

    #[test]
    fn pr_title_tolerates_non_letters() {
        let summary = ChangeSummary::new("2fa rollout");
        assert_eq!(summary.pr_title().unwrap(), "2fa rollout");
    }

    #[test]
    fn pr_title_rejects_prefix_only_input() {
        for input in ["fix: ", "chore:", ""] {
            assert!(
                matches!(
                    ChangeSummary::new(input).pr_title(),
                    Err(ValidationError::Empty)
                ),
                "expected empty: {input}"
            );
        }
    }
}
