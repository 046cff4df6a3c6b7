//! Jira-backed candidate source. Credentials come from the environment and
//! are resolved only when a fetch actually happens, so runs that skip the
//! tracker never require them.

use castoff_core::error::SelectionError;
use castoff_core::tracker::{Candidate, CandidateSource};
use serde_json::Value;

pub const HOST_ENV: &str = "JIRA_HOST";
pub const USER_ENV: &str = "JIRA_API_USER";
pub const TOKEN_ENV: &str = "JIRA_API_TOKEN";

const SEARCH_JQL: &str = "assignee = currentUser() AND resolution = Unresolved order by updated DESC";
const MAX_RESULTS: &str = "50";

#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub host: String,
    pub user: String,
    pub token: String,
}

impl JiraCredentials {
    /// Reads `JIRA_HOST`, `JIRA_API_USER`, and `JIRA_API_TOKEN`; all three
    /// are required.
    pub fn from_env() -> Result<Self, SelectionError> {
        Ok(JiraCredentials {
            host: require_env(HOST_ENV)?,
            user: require_env(USER_ENV)?,
            token: require_env(TOKEN_ENV)?,
        })
    }

    /// The issue-search endpoint for this host. A bare hostname gets an
    /// `https://` scheme; an explicit scheme is left alone.
    fn search_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}/rest/api/2/search")
        } else {
            format!("https://{host}/rest/api/2/search")
        }
    }
}

fn require_env(key: &str) -> Result<String, SelectionError> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            SelectionError::Aborted(format!("missing required environment variable: {key}"))
        })
}

/// Fetches the caller's unresolved issues, newest activity first.
pub struct JiraSource {
    credentials: Option<JiraCredentials>,
}

impl JiraSource {
    /// Resolves credentials from the environment at fetch time.
    pub fn from_env() -> Self {
        JiraSource { credentials: None }
    }

    pub fn with_credentials(credentials: JiraCredentials) -> Self {
        JiraSource {
            credentials: Some(credentials),
        }
    }

    fn search(credentials: &JiraCredentials) -> Result<Vec<Candidate>, SelectionError> {
        // No request timeout; a slow tracker blocks the run.
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| SelectionError::Aborted(format!("could not build HTTP client: {e}")))?;

        let response = client
            .get(credentials.search_url())
            .basic_auth(&credentials.user, Some(&credentials.token))
            .query(&[("jql", SEARCH_JQL), ("maxResults", MAX_RESULTS)])
            .send()
            .map_err(|e| SelectionError::Aborted(format!("issue search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SelectionError::Aborted(format!(
                "issue search returned HTTP {status}"
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| SelectionError::Aborted(format!("malformed issue search response: {e}")))?;

        let issues = body
            .get("issues")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut candidates = Vec::with_capacity(issues.len());
        for issue in issues {
            let key = issue
                .get("key")
                .and_then(Value::as_str)
                .map(str::to_string)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    SelectionError::Aborted("issue search returned an entry without a key".into())
                })?;
            let summary = issue
                .pointer("/fields/summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            candidates.push(Candidate {
                key,
                summary,
                payload: issue,
            });
        }
        Ok(candidates)
    }
}

impl CandidateSource for JiraSource {
    fn fetch(&self) -> Result<Vec<Candidate>, SelectionError> {
        let credentials = match &self.credentials {
            Some(credentials) => credentials.clone(),
            None => JiraCredentials::from_env()?,
        };
        Self::search(&credentials)
    }
}
