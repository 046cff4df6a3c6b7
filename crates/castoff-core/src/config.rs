//! Run configuration assembled from command-line flags and the
//! environment. Nothing here is persisted; every run starts from scratch.

use serde::Serialize;

/// Optional username segment prepended to every branch name.
pub const USER_PREFIX_ENV: &str = "GIT_USER_PREFIX";

/// Comma-separated override for the set of branches a run may start from.
pub const TRUNK_SET_ENV: &str = "CASTOFF_TRUNK_BRANCHES";

/// Everything a single run needs to know. Serialized verbatim into the
/// dry-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    pub verbose: bool,
    pub dry_run: bool,
    pub tracker_enabled: bool,
    pub user_prefix: Option<String>,
    pub trunk_branches: Vec<String>,
}

impl RunConfig {
    /// Builds the config from flag values plus `GIT_USER_PREFIX` and
    /// `CASTOFF_TRUNK_BRANCHES`.
    pub fn from_env(verbose: bool, dry_run: bool, tracker_enabled: bool) -> Self {
        Self::new(
            verbose,
            dry_run,
            tracker_enabled,
            env_nonempty(USER_PREFIX_ENV),
            env_nonempty(TRUNK_SET_ENV),
        )
    }

    /// Environment-free constructor. An unset or unparseable trunk
    /// override falls back to `main` and `master`.
    pub fn new(
        verbose: bool,
        dry_run: bool,
        tracker_enabled: bool,
        user_prefix: Option<String>,
        trunk_override: Option<String>,
    ) -> Self {
        let trunk_branches = trunk_override
            .map(|raw| parse_trunk_set(&raw))
            .filter(|set| !set.is_empty())
            .unwrap_or_else(default_trunk_set);
        RunConfig {
            verbose,
            dry_run,
            tracker_enabled,
            user_prefix,
            trunk_branches,
        }
    }

    pub fn is_trunk(&self, branch: &str) -> bool {
        self.trunk_branches.iter().any(|b| b == branch)
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_trunk_set(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_trunk_set() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
