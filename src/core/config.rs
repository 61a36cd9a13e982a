//! Configuration constants and run settings
//!
//! There is no configuration file. Everything a run needs is either a
//! constant here or a command-line flag collected into [`RunConfig`].

use std::path::PathBuf;
use std::time::Duration;

// Concurrency Configuration
//
// Probes and actions are I/O-bound git subprocesses scoped to their own
// working directory, so repositories can be processed side by side.

// Upper bound for the smart default, keeps remotes from seeing a burst of connections
pub const GIT_CONCURRENT_CAP: usize = 12;

// Timeout constants
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 180; // 3 minutes per invocation

// Remote used when a push has to create the upstream
pub const DEFAULT_REMOTE: &str = "origin";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No git repositories found.";
pub const UNKNOWN_BRANCH_LABEL: &str = "<unknown>";
pub const UNKNOWN_REPO_NAME: &str = "unknown";
pub const PROGRESS_TEMPLATE: &str = "{spinner} {prefix:.bold} {pos}/{len} {wide_msg}";

// Display formatting constants
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 60;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 57;
pub const PATH_DISPLAY_WIDTH: usize = 30;
pub const COLUMN_GAP: usize = 2;

// Repository discovery configuration
pub const GIT_MARKER: &str = ".git";
pub const GITDIR_PREFIX: &str = "gitdir:";
pub const GIT_FILE_SCAN_LINES: usize = 5;

/// How the unpushed-commit probe decides whether local work is unpublished
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnpushedStrategy {
    /// Count commits on local branches that the upstream does not contain
    #[default]
    RevList,
    /// Look for the "ahead of" phrase in `git status`. Locale dependent.
    StatusSummary,
}

/// Determines the concurrency limit for git operations based on CLI args and system resources
///
/// Priority order:
/// 1. --sequential flag → 1
/// 2. --jobs N flag → N
/// 3. Smart default → min(CPU_CORES + 2, 12)
pub fn get_git_concurrency(jobs: Option<usize>, sequential: bool) -> usize {
    if sequential {
        return 1;
    }

    if let Some(n) = jobs {
        return n.max(1);
    }

    let cpu_count = num_cpus::get();
    (cpu_count + 2).min(GIT_CONCURRENT_CAP)
}

/// Everything one invocation of the tool needs besides the operation itself
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Directory whose immediate children are scanned
    pub root: PathBuf,
    /// Maximum repositories processed at once
    pub jobs: usize,
    /// Budget for each git invocation
    pub timeout: Duration,
    /// Remote used by push when the branch has no upstream yet
    pub remote: String,
    pub unpushed_strategy: UnpushedStrategy,
    /// Exit non-zero when any repository reports `[failed]`
    pub strict: bool,
    /// Append the failure reason to `[failed]` lines
    pub verbose: bool,
}

impl RunConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            jobs: get_git_concurrency(None, false),
            timeout: Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS),
            remote: DEFAULT_REMOTE.to_string(),
            unpushed_strategy: UnpushedStrategy::default(),
            strict: false,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_forces_single_job() {
        assert_eq!(get_git_concurrency(Some(8), true), 1);
    }

    #[test]
    fn test_explicit_jobs_clamped_to_one() {
        assert_eq!(get_git_concurrency(Some(0), false), 1);
        assert_eq!(get_git_concurrency(Some(4), false), 4);
    }

    #[test]
    fn test_default_concurrency_is_capped() {
        let jobs = get_git_concurrency(None, false);
        assert!(jobs >= 1);
        assert!(jobs <= GIT_CONCURRENT_CAP);
    }

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::new("/work");
        assert_eq!(config.root, PathBuf::from("/work"));
        assert_eq!(config.remote, "origin");
        assert_eq!(config.timeout, Duration::from_secs(180));
        assert_eq!(config.unpushed_strategy, UnpushedStrategy::RevList);
        assert!(!config.strict);
    }
}
