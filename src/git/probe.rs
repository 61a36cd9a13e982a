//! Read-only probes of a single repository's state
//!
//! Each probe runs one git command and reports what it found. None of them
//! decide what a failure means for the repository as a whole; that policy
//! lives in the aggregator.

use std::path::Path;

use super::runner::GitRunner;
use crate::core::config::UnpushedStrategy;
use crate::error::ProbeError;

// Git command arguments
const GIT_SYMBOLIC_REF_ARGS: &[&str] = &["symbolic-ref", "--quiet", "--short", "HEAD"];
const GIT_STATUS_PORCELAIN_ARGS: &[&str] = &["status", "--porcelain"];
const GIT_STATUS_SUMMARY_ARGS: &[&str] = &["status"];
const GIT_UPSTREAM_ARGS: &[&str] = &[
    "rev-parse",
    "--abbrev-ref",
    "--symbolic-full-name",
    "@{upstream}",
];
const GIT_UNPUSHED_COUNT_ARGS: &[&str] = &["rev-list", "--count", "--branches", "--not", "@{upstream}"];

/// Phrase git prints in `git status` when the branch has unpublished commits
const AHEAD_MARKER: &str = "Your branch is ahead of";

/// Short name of the branch HEAD points at.
///
/// Detached HEAD, a broken ref, a missing git and a non-repository all fail.
pub async fn current_branch(git: &dyn GitRunner, path: &Path) -> Result<String, ProbeError> {
    let output = git.run_checked(path, GIT_SYMBOLIC_REF_ARGS).await?;
    let branch = output.stdout.trim();
    if branch.is_empty() {
        return Err(ProbeError::Unparseable(output.stdout));
    }
    Ok(branch.to_string())
}

/// True when neither the working tree nor the index has pending changes
pub async fn is_clean(git: &dyn GitRunner, path: &Path) -> Result<bool, ProbeError> {
    let output = git.run_checked(path, GIT_STATUS_PORCELAIN_ARGS).await?;
    Ok(output.stdout.lines().all(|line| line.trim().is_empty()))
}

/// True when local branches hold commits the upstream does not have
pub async fn has_unpushed_commits(
    git: &dyn GitRunner,
    path: &Path,
    strategy: UnpushedStrategy,
) -> Result<bool, ProbeError> {
    match strategy {
        UnpushedStrategy::RevList => {
            let output = git.run_checked(path, GIT_UNPUSHED_COUNT_ARGS).await?;
            let count: u64 = output
                .stdout
                .trim()
                .parse()
                .map_err(|_| ProbeError::Unparseable(output.stdout.clone()))?;
            Ok(count > 0)
        }
        UnpushedStrategy::StatusSummary => {
            let output = git.run_checked(path, GIT_STATUS_SUMMARY_ARGS).await?;
            Ok(summary_reports_unpushed(&output.stdout))
        }
    }
}

/// Scans human-readable `git status` output for the "ahead of" marker.
///
/// Brittle: depends on git's English wording and breaks under a translated
/// locale or a future rewording. Only used with `UnpushedStrategy::StatusSummary`.
pub fn summary_reports_unpushed(summary: &str) -> bool {
    summary.lines().any(|line| line.contains(AHEAD_MARKER))
}

/// True when HEAD has an upstream tracking reference.
///
/// "No upstream configured" is a normal answer, not an error. Only a git that
/// cannot run at all produces `Err`.
pub async fn has_upstream(git: &dyn GitRunner, path: &Path) -> Result<bool, ProbeError> {
    let output = git.run(path, GIT_UPSTREAM_ARGS).await?;
    Ok(output.success && !output.stdout.trim().is_empty())
}
