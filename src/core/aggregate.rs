//! Repository state aggregation
//!
//! Runs every probe against every discovered repository and folds the answers
//! into immutable [`RepositoryRecord`]s, in discovery order.

use indicatif::ProgressBar;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::config::{RunConfig, UnpushedStrategy, UNKNOWN_BRANCH_LABEL, UNKNOWN_REPO_NAME};
use super::discovery::discover;
use super::progress::run_bounded;
use crate::error::{DiscoveryError, ProbeError};
use crate::git::{current_branch, has_unpushed_commits, has_upstream, is_clean, GitRunner};

/// Outcome of resolving HEAD to a branch name
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "name", rename_all = "lowercase")]
pub enum BranchResult {
    Known(String),
    /// Detached HEAD, broken ref, missing git, or not actually a repository
    Unresolved,
}

impl BranchResult {
    pub fn name(&self) -> Option<&str> {
        match self {
            BranchResult::Known(name) => Some(name),
            BranchResult::Unresolved => None,
        }
    }

    /// Text shown in the status table
    pub fn label(&self) -> &str {
        self.name().unwrap_or(UNKNOWN_BRANCH_LABEL)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, BranchResult::Known(_))
    }
}

/// State of one repository as seen at the start of a dispatch cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    path: PathBuf,
    name: String,
    branch: BranchResult,
    clean: bool,
    has_unpushed_commits: bool,
    has_upstream: bool,
    is_valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    probe_failures: Vec<String>,
}

impl RepositoryRecord {
    pub fn new(
        path: impl Into<PathBuf>,
        branch: BranchResult,
        clean: bool,
        has_unpushed_commits: bool,
        has_upstream: bool,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNKNOWN_REPO_NAME.to_string());
        let is_valid = branch.is_known();
        Self {
            path,
            name,
            branch,
            clean,
            has_unpushed_commits,
            has_upstream,
            is_valid,
            probe_failures: Vec::new(),
        }
    }

    fn with_probe_failures(mut self, failures: Vec<String>) -> Self {
        self.probe_failures = failures;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn branch(&self) -> &BranchResult {
        &self.branch
    }

    pub fn is_clean(&self) -> bool {
        self.clean
    }

    pub fn has_unpushed_commits(&self) -> bool {
        self.has_unpushed_commits
    }

    pub fn has_upstream(&self) -> bool {
        self.has_upstream
    }

    /// False when the branch could not be resolved; such repositories are never acted on
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Probes that failed and were replaced by their degraded value
    pub fn probe_failures(&self) -> &[String] {
        &self.probe_failures
    }
}

/// Every record of one aggregation plus the column widths needed to align them
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub records: Vec<RepositoryRecord>,
    pub name_width: usize,
    pub branch_width: usize,
}

impl StatusReport {
    pub fn new(records: Vec<RepositoryRecord>) -> Self {
        let name_width = records
            .iter()
            .map(|r| console::measure_text_width(r.name()))
            .max()
            .unwrap_or(0);
        let branch_width = records
            .iter()
            .map(|r| console::measure_text_width(r.branch().label()))
            .max()
            .unwrap_or(0);
        Self {
            records,
            name_width,
            branch_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Unwraps a probe answer or falls back to `degraded`, noting the failure.
///
/// The degraded values are chosen so that a failed probe never makes a
/// repository eligible for a mutating action.
fn settle<T>(
    probe: &str,
    path: &Path,
    result: Result<T, ProbeError>,
    degraded: T,
    failures: &mut Vec<String>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(repo = %path.display(), probe, error = %e, "probe failed, using degraded value");
            failures.push(format!("{probe}: {e}"));
            degraded
        }
    }
}

/// Runs all four probes against one repository, one after another
pub async fn probe_repository(
    git: &dyn GitRunner,
    path: PathBuf,
    strategy: UnpushedStrategy,
) -> RepositoryRecord {
    let mut failures = Vec::new();

    let branch = match current_branch(git, &path).await {
        Ok(name) => BranchResult::Known(name),
        Err(e) => {
            tracing::warn!(repo = %path.display(), error = %e, "cannot resolve branch");
            failures.push(format!("branch: {e}"));
            BranchResult::Unresolved
        }
    };
    let clean = settle("clean", &path, is_clean(git, &path).await, true, &mut failures);
    let upstream = settle(
        "upstream",
        &path,
        has_upstream(git, &path).await,
        true,
        &mut failures,
    );
    // No upstream means nothing to compare against; that is an answer, not a failure
    let unpushed = if upstream {
        settle(
            "unpushed",
            &path,
            has_unpushed_commits(git, &path, strategy).await,
            false,
            &mut failures,
        )
    } else {
        false
    };

    RepositoryRecord::new(path, branch, clean, unpushed, upstream).with_probe_failures(failures)
}

/// Discovers and probes every repository under `config.root`.
///
/// Records come back in discovery order regardless of how many repositories
/// were probed at once. Prints nothing; `progress` may be hidden.
pub async fn aggregate(
    git: &dyn GitRunner,
    config: &RunConfig,
    progress: &ProgressBar,
) -> Result<StatusReport, DiscoveryError> {
    let paths = discover(&config.root)?;
    progress.set_length(paths.len() as u64);

    let strategy = config.unpushed_strategy;
    let records = run_bounded(paths, config.jobs, progress, |path| {
        probe_repository(git, path, strategy)
    })
    .await;

    Ok(StatusReport::new(records))
}
