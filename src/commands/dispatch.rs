//! Bulk-operation dispatch
//!
//! A dispatch cycle takes one fresh, silent aggregation, decides per record
//! whether the operation applies, and runs it. Records are never re-probed
//! mid-cycle and one repository's failure never stops the others.

use anyhow::Result;
use indicatif::ProgressBar;
use std::io::Write;
use std::time::Instant;

use super::operation::Operation;
use super::prompt::MessagePrompt;
use crate::core::{
    aggregate, create_progress_bar, run_bounded, Action, OutcomeRecord, OutcomeStatistics,
    RepositoryRecord, RunConfig, StatusReport, NO_REPOS_MESSAGE,
};
use crate::error::UsageError;
use crate::git::GitRunner;
use crate::utils::Renderer;

// Git command arguments
const GIT_PULL_ARGS: &[&str] = &["pull"];
const GIT_PUSH_ARGS: &[&str] = &["push"];
const GIT_ADD_ALL_ARGS: &[&str] = &["add", "--all"];

/// A bulk operation with everything it needs resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    Pull,
    /// `remote` is used only for branches that still need an upstream
    Push { remote: String },
    Commit { message: String },
    Checkout { branch: String, create: bool },
}

impl Plan {
    /// Whether `record` should be acted on.
    ///
    /// Commit and checkout only touch repositories with pending changes.
    pub fn is_eligible(&self, record: &RepositoryRecord) -> bool {
        if !record.is_valid() {
            return false;
        }
        match self {
            Plan::Pull => true,
            Plan::Push { .. } => record.has_unpushed_commits() || !record.has_upstream(),
            Plan::Commit { .. } | Plan::Checkout { .. } => !record.is_clean(),
        }
    }
}

/// Builds a commit plan, asking `prompt` only when a message is missing and
/// at least one repository would actually be committed
pub fn plan_commit(
    message: Option<String>,
    report: &StatusReport,
    prompt: &dyn MessagePrompt,
) -> Result<Plan> {
    let needs_message = report
        .records
        .iter()
        .any(|r| r.is_valid() && !r.is_clean());

    let message = match message {
        Some(message) => message,
        None if needs_message => prompt.commit_message()?,
        None => String::new(),
    };

    if needs_message && message.trim().is_empty() {
        return Err(UsageError::EmptyCommitMessage.into());
    }
    Ok(Plan::Commit { message })
}

/// Applies `plan` to one record and reports what happened
pub async fn apply(git: &dyn GitRunner, plan: &Plan, record: &RepositoryRecord) -> OutcomeRecord {
    let name = record.name();
    let path = record.path();

    if !plan.is_eligible(record) {
        tracing::debug!(repo = name, ?plan, "not eligible, skipping");
        return OutcomeRecord::skipped(name, path);
    }

    let (action, result) = match plan {
        Plan::Pull => (Action::Pull, git.run_checked(path, GIT_PULL_ARGS).await),
        Plan::Push { remote } => match record.branch().name() {
            Some(branch) if !record.has_upstream() => (
                Action::PushSetUpstream {
                    remote: remote.clone(),
                    branch: branch.to_string(),
                },
                git.run_checked(path, &["push", "--set-upstream", remote.as_str(), branch])
                    .await,
            ),
            _ => (Action::Push, git.run_checked(path, GIT_PUSH_ARGS).await),
        },
        Plan::Commit { message } => {
            // Never commit after a failed add
            if let Err(e) = git.run_checked(path, GIT_ADD_ALL_ARGS).await {
                tracing::warn!(repo = name, error = %e, "staging failed");
                return OutcomeRecord::failed(name, path, Action::Commit, format!("staging failed: {e}"));
            }
            (
                Action::Commit,
                git.run_checked(path, &["commit", "-m", message.as_str()]).await,
            )
        }
        Plan::Checkout { branch, create } => {
            if *create {
                (
                    Action::CreateBranch {
                        branch: branch.clone(),
                    },
                    git.run_checked(path, &["checkout", "-b", branch.as_str()]).await,
                )
            } else {
                (
                    Action::Checkout {
                        branch: branch.clone(),
                    },
                    // `--` keeps git from falling back to a pathspec and
                    // discarding edits when no such branch exists
                    git.run_checked(path, &["checkout", branch.as_str(), "--"])
                        .await,
                )
            }
        }
    };

    match result {
        Ok(_) => OutcomeRecord::ok(name, path, action),
        Err(e) => {
            tracing::warn!(repo = name, %action, error = %e, "action failed");
            OutcomeRecord::failed(name, path, action, e.to_string())
        }
    }
}

/// Applies `plan` to every record of `report`, returning outcomes in report order
pub async fn apply_all(
    git: &dyn GitRunner,
    plan: &Plan,
    report: &StatusReport,
    jobs: usize,
    progress: &ProgressBar,
) -> Vec<OutcomeRecord> {
    progress.set_length(report.records.len() as u64);
    run_bounded(report.records.iter().collect(), jobs, progress, |record| {
        apply(git, plan, record)
    })
    .await
}

/// Command-line inputs of a bulk operation
#[derive(Clone, Debug, Default)]
pub struct BulkRequest {
    pub message: Option<String>,
    pub branch: Option<String>,
    /// Create the checkout branch instead of switching to an existing one
    pub create: bool,
}

/// The branch a checkout will use. Rejected before any repository is probed.
pub fn checkout_branch(branch: Option<&str>) -> Result<String, UsageError> {
    match branch.map(str::trim) {
        None | Some("") => Err(UsageError::MissingBranch),
        // git would read it as an option
        Some(b) if b.starts_with('-') => Err(UsageError::InvalidBranch(b.to_string())),
        Some(b) => Ok(b.to_string()),
    }
}

/// Handles pull, push, commit and checkout.
///
/// Aggregates silently, resolves the plan, applies it to every repository
/// and writes one outcome line per repository followed by the summary.
pub async fn handle_bulk_command(
    git: &dyn GitRunner,
    config: &RunConfig,
    operation: Operation,
    request: BulkRequest,
    renderer: &Renderer,
    prompt: &dyn MessagePrompt,
    out: &mut dyn Write,
) -> Result<OutcomeStatistics> {
    let checkout = match operation {
        Operation::Checkout => Some(checkout_branch(request.branch.as_deref())?),
        _ => None,
    };

    let start_time = Instant::now();
    let report = aggregate(git, config, &ProgressBar::hidden()).await?;
    if report.is_empty() {
        writeln!(out, "{NO_REPOS_MESSAGE}")?;
        return Ok(OutcomeStatistics::new());
    }

    let plan = match (operation, checkout) {
        (Operation::Pull, _) => Plan::Pull,
        (Operation::Push, _) => Plan::Push {
            remote: config.remote.clone(),
        },
        (Operation::Commit, _) => plan_commit(request.message, &report, prompt)?,
        (Operation::Checkout, Some(branch)) => Plan::Checkout {
            branch,
            create: request.create,
        },
        (other, _) => anyhow::bail!("'{other}' does not change repositories"),
    };

    if let Plan::Checkout { branch, create: false } = &plan {
        writeln!(out, "{}", renderer.checkout_warning(branch))?;
    }

    tracing::debug!(%operation, repos = report.records.len(), jobs = config.jobs, "dispatching");
    let progress = create_progress_bar(&operation.to_string(), true);
    let outcomes = apply_all(git, &plan, &report, config.jobs, &progress).await;

    let statistics = OutcomeStatistics::from_outcomes(&outcomes);
    writeln!(out, "{}", renderer.outcome_lines(&outcomes, config.verbose))?;
    writeln!(out)?;
    writeln!(out, "{}", renderer.summary(&statistics, start_time.elapsed()))?;
    Ok(statistics)
}
