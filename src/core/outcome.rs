//! Per-repository outcome of a dispatch cycle

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::git::Status;

/// The git action a repository was (or would have been) subjected to
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Pull,
    Push,
    /// Push that also records `remote/branch` as the upstream
    PushSetUpstream { remote: String, branch: String },
    /// `add --all` followed by `commit`
    Commit,
    Checkout { branch: String },
    CreateBranch { branch: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pull => write!(f, "pull"),
            Action::Push => write!(f, "push"),
            Action::PushSetUpstream { remote, branch } => {
                write!(f, "push --set-upstream {remote} {branch}")
            }
            Action::Commit => write!(f, "add + commit"),
            Action::Checkout { branch } => write!(f, "checkout {branch}"),
            Action::CreateBranch { branch } => write!(f, "checkout -b {branch}"),
        }
    }
}

/// What happened to one repository. Created fresh each cycle, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeRecord {
    pub name: String,
    pub path: PathBuf,
    /// `None` when the repository was skipped
    pub action: Option<Action>,
    pub status: Status,
    /// Error text for failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl OutcomeRecord {
    pub fn ok(name: &str, path: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            action: Some(action),
            status: Status::Ok,
            detail: None,
        }
    }

    pub fn failed(
        name: &str,
        path: impl Into<PathBuf>,
        action: Action,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            action: Some(action),
            status: Status::Failed,
            detail: Some(detail.into()),
        }
    }

    pub fn skipped(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            action: None,
            status: Status::Skipped,
            detail: None,
        }
    }
}
