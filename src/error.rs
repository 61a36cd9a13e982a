//! Error types shared across the crate.

use std::path::PathBuf;

/// The root directory could not be listed. Fatal: nothing has been touched yet.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Root path does not exist.
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Root path exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Root path could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single git invocation went wrong.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// The invocation exceeded its time budget and was killed.
    #[error("git timed out after {0} seconds")]
    Timeout(u64),

    /// git ran and exited non-zero.
    #[error("{}", exit_message(*code, stderr))]
    Exit { code: Option<i32>, stderr: String },
}

fn exit_message(code: Option<i32>, stderr: &str) -> String {
    let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
    if stderr.is_empty() {
        format!("git exited with status {code}")
    } else {
        format!("git exited with status {code}: {stderr}")
    }
}

/// A read-only probe could not determine a repository's state.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The underlying invocation failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// git answered, but with something we could not interpret.
    #[error("unexpected git output: {0:?}")]
    Unparseable(String),
}

/// The command line asked for something that cannot be done.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Unknown operation '{0}'!")]
    UnknownOperation(String),

    #[error("checkout requires --branch NAME")]
    MissingBranch,

    #[error("commit message must not be empty")]
    EmptyCommitMessage,

    /// Would be read by git as an option rather than a branch name.
    #[error("invalid branch name '{0}'")]
    InvalidBranch(String),
}
