//! git command execution

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use crate::core::config::GIT_OPERATION_TIMEOUT_SECS;
use crate::error::GitError;

const GIT_CEILING_DIRECTORIES_ENV: &str = "GIT_CEILING_DIRECTORIES";

/// Captured result of one git invocation that ran to completion
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    /// Output of a successful invocation
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of an invocation that exited non-zero
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Converts a non-zero exit into `GitError::Exit`
    pub fn into_result(self) -> Result<GitOutput, GitError> {
        if self.success {
            Ok(self)
        } else {
            Err(GitError::Exit {
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Something that can run git in a working directory.
///
/// Implementations must pass `args` as a discrete argument vector; nothing
/// here ever goes through a shell.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Runs git with `args` inside `repo`.
    ///
    /// `Err` only when git could not run to completion (missing binary,
    /// timeout). A non-zero exit is `Ok` with `success == false`.
    async fn run(&self, repo: &Path, args: &[&str]) -> Result<GitOutput, GitError>;

    /// Like [`GitRunner::run`] but a non-zero exit is also an error
    async fn run_checked(&self, repo: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        self.run(repo, args).await?.into_result()
    }
}

/// Runs the `git` found on `PATH` with a per-invocation timeout
#[derive(Clone, Debug)]
pub struct SystemGit {
    program: String,
    timeout: Duration,
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new(Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS))
    }
}

impl SystemGit {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "git".to_string(),
            timeout,
        }
    }

    /// Uses a different executable, mostly useful for pointing at a missing one
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, repo: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        tracing::debug!(repo = %repo.display(), ?args, "running git");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(repo)
            // Never block on credential or editor prompts
            .env("GIT_TERMINAL_PROMPT", "0")
            // Messages are matched as English text
            .env("LC_ALL", "C")
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);

        // A child with unusable metadata must fail instead of resolving to an
        // enclosing repository
        if let Some(parent) = repo.parent().filter(|p| p.is_absolute()) {
            command.env(GIT_CEILING_DIRECTORIES_ENV, parent);
        }

        let result = tokio::time::timeout(self.timeout, command.output()).await;

        match result {
            Ok(Ok(output)) => Ok(GitOutput {
                success: output.status.success(),
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Ok(Err(e)) => Err(GitError::Spawn(e)),
            Err(_) => {
                tracing::warn!(repo = %repo.display(), ?args, "git invocation timed out");
                Err(GitError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
