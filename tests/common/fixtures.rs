//! Test fixtures and builders

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{add_git_remote, create_bare_remote, create_test_commit, git, setup_git_repo_on};

/// A directory of sibling repositories plus a separate place for their remotes.
/// Both are removed on drop.
pub struct Workspace {
    pub temp_dir: TempDir,
    pub remotes: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            remotes: TempDir::new()?,
        })
    }

    /// The directory githell scans
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repo(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    pub fn remote(&self, name: &str) -> PathBuf {
        self.remotes.path().join(format!("{name}.git"))
    }

    /// Builds `builder` as a child of the root
    pub fn add(&self, builder: TestRepoBuilder) -> Result<PathBuf> {
        builder.build_in(self)
    }

    /// A plain subdirectory with no git metadata
    pub fn add_plain_dir(&self, name: &str) -> Result<PathBuf> {
        let path = self.repo(name);
        std::fs::create_dir(&path)?;
        std::fs::write(path.join("notes.txt"), "not a repository")?;
        Ok(path)
    }
}

/// Builder for creating test repositories
pub struct TestRepoBuilder {
    name: String,
    branch: String,
    with_commits: usize,
    with_remote: bool,
    tracking: bool,
    unpushed: usize,
    dirty: bool,
}

impl TestRepoBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branch: "main".to_string(),
            with_commits: 1,
            with_remote: false,
            tracking: false,
            unpushed: 0,
            dirty: false,
        }
    }

    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_commits(mut self, count: usize) -> Self {
        self.with_commits = count.max(1);
        self
    }

    /// Adds a bare `origin` without pushing to it
    pub fn with_remote(mut self) -> Self {
        self.with_remote = true;
        self
    }

    /// Adds `origin` and pushes with `-u`, so the branch has an upstream
    pub fn tracking(mut self) -> Self {
        self.with_remote = true;
        self.tracking = true;
        self
    }

    /// Commits made after the upstream was pushed
    pub fn with_unpushed(mut self, count: usize) -> Self {
        self.unpushed = count;
        self
    }

    /// Leaves an untracked file in the working tree
    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn build_in(self, workspace: &Workspace) -> Result<PathBuf> {
        let path = workspace.repo(&self.name);
        std::fs::create_dir(&path)?;
        setup_git_repo_on(&path, &self.branch)?;

        create_test_commit(&path, "README.md", &format!("# {}", self.name), "Initial commit")?;
        for i in 2..=self.with_commits {
            create_test_commit(
                &path,
                &format!("file{i}.txt"),
                &format!("Content {i}"),
                &format!("Commit {i}"),
            )?;
        }

        if self.with_remote {
            let remote = workspace.remote(&self.name);
            create_bare_remote(&remote)?;
            add_git_remote(&path, "origin", &remote.to_string_lossy())?;
        }
        if self.tracking {
            git(&path, &["push", "--quiet", "-u", "origin", &self.branch])?;
        }

        for i in 1..=self.unpushed {
            create_test_commit(
                &path,
                &format!("local{i}.txt"),
                &format!("Local {i}"),
                &format!("Local commit {i}"),
            )?;
        }

        if self.dirty {
            std::fs::write(path.join("scratch.txt"), "work in progress")?;
        }

        Ok(path)
    }
}
