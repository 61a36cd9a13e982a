//! Repository discovery

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::config::{GITDIR_PREFIX, GIT_FILE_SCAN_LINES, GIT_MARKER};
use crate::error::DiscoveryError;

/// Check if a .git file (for submodules/worktrees) contains gitdir reference
/// Only reads the first few lines, gitdir is typically in the first line
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => BufReader::new(file)
            .lines()
            .take(GIT_FILE_SCAN_LINES)
            .map_while(Result::ok)
            .any(|line| line.trim_start().starts_with(GITDIR_PREFIX)),
        Err(_) => false,
    }
}

/// True when `dir` carries git metadata directly inside it
pub fn is_repository(dir: &Path) -> bool {
    let marker = dir.join(GIT_MARKER);
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => true,
        Ok(meta) if meta.is_file() => is_git_file(&marker),
        _ => false,
    }
}

/// Lists the immediate child directories of `root` that are git repositories.
///
/// Order is whatever the directory listing yields; it is stable for a run but
/// not sorted, and callers must not rely on more than that. Paths are
/// absolute when `root` can be canonicalized.
pub fn discover(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = root.as_ref();

    let meta = fs::metadata(root).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DiscoveryError::NotFound(root.to_path_buf())
        } else {
            DiscoveryError::Unreadable {
                path: root.to_path_buf(),
                source,
            }
        }
    })?;
    if !meta.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    let entries = fs::read_dir(&root).map_err(|source| DiscoveryError::Unreadable {
        path: root.clone(),
        source,
    })?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(root = %root.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        // Follows symlinks, so a linked checkout counts as a child directory
        if path.is_dir() && is_repository(&path) {
            repos.push(path);
        }
    }

    tracing::debug!(root = %root.display(), count = repos.len(), "discovered repositories");
    Ok(repos)
}
