//! Statistics tracking for dispatch cycles

use std::time::Duration;

use super::config::{ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH, PATH_DISPLAY_WIDTH};
use super::outcome::OutcomeRecord;
use crate::git::Status;

/// Tally of one dispatch cycle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeStatistics {
    pub ok_repos: usize,
    pub failed_repos: usize,
    pub skipped_repos: usize,
    pub failures: Vec<(String, String, String)>, // (repo_name, repo_path, error_message)
}

impl OutcomeStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_outcomes(outcomes: &[OutcomeRecord]) -> Self {
        let mut stats = Self::new();
        for outcome in outcomes {
            stats.update(outcome);
        }
        stats
    }

    /// Updates statistics based on one repository's outcome
    pub fn update(&mut self, outcome: &OutcomeRecord) {
        match outcome.status {
            Status::Ok => self.ok_repos += 1,
            Status::Skipped => self.skipped_repos += 1,
            Status::Failed => {
                self.failed_repos += 1;
                self.failures.push((
                    outcome.name.clone(),
                    outcome.path.to_string_lossy().into_owned(),
                    clean_error_message(outcome.detail.as_deref().unwrap_or("")),
                ));
            }
        }
    }

    pub fn total(&self) -> usize {
        self.ok_repos + self.failed_repos + self.skipped_repos
    }

    pub fn has_failures(&self) -> bool {
        self.failed_repos > 0
    }

    /// One-line summary of the cycle
    pub fn generate_summary(&self, duration: Duration) -> String {
        format!(
            "Completed in {:.1}s • {} ok • {} failed • {} skipped",
            duration.as_secs_f64(),
            self.ok_repos,
            self.failed_repos,
            self.skipped_repos
        )
    }

    /// Lists failed repositories with their cleaned error, or empty when none failed
    pub fn generate_detailed_summary(&self) -> String {
        if self.failures.is_empty() {
            return String::new();
        }

        let mut lines = vec![format!("FAILED REPOS ({})", self.failures.len())];
        for (i, (repo_name, repo_path, error)) in self.failures.iter().enumerate() {
            let tree_char = if i == self.failures.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            let short_path = crate::utils::shorten_path(repo_path, PATH_DISPLAY_WIDTH);
            lines.push(format!(
                "   {tree_char} {repo_name:20} {short_path:30} # {error}"
            ));
        }
        lines.join("\n")
    }
}

/// Cleans and formats error messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    // Collapse newlines, tabs and runs of spaces
    let cleaned = error.split_whitespace().collect::<Vec<_>>().join(" ");

    // Extract key error patterns
    if cleaned.contains("timed out") {
        cleaned
    } else if cleaned.contains("Authentication failed")
        || cleaned.contains("authentication")
        || cleaned.contains("Permission denied")
    {
        "authentication failed".to_string()
    } else if cleaned.contains("CONFLICT") || cleaned.contains("diverged") {
        "merge conflict".to_string()
    } else if cleaned.contains("Could not resolve host") || cleaned.contains("Connection") {
        "network error".to_string()
    } else if cleaned.contains("did not match any file(s) known to git")
        || cleaned.contains("invalid reference")
    {
        "branch not found".to_string()
    } else if cleaned.contains("already exists") {
        "branch already exists".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
