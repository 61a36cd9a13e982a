//! Rendering of status tables and outcome lines
//!
//! Cells are padded as plain text first and styled afterwards, so escape
//! sequences never take part in column alignment.

use console::{pad_str, Alignment, Style};
use std::time::Duration;

use super::terminal::colors_supported;
use crate::core::config::COLUMN_GAP;
use crate::core::{BranchResult, OutcomeRecord, OutcomeStatistics, RepositoryRecord, StatusReport};
use crate::git::Status;

const CLEAN_LABEL: &str = "clean";
const DIRTY_LABEL: &str = "dirty";
const SYNCED_LABEL: &str = "up to date";
const UNPUSHED_LABEL: &str = "unpushed";
const NO_UPSTREAM_LABEL: &str = "no upstream";
const INVALID_LABEL: &str = "-";

/// How output should look. Passed in, never read from global state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub color: bool,
}

impl RenderConfig {
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Styled unless `no_color` is set or stdout cannot show it
    pub fn detect(no_color: bool) -> Self {
        Self {
            color: !no_color && colors_supported(),
        }
    }
}

/// Turns core records into text
#[derive(Clone, Debug)]
pub struct Renderer {
    good: Style,
    bad: Style,
    warn: Style,
    dim: Style,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        let base = Style::new().force_styling(config.color);
        Self {
            good: base.clone().green(),
            bad: base.clone().red(),
            warn: base.clone().yellow(),
            dim: base.dim(),
        }
    }

    fn status_style(&self, status: Status) -> &Style {
        match status {
            Status::Ok => &self.good,
            Status::Failed => &self.bad,
            Status::Skipped => &self.warn,
        }
    }

    /// One aligned row: name, branch, working tree state, sync state
    pub fn status_row(
        &self,
        record: &RepositoryRecord,
        name_width: usize,
        branch_width: usize,
    ) -> String {
        let gap = " ".repeat(COLUMN_GAP);
        let name = pad_str(record.name(), name_width, Alignment::Left, None);

        let branch_cell = pad_str(record.branch().label(), branch_width, Alignment::Left, None);
        let branch = match record.branch() {
            BranchResult::Known(_) => branch_cell.to_string(),
            BranchResult::Unresolved => self.bad.apply_to(branch_cell).to_string(),
        };

        let tree = if record.is_clean() {
            self.good.apply_to(pad_str(CLEAN_LABEL, DIRTY_LABEL.len(), Alignment::Left, None))
        } else {
            self.bad.apply_to(pad_str(DIRTY_LABEL, DIRTY_LABEL.len(), Alignment::Left, None))
        };

        let sync = if !record.is_valid() {
            self.dim.apply_to(INVALID_LABEL)
        } else if !record.has_upstream() {
            self.warn.apply_to(NO_UPSTREAM_LABEL)
        } else if record.has_unpushed_commits() {
            self.warn.apply_to(UNPUSHED_LABEL)
        } else {
            self.good.apply_to(SYNCED_LABEL)
        };

        format!("{name}{gap}{branch}{gap}{tree}{gap}{sync}")
    }

    /// The whole table, one row per record; empty string for an empty report
    pub fn status_table(&self, report: &StatusReport) -> String {
        report
            .records
            .iter()
            .map(|r| self.status_row(r, report.name_width, report.branch_width))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `name [status]`, with the failure reason appended when `verbose`
    pub fn outcome_line(&self, outcome: &OutcomeRecord, name_width: usize, verbose: bool) -> String {
        let name = pad_str(&outcome.name, name_width, Alignment::Left, None);
        let tag = self.status_style(outcome.status).apply_to(outcome.status.tag());
        match (&outcome.detail, verbose) {
            (Some(detail), true) => {
                let reason = crate::core::stats::clean_error_message(detail);
                format!("{name} {tag} {}", self.dim.apply_to(reason))
            }
            _ => format!("{name} {tag}"),
        }
    }

    /// Every outcome line in order; empty string when there are none
    pub fn outcome_lines(&self, outcomes: &[OutcomeRecord], verbose: bool) -> String {
        let width = outcomes
            .iter()
            .map(|o| console::measure_text_width(&o.name))
            .max()
            .unwrap_or(0);
        outcomes
            .iter()
            .map(|o| self.outcome_line(o, width, verbose))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Summary footer printed after the outcome lines
    pub fn summary(&self, stats: &OutcomeStatistics, duration: Duration) -> String {
        let line = stats.generate_summary(duration);
        let detail = stats.generate_detailed_summary();
        if detail.is_empty() {
            self.dim.apply_to(line).to_string()
        } else {
            format!("{}\n\n{}", self.dim.apply_to(line), self.bad.apply_to(detail))
        }
    }

    /// Printed once before a checkout run that does not create the branch
    pub fn checkout_warning(&self, branch: &str) -> String {
        self.warn
            .apply_to(format!(
                "Note: repositories without a branch named '{branch}' will report [failed]; pass --new to create it."
            ))
            .to_string()
    }
}

/// Machine-readable dump of an aggregation
pub fn debug_dump(report: &StatusReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
