//! Read-only commands: the status table and the JSON dump

use anyhow::{Context, Result};
use std::io::Write;

use crate::core::{aggregate, create_progress_bar, RunConfig, StatusReport, NO_REPOS_MESSAGE};
use crate::git::GitRunner;
use crate::utils::render::debug_dump;
use crate::utils::Renderer;

const SCANNING_LABEL: &str = "🔍 probing";

async fn collect(git: &dyn GitRunner, config: &RunConfig) -> Result<StatusReport> {
    let progress = create_progress_bar(SCANNING_LABEL, true);
    let report = aggregate(git, config, &progress)
        .await
        .with_context(|| format!("Failed to scan {}", config.root.display()))?;
    tracing::debug!(repos = report.records.len(), "aggregated");
    Ok(report)
}

/// Prints one aligned row per repository, or a note when there are none
pub async fn handle_status_command(
    git: &dyn GitRunner,
    config: &RunConfig,
    renderer: &Renderer,
    out: &mut dyn Write,
) -> Result<StatusReport> {
    let report = collect(git, config).await?;
    if report.is_empty() {
        writeln!(out, "{NO_REPOS_MESSAGE}")?;
    } else {
        writeln!(out, "{}", renderer.status_table(&report))?;
    }
    Ok(report)
}

/// Prints the aggregated records as pretty JSON
pub async fn handle_debug_command(
    git: &dyn GitRunner,
    config: &RunConfig,
    out: &mut dyn Write,
) -> Result<StatusReport> {
    let report = collect(git, config).await?;
    let json = debug_dump(&report).context("Failed to serialize repository state")?;
    writeln!(out, "{json}")?;
    Ok(report)
}
