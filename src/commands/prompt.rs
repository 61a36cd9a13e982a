//! Interactive input collaborators

use anyhow::{Context, Result};

/// Supplies a commit message when none was given on the command line
pub trait MessagePrompt {
    fn commit_message(&self) -> Result<String>;
}

/// Asks on the terminal
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalPrompt;

impl MessagePrompt for TerminalPrompt {
    fn commit_message(&self) -> Result<String> {
        inquire::Text::new("Commit message:")
            .with_help_message("used for every repository with changes")
            .prompt()
            .context("Commit message prompt cancelled")
    }
}

/// Always answers with the same message
#[derive(Clone, Debug)]
pub struct FixedMessage(pub String);

impl MessagePrompt for FixedMessage {
    fn commit_message(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Refuses to prompt; for non-interactive runs
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrompt;

impl MessagePrompt for NoPrompt {
    fn commit_message(&self) -> Result<String> {
        anyhow::bail!("no commit message given and stdin is not a terminal; pass --message")
    }
}
