//! # githell
//!
//! `githell` inspects and drives a directory full of independent git working
//! copies. It powers the `githell` CLI tool.
//!
//! ## Core Features
//!
//! - **Discovery**: immediate subdirectories carrying a `.git` directory or
//!   gitdir file, in directory-listing order.
//! - **State Aggregation**: branch, cleanliness, upstream and unpushed-commit
//!   probes folded into one record per repository.
//! - **Bulk Operations**: pull, push, commit and checkout with per-repository
//!   eligibility and partial-failure reporting.
//! - **Bounded Concurrency**: at most `--jobs` repositories in flight, results
//!   always in discovery order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use githell::core::{aggregate, RunConfig};
//! use githell::git::SystemGit;
//! use indicatif::ProgressBar;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunConfig::new(".");
//!     let git = SystemGit::new(config.timeout);
//!     let report = aggregate(&git, &config, &ProgressBar::hidden()).await?;
//!     for record in &report.records {
//!         println!("{}: {}", record.name(), record.branch().label());
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod error;
pub mod git;
pub mod utils;
