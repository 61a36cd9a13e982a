//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Repository discovery
//! - State aggregation into repository records
//! - Outcome records and statistics
//! - Run configuration
//!
//! Internal implementation details are not exposed through this API.

// Records and aggregation
pub use super::aggregate::{aggregate, probe_repository, BranchResult, RepositoryRecord, StatusReport};
pub use super::outcome::{Action, OutcomeRecord};
pub use super::stats::OutcomeStatistics;

// Discovery
pub use super::discovery::{discover, is_repository};

// Configuration
pub use super::config::{get_git_concurrency, RunConfig, UnpushedStrategy};
pub use super::config::{DEFAULT_REMOTE, GIT_CONCURRENT_CAP, GIT_OPERATION_TIMEOUT_SECS};

// User-facing messages
pub use super::config::{NO_REPOS_MESSAGE, UNKNOWN_BRANCH_LABEL};

// Worker pool and progress
pub use super::progress::{create_progress_bar, run_bounded};

// Terminal utilities (re-exported from utils)
pub use crate::utils::colors_supported;
