//! The operation named on the command line

use std::fmt;
use std::str::FromStr;

use crate::error::UsageError;

/// What a single invocation does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Print the aggregated table
    Status,
    /// Print the aggregated state as JSON
    Debug,
    Pull,
    Push,
    Commit,
    Checkout,
}

impl Operation {
    pub const NAMES: &'static [&'static str] =
        &["status", "debug", "pull", "push", "commit", "checkout"];
}

impl FromStr for Operation {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "list" is what older versions called status
            "status" | "list" => Ok(Operation::Status),
            "debug" => Ok(Operation::Debug),
            "pull" => Ok(Operation::Pull),
            "push" => Ok(Operation::Push),
            "commit" => Ok(Operation::Commit),
            "checkout" => Ok(Operation::Checkout),
            other => Err(UsageError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Status => "status",
            Operation::Debug => "debug",
            Operation::Pull => "pull",
            Operation::Push => "push",
            Operation::Commit => "commit",
            Operation::Checkout => "checkout",
        };
        f.write_str(name)
    }
}
