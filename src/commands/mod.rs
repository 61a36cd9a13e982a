//! Command handlers invoked by the CLI

pub mod dispatch;
pub mod operation;
pub mod prompt;
pub mod status;

pub use dispatch::{checkout_branch, handle_bulk_command, BulkRequest, Plan};
pub use operation::Operation;
pub use prompt::{FixedMessage, MessagePrompt, NoPrompt, TerminalPrompt};
pub use status::{handle_debug_command, handle_status_command};
