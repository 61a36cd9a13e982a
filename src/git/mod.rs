pub mod probe;
pub mod runner;
pub mod status;

// Re-export commonly used items
pub use probe::*;
pub use runner::*;
pub use status::*;
