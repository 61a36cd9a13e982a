pub(crate) mod fs;
pub mod render;
pub(crate) mod terminal;

// Public API - utilities used by commands
pub use fs::shorten_path;
pub use render::{RenderConfig, Renderer};
pub use terminal::colors_supported;
