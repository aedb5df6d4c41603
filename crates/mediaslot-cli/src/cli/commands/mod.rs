//! CLI command handlers, one per file.

mod render;
mod scan;
mod serve;

pub use render::{run_render, RenderOptions};
pub use scan::run_scan;
pub use serve::{run_serve, ServeOptions};
