//! Media placeholder resolution for HTML documents.
//!
//! Placeholder elements (`<logo>`, `<banner>`, `<video3>`, `<image7>`, ...)
//! are swapped for real `<img>`/`<video>` elements. Static assets come from a
//! registry; numbered media are located by probing candidate files in
//! extension-priority order.

pub mod config;
pub mod dom;
pub mod extensions;
pub mod logging;
pub mod page;
pub mod placeholder;
pub mod probe;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod serve;

pub use probe::{AssetProbe, FsProbe, HttpProbe, ProbeBackend};
pub use resolver::{PassCounts, PlaceholderResolver};
