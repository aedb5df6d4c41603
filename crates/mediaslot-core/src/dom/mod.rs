//! Document tree the resolver reads and mutates.
//!
//! A small arena DOM: elements, text, comments, and a doctype under a single
//! root, with `replace_child`/`append_child`/`remove` mutations and
//! child-list observers comparable to a browser `MutationObserver`.

mod document;
mod error;
mod node;
mod observer;
mod parse;
mod serialize;

pub use document::{Document, SharedDocument};
pub use error::DomError;
pub use node::{Attribute, ElementData, NodeData, NodeId};
pub use observer::{MutationReceiver, MutationRecord, ObserveOptions};
pub use parse::parse_html;
pub use serialize::is_void;
