//! Errors for structural misuse of the document tree.

use super::NodeId;

/// Error returned by document tree mutations and HTML parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    /// The id does not belong to this document.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    /// The node has no parent, so it cannot be replaced or removed in place.
    #[error("node {0:?} is not attached to a parent")]
    Detached(NodeId),
    /// The document root cannot be moved, replaced, or removed.
    #[error("the document root cannot be {0}")]
    Root(&'static str),
    /// Inserting the node would make it its own ancestor.
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    /// The parent cannot hold children (text, comment, doctype).
    #[error("node {0:?} cannot have children")]
    NotAContainer(NodeId),
    /// The HTML input could not be parsed.
    #[error("html parse error: {0}")]
    Parse(String),
}
