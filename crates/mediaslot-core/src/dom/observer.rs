//! Child-list mutation records and their subscribers.
//!
//! Every structural change made through [`super::Document`] produces one
//! [`MutationRecord`]. Subscribers receive records over an unbounded tokio
//! channel, so delivery never blocks the mutating caller; the receiving side
//! runs on whatever schedule its task gets.

use tokio::sync::mpsc;

use super::NodeId;

/// A change to the child list of `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Node whose children changed.
    pub target: NodeId,
    /// Nodes inserted under `target`, in insertion order.
    pub added: Vec<NodeId>,
    /// Nodes removed from `target`.
    pub removed: Vec<NodeId>,
}

/// Which changes an observer wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Also report changes anywhere below the observed node.
    pub subtree: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self { subtree: true }
    }
}

pub type MutationReceiver = mpsc::UnboundedReceiver<MutationRecord>;

#[derive(Debug)]
pub(crate) struct Observer {
    pub(crate) target: NodeId,
    pub(crate) options: ObserveOptions,
    pub(crate) tx: mpsc::UnboundedSender<MutationRecord>,
}

impl Observer {
    pub(crate) fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
