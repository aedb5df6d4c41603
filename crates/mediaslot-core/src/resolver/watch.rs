//! Mutation watcher: re-runs both passes when placeholders are inserted.

use std::sync::{Arc, PoisonError, Weak};

use super::PlaceholderResolver;
use crate::dom::{MutationReceiver, MutationRecord, ObserveOptions};
use crate::placeholder;
use crate::probe::AssetProbe;

impl<P: AssetProbe + 'static> PlaceholderResolver<P> {
    /// Installs the watcher on the document body (the root when there is no
    /// body), covering child-list changes at any depth. Returns `false` if a
    /// watcher is already running. Must be called inside a tokio runtime.
    pub fn watch(self: &Arc<Self>) -> bool {
        let mut slot = self.watcher.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|h| !h.is_finished()) {
            return false;
        }

        let rx = {
            let mut doc = self.lock_document();
            let target = doc.body().unwrap_or_else(|| doc.root());
            doc.observe(target, ObserveOptions { subtree: true })
        };
        // Weak so the task does not keep the resolver alive.
        *slot = Some(tokio::spawn(watch_loop(Arc::downgrade(self), rx)));
        tracing::debug!("mutation watcher installed");
        true
    }

    /// True if any node added by `record` is still attached and is, or
    /// contains, a placeholder. Nodes a previous rescan already replaced are
    /// detached by now.
    pub(super) fn inserted_placeholder(&self, record: &MutationRecord) -> bool {
        let doc = self.lock_document();
        record
            .added
            .iter()
            .any(|id| doc.is_connected(*id) && placeholder::subtree_has_placeholder(&doc, *id))
    }
}

async fn watch_loop<P: AssetProbe + 'static>(
    resolver: Weak<PlaceholderResolver<P>>,
    mut rx: MutationReceiver,
) {
    while let Some(record) = rx.recv().await {
        let Some(resolver) = resolver.upgrade() else {
            break;
        };
        if resolver.inserted_placeholder(&record) {
            tracing::debug!(target_node = ?record.target, "placeholder inserted, rescanning");
            let counts = resolver.rescan().await;
            tracing::debug!(replaced = counts.total(), "rescan done");
        }
    }
}
