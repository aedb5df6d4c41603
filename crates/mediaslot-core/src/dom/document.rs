//! Arena-backed document tree with child-list observation.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::node::Node;
use super::observer::Observer;
use super::{
    DomError, ElementData, MutationReceiver, MutationRecord, NodeData, NodeId, ObserveOptions,
};

/// Document shared between the resolver, its watcher task, and the host.
/// The lock is never held across an `.await`.
pub type SharedDocument = Arc<Mutex<Document>>;

/// A mutable document tree. Nodes live in an arena and are addressed by
/// [`NodeId`]; detached nodes stay in the arena until the document is dropped.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    observers: Vec<Observer>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            observers: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedDocument {
        Arc::new(Mutex::new(self))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node::new(data));
        NodeId(self.nodes.len() - 1)
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Doctype(name.to_string()))
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::UnknownNode(id))
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes.get_mut(id.0)?.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// True if `ancestor` is `node` or lies on its parent chain.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// True if the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// All nodes below `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Connected elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|id| {
                self.element(*id)
                    .is_some_and(|el| el.tag().eq_ignore_ascii_case(tag))
            })
            .collect()
    }

    /// The first `body` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.elements_by_tag("body").into_iter().next()
    }

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.notify(MutationRecord {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Puts `new` where `old` is and detaches `old` (with its subtree).
    pub fn replace_child(&mut self, new: NodeId, old: NodeId) -> Result<(), DomError> {
        self.node(old)?;
        if old == self.root() {
            return Err(DomError::Root("replaced"));
        }
        let parent = self.parent(old).ok_or(DomError::Detached(old))?;
        if new == old {
            return Ok(());
        }
        self.check_insert(parent, new)?;
        self.detach(new)?;

        // Detaching `new` may have shifted `old` if they were siblings.
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| *c == old)
            .ok_or(DomError::Detached(old))?;
        self.nodes[parent.0].children[pos] = new;
        self.nodes[new.0].parent = Some(parent);
        self.nodes[old.0].parent = None;
        self.notify(MutationRecord {
            target: parent,
            added: vec![new],
            removed: vec![old],
        });
        Ok(())
    }

    /// Detaches `id` from its parent. The node and its subtree stay usable.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        self.node(id)?;
        if id == self.root() {
            return Err(DomError::Root("removed"));
        }
        if self.parent(id).is_none() {
            return Err(DomError::Detached(id));
        }
        self.detach(id)
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.node(parent)?.data.can_have_children() {
            return Err(DomError::NotAContainer(parent));
        }
        self.node(child)?;
        if child == self.root() {
            return Err(DomError::Root("moved"));
        }
        if self.contains(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
        self.nodes[id.0].parent = None;
        self.notify(MutationRecord {
            target: parent,
            added: Vec::new(),
            removed: vec![id],
        });
        Ok(())
    }

    /// Subscribes to child-list changes of `target` (and below it, if
    /// `options.subtree`). Dropping the receiver unsubscribes.
    pub fn observe(&mut self, target: NodeId, options: ObserveOptions) -> MutationReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(Observer {
            target,
            options,
            tx,
        });
        rx
    }

    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|o| !o.is_closed()).count()
    }

    fn notify(&mut self, record: MutationRecord) {
        self.observers.retain(|o| !o.is_closed());
        for observer in &self.observers {
            let wanted = observer.target == record.target
                || (observer.options.subtree && self.contains(observer.target, record.target));
            if wanted {
                // A receiver closed since the retain above just misses this record.
                let _ = observer.tx.send(record.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        let a = doc.create_element("div");
        let b = doc.create_element("logo");
        doc.append_child(doc.root(), body).unwrap();
        doc.append_child(body, a).unwrap();
        doc.append_child(a, b).unwrap();
        (doc, body, a, b)
    }

    #[test]
    fn descendants_are_preorder() {
        let (mut doc, body, a, b) = sample();
        let c = doc.create_element("p");
        doc.append_child(body, c).unwrap();
        assert_eq!(doc.descendants(doc.root()), vec![body, a, b, c]);
        assert_eq!(doc.elements_by_tag("LOGO"), vec![b]);
        assert_eq!(doc.body(), Some(body));
    }

    #[test]
    fn replace_child_keeps_position_and_detaches_old() {
        let (mut doc, body, a, _) = sample();
        let header = doc.create_element("header");
        doc.replace_child(header, a).unwrap();
        assert_eq!(doc.children(body), &[header]);
        assert!(doc.parent(a).is_none());
        assert!(!doc.is_connected(a));
        assert!(doc.is_connected(header));
    }

    #[test]
    fn replace_detached_node_fails() {
        let (mut doc, _, _, _) = sample();
        let x = doc.create_element("img");
        let y = doc.create_element("logo");
        assert_eq!(doc.replace_child(x, y), Err(DomError::Detached(y)));
        assert_eq!(
            doc.replace_child(x, doc.root()),
            Err(DomError::Root("replaced"))
        );
    }

    #[test]
    fn append_rejects_cycles_and_leaf_parents() {
        let (mut doc, body, a, _) = sample();
        assert_eq!(
            doc.append_child(a, body),
            Err(DomError::Cycle { parent: a, child: body })
        );
        let text = doc.create_text("hi");
        let el = doc.create_element("span");
        assert_eq!(doc.append_child(text, el), Err(DomError::NotAContainer(text)));
    }

    #[test]
    fn appending_moves_node() {
        let (mut doc, body, a, b) = sample();
        doc.append_child(body, b).unwrap();
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(body), &[a, b]);
    }

    #[test]
    fn observer_sees_subtree_insertions_only_under_target() {
        let (mut doc, body, a, _) = sample();
        let mut rx = doc.observe(body, ObserveOptions { subtree: true });
        let mut shallow = doc.observe(body, ObserveOptions { subtree: false });

        let inner = doc.create_element("video3");
        doc.append_child(a, inner).unwrap();
        let outside = doc.create_element("head");
        doc.append_child(doc.root(), outside).unwrap();

        let rec = rx.try_recv().unwrap();
        assert_eq!(rec.target, a);
        assert_eq!(rec.added, vec![inner]);
        assert!(rx.try_recv().is_err());
        assert!(shallow.try_recv().is_err());
    }

    #[test]
    fn replace_reports_added_and_removed() {
        let (mut doc, body, a, _) = sample();
        let mut rx = doc.observe(body, ObserveOptions::default());
        let img = doc.create_element("img");
        doc.replace_child(img, a).unwrap();
        let rec = rx.try_recv().unwrap();
        assert_eq!(rec.added, vec![img]);
        assert_eq!(rec.removed, vec![a]);
    }

    #[test]
    fn dropped_receiver_unsubscribes() {
        let (mut doc, body, _, _) = sample();
        let rx = doc.observe(body, ObserveOptions::default());
        assert_eq!(doc.observer_count(), 1);
        drop(rx);
        let p = doc.create_element("p");
        doc.append_child(body, p).unwrap();
        assert_eq!(doc.observer_count(), 0);
    }
}
