//! Placeholder classification.
//!
//! A node is a placeholder if its tag, or its `data-placeholder` attribute,
//! names one of the known shapes:
//!
//! - `logo` / `banner`: static assets from the registry;
//! - `video<N>` / `image<N>` (N = one or more ASCII digits): dynamic assets
//!   resolved by probing extensions.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::{Document, ElementData, NodeId};
use crate::extensions::MediaKind;
use crate::registry::StaticAsset;

/// Attribute that marks an ordinary element as a placeholder,
/// e.g. `<div data-placeholder="video2">`.
pub const MARKER_ATTR: &str = "data-placeholder";

static DYNAMIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(video|image)[0-9]+$").expect("valid placeholder pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    Static(StaticAsset),
    /// Dynamic asset with its logical name (`video1`, `image7`).
    Dynamic { kind: MediaKind, name: String },
}

impl Placeholder {
    pub fn name(&self) -> &str {
        match self {
            Placeholder::Static(asset) => asset.name(),
            Placeholder::Dynamic { name, .. } => name,
        }
    }
}

/// Classifies a logical name (tag or marker value), ignoring ASCII case.
pub fn classify_name(name: &str) -> Option<Placeholder> {
    let name = name.trim().to_ascii_lowercase();
    if let Some(asset) = StaticAsset::from_name(&name) {
        return Some(Placeholder::Static(asset));
    }
    if !DYNAMIC_NAME.is_match(&name) {
        return None;
    }
    let kind = if name.starts_with("video") {
        MediaKind::Video
    } else {
        MediaKind::Image
    };
    Some(Placeholder::Dynamic { kind, name })
}

/// Classifies an element. The tag takes precedence over the marker attribute.
pub fn classify(el: &ElementData) -> Option<Placeholder> {
    classify_name(el.tag()).or_else(|| el.attr(MARKER_ATTR).and_then(classify_name))
}

/// Classifies the node at `id`; non-elements are never placeholders.
pub fn classify_node(doc: &Document, id: NodeId) -> Option<Placeholder> {
    doc.element(id).and_then(classify)
}

/// Connected placeholders in document order.
pub fn find_all(doc: &Document) -> Vec<(NodeId, Placeholder)> {
    doc.descendants(doc.root())
        .into_iter()
        .filter_map(|id| classify_node(doc, id).map(|p| (id, p)))
        .collect()
}

/// True if `id` or anything below it is a placeholder.
pub fn subtree_has_placeholder(doc: &Document, id: NodeId) -> bool {
    classify_node(doc, id).is_some()
        || doc
            .descendants(id)
            .into_iter()
            .any(|d| classify_node(doc, d).is_some())
}
