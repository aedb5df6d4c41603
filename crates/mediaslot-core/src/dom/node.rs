//! Node payloads stored in the document arena.

/// Handle to a node inside a [`super::Document`]. Only meaningful for the
/// document that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// One `name="value"` pair on an element. Valueless attributes (`controls`)
/// carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An element: lowercased tag name plus attributes in insertion order.
/// A trailing `/` from self-closing syntax is not part of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    tag: String,
    attrs: Vec<Attribute>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.trim_end_matches('/').to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Sets an attribute, overwriting an existing one of the same name in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value.to_string(),
            None => self.attrs.push(Attribute {
                name,
                value: value.to_string(),
            }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self
            .attrs
            .iter()
            .position(|a| a.name.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).value)
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The single root of every document.
    Document,
    Doctype(String),
    Element(ElementData),
    /// Raw text as it appeared in the source; written back verbatim.
    Text(String),
    Comment(String),
}

impl NodeData {
    pub(crate) fn can_have_children(&self) -> bool {
        matches!(self, NodeData::Document | NodeData::Element(_))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_tag_is_lowercased() {
        assert_eq!(ElementData::new("VIDEO1").tag(), "video1");
    }

    #[test]
    fn self_closing_slash_is_not_part_of_tag() {
        assert_eq!(ElementData::new("BR/").tag(), "br");
    }

    #[test]
    fn set_attr_overwrites_in_place() {
        let mut el = ElementData::new("img");
        el.set_attr("src", "a.png");
        el.set_attr("alt", "A");
        el.set_attr("SRC", "b.png");
        assert_eq!(el.attr("src"), Some("b.png"));
        assert_eq!(el.attrs()[0].name, "src");
        assert_eq!(el.attrs().len(), 2);
    }

    #[test]
    fn remove_attr_returns_value() {
        let mut el = ElementData::new("div");
        el.set_attr("data-x", "1");
        assert_eq!(el.remove_attr("data-x").as_deref(), Some("1"));
        assert!(!el.has_attr("data-x"));
        assert!(el.remove_attr("data-x").is_none());
    }
}
