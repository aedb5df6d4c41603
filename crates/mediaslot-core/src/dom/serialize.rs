//! [`Document`] → HTML text.

use std::fmt::Write;

use super::{Document, NodeData, NodeId};

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

impl Document {
    /// Serializes the whole document.
    pub fn to_html(&self) -> String {
        self.outer_html(self.root())
    }

    /// Serializes `id` together with its subtree.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id);
        out
    }

    /// Serializes only the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(&mut out, *child);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(data) = self.data(id) else {
            return;
        };
        match data {
            NodeData::Document => {
                for child in self.children(id) {
                    self.write_node(out, *child);
                }
            }
            NodeData::Doctype(name) => {
                let _ = write!(out, "<!DOCTYPE {name}>");
            }
            NodeData::Text(text) => out.push_str(text),
            NodeData::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            NodeData::Element(el) => {
                out.push('<');
                out.push_str(el.tag());
                for attr in el.attrs() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        let _ = write!(out, "=\"{}\"", attr.value.replace('"', "&quot;"));
                    }
                }
                out.push('>');
                if is_void(el.tag()) {
                    return;
                }
                for child in self.children(id) {
                    self.write_node(out, *child);
                }
                let _ = write!(out, "</{}>", el.tag());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::{parse_html, Document};

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut doc = Document::new();
        let img = doc.create_element("img");
        doc.element_mut(img).unwrap().set_attr("src", "a.png");
        doc.append_child(doc.root(), img).unwrap();
        assert_eq!(doc.to_html(), r#"<img src="a.png">"#);
    }

    #[test]
    fn empty_attribute_is_bare() {
        let mut doc = Document::new();
        let video = doc.create_element("video");
        doc.element_mut(video).unwrap().set_attr("controls", "");
        doc.append_child(doc.root(), video).unwrap();
        assert_eq!(doc.to_html(), "<video controls></video>");
    }

    #[test]
    fn quotes_in_values_are_escaped() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        doc.element_mut(p).unwrap().set_attr("title", r#"say "hi""#);
        doc.append_child(doc.root(), p).unwrap();
        assert_eq!(doc.to_html(), r#"<p title="say &quot;hi&quot;"></p>"#);
    }

    #[test]
    fn text_and_nesting_survive_parse_and_write() {
        let src = "<section><h1>Title</h1><p>Some <b>bold</b> text</p></section>";
        let doc = parse_html(src).unwrap();
        assert_eq!(doc.to_html(), src);
        let section = doc.elements_by_tag("section")[0];
        assert_eq!(doc.inner_html(section), "<h1>Title</h1><p>Some <b>bold</b> text</p>");
    }
}
