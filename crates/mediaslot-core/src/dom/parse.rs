//! HTML → [`Document`] conversion via `tl`.
//!
//! `tl` is a tolerant, non-validating parser: unknown tags such as `<logo>`
//! or `<video1>` come through as ordinary elements, which is what the
//! placeholder passes rely on. Text and attribute values are kept as source
//! text (entities are not decoded) so that serialization writes them back
//! unchanged.
//!
//! Two pieces of HTML tree construction are applied on top of `tl`:
//! `<tag/>` is read as an empty element, and a `p` or `li` opened directly
//! inside an element of the same name closes that element first.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Document, DomError, NodeId};

/// A start tag ending in `/>`; quoted attribute values may contain `>` or `/`.
static SELF_CLOSING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<[A-Za-z](?:[^<>"']|"[^"]*"|'[^']*')*?)/>"#)
        .expect("valid self-closing pattern")
});

/// Elements whose start tag implicitly ends an open sibling of the same name.
const AUTO_CLOSING: &[&str] = &["p", "li"];

/// Parses a full document or a fragment.
pub fn parse_html(input: &str) -> Result<Document, DomError> {
    let input = spaced_self_closing(input);
    let vdom = tl::parse(&input, tl::ParserOptions::default())
        .map_err(|e| DomError::Parse(format!("{e:?}")))?;
    let parser = vdom.parser();

    let mut doc = Document::new();
    let root = doc.root();
    if starts_with_doctype(&input) {
        let doctype = doc.create_doctype("html");
        doc.append_child(root, doctype)?;
    }
    for handle in vdom.children() {
        convert(&mut doc, root, *handle, parser)?;
    }
    Ok(doc)
}

/// `tl` only recognizes `/>` after whitespace; without it the slash ends up
/// in the tag name and the element swallows its following siblings.
fn spaced_self_closing(input: &str) -> Cow<'_, str> {
    SELF_CLOSING.replace_all(input, |caps: &Captures<'_>| {
        let head = &caps[1];
        if head.ends_with(char::is_whitespace) {
            caps[0].to_string()
        } else {
            format!("{head} />")
        }
    })
}

/// Where an element named `tag` goes when `tl` nested it under `parent`.
fn insertion_parent(doc: &Document, parent: NodeId, tag: &str) -> NodeId {
    let closes_parent = AUTO_CLOSING.contains(&tag)
        && doc.element(parent).is_some_and(|el| el.tag() == tag);
    match doc.parent(parent) {
        Some(grandparent) if closes_parent => grandparent,
        _ => parent,
    }
}

fn starts_with_doctype(input: &str) -> bool {
    input
        .trim_start()
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
}

fn convert(
    doc: &mut Document,
    parent: NodeId,
    handle: tl::NodeHandle,
    parser: &tl::Parser,
) -> Result<(), DomError> {
    let Some(node) = handle.get(parser) else {
        return Ok(());
    };

    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str();
            if name.starts_with('!') {
                // Markup declarations; the doctype is re-created above.
                return Ok(());
            }
            // A slash left in the name means the tag was self-closing.
            let (name, self_closing) = match name.strip_suffix('/') {
                Some(stripped) => (stripped.to_ascii_lowercase(), true),
                None => (name.to_ascii_lowercase(), false),
            };
            let parent = insertion_parent(doc, parent, &name);
            let id = doc.create_element(&name);
            if let Some(el) = doc.element_mut(id) {
                for (key, value) in tag.attributes().iter() {
                    let value = value.map(|v| v.to_string()).unwrap_or_default();
                    el.set_attr(key.as_ref(), &value);
                }
            }
            doc.append_child(parent, id)?;
            let children_parent = if self_closing { parent } else { id };
            for child in tag.children().top().iter() {
                convert(doc, children_parent, *child, parser)?;
            }
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if !text.is_empty() {
                let id = doc.create_text(&text);
                doc.append_child(parent, id)?;
            }
        }
        tl::Node::Comment(bytes) => {
            let raw = bytes.as_utf8_str();
            if raw.get(..9).is_some_and(|h| h.eq_ignore_ascii_case("<!doctype")) {
                return Ok(());
            }
            let body = raw
                .strip_prefix("<!--")
                .map(|s| s.strip_suffix("-->").unwrap_or(s))
                .unwrap_or(&*raw);
            let id = doc.create_comment(body);
            doc.append_child(parent, id)?;
        }
    }
    Ok(())
}
