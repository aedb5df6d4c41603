//! Building replacement media elements and swapping them in.

use crate::dom::{Document, DomError, NodeId};
use crate::placeholder::MARKER_ATTR;

/// Inline sizing applied to every replacement before placeholder attributes.
pub const RESPONSIVE_STYLE: &str = "max-width: 100%; height: auto;";

/// Defaults of a replacement element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MediaSpec<'a> {
    pub tag: &'static str,
    pub src: &'a str,
    /// Accessible label as `(attribute, text)`: `alt` on images, `aria-label` on video.
    pub label: Option<(&'static str, &'a str)>,
    pub controls: bool,
}

/// Creates the replacement for `placeholder`, copies the placeholder's
/// attributes over the defaults, and puts it in the placeholder's place.
pub(crate) fn substitute(
    doc: &mut Document,
    placeholder: NodeId,
    spec: MediaSpec<'_>,
) -> Result<NodeId, DomError> {
    let attrs = doc
        .element(placeholder)
        .map(|el| el.attrs().to_vec())
        .ok_or(DomError::UnknownNode(placeholder))?;

    let media = doc.create_element(spec.tag);
    if let Some(el) = doc.element_mut(media) {
        el.set_attr("src", spec.src);
        if let Some((attr, text)) = spec.label {
            el.set_attr(attr, text);
        }
        if spec.controls {
            el.set_attr("controls", "");
        }
        el.set_attr("style", RESPONSIVE_STYLE);
        for attr in attrs.iter().filter(|a| a.name != MARKER_ATTR) {
            el.set_attr(&attr.name, &attr.value);
        }
    }
    doc.replace_child(media, placeholder)?;
    Ok(media)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn placeholder_attributes_win_over_defaults() {
        let mut doc = parse_html(r#"<p><image1 alt="Hero" data-x="1"></image1></p>"#).unwrap();
        let ph = doc.elements_by_tag("image1")[0];
        let spec = MediaSpec {
            tag: "img",
            src: "public/image/image1.png",
            label: Some(("alt", "image1")),
            controls: false,
        };
        let img = substitute(&mut doc, ph, spec).unwrap();
        let el = doc.element(img).unwrap();
        assert_eq!(el.attr("alt"), Some("Hero"));
        assert_eq!(el.attr("data-x"), Some("1"));
        assert_eq!(el.attr("src"), Some("public/image/image1.png"));
        assert_eq!(el.attr("style"), Some(RESPONSIVE_STYLE));
        assert!(doc.elements_by_tag("image1").is_empty());
    }

    #[test]
    fn marker_attribute_is_not_copied() {
        let mut doc = parse_html(r#"<div data-placeholder="video2" class="hero"></div>"#).unwrap();
        let ph = doc.elements_by_tag("div")[0];
        let spec = MediaSpec {
            tag: "video",
            src: "public/video/video2.webm",
            label: Some(("aria-label", "video2")),
            controls: true,
        };
        let video = substitute(&mut doc, ph, spec).unwrap();
        let el = doc.element(video).unwrap();
        assert!(!el.has_attr(MARKER_ATTR));
        assert_eq!(el.attr("class"), Some("hero"));
        assert_eq!(el.attr("controls"), Some(""));
        assert_eq!(el.attr("aria-label"), Some("video2"));
        assert!(!el.has_attr("alt"));
    }
}
