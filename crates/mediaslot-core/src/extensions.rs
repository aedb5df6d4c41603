//! Media kinds and the ordered extension lists used to build candidate paths.

use crate::config::ExtensionsConfig;

/// The two dynamic placeholder families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Image,
}

impl MediaKind {
    /// Tag prefix of the placeholder and directory name under the base dir.
    pub fn category(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }

    /// Tag of the element that replaces the placeholder.
    pub fn element_tag(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "img",
        }
    }
}

/// Ordered candidate extensions per media kind. First match wins, so the
/// order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTable {
    video: Vec<String>,
    image: Vec<String>,
}

impl Default for ExtensionTable {
    fn default() -> Self {
        Self::from_config(&ExtensionsConfig::default())
    }
}

impl ExtensionTable {
    pub fn from_config(cfg: &ExtensionsConfig) -> Self {
        let clean = |exts: &[String]| {
            exts.iter()
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect()
        };
        Self {
            video: clean(&cfg.video),
            image: clean(&cfg.image),
        }
    }

    pub fn for_kind(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Video => &self.video,
            MediaKind::Image => &self.image,
        }
    }

    /// `<base>/<category>/<name>.<ext>` for every extension, in probe order.
    pub fn candidates(&self, base: &str, kind: MediaKind, name: &str) -> Vec<String> {
        let base = base.trim_end_matches('/');
        self.for_kind(kind)
            .iter()
            .map(|ext| {
                if base.is_empty() {
                    format!("{}/{}.{}", kind.category(), name, ext)
                } else {
                    format!("{}/{}/{}.{}", base, kind.category(), name, ext)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_is_preserved() {
        let t = ExtensionTable::default();
        assert_eq!(t.for_kind(MediaKind::Video), ["mp4", "webm", "ogg", "avi", "mov"]);
        assert_eq!(
            t.for_kind(MediaKind::Image),
            ["png", "jpg", "jpeg", "gif", "svg", "webp"]
        );
    }

    #[test]
    fn candidates_follow_layout() {
        let t = ExtensionTable::default();
        let c = t.candidates("public", MediaKind::Image, "image7");
        assert_eq!(c[0], "public/image/image7.png");
        assert_eq!(c[1], "public/image/image7.jpg");
        assert_eq!(c.len(), 6);
        let v = t.candidates("public/", MediaKind::Video, "video1");
        assert_eq!(v[4], "public/video/video1.mov");
    }

    #[test]
    fn config_extensions_are_normalized() {
        let cfg = ExtensionsConfig {
            video: vec![".webm".to_string(), " mp4 ".to_string(), String::new()],
            image: vec![],
        };
        let t = ExtensionTable::from_config(&cfg);
        assert_eq!(t.for_kind(MediaKind::Video), ["webm", "mp4"]);
        assert!(t.candidates("", MediaKind::Image, "image1").is_empty());
        assert_eq!(
            t.candidates("", MediaKind::Video, "video2")[0],
            "video/video2.webm"
        );
    }
}
