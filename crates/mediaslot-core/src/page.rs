//! Page shell for the development server.
//!
//! The served index page is assembled from a source document: its first
//! `<style>` block and its `<body>` content are lifted out, placeholders in the
//! body are resolved, and the result is wrapped in a fixed shell (nav bar with
//! logo and login link, footer links).

use std::fmt::Write;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;

use crate::config::{MediaslotConfig, ServeConfig};
use crate::probe::AssetProbe;
use crate::render::render_html;

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>(.*?)</style>").expect("valid style pattern"));
static BODY_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").expect("valid body pattern"));
static HEAD_PREAMBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!DOCTYPE html>.*?<head>.*?</head>").expect("valid head pattern")
});
static STRAY_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(html|body)[^>]*>").expect("valid stray tag pattern"));

/// Pieces of a source document that feed the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParts {
    /// Contents of the first `<style>` block.
    pub styles: String,
    /// Markup placed between the nav bar and the footer.
    pub body: String,
}

/// Splits a source document into styles and body content. Without a
/// `<body>` element, everything except style blocks, the head, and stray
/// `html`/`body` tags is used as the body.
pub fn extract_parts(source: &str) -> PageParts {
    let styles = STYLE_BLOCK
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    let body = match BODY_BLOCK.captures(source).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().to_string(),
        None => {
            let rest = STYLE_BLOCK.replace_all(source, "");
            let rest = HEAD_PREAMBLE.replace_all(&rest, "");
            STRAY_TAGS.replace_all(&rest, "").into_owned()
        }
    };

    PageParts { styles, body }
}

/// Minimal HTML escaping for text and attribute values from configuration.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const SHELL_CSS: &str = "\
body {
    font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    margin: 0; padding: 0; padding-top: 80px;
}
.navbar {
    display: flex; justify-content: space-between; align-items: center;
    padding: 24px 16px; background-color: white; width: 100%; box-sizing: border-box;
    position: fixed; top: 0; left: 0; z-index: 1000;
    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.1);
}
.navbar-logo { display: flex; align-items: center; }
.navbar-logo img { height: 32px; width: auto; max-width: 120px; }
.navbar-auth {
    color: #1f2937; font-weight: 500; font-size: 14px; text-decoration: none;
    cursor: pointer; transition: color 0.2s ease;
}
.navbar-auth:hover { color: #06b6d4; }
.page-footer { width: 100%; box-sizing: border-box; padding: 24px 16px; }
.footer-content { display: flex; justify-content: center; align-items: center; gap: 12px; }
.footer-link { color: #6b7280; font-size: 14px; text-decoration: none; }
.footer-link:hover { color: #1f2937; }
.footer-separator { color: #d1d5db; }
";

/// Wraps already-resolved `content` in the page shell.
pub fn render_shell(cfg: &ServeConfig, styles: &str, content: &str) -> String {
    let mut footer = String::new();
    for (i, link) in cfg.footer_links.iter().enumerate() {
        if i > 0 {
            footer.push_str("\n            <span class=\"footer-separator\">•</span>");
        }
        let _ = write!(
            footer,
            "\n            <a href=\"{}\" class=\"footer-link\">{}</a>",
            escape(&link.href),
            escape(&link.label)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{shell_css}{styles}
    </style>
</head>
<body>
    <nav class="navbar">
        <div class="navbar-logo">
            <img src="{nav_logo}" alt="{nav_logo_alt}" />
        </div>
        <div>
            <a href="{login_href}" class="navbar-auth">{login_label}</a>
        </div>
    </nav>
    {content}
    <footer class="page-footer">
        <div class="footer-content">{footer}
        </div>
    </footer>
</body>
</html>"#,
        title = escape(&cfg.title),
        shell_css = SHELL_CSS,
        nav_logo = escape(&cfg.nav_logo),
        nav_logo_alt = escape(&cfg.nav_logo_alt),
        login_href = escape(&cfg.login_href),
        login_label = escape(&cfg.login_label),
    )
}

/// Builds the full index page from a source document.
pub async fn render_page<P: AssetProbe>(
    source: &str,
    cfg: &MediaslotConfig,
    probe: P,
) -> Result<String> {
    let parts = extract_parts(source);
    let rendered = render_html(&parts.body, cfg, probe, &[]).await?;
    tracing::debug!(
        static_replaced = rendered.counts.static_replaced,
        dynamic_replaced = rendered.counts.dynamic_replaced,
        "page rendered"
    );
    Ok(render_shell(&cfg.serve, &parts.styles, &rendered.html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FooterLink;
    use crate::probe::FsProbe;

    #[test]
    fn extracts_style_and_body() {
        let src = r#"<!DOCTYPE html><html><head><style>.hero { color: red; }</style></head>
<body class="x"><h1>Hi</h1><logo></logo></body></html>"#;
        let parts = extract_parts(src);
        assert_eq!(parts.styles, ".hero { color: red; }");
        assert_eq!(parts.body, "<h1>Hi</h1><logo></logo>");
    }

    #[test]
    fn bodyless_source_falls_back_to_stripping() {
        let src = "<style>p{}</style><html><p>Hello</p><banner></banner></html>";
        let parts = extract_parts(src);
        assert_eq!(parts.styles, "p{}");
        assert_eq!(parts.body, "<p>Hello</p><banner></banner>");
    }

    #[test]
    fn shell_escapes_config_values() {
        let mut cfg = ServeConfig::default();
        cfg.title = "A & B".to_string();
        cfg.footer_links = vec![FooterLink {
            label: "<Legal>".to_string(),
            href: "/legal".to_string(),
        }];
        let html = render_shell(&cfg, "", "<main></main>");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains(r#"<a href="/legal" class="footer-link">&lt;Legal&gt;</a>"#));
        assert!(!html.contains("footer-separator\">"));
        assert!(html.contains("<main></main>"));
    }

    #[test]
    fn default_footer_has_separator() {
        let html = render_shell(&ServeConfig::default(), "", "");
        assert!(html.contains("Privacy Policy"));
        assert!(html.contains("Terms of Service"));
        assert_eq!(html.matches("footer-separator\">").count(), 1);
    }

    #[tokio::test]
    async fn page_resolves_placeholders_in_body() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = MediaslotConfig::default();
        let src = "<style>.a{}</style><body><logo></logo><video1></video1></body>";
        let html = render_page(src, &cfg, FsProbe::new(dir.path())).await.unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"src="public/logo-example.png""#));
        assert!(html.contains("<video1></video1>"));
        assert!(html.contains(".a{}"));
    }
}
