use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default paths for the fixed logical assets (`[assets]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub logo: String,
    pub banner: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            logo: "public/logo-example.png".to_string(),
            banner: "public/banner-example.png".to_string(),
        }
    }
}

/// Candidate extensions, probed in the listed order (`[extensions]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    pub video: Vec<String>,
    pub image: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        let owned = |exts: &[&str]| exts.iter().map(|e| e.to_string()).collect();
        Self {
            video: owned(&["mp4", "webm", "ogg", "avi", "mov"]),
            image: owned(&["png", "jpg", "jpeg", "gif", "svg", "webp"]),
        }
    }
}

/// How asset existence is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackendKind {
    /// Check for a regular file under `probe.root`.
    #[default]
    Fs,
    /// Send a HEAD request to `probe.base_url` + path.
    Http,
}

/// Existence probe settings (`[probe]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub backend: ProbeBackendKind,
    /// Directory candidate paths are relative to (fs backend).
    pub root: PathBuf,
    /// URL candidate paths are joined onto (http backend).
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend: ProbeBackendKind::Fs,
            root: PathBuf::from("."),
            base_url: "http://127.0.0.1:8080/".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// A footer link in the served page shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

/// Development server settings (`[serve]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    pub interface: String,
    pub port: u16,
    /// Document whose `<style>` and `<body>` feed the index page.
    pub source: PathBuf,
    /// Directory static files (and fs probes) are served from.
    pub root: PathBuf,
    pub title: String,
    pub nav_logo: String,
    pub nav_logo_alt: String,
    pub login_href: String,
    pub login_label: String,
    pub footer_links: Vec<FooterLink>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: "127.0.0.1".to_string(),
            port: 8080,
            source: PathBuf::from("example.html"),
            root: PathBuf::from("."),
            title: "Yeez Landing Page".to_string(),
            nav_logo: "settings/navlogo.png".to_string(),
            nav_logo_alt: "YEEZ".to_string(),
            login_href: "/auth/login".to_string(),
            login_label: "Login / Sign Up".to_string(),
            footer_links: vec![
                FooterLink {
                    label: "Privacy Policy".to_string(),
                    href: "/privacy".to_string(),
                },
                FooterLink {
                    label: "Terms of Service".to_string(),
                    href: "/tos".to_string(),
                },
            ],
        }
    }
}

/// Global configuration loaded from `~/.config/mediaslot/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaslotConfig {
    /// Prefix of dynamic candidate paths: `<base_dir>/<video|image>/<name>.<ext>`.
    pub base_dir: String,
    pub assets: AssetsConfig,
    pub extensions: ExtensionsConfig,
    pub probe: ProbeConfig,
    pub serve: ServeConfig,
}

impl Default for MediaslotConfig {
    fn default() -> Self {
        Self {
            base_dir: "public".to_string(),
            assets: AssetsConfig::default(),
            extensions: ExtensionsConfig::default(),
            probe: ProbeConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mediaslot")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MediaslotConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MediaslotConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path; missing keys take defaults.
pub fn load_from(path: &Path) -> Result<MediaslotConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: MediaslotConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = MediaslotConfig::default();
        assert_eq!(cfg.base_dir, "public");
        assert_eq!(cfg.assets.logo, "public/logo-example.png");
        assert_eq!(cfg.assets.banner, "public/banner-example.png");
        assert_eq!(cfg.extensions.video, ["mp4", "webm", "ogg", "avi", "mov"]);
        assert_eq!(
            cfg.extensions.image,
            ["png", "jpg", "jpeg", "gif", "svg", "webp"]
        );
        assert_eq!(cfg.probe.backend, ProbeBackendKind::Fs);
        assert_eq!(cfg.serve.port, 8080);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = MediaslotConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: MediaslotConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_sections_keep_defaults() {
        let toml = r#"
            base_dir = "static"

            [assets]
            logo = "brand/logo.svg"

            [probe]
            backend = "http"
            base_url = "https://cdn.example.com/site/"
        "#;
        let cfg: MediaslotConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.base_dir, "static");
        assert_eq!(cfg.assets.logo, "brand/logo.svg");
        assert_eq!(cfg.assets.banner, "public/banner-example.png");
        assert_eq!(cfg.probe.backend, ProbeBackendKind::Http);
        assert_eq!(cfg.probe.base_url, "https://cdn.example.com/site/");
        assert_eq!(cfg.probe.timeout_secs, 30);
        assert_eq!(cfg.extensions, ExtensionsConfig::default());
    }

    #[test]
    fn config_toml_custom_extensions_and_footer() {
        let toml = r#"
            [extensions]
            video = ["webm"]

            [serve]
            port = 9000

            [[serve.footer_links]]
            label = "Imprint"
            href = "/imprint"
        "#;
        let cfg: MediaslotConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.extensions.video, ["webm"]);
        assert_eq!(cfg.extensions.image.len(), 6);
        assert_eq!(cfg.serve.port, 9000);
        assert_eq!(cfg.serve.footer_links.len(), 1);
        assert_eq!(cfg.serve.footer_links[0].href, "/imprint");
    }

    #[test]
    fn load_from_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_dir = \"assets\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.base_dir, "assets");
        assert!(load_from(&dir.path().join("missing.toml")).is_err());
    }
}
