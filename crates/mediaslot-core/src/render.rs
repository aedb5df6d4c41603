//! One-shot pipeline: parse HTML, resolve placeholders, serialize.
//!
//! This is the batch counterpart of [`PlaceholderResolver::initialize`]: the
//! same two passes run once and no watcher is installed.

use std::str::FromStr;
use std::sync::PoisonError;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::config::MediaslotConfig;
use crate::dom::parse_html;
use crate::extensions::ExtensionTable;
use crate::placeholder::{self, Placeholder};
use crate::probe::AssetProbe;
use crate::registry::AssetRegistry;
use crate::resolver::{PassCounts, PlaceholderResolver};

/// `name=path` override applied through `update_asset` before resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetOverride {
    pub name: String,
    pub path: String,
}

impl FromStr for AssetOverride {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let Some((name, path)) = s.split_once('=') else {
            bail!("expected NAME=PATH, got {s:?}");
        };
        let (name, path) = (name.trim(), path.trim());
        if name.is_empty() || path.is_empty() {
            bail!("expected NAME=PATH, got {s:?}");
        }
        Ok(Self {
            name: name.to_string(),
            path: path.to_string(),
        })
    }
}

/// Output of [`render_html`].
#[derive(Debug, Clone)]
pub struct Rendered {
    pub html: String,
    pub counts: PassCounts,
    /// Override names that are not known logical assets (ignored).
    pub ignored_overrides: Vec<String>,
}

/// Resolves every placeholder in `html` once and returns the new markup.
pub async fn render_html<P: AssetProbe>(
    html: &str,
    cfg: &MediaslotConfig,
    probe: P,
    overrides: &[AssetOverride],
) -> Result<Rendered> {
    let document = parse_html(html)?.into_shared();
    let resolver = PlaceholderResolver::from_config(document, cfg, probe);

    let mut ignored_overrides = Vec::new();
    for o in overrides {
        if !resolver.update_asset(&o.name, &o.path) {
            tracing::warn!(name = %o.name, "ignoring override for unknown asset");
            ignored_overrides.push(o.name.clone());
        }
    }

    let counts = resolver.rescan().await;
    let html = resolver
        .document()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .to_html();
    Ok(Rendered {
        html,
        counts,
        ignored_overrides,
    })
}

/// One placeholder found by [`scan_html`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// `static`, `video`, or `image`.
    pub kind: &'static str,
    pub name: String,
    /// Registry path for static assets, probe candidates (in order) otherwise.
    pub candidates: Vec<String>,
}

/// Lists placeholders in document order without probing or mutating.
pub fn scan_html(html: &str, cfg: &MediaslotConfig) -> Result<Vec<ScanEntry>> {
    let doc = parse_html(html)?;
    let registry = AssetRegistry::from_config(&cfg.assets);
    let extensions = ExtensionTable::from_config(&cfg.extensions);

    Ok(placeholder::find_all(&doc)
        .into_iter()
        .map(|(_, found)| match found {
            Placeholder::Static(asset) => ScanEntry {
                kind: "static",
                name: asset.name().to_string(),
                candidates: vec![registry.path(asset).to_string()],
            },
            Placeholder::Dynamic { kind, name } => ScanEntry {
                kind: kind.category(),
                candidates: extensions.candidates(&cfg.base_dir, kind, &name),
                name,
            },
        })
        .collect())
}
