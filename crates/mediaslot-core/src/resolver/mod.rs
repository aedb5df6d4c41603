//! Placeholder resolver: swaps placeholder nodes for real media elements.
//!
//! Three passes over a shared document:
//!
//! 1. static replacement: `logo` / `banner` become `img` elements pointing at
//!    the registry path, without checking that the file exists;
//! 2. dynamic replacement: `video<N>` / `image<N>` are resolved by probing
//!    `<base>/<video|image>/<name>.<ext>` for each configured extension, first
//!    hit wins, and left alone when nothing resolves;
//! 3. a child-list watcher on the document body that re-runs both passes over
//!    the whole document whenever an inserted subtree contains a placeholder.
//!
//! Dynamic resolution is strictly sequential: all video placeholders before
//! any image placeholder, and one probe in flight at a time.

mod media;
mod watch;


pub use media::RESPONSIVE_STYLE;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tokio::task::JoinHandle;

use crate::config::MediaslotConfig;
use crate::dom::{Document, NodeId, SharedDocument};
use crate::extensions::{ExtensionTable, MediaKind};
use crate::placeholder::{self, Placeholder};
use crate::probe::AssetProbe;
use crate::registry::{AssetRegistry, StaticAsset};
use media::MediaSpec;

/// Replacement counts of one static + dynamic run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassCounts {
    pub static_replaced: usize,
    pub dynamic_replaced: usize,
}

impl PassCounts {
    pub fn total(&self) -> usize {
        self.static_replaced + self.dynamic_replaced
    }
}

pub struct PlaceholderResolver<P> {
    document: SharedDocument,
    registry: RwLock<AssetRegistry>,
    extensions: ExtensionTable,
    base_dir: String,
    probe: P,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl<P> PlaceholderResolver<P> {
    /// Resolver with the built-in registry, extension table, and `public` base dir.
    pub fn new(document: SharedDocument, probe: P) -> Self {
        Self::from_config(document, &MediaslotConfig::default(), probe)
    }

    pub fn from_config(document: SharedDocument, cfg: &MediaslotConfig, probe: P) -> Self {
        Self {
            document,
            registry: RwLock::new(AssetRegistry::from_config(&cfg.assets)),
            extensions: ExtensionTable::from_config(&cfg.extensions),
            base_dir: cfg.base_dir.clone(),
            probe,
            watcher: Mutex::new(None),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn extensions(&self) -> &ExtensionTable {
        &self.extensions
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    fn lock_document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current path of a logical asset, `None` for unknown names.
    pub fn get_asset(&self, name: &str) -> Option<String> {
        let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
        registry.get(name).map(str::to_string)
    }

    /// Points a known logical asset at `path` and re-runs the whole static
    /// pass (every logical name, not only `name`). Unknown names are ignored.
    pub fn update_asset(&self, name: &str, path: &str) -> bool {
        let updated = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .update(name, path);
        if updated {
            tracing::debug!(name, path, "asset updated");
            self.replace_static_placeholders();
        }
        updated
    }

    /// Replaces every `logo` / `banner` placeholder with an `img` pointing at
    /// the registry path. Returns the number of replacements.
    pub fn replace_static_placeholders(&self) -> usize {
        let registry = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut doc = self.lock_document();
        let mut replaced = 0;

        for asset in StaticAsset::ALL {
            let targets: Vec<NodeId> = placeholder::find_all(&doc)
                .into_iter()
                .filter(|(_, p)| *p == Placeholder::Static(asset))
                .map(|(id, _)| id)
                .collect();
            for id in targets {
                // A placeholder nested inside one replaced earlier is gone.
                if !doc.is_connected(id) {
                    continue;
                }
                let spec = MediaSpec {
                    tag: "img",
                    src: registry.path(asset),
                    label: Some(("alt", asset.label())),
                    controls: false,
                };
                match media::substitute(&mut doc, id, spec) {
                    Ok(_) => replaced += 1,
                    Err(e) => {
                        tracing::warn!(asset = asset.name(), "static replacement failed: {e}")
                    }
                }
            }
        }

        tracing::debug!(replaced, "static pass done");
        replaced
    }

    /// Whether `id` is still an attached placeholder with this logical name.
    fn still_pending(doc: &Document, id: NodeId, name: &str) -> bool {
        doc.is_connected(id)
            && matches!(
                placeholder::classify_node(doc, id),
                Some(Placeholder::Dynamic { name: ref n, .. }) if n == name
            )
    }

    /// Stops the mutation watcher, if one is running.
    pub fn stop_watching(&self) {
        let handle = self
            .watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl<P: AssetProbe> PlaceholderResolver<P> {
    /// First candidate path for `name` that the probe reports as existing.
    pub async fn find_asset_file(&self, kind: MediaKind, name: &str) -> Option<String> {
        for candidate in self.extensions.candidates(&self.base_dir, kind, name) {
            if self.probe.exists(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    pub async fn find_video_file(&self, name: &str) -> Option<String> {
        self.find_asset_file(MediaKind::Video, name).await
    }

    pub async fn find_image_file(&self, name: &str) -> Option<String> {
        self.find_asset_file(MediaKind::Image, name).await
    }

    /// Resolves every `video<N>` then every `image<N>` placeholder, one at a
    /// time. Unresolved placeholders stay in the tree. Returns the number of
    /// replacements.
    pub async fn replace_dynamic_assets(&self) -> usize {
        let (videos, images) = {
            let doc = self.lock_document();
            let mut videos = Vec::new();
            let mut images = Vec::new();
            for (id, found) in placeholder::find_all(&doc) {
                if let Placeholder::Dynamic { kind, name } = found {
                    match kind {
                        MediaKind::Video => videos.push((id, name)),
                        MediaKind::Image => images.push((id, name)),
                    }
                }
            }
            (videos, images)
        };

        let mut replaced = 0;
        for (kind, batch) in [(MediaKind::Video, videos), (MediaKind::Image, images)] {
            for (id, name) in batch {
                if self.resolve_one(kind, id, &name).await {
                    replaced += 1;
                }
            }
        }

        tracing::debug!(replaced, "dynamic pass done");
        replaced
    }

    async fn resolve_one(&self, kind: MediaKind, id: NodeId, name: &str) -> bool {
        let pending = Self::still_pending(&self.lock_document(), id, name);
        if !pending {
            return false;
        }
        let Some(path) = self.find_asset_file(kind, name).await else {
            tracing::debug!(name, "no asset found; placeholder kept");
            return false;
        };

        let mut doc = self.lock_document();
        // Another rescan may have replaced it while we were probing.
        if !Self::still_pending(&doc, id, name) {
            return false;
        }
        let spec = match kind {
            MediaKind::Video => MediaSpec {
                tag: kind.element_tag(),
                src: &path,
                label: Some(("aria-label", name)),
                controls: true,
            },
            MediaKind::Image => MediaSpec {
                tag: kind.element_tag(),
                src: &path,
                label: Some(("alt", name)),
                controls: false,
            },
        };
        match media::substitute(&mut doc, id, spec) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(name, "dynamic replacement failed: {e}");
                false
            }
        }
    }

    /// Static pass followed by the dynamic pass, over the whole document.
    pub async fn rescan(&self) -> PassCounts {
        let static_replaced = self.replace_static_placeholders();
        let dynamic_replaced = self.replace_dynamic_assets().await;
        PassCounts {
            static_replaced,
            dynamic_replaced,
        }
    }
}

impl<P: AssetProbe + 'static> PlaceholderResolver<P> {
    /// Runs both passes, then installs the mutation watcher. Calling it again
    /// re-runs the passes but never installs a second watcher.
    pub async fn initialize(self: &Arc<Self>) -> PassCounts {
        let counts = self.rescan().await;
        if !self.watch() {
            tracing::debug!("watcher already installed");
        }
        tracing::info!(
            static_replaced = counts.static_replaced,
            dynamic_replaced = counts.dynamic_replaced,
            "placeholder resolver initialized"
        );
        counts
    }
}

impl<P> Drop for PlaceholderResolver<P> {
    fn drop(&mut self) {
        self.stop_watching();
    }
}
