//! Filesystem probe: a candidate exists if it is a regular file under the root.

use std::path::{Component, Path, PathBuf};

use super::AssetProbe;

#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
}

impl FsProbe {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a relative candidate onto the root. Absolute paths and `..`
    /// components never resolve.
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let rel = Path::new(path.trim_start_matches("./"));
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| self.root.join(rel))
    }
}

impl AssetProbe for FsProbe {
    async fn exists(&self, path: &str) -> bool {
        let Some(full) = self.locate(path) else {
            return false;
        };
        let found = tokio::fs::metadata(&full)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        tracing::trace!(path, found, "fs probe");
        found
    }
}
