//! Request URL to filesystem path resolution.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// True for the paths that render the index page.
pub fn is_index(url: &str) -> bool {
    matches!(normalize_url(url).as_deref(), Some("" | "index.html"))
}

/// Maps `url` to an existing file under `root`. Anything that is not a plain
/// relative path (parent components, absolute or prefixed segments) is
/// rejected, as are files that escape `root` through symlinks.
pub fn resolve_path(url: &str, root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url)?;
    let relative = Path::new(&clean);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let canonical = root.join(relative).canonicalize().ok()?;
    let root_canonical = root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) || !canonical.is_file() {
        return None;
    }
    Some(canonical)
}

/// Decodes, drops the query string, trims slashes. `None` if the path is not
/// valid UTF-8 once decoded.
fn normalize_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    Some(decoded.trim_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn index_paths() {
        assert!(is_index("/"));
        assert!(is_index("/index.html"));
        assert!(is_index("/?v=2"));
        assert!(!is_index("/about.html"));
    }

    #[test]
    fn resolves_existing_files_only() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("public/video")).unwrap();
        std::fs::write(dir.path().join("public/video/video 1.mp4"), b"v").unwrap();

        let found = resolve_path("/public/video/video%201.mp4?t=3", dir.path()).unwrap();
        assert!(found.ends_with("public/video/video 1.mp4"));
        assert!(resolve_path("/public/video/video2.mp4", dir.path()).is_none());
        assert!(resolve_path("/public/video", dir.path()).is_none());
    }

    #[test]
    fn rejects_traversal() {
        let dir = tempdir().unwrap();
        let site = dir.path().join("site");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"s").unwrap();

        assert!(resolve_path("/../secret.txt", &site).is_none());
        assert!(resolve_path("/%2e%2e/secret.txt", &site).is_none());
        assert!(resolve_path("/a/./../../secret.txt", &site).is_none());
    }
}
