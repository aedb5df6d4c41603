//! `mediaslot render` – resolve a document once.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mediaslot_core::config::{MediaslotConfig, ProbeBackendKind};
use mediaslot_core::probe::ProbeBackend;
use mediaslot_core::render::{render_html, AssetOverride, Rendered};

#[derive(Debug, Default)]
pub struct RenderOptions {
    pub output: Option<PathBuf>,
    pub probe: Option<ProbeBackendKind>,
    pub base_url: Option<String>,
    pub root: Option<PathBuf>,
    pub assets: Vec<AssetOverride>,
}

pub async fn run_render(cfg: &MediaslotConfig, input: &Path, opts: RenderOptions) -> Result<()> {
    let rendered = render_file(cfg, input, &opts).await?;
    for name in &rendered.ignored_overrides {
        eprintln!("warning: unknown asset {name:?}, override ignored");
    }

    match &opts.output {
        Some(path) => {
            std::fs::write(path, &rendered.html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} static, {} dynamic placeholder(s) replaced -> {}",
                rendered.counts.static_replaced,
                rendered.counts.dynamic_replaced,
                path.display()
            );
        }
        None => println!("{}", rendered.html),
    }
    Ok(())
}

/// Applies command-line probe settings over the config and renders `input`.
pub(crate) async fn render_file(
    cfg: &MediaslotConfig,
    input: &Path,
    opts: &RenderOptions,
) -> Result<Rendered> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut probe_cfg = cfg.probe.clone();
    if let Some(kind) = opts.probe {
        probe_cfg.backend = kind;
    }
    if let Some(url) = &opts.base_url {
        probe_cfg.base_url = url.clone();
    }
    if let Some(root) = &opts.root {
        probe_cfg.root = root.clone();
    }
    let probe = ProbeBackend::from_config(&probe_cfg)?;

    render_html(&html, cfg, probe, &opts.assets).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn render_file_uses_root_override() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("public/video")).unwrap();
        std::fs::write(dir.path().join("public/video/video2.ogg"), b"ogg").unwrap();
        let input = dir.path().join("page.html");
        std::fs::write(&input, "<div><video2></video2><banner></banner></div>").unwrap();

        let opts = RenderOptions {
            root: Some(dir.path().to_path_buf()),
            assets: vec!["banner=img/b.png".parse().unwrap()],
            ..Default::default()
        };
        let out = render_file(&MediaslotConfig::default(), &input, &opts)
            .await
            .unwrap();
        assert_eq!(out.counts.dynamic_replaced, 1);
        assert!(out.html.contains(r#"src="public/video/video2.ogg""#));
        assert!(out.html.contains("controls"));
        assert!(out.html.contains(r#"src="img/b.png""#));
    }

    #[tokio::test]
    async fn render_file_reports_missing_input() {
        let dir = tempdir().unwrap();
        let err = render_file(
            &MediaslotConfig::default(),
            &dir.path().join("nope.html"),
            &RenderOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("nope.html"));
    }
}
