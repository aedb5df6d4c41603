//! `mediaslot serve` – development server for the landing page.

use std::path::PathBuf;

use anyhow::Result;
use mediaslot_core::config::MediaslotConfig;
use mediaslot_core::serve;

#[derive(Debug, Default)]
pub struct ServeOptions {
    pub port: Option<u16>,
    pub source: Option<PathBuf>,
    pub root: Option<PathBuf>,
}

pub async fn run_serve(mut cfg: MediaslotConfig, opts: ServeOptions) -> Result<()> {
    if let Some(port) = opts.port {
        cfg.serve.port = port;
    }
    if let Some(source) = opts.source {
        cfg.serve.source = source;
    }
    if let Some(root) = opts.root {
        cfg.serve.root = root;
    }

    let bound = serve::bind(&cfg)?;
    println!("Serving {} at http://{}/", cfg.serve.source.display(), bound.addr());
    bound.run().await
}
