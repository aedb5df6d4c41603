//! Development server: renders the index page from a source document and
//! serves everything else as static files.

mod mime;
mod path;
mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tiny_http::{Method, Request, Server};
use tokio::runtime::Handle;

use crate::config::MediaslotConfig;
use crate::page::render_page;
use crate::probe::FsProbe;

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    cfg: MediaslotConfig,
}

/// Stops a running [`BoundServer`] from another task or thread.
#[derive(Clone)]
pub struct ShutdownHandle(Arc<Server>);

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.0.unblock();
    }
}

/// Binds `serve.interface:serve.port` without starting the request loop.
/// Port 0 picks a free port; see [`BoundServer::addr`].
pub fn bind(cfg: &MediaslotConfig) -> Result<BoundServer> {
    let addr = format!("{}:{}", cfg.serve.interface, cfg.serve.port);
    let server = Server::http(&addr).map_err(|e| anyhow!("failed to bind {addr}: {e}"))?;
    let addr = server
        .server_addr()
        .to_ip()
        .context("server is not bound to an IP address")?;
    tracing::info!(%addr, root = %cfg.serve.root.display(), "serving");
    Ok(BoundServer {
        server: Arc::new(server),
        addr,
        cfg: cfg.clone(),
    })
}

impl BoundServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle(Arc::clone(&self.server))
    }

    /// Runs the request loop until [`ShutdownHandle::shutdown`] is called.
    /// Requests are handled one at a time on a blocking thread; index renders
    /// are driven on the current runtime.
    pub async fn run(self) -> Result<()> {
        let runtime = Handle::current();
        let Self { server, cfg, .. } = self;
        tokio::task::spawn_blocking(move || {
            for request in server.incoming_requests() {
                let method = request.method().clone();
                let url = request.url().to_string();
                if let Err(e) = handle_request(request, &cfg, &runtime) {
                    tracing::warn!(%method, %url, "request error: {e:#}");
                }
            }
        })
        .await
        .context("server loop panicked")?;
        tracing::info!("server stopped");
        Ok(())
    }
}

/// Binds and serves until the process is stopped.
pub async fn run(cfg: &MediaslotConfig) -> Result<()> {
    bind(cfg)?.run().await
}

fn handle_request(request: Request, cfg: &MediaslotConfig, runtime: &Handle) -> Result<()> {
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let url = request.url().to_string();
    tracing::debug!(method = %request.method(), %url, "request");

    if path::is_index(&url) {
        return match runtime.block_on(render_index(cfg)) {
            Ok(html) => response::respond_page(request, html),
            Err(e) => {
                tracing::error!("index render failed: {e:#}");
                response::respond_render_error(request, &e)
            }
        };
    }

    match path::resolve_path(&url, &cfg.serve.root) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request),
    }
}

/// Re-reads the source on every request so edits show up on reload.
async fn render_index(cfg: &MediaslotConfig) -> Result<String> {
    let source_path = &cfg.serve.source;
    let source = tokio::fs::read_to_string(source_path)
        .await
        .with_context(|| format!("failed to read {}", source_path.display()))?;
    render_page(&source, cfg, FsProbe::new(&cfg.serve.root)).await
}
