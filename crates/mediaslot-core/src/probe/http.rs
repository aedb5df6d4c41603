//! HTTP HEAD probe.
//!
//! Uses the curl crate (libcurl) with `nobody` set, so only the status line
//! and headers are transferred. curl is blocking; each probe runs on tokio's
//! blocking pool.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use super::AssetProbe;

#[derive(Debug, Clone)]
pub struct HttpProbe {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpProbe {
    /// `base_url` is the URL candidate paths are resolved against; a missing
    /// trailing slash is added so `http://host/site` keeps its last segment.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base =
            Url::parse(base_url).with_context(|| format!("invalid base URL {base_url}"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        })
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URL for a candidate path.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("cannot join {path} onto {}", self.base))
    }
}

/// Performs a HEAD request and returns the final status code.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking`
/// if used from async code.
pub fn head_status(url: &str, connect_timeout: Duration, timeout: Duration) -> Result<u32> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(timeout)?;
    easy.perform().context("HEAD request failed")?;
    easy.response_code().context("no response code")
}

impl AssetProbe for HttpProbe {
    async fn exists(&self, path: &str) -> bool {
        let Ok(url) = self.url_for(path) else {
            return false;
        };
        let (connect_timeout, timeout) = (self.connect_timeout, self.timeout);
        let status = tokio::task::spawn_blocking(move || {
            head_status(url.as_str(), connect_timeout, timeout)
        })
        .await;
        let found = matches!(status, Ok(Ok(code)) if (200..300).contains(&code));
        tracing::trace!(path, found, "http probe");
        found
    }
}
