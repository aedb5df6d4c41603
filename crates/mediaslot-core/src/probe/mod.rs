//! Asset existence probing.
//!
//! A probe answers one question: does a candidate path exist? Every failure
//! (unreachable host, non-2xx status, missing file, I/O error) is a plain
//! `false`; nothing is surfaced to the caller.

mod fs;
mod http;

pub use fs::FsProbe;
pub use http::{head_status, HttpProbe};

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::config::{ProbeBackendKind, ProbeConfig};

/// One-shot existence check for a candidate asset path such as
/// `public/image/image7.png`.
pub trait AssetProbe: Send + Sync {
    fn exists(&self, path: &str) -> impl Future<Output = bool> + Send;
}

/// Probe selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ProbeBackend {
    Fs(FsProbe),
    Http(HttpProbe),
}

impl ProbeBackend {
    pub fn from_config(cfg: &ProbeConfig) -> Result<Self> {
        Ok(match cfg.backend {
            ProbeBackendKind::Fs => ProbeBackend::Fs(FsProbe::new(&cfg.root)),
            ProbeBackendKind::Http => ProbeBackend::Http(
                HttpProbe::new(&cfg.base_url)?
                    .with_timeouts(
                        Duration::from_secs(cfg.connect_timeout_secs),
                        Duration::from_secs(cfg.timeout_secs),
                    ),
            ),
        })
    }
}

impl AssetProbe for ProbeBackend {
    async fn exists(&self, path: &str) -> bool {
        match self {
            ProbeBackend::Fs(p) => p.exists(path).await,
            ProbeBackend::Http(p) => p.exists(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_config() {
        let mut cfg = ProbeConfig::default();
        assert!(matches!(
            ProbeBackend::from_config(&cfg).unwrap(),
            ProbeBackend::Fs(_)
        ));
        cfg.backend = ProbeBackendKind::Http;
        assert!(matches!(
            ProbeBackend::from_config(&cfg).unwrap(),
            ProbeBackend::Http(_)
        ));
        cfg.base_url = "not a url".to_string();
        assert!(ProbeBackend::from_config(&cfg).is_err());
    }
}
