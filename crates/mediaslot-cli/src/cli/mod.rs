//! CLI for mediaslot.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mediaslot_core::config::{self, MediaslotConfig, ProbeBackendKind};
use mediaslot_core::render::AssetOverride;

use commands::{run_render, run_scan, run_serve, RenderOptions, ServeOptions};

/// Top-level CLI for mediaslot.
#[derive(Debug, Parser)]
#[command(name = "mediaslot")]
#[command(about = "Resolve media placeholders in HTML documents", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/mediaslot/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProbeArg {
    Fs,
    Http,
}

impl From<ProbeArg> for ProbeBackendKind {
    fn from(p: ProbeArg) -> Self {
        match p {
            ProbeArg::Fs => ProbeBackendKind::Fs,
            ProbeArg::Http => ProbeBackendKind::Http,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve all placeholders in a document and print (or write) the result.
    Render {
        /// HTML document to resolve.
        input: PathBuf,

        /// Write the result here instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// How asset existence is checked.
        #[arg(long, value_enum)]
        probe: Option<ProbeArg>,

        /// Base URL for the http probe.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Directory the fs probe resolves candidate paths against.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Override a static asset path before resolving (repeatable).
        #[arg(long = "asset", value_name = "NAME=PATH")]
        assets: Vec<AssetOverride>,
    },

    /// List placeholders and their candidate paths without resolving.
    Scan {
        /// HTML document to inspect.
        input: PathBuf,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Serve the landing page with placeholders resolved on every request.
    Serve {
        /// Port to listen on.
        #[arg(long, value_name = "N")]
        port: Option<u16>,

        /// Document whose style and body feed the index page.
        #[arg(long, value_name = "FILE")]
        source: Option<PathBuf>,

        /// Directory static files are served from.
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        Cli::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let cfg = load_config(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Render {
                input,
                output,
                probe,
                base_url,
                root,
                assets,
            } => {
                let opts = RenderOptions {
                    output,
                    probe: probe.map(Into::into),
                    base_url,
                    root,
                    assets,
                };
                run_render(&cfg, &input, opts).await?
            }
            CliCommand::Scan { input, json } => run_scan(&cfg, &input, json)?,
            CliCommand::Serve { port, source, root } => {
                run_serve(cfg, ServeOptions { port, source, root }).await?
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<MediaslotConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
