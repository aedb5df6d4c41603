//! `mediaslot scan` – list placeholders without resolving them.

use std::path::Path;

use anyhow::{Context, Result};
use mediaslot_core::config::MediaslotConfig;
use mediaslot_core::render::scan_html;

pub fn run_scan(cfg: &MediaslotConfig, input: &Path, json: bool) -> Result<()> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let entries = scan_html(&html, cfg)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No placeholders found.");
        return Ok(());
    }
    println!("{:<8} {:<12} {}", "KIND", "NAME", "CANDIDATES");
    for e in entries {
        println!("{:<8} {:<12} {}", e.kind, e.name, e.candidates.join(", "));
    }
    Ok(())
}
