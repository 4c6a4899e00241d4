//! Index command - chunk and embed the vault

use anyhow::{Context, Result};
use colored::Colorize;

use super::Workspace;

pub fn run(workspace: &Workspace, json: bool) -> Result<()> {
    let engine = workspace.engine();

    if !json {
        println!(
            "{} Indexing {}...",
            "→".dimmed(),
            workspace.paths.root.display()
        );
    }

    let stats = engine.index_all().context("Indexing failed")?;
    let store_path = engine.store().path();

    if json {
        println!(
            "{}",
            serde_json::json!({
                "files": stats.files,
                "chunks": stats.chunks,
                "duration_ms": stats.duration_ms,
                "store_path": store_path.display().to_string(),
            })
        );
    } else {
        println!();
        println!(
            "{} Indexed {} chunks from {} files in {:.2}s",
            "✓".green().bold(),
            stats.chunks.to_string().cyan(),
            stats.files.to_string().cyan(),
            stats.duration_ms as f64 / 1000.0
        );
        println!("  {} Store saved to: {}", "→".dimmed(), store_path.display());
    }

    Ok(())
}
