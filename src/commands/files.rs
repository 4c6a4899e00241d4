//! Files command - indexed notes and their chunk counts

use anyhow::{Context, Result};
use colored::Colorize;

use super::{ensure_store, Workspace};

pub fn run(workspace: &Workspace, json: bool) -> Result<()> {
    let store = workspace.store();
    ensure_store(&store, json)?;

    let files = store.files().context("Failed to read chunk store")?;

    if json {
        let json_files: Vec<_> = files
            .iter()
            .map(|(path, chunks)| {
                serde_json::json!({
                    "file": path.display().to_string(),
                    "chunks": chunks,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_files)?);
        return Ok(());
    }

    println!("{} {} indexed files", "→".dimmed(), files.len().to_string().cyan());
    println!();
    for (path, chunks) in &files {
        println!(
            "  {}  {}",
            format!("{chunks:>5}").dimmed(),
            workspace.display_path(path)
        );
    }

    Ok(())
}
