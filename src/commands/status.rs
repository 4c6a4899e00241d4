//! Status command - chunk store statistics

use anyhow::{Context, Result};
use colored::Colorize;

use super::{ensure_store, Workspace};

pub fn run(workspace: &Workspace, json: bool) -> Result<()> {
    let store = workspace.store();
    ensure_store(&store, json)?;

    let stats = store.stats().context("Failed to read chunk store")?;
    let modified = stats
        .modified
        .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string());

    if json {
        println!(
            "{}",
            serde_json::json!({
                "exists": true,
                "store_path": store.path().display().to_string(),
                "chunk_count": stats.chunk_count,
                "file_count": stats.file_count,
                "dimension": stats.dimension,
                "file_size_bytes": stats.size_bytes,
                "last_indexed": modified,
            })
        );
        return Ok(());
    }

    println!("{}", "Chunk Store Status".bold());
    println!();
    println!(
        "  {} {} chunks from {} files",
        "→".dimmed(),
        stats.chunk_count.to_string().cyan(),
        stats.file_count.to_string().cyan()
    );
    if let Some(dim) = stats.dimension {
        println!("  {} {} dimensions", "→".dimmed(), dim);
    }
    println!(
        "  {} Size: {:.2} KB",
        "→".dimmed(),
        stats.size_bytes as f64 / 1024.0
    );
    println!(
        "  {} Last indexed: {}",
        "→".dimmed(),
        modified.as_deref().unwrap_or("Unknown")
    );
    println!("  {} Path: {}", "→".dimmed(), store.path().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_store_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let workspace = Workspace::open(Some(dir.path().to_path_buf()), None)?;
        assert!(run(&workspace, true).is_err());
        Ok(())
    }
}
