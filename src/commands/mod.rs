pub mod files;
pub mod index;
pub mod search;
pub mod status;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthChar;

use notevec::{ChunkStore, Config, EmbeddingModel, SearchEngine, VaultPaths};

/// Vault location and settings shared by every command
pub struct Workspace {
    pub paths: VaultPaths,
    pub config: Config,
}

impl Workspace {
    pub fn open(root: Option<PathBuf>, store: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let paths = VaultPaths::from_root(root);

        let mut config = Config::load(&paths.config)
            .with_context(|| format!("Failed to load config from {}", paths.config.display()))?;
        if let Some(store) = store {
            config.store_path = store;
        }

        Ok(Self { paths, config })
    }

    pub fn store(&self) -> ChunkStore {
        ChunkStore::new(self.paths.store_path(&self.config.store_path))
    }

    /// Build the engine. The embedding model is constructed here, once per process.
    pub fn engine(&self) -> SearchEngine<EmbeddingModel> {
        SearchEngine::new(&self.paths.root, self.config.clone(), EmbeddingModel::new())
    }

    /// Path relative to the vault root, for display
    pub fn display_path<'a>(&self, path: &'a Path) -> std::path::Display<'a> {
        path.strip_prefix(&self.paths.root).unwrap_or(path).display()
    }
}

/// Fail unless the chunk store exists, printing the "run index first" hint
pub fn ensure_store(store: &ChunkStore, json: bool) -> Result<()> {
    if store.exists() {
        return Ok(());
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "exists": false,
                "error": "Chunk store not found",
                "store_path": store.path().display().to_string(),
            })
        );
    } else {
        eprintln!(
            "{} Run {} first.",
            "!".yellow().bold(),
            "notevec index".cyan()
        );
    }
    bail!("Chunk store not found at {}", store.path().display())
}

/// Collapse whitespace and cut `text` to at most `max_width` terminal columns
pub fn truncate_display(text: &str, max_width: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::new();
    let mut width = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            out.push_str("...");
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
