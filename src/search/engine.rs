//! Search Engine - runs the indexing pipeline and answers queries
//!
//! Indexing: walk vault → chunk notes → embed chunks → write store.
//! Searching: read store → build index → embed query → nearest neighbours.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use super::embedding::Embedder;
use super::neighbors::NearestNeighbors;
use super::store::ChunkStore;
use crate::core::chunk::{Chunk, Chunker};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::paths::VaultPaths;
use crate::core::walker::collect_markdown_files;

/// A stored chunk matched by a query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub chunk_id: u64,
    pub file: PathBuf,
    pub line_idx: usize,
    pub chunk_text: String,
    pub distance: f32,
}

/// Indexing statistics
#[derive(Debug)]
pub struct IndexingStats {
    pub files: usize,
    pub chunks: usize,
    pub duration_ms: u128,
}

/// Pipeline context: vault layout, settings, and the embedder built once at startup
pub struct SearchEngine<E: Embedder> {
    embedder: E,
    vault_paths: VaultPaths,
    config: Config,
    store: ChunkStore,
}

impl<E: Embedder> SearchEngine<E> {
    pub fn new(vault_path: &Path, config: Config, embedder: E) -> Self {
        let vault_paths = VaultPaths::from_root(vault_path.to_path_buf());
        let store = ChunkStore::new(vault_paths.store_path(&config.store_path));

        Self {
            embedder,
            vault_paths,
            config,
            store,
        }
    }

    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chunk and embed every note in the vault, then overwrite the store.
    ///
    /// Any read or embedding failure aborts the run before the store is touched.
    pub fn index_all(&self) -> Result<IndexingStats> {
        let start = Instant::now();

        let files = collect_markdown_files(&self.vault_paths.root, &self.config.skip_dirs)?;
        info!(root = %self.vault_paths.root.display(), files = files.len(), "indexing vault");

        let mut chunker = Chunker::new(self.config.chunk_size);
        let mut chunks = Vec::new();

        for file in &files {
            let text = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
            let file_chunks = chunker.chunk(file, &text);
            debug!(path = %file.display(), chunks = file_chunks.len(), "chunked file");
            chunks.extend(file_chunks);
        }

        for chunk in &mut chunks {
            self.embed_chunk(chunk)?;
        }

        self.store.write(&chunks)?;

        Ok(IndexingStats {
            files: files.len(),
            chunks: chunks.len(),
            duration_ms: start.elapsed().as_millis(),
        })
    }

    fn embed_chunk(&self, chunk: &mut Chunk) -> Result<()> {
        let embedding = self.embed_checked(&chunk.chunk_text)?;
        debug!(chunk_id = chunk.chunk_id, "embedded chunk");
        chunk.embedding = embedding;
        Ok(())
    }

    /// Embed `text`, rejecting vectors of the wrong length or with NaN/inf values.
    fn embed_checked(&self, text: &str) -> Result<Vec<f32>> {
        let embedding = self.embedder.embed(text)?;
        let expected = self.embedder.dimension();
        if embedding.len() != expected {
            return Err(Error::Embedding(format!(
                "embedder returned {} values, expected {expected}",
                embedding.len()
            )));
        }
        if let Some(pos) = embedding.iter().position(|x| !x.is_finite()) {
            return Err(Error::Embedding(format!(
                "non-finite value at position {pos}"
            )));
        }
        Ok(embedding)
    }

    /// Return the `limit` stored chunks nearest to `query`
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let index = NearestNeighbors::build(self.store.read()?)?;
        let query_embedding = self.embed_checked(query)?;

        let results = index
            .query(&query_embedding, limit)?
            .into_iter()
            .map(|n| SearchResult {
                chunk_id: n.chunk.chunk_id,
                file: n.chunk.file.clone(),
                line_idx: n.chunk.line_idx,
                chunk_text: n.chunk.chunk_text.clone(),
                distance: n.distance,
            })
            .collect();

        Ok(results)
    }
}
