//! notevec library
//!
//! Chunk a vault of markdown notes, embed the chunks, and search them.
//!
//! # Modules
//!
//! - `core`: Vault operations (config, file discovery, chunking, errors)
//! - `search`: Embedding, chunk store, and nearest-neighbour search

pub mod core;
pub mod search;

// Re-exports for convenience
pub use crate::core::chunk::{Chunk, Chunker};
pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::core::paths::VaultPaths;
pub use crate::core::walker::collect_markdown_files;
pub use crate::search::{ChunkStore, Embedder, EmbeddingModel, NearestNeighbors, SearchEngine, SearchResult};
