//! Semantic search over note chunks
//!
//! Chunks are embedded, persisted as JSONL, and queried by exact
//! Euclidean nearest-neighbour search.

pub mod embedding;
pub mod engine;
pub mod neighbors;
pub mod store;

pub use embedding::{Embedder, EmbeddingModel};
pub use engine::{IndexingStats, SearchEngine, SearchResult};
pub use neighbors::{NearestNeighbors, Neighbor};
pub use store::{ChunkStore, StoreStats};
