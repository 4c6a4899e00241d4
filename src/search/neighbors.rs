//! Exact k-nearest-neighbour search under Euclidean distance.
//!
//! Vaults hold at most tens of thousands of chunks, so every query scans the
//! whole index. Equal distances are ordered by ascending `chunk_id`.

use std::cmp::Ordering;

use crate::core::chunk::Chunk;
use crate::core::error::{Error, Result};

pub const DEFAULT_K: usize = 5;

/// A stored chunk and its distance from the query.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub chunk: &'a Chunk,
    pub distance: f32,
}

pub struct NearestNeighbors {
    chunks: Vec<Chunk>,
    dimension: usize,
}

impl NearestNeighbors {
    /// Build an index over embedded chunks. All embeddings must share one length.
    pub fn build(chunks: Vec<Chunk>) -> Result<Self> {
        let dimension = chunks.first().map(|c| c.embedding.len()).unwrap_or(0);

        if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != dimension) {
            return Err(Error::DimensionMismatch {
                expected: dimension,
                actual: bad.embedding.len(),
            });
        }

        Ok(Self { chunks, dimension })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Return the `k` chunks closest to `query`, nearest first.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor<'_>>> {
        if self.chunks.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor<'_>> = self
            .chunks
            .iter()
            .map(|chunk| Neighbor {
                chunk,
                distance: euclidean_distance(query, &chunk.embedding),
            })
            .collect();

        neighbors.sort_by(compare_neighbors);
        neighbors.truncate(k);

        Ok(neighbors)
    }
}

fn compare_neighbors(a: &Neighbor<'_>, b: &Neighbor<'_>) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.chunk.chunk_id.cmp(&b.chunk.chunk_id))
}

/// Euclidean distance between equal-length vectors, accumulated in f64.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn embedded(id: u64, embedding: Vec<f32>) -> Chunk {
        Chunk {
            chunk_id: id,
            file: PathBuf::from("note.md"),
            line_idx: 0,
            chunk_text: format!("chunk {id}\n"),
            embedding,
        }
    }

    fn ids(neighbors: &[Neighbor<'_>]) -> Vec<u64> {
        neighbors.iter().map(|n| n.chunk.chunk_id).collect()
    }

    #[test]
    fn test_exact_match_first_with_zero_distance() -> anyhow::Result<()> {
        let index = NearestNeighbors::build(vec![
            embedded(0, vec![0.0, 0.0]),
            embedded(1, vec![3.0, 4.0]),
            embedded(2, vec![1.0, 1.0]),
            embedded(3, vec![-6.0, 8.0]),
        ])?;

        let results = index.query(&[3.0, 4.0], DEFAULT_K)?;
        assert_eq!(ids(&results), vec![1, 2, 0, 3]);
        assert_eq!(results[0].distance, 0.0);
        assert!((results[2].distance - 5.0).abs() < 1e-6);
        assert!((results[3].distance - 9.848_858).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn test_truncates_to_k() -> anyhow::Result<()> {
        let chunks = (0..20).map(|i| embedded(i, vec![i as f32])).collect();
        let index = NearestNeighbors::build(chunks)?;

        let results = index.query(&[7.2], 3)?;
        assert_eq!(ids(&results), vec![7, 8, 6]);
        assert!(index.query(&[7.2], 0)?.is_empty());
        assert_eq!(index.query(&[0.0], 100)?.len(), 20);
        Ok(())
    }

    #[test]
    fn test_ties_broken_by_lower_chunk_id() -> anyhow::Result<()> {
        let index = NearestNeighbors::build(vec![
            embedded(4, vec![1.0, 0.0]),
            embedded(1, vec![0.0, 1.0]),
            embedded(3, vec![-1.0, 0.0]),
            embedded(2, vec![0.0, -1.0]),
        ])?;

        let results = index.query(&[0.0, 0.0], 4)?;
        assert_eq!(ids(&results), vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_dimension_mismatch_fails_fast() -> anyhow::Result<()> {
        let index = NearestNeighbors::build(vec![embedded(0, vec![1.0, 2.0, 3.0])])?;
        assert_eq!(index.dimension(), 3);

        let err = index.query(&[1.0, 2.0], 5).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        Ok(())
    }

    #[test]
    fn test_build_rejects_mixed_dimensions() {
        let result = NearestNeighbors::build(vec![embedded(0, vec![1.0, 2.0]), embedded(1, vec![1.0])]);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_index() -> anyhow::Result<()> {
        let index = NearestNeighbors::build(Vec::new())?;
        assert!(index.is_empty());
        assert!(index.query(&[1.0, 2.0], 5)?.is_empty());
        Ok(())
    }
}
