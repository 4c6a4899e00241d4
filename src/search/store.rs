//! Chunk store as line-delimited JSON.
//!
//! One record per line: `chunk_id`, `file`, `line_idx`, `chunk_text`,
//! `embedding`. A write replaces the whole file.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::core::chunk::Chunk;
use crate::core::error::{Error, Result};

pub struct ChunkStore {
    path: PathBuf,
}

/// Summary of a store file.
#[derive(Debug)]
pub struct StoreStats {
    pub chunk_count: usize,
    pub file_count: usize,
    pub dimension: Option<usize>,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

impl ChunkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write all chunks, replacing any previous store.
    ///
    /// Records go to a sibling temp file that is renamed into place once
    /// complete.
    pub fn write(&self, chunks: &[Chunk]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let tmp = self.path.with_extension("jsonl.tmp");
        let file = File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);

        for chunk in chunks {
            serde_json::to_writer(&mut writer, chunk)?;
            writer.write_all(b"\n").map_err(|e| Error::io(&tmp, e))?;
        }
        writer.flush().map_err(|e| Error::io(&tmp, e))?;
        drop(writer);

        fs::rename(&tmp, &self.path).map_err(|e| Error::io(&self.path, e))?;
        info!(path = %self.path.display(), chunks = chunks.len(), "wrote chunk store");
        Ok(())
    }

    /// Load every record in file order.
    ///
    /// Every record must carry a non-empty embedding of the same length as the
    /// first one.
    pub fn read(&self) -> Result<Vec<Chunk>> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        let reader = BufReader::new(file);

        let mut chunks = Vec::new();
        let mut dimension: Option<usize> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| Error::io(&self.path, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let chunk: Chunk = serde_json::from_str(&line).map_err(|source| Error::MalformedRecord {
                line: line_no,
                source,
            })?;

            let actual = chunk.embedding.len();
            let expected = *dimension.get_or_insert(actual);
            if actual == 0 || actual != expected {
                return Err(Error::InconsistentDimension {
                    line: line_no,
                    expected,
                    actual,
                });
            }
            chunks.push(chunk);
        }

        debug!(path = %self.path.display(), chunks = chunks.len(), "read chunk store");
        Ok(chunks)
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let chunks = self.read()?;
        let metadata = fs::metadata(&self.path).map_err(|e| Error::io(&self.path, e))?;

        Ok(StoreStats {
            chunk_count: chunks.len(),
            file_count: count_by_file(&chunks).len(),
            dimension: chunks.first().map(|c| c.embedding.len()),
            size_bytes: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::from),
        })
    }

    /// Distinct source files with their chunk counts, sorted by path.
    pub fn files(&self) -> Result<Vec<(PathBuf, usize)>> {
        let chunks = self.read()?;
        Ok(count_by_file(&chunks).into_iter().collect())
    }
}

fn count_by_file(chunks: &[Chunk]) -> BTreeMap<PathBuf, usize> {
    let mut counts = BTreeMap::new();
    for chunk in chunks {
        *counts.entry(chunk.file.clone()).or_insert(0) += 1;
    }
    counts
}
