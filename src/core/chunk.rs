//! Line-based chunking of note text.
//!
//! Lines are stripped and blank lines dropped. Before each line is appended the
//! active chunk's length is compared against the threshold; a chunk that has
//! already reached it is closed and the line opens the next one. A chunk can
//! therefore run past the threshold by the length of its last line.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::config::DEFAULT_CHUNK_SIZE;

/// A bounded span of non-blank text from one note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chunk {
    pub chunk_id: u64,
    pub file: PathBuf,
    pub line_idx: usize,
    pub chunk_text: String,
    /// Empty until the chunk has been embedded.
    pub embedding: Vec<f32>,
}

impl Chunk {
    pub fn is_embedded(&self) -> bool {
        !self.embedding.is_empty()
    }
}

/// Splits files into chunks, numbering them contiguously across a run.
#[derive(Debug)]
pub struct Chunker {
    threshold: usize,
    next_id: u64,
}

/// Text being accumulated for the chunk that is still open.
struct Accumulator {
    line_idx: usize,
    text: String,
    chars: usize,
}

impl Accumulator {
    fn new(line_idx: usize) -> Self {
        Self {
            line_idx,
            text: String::new(),
            chars: 0,
        }
    }

    fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
        self.chars += line.chars().count() + 1;
    }
}

impl Chunker {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            next_id: 0,
        }
    }

    /// Id that will be given to the next chunk.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Chunk the full text of `file`.
    ///
    /// Always yields at least one chunk. A file with no non-blank lines
    /// produces a single chunk with empty text at line 0.
    pub fn chunk(&mut self, file: &Path, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = Accumulator::new(0);

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if !current.text.is_empty() && current.chars >= self.threshold {
                let done = std::mem::replace(&mut current, Accumulator::new(idx));
                chunks.push(self.finish(file, done));
            }
            current.push_line(line);
        }

        chunks.push(self.finish(file, current));
        chunks
    }

    fn finish(&mut self, file: &Path, acc: Accumulator) -> Chunk {
        let chunk = Chunk {
            chunk_id: self.next_id,
            file: file.to_path_buf(),
            line_idx: acc.line_idx,
            chunk_text: acc.text,
            embedding: Vec::new(),
        };
        self.next_id += 1;
        chunk
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_one(text: &str) -> Vec<Chunk> {
        Chunker::default().chunk(Path::new("note.md"), text)
    }

    #[test]
    fn test_long_line_then_short_line() {
        let text = format!("{}\n{}\n", "A".repeat(600), "B".repeat(10));
        let chunks = chunk_one(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_text, format!("{}\n", "A".repeat(600)));
        assert_eq!(chunks[0].line_idx, 0);
        assert_eq!(chunks[1].chunk_text, format!("{}\n", "B".repeat(10)));
        assert_eq!(chunks[1].line_idx, 1);
        assert_eq!(chunks[1].chunk_id, 1);
    }

    #[test]
    fn test_empty_file_yields_one_empty_chunk() {
        let chunks = chunk_one("");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_text, "");
        assert_eq!(chunks[0].line_idx, 0);

        let blank = chunk_one("\n   \n\t\n");
        assert_eq!(blank.len(), 1);
        assert!(blank[0].chunk_text.is_empty());
    }

    #[test]
    fn test_blank_lines_dropped_and_lines_stripped() {
        let chunks = chunk_one("\n\n  # Title  \n\n- item\n");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_text, "# Title\n- item\n");
        // First chunk is anchored at line 0 even though line 0 is blank.
        assert_eq!(chunks[0].line_idx, 0);
    }

    #[test]
    fn test_threshold_checked_before_append() {
        // 499 chars + newline = 500, so the next line opens a new chunk.
        let a = "a".repeat(499);
        let text = format!("{a}\n\nshort\nmore\n");
        let chunks = chunk_one(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_text.chars().count(), 500);
        assert_eq!(chunks[1].line_idx, 2);
        assert_eq!(chunks[1].chunk_text, "short\nmore\n");
    }

    #[test]
    fn test_chunk_can_exceed_threshold_by_one_line() {
        let text = format!("{}\n{}\n", "x".repeat(400), "y".repeat(300));
        let chunks = chunk_one(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_text.chars().count(), 702);
    }

    #[test]
    fn test_ids_contiguous_across_files() {
        let mut chunker = Chunker::new(10);
        let first = chunker.chunk(Path::new("a.md"), "0123456789\nabc\n");
        let second = chunker.chunk(Path::new("b.md"), "");
        let third = chunker.chunk(Path::new("c.md"), "one\n");

        let ids: Vec<u64> = first
            .iter()
            .chain(&second)
            .chain(&third)
            .map(|c| c.chunk_id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(chunker.next_id(), 4);
        assert!(first.iter().all(|c| c.file == Path::new("a.md")));
    }

    #[test]
    fn test_line_idx_matches_first_line_of_chunk() {
        let lines: Vec<String> = (0..40).map(|i| format!("line {i:02} {}", "z".repeat(40))).collect();
        let text = lines.join("\n\n");
        let chunks = chunk_one(&text);

        assert!(chunks.len() > 1);
        let source: Vec<&str> = text.lines().collect();
        for chunk in &chunks {
            assert!(!chunk.chunk_text.is_empty());
            assert!(!chunk.is_embedded());
            let first = chunk.chunk_text.lines().next().unwrap_or_default();
            assert_eq!(source[chunk.line_idx], first);
        }
    }

    #[test]
    fn test_zero_threshold_never_emits_leading_empty_chunk() {
        let chunks = Chunker::new(0).chunk(Path::new("n.md"), "a\nb\n");
        let texts: Vec<&str> = chunks.iter().map(|c| c.chunk_text.as_str()).collect();
        assert_eq!(texts, vec!["a\n", "b\n"]);
        assert_eq!(chunks[1].line_idx, 1);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 200 three-byte chars: 600 bytes but only 201 chars with newline.
        let text = format!("{}\nnext\n", "한".repeat(200));
        let chunks = chunk_one(&text);
        assert_eq!(chunks.len(), 1);
    }
}
