use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk vault: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("malformed store record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("store record at line {line} has {actual}-dim embedding, expected {expected}")]
    InconsistentDimension {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("query embedding has {actual} dimensions but the index has {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("failed to encode store record: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
