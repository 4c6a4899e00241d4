use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::error::{Error, Result};
use super::paths::DEFAULT_STORE_FILE;

/// Character threshold at which the active chunk is closed.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_LIMIT: usize = 5;

/// Editor-internal settings folder and trash folder.
pub const DEFAULT_SKIP_DIRS: [&str; 2] = [".obsidian", ".trash"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory basenames whose subtrees are never walked.
    pub skip_dirs: Vec<String>,
    pub chunk_size: usize,
    /// Store file, relative to the data directory unless absolute.
    pub store_path: PathBuf,
    pub default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::parse(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;

        if config.chunk_size == 0 {
            return Err(Error::InvalidConfig {
                path: path.to_path_buf(),
                reason: "chunk_size must be greater than 0".into(),
            });
        }
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}
