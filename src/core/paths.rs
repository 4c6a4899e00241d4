use std::path::{Path, PathBuf};

/// Name of the per-vault data directory holding the store and config.
pub const DATA_DIR: &str = ".notevec";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_STORE_FILE: &str = "chunk_embeddings.jsonl";

pub struct VaultPaths {
    pub root: PathBuf,
    pub data: PathBuf,
    pub config: PathBuf,
}

impl VaultPaths {
    pub fn from_root(root: PathBuf) -> Self {
        let data = root.join(DATA_DIR);
        Self {
            config: data.join(CONFIG_FILE),
            data,
            root,
        }
    }

    /// Resolve a store location. Relative paths live under the data directory.
    pub fn store_path(&self, store: &Path) -> PathBuf {
        if store.is_absolute() {
            store.to_path_buf()
        } else {
            self.data.join(store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_path_resolution() {
        let paths = VaultPaths::from_root(PathBuf::from("/vault"));
        assert_eq!(paths.config, PathBuf::from("/vault/.notevec/config.yaml"));
        assert_eq!(
            paths.store_path(Path::new(DEFAULT_STORE_FILE)),
            PathBuf::from("/vault/.notevec/chunk_embeddings.jsonl")
        );
        assert_eq!(
            paths.store_path(Path::new("/tmp/out.jsonl")),
            PathBuf::from("/tmp/out.jsonl")
        );
    }
}
