use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::error::Result;

pub const MARKDOWN_EXTENSION: &str = "md";

/// Collect every markdown file under `root`, pruning directories named in `skip_dirs`.
///
/// A root whose own basename is a skip name yields nothing. Paths come back sorted.
pub fn collect_markdown_files<S: AsRef<str>>(root: &Path, skip_dirs: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry, skip_dirs));

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "collected markdown files");
    Ok(files)
}

fn is_skipped<S: AsRef<str>>(entry: &DirEntry, skip_dirs: &[S]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    skip_dirs.iter().any(|skip| skip.as_ref() == name)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e == MARKDOWN_EXTENSION)
        .unwrap_or(false)
}
