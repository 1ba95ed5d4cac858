use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive discovery of source files for the audit, which works on a directory
/// rather than the configured file list.
pub struct FileScanner {
    extension: String,
}

impl FileScanner {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// All matching files under `root_path`, sorted so reports are stable.
    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        if !root_path.is_dir() {
            anyhow::bail!("source directory not found: {}", root_path.display());
        }

        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .collect();

        let mut files: Vec<PathBuf> = entries
            .par_iter()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == self.extension)
            })
            .map(|entry| entry.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}
