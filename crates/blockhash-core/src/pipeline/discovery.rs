//! Expansion of command-line inputs into the list of image files to hash.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Expands input paths into image files.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Expand inputs in the order given.
    ///
    /// Explicit files are kept as-is, whatever their extension, so that
    /// missing or unreadable files are reported when they are decoded.
    /// Directories are walked recursively for supported extensions and their
    /// contents sorted by path.
    pub fn discover_all<P: AsRef<Path>>(&self, inputs: &[P]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for input in inputs {
            let input = input.as_ref();
            if input.is_dir() {
                files.extend(self.walk(input));
            } else {
                files.push(input.to_path_buf());
            }
        }
        files
    }

    fn walk(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        // Sort by path for deterministic ordering
        files.sort();
        tracing::debug!("Found {} image(s) under {:?}", files.len(), dir);
        files
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
