//! Output record for a hashed image.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::hash::Blockhash;

/// One hashed file, as written by the output writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashRecord {
    /// Path as given on the command line (or found by directory walk)
    pub file_path: PathBuf,

    /// Just the filename portion
    pub file_name: String,

    /// Lowercase hexhash
    pub hash: String,

    /// Grid side used for the hash
    pub bits: u32,

    /// Decoded width in pixels (before any resize)
    pub width: u32,

    /// Decoded height in pixels (before any resize)
    pub height: u32,

    /// Detected format ("jpeg", "png", ...)
    pub format: String,
}

impl HashRecord {
    pub fn new(path: &Path, hash: &Blockhash, width: u32, height: u32, format: String) -> Self {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self {
            file_path: path.to_path_buf(),
            file_name,
            hash: hash.as_str().to_string(),
            bits: hash.bits(),
            width,
            height,
            format,
        }
    }
}
