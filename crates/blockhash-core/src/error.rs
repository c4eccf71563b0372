//! Error types for blockhash computation.
//!
//! Errors are split by layer: configuration problems are caught before any
//! image is touched, hashing errors come from the core algorithm, and
//! pipeline errors come from the decode collaborator for a specific file.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for blockhash operations.
#[derive(Error, Debug)]
pub enum BlockhashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised by the hashing core for a single image
    #[error("Hash error: {0}")]
    Hash(#[from] HashError),

    /// Decode and file handling errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Interpolation code outside 1..=4
    #[error("interpolation must be an int between 1 and 4, got {0}")]
    InvalidInterpolation(u8),

    /// Grid side that cannot produce a whole number of hex digits
    #[error("bits must be a positive even number no greater than 1024, got {0}")]
    InvalidBits(u32),
}

/// Errors raised while hashing a pixel grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The grid is not RGB or RGBA when brightness is sampled
    #[error("Unsupported image mode: {0}")]
    UnsupportedMode(String),

    /// Bit sequence (or block count) not a multiple of four
    #[error("Bit count {0} is not a multiple of 4")]
    InvalidBitCount(usize),

    /// Grid side of zero, above the maximum, or one whose square is not a
    /// multiple of four
    #[error("Grid side must be a positive even number no greater than 1024, got {0}")]
    InvalidGridSize(u32),

    /// Pixel buffer does not match the declared dimensions
    #[error("Pixel buffer of {actual} bytes does not match {width}x{height} with {channels} channels")]
    BufferSize {
        width: u32,
        height: u32,
        channels: usize,
        actual: usize,
    },

    /// Image has no pixels
    #[error("Image has zero width or height")]
    EmptyImage,

    /// String is not a hexhash of the expected shape
    #[error("Invalid hexhash: {0}")]
    InvalidHexhash(String),
}

/// Decode collaborator errors, tagged with the offending path.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Operation timed out
    #[error("Timeout in {stage} stage for {path} after {timeout_ms}ms")]
    Timeout {
        path: PathBuf,
        stage: String,
        timeout_ms: u64,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// Unsupported image format
    #[error("Unsupported format for {path}: {format}")]
    UnsupportedFormat { path: PathBuf, format: String },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Convenience type alias for blockhash results.
pub type Result<T> = std::result::Result<T, BlockhashError>;

/// Convenience type alias for core hashing results.
pub type HashResult<T> = std::result::Result<T, HashError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
