//! Blockhash Core - block mean value perceptual image hashing.
//!
//! A blockhash is a fixed-length hex fingerprint of an image, suitable for
//! near-duplicate detection: similar images produce hashes with a small
//! Hamming distance.
//!
//! # Architecture
//!
//! ```text
//! decode → normalise (RGB/RGBA) → resize? → aggregate blocks → median threshold → hex
//! ```
//!
//! The [`hash`] module is the pure algorithm over a borrowed [`PixelGrid`];
//! [`pipeline`] wires decoding, preparation and hashing together.
//!
//! # Usage
//!
//! ```rust,no_run
//! use blockhash_core::{HashConfig, HashPipeline};
//!
//! fn main() -> blockhash_core::Result<()> {
//!     let pipeline = HashPipeline::new(HashConfig::default())?;
//!     let image = image::open("photo.jpg").expect("decodable image");
//!     let hash = pipeline.hash_image(&image)?;
//!     println!("{hash}  photo.jpg");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod hash;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, HashConfig, Interpolation};
pub use error::{BlockhashError, ConfigError, HashError, PipelineError, PipelineResult, Result};
pub use hash::{blockhash, Blockhash, ChannelMode, PixelGrid, Strategy};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{FileDiscovery, HashPipeline, Hashes, ImageDecoder};
pub use types::HashRecord;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
