//! Orchestration around the hashing core.
//!
//! - **decode**: Load and decode image files (external collaborator)
//! - **prepare**: Channel normalisation and optional resize
//! - **discovery**: Expand input paths into image files
//! - **processor**: The [`HashPipeline`] and its lazy [`Hashes`] iterator

pub mod decode;
pub mod discovery;
pub mod prepare;
pub mod processor;

// Re-exports for convenient access
pub use decode::{format_to_string, DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use prepare::{normalize, prepare, resize};
pub use processor::{DebugObserver, HashPipeline, Hashes};
