//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hash::DEFAULT_BITS;

/// Resize filter applied before hashing when a target size is configured.
///
/// Serialized as its integer code (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Interpolation {
    /// 1 - nearest neighbour
    #[default]
    Nearest,
    /// 2 - bilinear
    Bilinear,
    /// 3 - bicubic
    Bicubic,
    /// 4 - antialias (Lanczos)
    Antialias,
}

impl TryFrom<u8> for Interpolation {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Nearest),
            2 => Ok(Self::Bilinear),
            3 => Ok(Self::Bicubic),
            4 => Ok(Self::Antialias),
            other => Err(ConfigError::InvalidInterpolation(other)),
        }
    }
}

impl From<Interpolation> for u8 {
    fn from(interpolation: Interpolation) -> Self {
        match interpolation {
            Interpolation::Nearest => 1,
            Interpolation::Bilinear => 2,
            Interpolation::Bicubic => 3,
            Interpolation::Antialias => 4,
        }
    }
}

/// Hash computation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Grid side; the hash has bits² / 4 hex digits
    pub bits: u32,

    /// Always use exact-division aggregation
    pub quick: bool,

    /// Resize to (width, height) before hashing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<(u32, u32)>,

    /// Filter used when resizing
    pub interpolation: Interpolation,

    /// Emit the bit grid of every hash to the debug observer
    pub debug: bool,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            quick: false,
            size: None,
            interpolation: Interpolation::Nearest,
            debug: false,
        }
    }
}

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of images hashed concurrently (1 = sequential)
    pub parallel_workers: usize,

    /// File extensions picked up when walking directories
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 1,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
                "gif".to_string(),
                "bmp".to_string(),
                "tif".to_string(),
                "tiff".to_string(),
                "ico".to_string(),
                "pnm".to_string(),
                "ppm".to_string(),
                "pgm".to_string(),
                "tga".to_string(),
            ],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,

    /// Per-image decode and hash timeout in parallel mode
    pub decode_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
            decode_timeout_ms: 10000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("text", "json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Parse a `WIDTHxHEIGHT` resize target such as `256x256`.
pub fn parse_size(s: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::ValidationError(format!("size must look like 256x256, got {s:?}"));
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width: u32 = w.trim().parse().map_err(|_| invalid())?;
    let height: u32 = h.trim().parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_codes() {
        for code in 1..=4u8 {
            let interp = Interpolation::try_from(code).unwrap();
            assert_eq!(u8::from(interp), code);
        }
        assert!(matches!(
            Interpolation::try_from(0),
            Err(ConfigError::InvalidInterpolation(0))
        ));
        assert!(matches!(
            Interpolation::try_from(5),
            Err(ConfigError::InvalidInterpolation(5))
        ));
    }

    #[test]
    fn test_hash_config_defaults() {
        let config = HashConfig::default();
        assert_eq!(config.bits, 16);
        assert!(!config.quick);
        assert!(config.size.is_none());
        assert_eq!(config.interpolation, Interpolation::Nearest);
        assert!(!config.debug);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("256x128").unwrap(), (256, 128));
        assert_eq!(parse_size(" 64X64 ").unwrap(), (64, 64));
        assert!(parse_size("256").is_err());
        assert!(parse_size("0x10").is_err());
        assert!(parse_size("axb").is_err());
    }
}
