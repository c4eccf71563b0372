//! Configuration validation with range checks.

use crate::error::ConfigError;
use crate::hash::check_bits;

use super::{Config, HashConfig};

impl HashConfig {
    /// Validate hash settings.
    ///
    /// The interpolation code is range-checked when it is parsed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bits(self.bits).map_err(|_| ConfigError::InvalidBits(self.bits))?;
        if let Some((width, height)) = self.size {
            if width == 0 || height == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "hash.size must be non-zero, got {width}x{height}"
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hash.validate()?;
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.limits.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "limits.decode_timeout_ms must be > 0".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "text" | "json" | "jsonl") {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be text, json or jsonl, got {:?}",
                self.output.format
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be pretty or json, got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
