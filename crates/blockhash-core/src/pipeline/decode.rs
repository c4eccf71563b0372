//! Image decoding with format detection and size limits.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};

/// Image decoder with configurable limits.
#[derive(Debug, Clone)]
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an image file.
    ///
    /// Checks that the file exists and is within the size limit, detects the
    /// format from content (falling back to the extension), and rejects images
    /// larger than `max_image_dimension`.
    pub fn decode(&self, path: &Path) -> PipelineResult<DecodedImage> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {}", e),
        })?;
        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        let file = std::fs::File::open(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot open file: {}", e),
        })?;
        let reader = ImageReader::new(BufReader::new(file));
        self.decode_reader(reader, path)
    }

    /// Decode an image from an in-memory byte buffer.
    ///
    /// `path` is only used for error messages and the extension fallback.
    pub fn decode_bytes(&self, bytes: &[u8], path: &Path) -> PipelineResult<DecodedImage> {
        self.decode_reader(ImageReader::new(Cursor::new(bytes)), path)
    }

    fn decode_reader<R>(
        &self,
        reader: ImageReader<R>,
        path: &Path,
    ) -> PipelineResult<DecodedImage>
    where
        R: std::io::BufRead + std::io::Seek,
    {
        let mut reader = reader
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(path).map_err(|_| {
                    PipelineError::UnsupportedFormat {
                        path: path.to_path_buf(),
                        format: path
                            .extension()
                            .and_then(|e| e.to_str())
                            .unwrap_or("unknown")
                            .to_string(),
                    }
                })?;
                reader.set_format(f);
                f
            }
        };

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let (width, height) = (image.width(), image.height());

        if width > self.limits.max_image_dimension || height > self.limits.max_image_dimension {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim: self.limits.max_image_dimension,
            });
        }

        tracing::trace!("Decoded {:?} as {:?} ({}x{})", path, format, width, height);
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        ImageFormat::Ico => "ico".to_string(),
        ImageFormat::Pnm => "pnm".to_string(),
        ImageFormat::Tga => "tga".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        let path = dir.join(name);
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::WebP), "webp");
    }

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 12, 7);

        let decoded = ImageDecoder::new(LimitsConfig::default())
            .decode(&path)
            .unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (12, 7));
    }

    #[test]
    fn test_format_detected_by_content() {
        // A PNG saved under a .jpg name is still detected as PNG
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "a.png", 4, 4);
        let misnamed = dir.path().join("test_misnamed.jpg");
        std::fs::copy(&png, &misnamed).unwrap();

        let bytes = std::fs::read(&misnamed).unwrap();
        let result = ImageDecoder::new(LimitsConfig::default())
            .decode_bytes(&bytes, &misnamed)
            .unwrap();
        assert_eq!(result.format, ImageFormat::Png);
    }

    #[test]
    fn test_missing_file() {
        let err = ImageDecoder::new(LimitsConfig::default())
            .decode(Path::new("/definitely/not/here.png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_image_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "big.png", 40, 10);
        let limits = LimitsConfig {
            max_image_dimension: 32,
            ..LimitsConfig::default()
        };

        let err = ImageDecoder::new(limits).decode(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ImageTooLarge {
                width: 40,
                height: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = ImageDecoder::new(LimitsConfig::default())
            .decode_bytes(b"not an image at all", Path::new("x.png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }
}
