//! Pipeline orchestration: prepare each image, hash it, report it.

use image::DynamicImage;
use std::borrow::Borrow;
use std::fmt;

use crate::config::HashConfig;
use crate::error::{BlockhashError, ConfigError, Result};
use crate::hash::{self, Blockhash, PixelGrid};

use super::prepare::prepare;

/// Callback receiving the bit-grid rendering of each hash in debug mode.
pub type DebugObserver = Box<dyn Fn(&str) + Send + Sync>;

/// Hashes decoded images according to a validated [`HashConfig`].
///
/// The pipeline holds no per-image state, so a single instance can be shared
/// between threads.
pub struct HashPipeline {
    config: HashConfig,
    observer: Option<DebugObserver>,
}

impl fmt::Debug for HashPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashPipeline")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl HashPipeline {
    /// Create a pipeline, rejecting invalid settings before any image is seen.
    pub fn new(config: HashConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            observer: None,
        })
    }

    /// Install the callback used when `debug` is enabled.
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Hash a single image.
    ///
    /// The image is normalised to RGB/RGBA and resized if configured; the
    /// caller's image is left untouched.
    pub fn hash_image(&self, image: &DynamicImage) -> Result<Blockhash> {
        let start = std::time::Instant::now();
        let prepared = prepare(image, self.config.size, self.config.interpolation);
        let grid = PixelGrid::from_image(&prepared)?;
        let hash = hash::blockhash(&grid, self.config.bits, self.config.quick)?;
        tracing::trace!("  Hash: {:?}", start.elapsed());

        if self.config.debug {
            if let Some(observer) = &self.observer {
                observer(&hash.to_bit_grid());
            }
        }
        Ok(hash)
    }

    /// Lazily hash a sequence of images, one result per image, in order.
    pub fn hashes<I>(&self, images: I) -> Hashes<'_, OkIter<I::IntoIter>>
    where
        I: IntoIterator,
        I::Item: Borrow<DynamicImage>,
    {
        self.hash_results(OkIter(images.into_iter()))
    }

    /// Lazily hash a sequence of decode results.
    ///
    /// Upstream failures are passed through unchanged and do not stop the
    /// sequence.
    pub fn hash_results<I, T, E>(&self, images: I) -> Hashes<'_, I::IntoIter>
    where
        I: IntoIterator<Item = std::result::Result<T, E>>,
        T: Borrow<DynamicImage>,
        BlockhashError: From<E>,
    {
        Hashes {
            pipeline: self,
            images: images.into_iter(),
        }
    }
}

/// Wraps plain images as infallible decode results.
#[derive(Debug, Clone)]
pub struct OkIter<I>(I);

impl<I: Iterator> Iterator for OkIter<I> {
    type Item = std::result::Result<I::Item, BlockhashError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Single-pass iterator of hashes; each `next` pulls and hashes one image.
pub struct Hashes<'p, I> {
    pipeline: &'p HashPipeline,
    images: I,
}

impl<I, T, E> Iterator for Hashes<'_, I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
    T: Borrow<DynamicImage>,
    BlockhashError: From<E>,
{
    type Item = Result<Blockhash>;

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.images.next()?;
        Some(
            image
                .map_err(BlockhashError::from)
                .and_then(|image| self.pipeline.hash_image(image.borrow())),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.images.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interpolation;
    use crate::error::{HashError, PipelineError};
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn striped(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 3) % 2 == 0 {
                Rgb([240, 240, 240])
            } else {
                Rgb([15, 15, 15])
            }
        }))
    }

    #[test]
    fn test_new_rejects_odd_bits() {
        let config = HashConfig {
            bits: 7,
            ..HashConfig::default()
        };
        assert!(matches!(
            HashPipeline::new(config),
            Err(ConfigError::InvalidBits(7))
        ));
    }

    #[test]
    fn test_hash_length_default_bits() {
        let pipeline = HashPipeline::new(HashConfig::default()).unwrap();
        let hash = pipeline.hash_image(&striped(50, 40)).unwrap();
        assert_eq!(hash.as_str().len(), 64);
    }

    #[test]
    fn test_grayscale_matches_rgb_equivalent() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_fn(20, 20, |x, y| {
            Luma([((x * 11 + y * 5) % 256) as u8])
        }));
        let rgb = DynamicImage::ImageRgb8(gray.to_rgb8());

        let pipeline = HashPipeline::new(HashConfig {
            bits: 8,
            ..HashConfig::default()
        })
        .unwrap();
        assert_eq!(
            pipeline.hash_image(&gray).unwrap(),
            pipeline.hash_image(&rgb).unwrap()
        );
    }

    #[test]
    fn test_resize_before_hash() {
        let pipeline = HashPipeline::new(HashConfig {
            bits: 8,
            size: Some((32, 32)),
            interpolation: Interpolation::Nearest,
            ..HashConfig::default()
        })
        .unwrap();
        let image = striped(64, 64);
        let expected = image.resize_exact(32, 32, image::imageops::FilterType::Nearest);

        let direct = HashPipeline::new(HashConfig {
            bits: 8,
            ..HashConfig::default()
        })
        .unwrap();
        assert_eq!(
            pipeline.hash_image(&image).unwrap(),
            direct.hash_image(&expected).unwrap()
        );
        assert_eq!((image.width(), image.height()), (64, 64));
    }

    #[test]
    fn test_hashes_are_lazy_and_ordered() {
        let pipeline = HashPipeline::new(HashConfig {
            bits: 4,
            ..HashConfig::default()
        })
        .unwrap();
        let pulled = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&pulled);
        let images = (0..3).map(move |i| {
            *counter.lock().unwrap() += 1;
            striped(16 + i * 4, 16)
        });

        let mut hashes = pipeline.hashes(images);
        assert_eq!(*pulled.lock().unwrap(), 0);

        let first = hashes.next().unwrap().unwrap();
        assert_eq!(*pulled.lock().unwrap(), 1);
        assert_eq!(first, pipeline.hash_image(&striped(16, 16)).unwrap());

        assert_eq!(hashes.by_ref().count(), 2);
        assert_eq!(*pulled.lock().unwrap(), 3);
        assert!(hashes.next().is_none());
    }

    #[test]
    fn test_failed_item_does_not_stop_sequence() {
        let pipeline = HashPipeline::new(HashConfig {
            bits: 4,
            ..HashConfig::default()
        })
        .unwrap();
        let inputs: Vec<std::result::Result<DynamicImage, PipelineError>> = vec![
            Ok(striped(8, 8)),
            Err(PipelineError::FileNotFound(PathBuf::from("gone.png"))),
            Ok(DynamicImage::new_rgb8(0, 0)),
            Ok(striped(12, 12)),
        ];

        let results: Vec<_> = pipeline.hash_results(inputs).collect();
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(BlockhashError::Pipeline(PipelineError::FileNotFound(_)))
        ));
        assert!(matches!(
            results[2],
            Err(BlockhashError::Hash(HashError::EmptyImage))
        ));
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_debug_observer_receives_bit_grid() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pipeline = HashPipeline::new(HashConfig {
            bits: 4,
            debug: true,
            ..HashConfig::default()
        })
        .unwrap()
        .with_observer(move |grid| sink.lock().unwrap().push(grid.to_string()));

        let hash = pipeline.hash_image(&striped(16, 16)).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], hash.to_bit_grid());
        assert_eq!(seen[0].lines().count(), 4);
        assert!(seen[0].lines().all(|l| l.len() == 4));
    }

    #[test]
    fn test_observer_silent_without_debug() {
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let pipeline = HashPipeline::new(HashConfig {
            bits: 4,
            ..HashConfig::default()
        })
        .unwrap()
        .with_observer(move |_| *sink.lock().unwrap() += 1);

        pipeline.hash_image(&striped(16, 16)).unwrap();
        assert_eq!(*seen.lock().unwrap(), 0);
    }
}
