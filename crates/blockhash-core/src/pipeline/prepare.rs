//! Image preparation before hashing: channel normalisation and resizing.
//!
//! Both steps return new images and never touch the caller's copy. Images
//! that already need no work are passed through borrowed.

use image::imageops::FilterType;
use image::DynamicImage;
use std::borrow::Cow;

use crate::config::Interpolation;

impl Interpolation {
    /// Matching resize filter from the `image` crate.
    pub fn filter(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Antialias => FilterType::Lanczos3,
        }
    }
}

/// Bring an image into 8-bit RGB or RGBA.
///
/// Grayscale becomes RGB, grayscale with alpha becomes RGBA, and wider
/// channel depths are reduced to 8 bits keeping the alpha channel if any.
pub fn normalize(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(image),
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        other if other.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(other.to_rgba8()))
        }
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

/// Resize to exactly `size`, ignoring aspect ratio.
pub fn resize(image: &DynamicImage, size: (u32, u32), interpolation: Interpolation) -> DynamicImage {
    image.resize_exact(size.0, size.1, interpolation.filter())
}

/// Normalise, then resize when a target size is set.
pub fn prepare(
    image: &DynamicImage,
    size: Option<(u32, u32)>,
    interpolation: Interpolation,
) -> Cow<'_, DynamicImage> {
    let normalized = normalize(image);
    match size {
        Some(size) if (normalized.width(), normalized.height()) != size => {
            Cow::Owned(resize(&normalized, size, interpolation))
        }
        _ => normalized,
    }
}
