//! Borrowed, read-only pixel grid views.

use image::DynamicImage;

use crate::error::{HashError, HashResult};

/// Channel layout of an interleaved 8-bit pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl ChannelMode {
    /// Number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::LumaAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Short mode name, as image libraries commonly spell it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Luma => "L",
            Self::LumaAlpha => "LA",
            Self::Rgb => "RGB",
            Self::Rgba => "RGBA",
        }
    }
}

impl std::fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A read-only view over decoded pixels owned by the caller.
///
/// Pixels are stored row-major and interleaved, `mode.channels()` bytes each.
#[derive(Debug, Clone, Copy)]
pub struct PixelGrid<'a> {
    width: u32,
    height: u32,
    mode: ChannelMode,
    data: &'a [u8],
}

impl<'a> PixelGrid<'a> {
    /// Wrap a raw interleaved buffer.
    pub fn new(width: u32, height: u32, mode: ChannelMode, data: &'a [u8]) -> HashResult<Self> {
        let expected = width as usize * height as usize * mode.channels();
        if data.len() != expected {
            return Err(HashError::BufferSize {
                width,
                height,
                channels: mode.channels(),
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            data,
        })
    }

    /// Borrow the pixels of an 8-bit decoded image.
    ///
    /// Layouts wider than 8 bits per channel are rejected; convert them first.
    pub fn from_image(image: &'a DynamicImage) -> HashResult<Self> {
        let (mode, raw): (ChannelMode, &[u8]) = match image {
            DynamicImage::ImageLuma8(buf) => (ChannelMode::Luma, buf.as_raw()),
            DynamicImage::ImageLumaA8(buf) => (ChannelMode::LumaAlpha, buf.as_raw()),
            DynamicImage::ImageRgb8(buf) => (ChannelMode::Rgb, buf.as_raw()),
            DynamicImage::ImageRgba8(buf) => (ChannelMode::Rgba, buf.as_raw()),
            other => {
                return Err(HashError::UnsupportedMode(format!("{:?}", other.color())));
            }
        };
        Self::new(image.width(), image.height(), mode, raw)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Channel bytes of the pixel at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &'a [u8] {
        let channels = self.mode.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[start..start + channels]
    }
}
