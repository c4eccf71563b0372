//! Per-pixel brightness sampling.

use super::grid::{ChannelMode, PixelGrid};
use crate::error::{HashError, HashResult};

/// Brightness of a fully transparent pixel (pure white).
pub const TRANSPARENT_VALUE: u32 = 765;

/// Brightness reader chosen once per grid from its channel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampler {
    Rgb,
    Rgba,
}

impl Sampler {
    /// Pick the sampler for a grid, failing for anything but RGB/RGBA.
    pub fn for_grid(grid: &PixelGrid<'_>) -> HashResult<Self> {
        match grid.mode() {
            ChannelMode::Rgb => Ok(Self::Rgb),
            ChannelMode::Rgba => Ok(Self::Rgba),
            other => Err(HashError::UnsupportedMode(other.to_string())),
        }
    }

    /// Sum of the colour channels at `(x, y)`, in `0..=765`.
    #[inline]
    pub fn value(self, grid: &PixelGrid<'_>, x: u32, y: u32) -> u32 {
        let px = grid.pixel(x, y);
        match self {
            Self::Rgba if px[3] == 0 => TRANSPARENT_VALUE,
            _ => px[0] as u32 + px[1] as u32 + px[2] as u32,
        }
    }
}

/// Brightness of a single pixel.
pub fn brightness(grid: &PixelGrid<'_>, x: u32, y: u32) -> HashResult<u32> {
    Ok(Sampler::for_grid(grid)?.value(grid, x, y))
}
