//! Block mean value perceptual hashing.
//!
//! The image is cut into a `bits × bits` grid of blocks, each block's
//! brightness is summed, and every block becomes one bit by comparing it to
//! the median of its horizontal band:
//!
//! ```text
//! PixelGrid → aggregate (exact | weighted) → threshold per band → hexhash
//! ```
//!
//! Everything here is pure: no decoding, resizing or I/O.

pub mod aggregate;
pub mod grid;
pub mod hex;
pub mod sampler;
pub mod threshold;

pub use aggregate::{BlockGrid, Strategy};
pub use grid::{ChannelMode, PixelGrid};
pub use sampler::{brightness, Sampler};
pub use threshold::{median, threshold};

use serde::{Deserialize, Serialize};

use crate::error::{HashError, HashResult};

/// Default grid side: 16 × 16 blocks, 64 hex digits.
pub const DEFAULT_BITS: u32 = 16;

/// Largest accepted grid side.
pub const MAX_BITS: u32 = 1024;

/// A perceptual hash together with its grid side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blockhash {
    hex: String,
    bits: u32,
}

impl Blockhash {
    /// Parse a hexhash produced with the given grid side.
    pub fn parse(hex: &str, bits: u32) -> HashResult<Self> {
        check_bits(bits)?;
        if hex.len() != expected_len(bits) {
            return Err(HashError::InvalidHexhash(hex.to_string()));
        }
        hex::decode(hex)?;
        Ok(Self {
            hex: hex.to_string(),
            bits,
        })
    }

    /// The lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.hex
    }

    /// Grid side the hash was computed with.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Render the hash as `bits` lines of `bits` binary digits.
    pub fn to_bit_grid(&self) -> String {
        let bits: String = hex::decode(&self.hex)
            .unwrap_or_default()
            .into_iter()
            .map(|b| if b { '1' } else { '0' })
            .collect();
        bits.as_bytes()
            .chunks(self.bits as usize)
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Blockhash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Hex length of a hash with grid side `bits`.
pub fn expected_len(bits: u32) -> usize {
    (bits as usize * bits as usize) / 4
}

/// Reject grid sides whose block count is not a whole number of hex digits,
/// or that exceed [`MAX_BITS`].
pub fn check_bits(bits: u32) -> HashResult<()> {
    if bits == 0 || bits % 2 != 0 || bits > MAX_BITS {
        return Err(HashError::InvalidGridSize(bits));
    }
    Ok(())
}

/// Compute the blockhash of an RGB or RGBA grid.
///
/// With `quick` set, exact division is used even when the image size is not
/// a multiple of `bits`; block boundaries are then truncated.
pub fn blockhash(grid: &PixelGrid<'_>, bits: u32, quick: bool) -> HashResult<Blockhash> {
    check_bits(bits)?;
    let strategy = Strategy::select(grid.width(), grid.height(), bits, quick);
    tracing::trace!(
        "Hashing {}x{} {} grid with {:?}",
        grid.width(),
        grid.height(),
        grid.mode(),
        strategy
    );

    let blocks = strategy.aggregate(grid, bits)?;
    let bits_seq = threshold(&blocks.sums, blocks.pixels_per_block)?;
    let hex = hex::encode(&bits_seq)?;

    Ok(Blockhash { hex, bits })
}
