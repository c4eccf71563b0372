//! Block aggregation: reduce a pixel grid to `bits × bits` brightness sums.
//!
//! Two strategies exist. Exact division sums whole pixels inside integer
//! block rectangles. Weighted distribution handles sizes that do not divide
//! evenly by splitting each pixel's brightness across the (up to four)
//! blocks its area overlaps.

use super::grid::PixelGrid;
use super::sampler::Sampler;
use super::MAX_BITS;
use crate::error::{HashError, HashResult};

/// Aggregation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Integer block rectangles, truncated when sizes don't divide evenly
    ExactDivision,
    /// Sub-pixel weighting across block boundaries
    WeightedDistribution,
}

impl Strategy {
    /// Choose the strategy for an image of the given size.
    ///
    /// Quick mode always uses exact division.
    pub fn select(width: u32, height: u32, bits: u32, quick: bool) -> Self {
        let even = |len: u32| len.checked_rem(bits) == Some(0);
        if quick || (even(width) && even(height)) {
            Self::ExactDivision
        } else {
            Self::WeightedDistribution
        }
    }

    /// Aggregate the grid into `bits²` row-major block sums.
    pub fn aggregate(self, grid: &PixelGrid<'_>, bits: u32) -> HashResult<BlockGrid> {
        if bits == 0 || bits > MAX_BITS {
            return Err(HashError::InvalidGridSize(bits));
        }
        if grid.width() == 0 || grid.height() == 0 {
            return Err(HashError::EmptyImage);
        }
        let sampler = Sampler::for_grid(grid)?;
        Ok(match self {
            Self::ExactDivision => aggregate_exact(grid, bits, sampler),
            Self::WeightedDistribution => aggregate_weighted(grid, bits, sampler),
        })
    }
}

/// Row-major block sums plus the (possibly fractional) pixel count per block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGrid {
    pub sums: Vec<f64>,
    pub pixels_per_block: f64,
}

fn aggregate_exact(grid: &PixelGrid<'_>, bits: u32, sampler: Sampler) -> BlockGrid {
    let block_w = grid.width() / bits;
    let block_h = grid.height() / bits;

    let mut sums = Vec::with_capacity(bits as usize * bits as usize);
    for by in 0..bits {
        for bx in 0..bits {
            let mut value: u64 = 0;
            for iy in 0..block_h {
                for ix in 0..block_w {
                    let x = bx * block_w + ix;
                    let y = by * block_h + iy;
                    value += sampler.value(grid, x, y) as u64;
                }
            }
            sums.push(value as f64);
        }
    }

    BlockGrid {
        sums,
        pixels_per_block: block_w as f64 * block_h as f64,
    }
}

/// How one pixel row or column splits between neighbouring blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    first: usize,
    second: usize,
    first_weight: f64,
    second_weight: f64,
}

/// Per-position spans along one axis of `len` pixels cut into `bits` blocks.
fn spans(len: u32, bits: u32) -> Vec<Span> {
    let last = bits as usize - 1;

    if len % bits == 0 {
        let block = len / bits;
        return (0..len)
            .map(|i| {
                let idx = (i / block) as usize;
                Span {
                    first: idx,
                    second: idx,
                    first_weight: 1.0,
                    second_weight: 0.0,
                }
            })
            .collect();
    }

    let block = len as f64 / bits as f64;
    (0..len)
        .map(|i| {
            // Position of the pixel's far edge within its block.
            let edge = (i + 1) as f64 % block;
            let (whole, frac) = (edge.trunc(), edge.fract());

            // Float rounding can push an index to `bits`.
            let first = ((i as f64 / block).floor() as usize).min(last);
            let second = if whole > 0.0 || i + 1 == len {
                first
            } else {
                ((i as f64 / block).ceil() as usize).min(last)
            };

            Span {
                first,
                second,
                first_weight: 1.0 - frac,
                second_weight: frac,
            }
        })
        .collect()
}

fn aggregate_weighted(grid: &PixelGrid<'_>, bits: u32, sampler: Sampler) -> BlockGrid {
    let stride = bits as usize;
    let rows = spans(grid.height(), bits);
    let cols = spans(grid.width(), bits);

    let mut sums = vec![0.0f64; stride * stride];
    for (y, row) in rows.iter().enumerate() {
        for (x, col) in cols.iter().enumerate() {
            let value = sampler.value(grid, x as u32, y as u32) as f64;

            sums[row.first * stride + col.first] += value * row.first_weight * col.first_weight;
            sums[row.first * stride + col.second] += value * row.first_weight * col.second_weight;
            sums[row.second * stride + col.first] += value * row.second_weight * col.first_weight;
            sums[row.second * stride + col.second] +=
                value * row.second_weight * col.second_weight;
        }
    }

    let block_w = grid.width() as f64 / bits as f64;
    let block_h = grid.height() as f64 / bits as f64;
    BlockGrid {
        sums,
        pixels_per_block: block_w * block_h,
    }
}
