//! Median thresholding of block sums into bits.

use crate::error::{HashError, HashResult};

/// Half of the nominal per-pixel maximum `256 * 3`.
///
/// Slightly above half of the true maximum (765); kept for hash compatibility.
pub const HALF_PIXEL_VALUE: f64 = 256.0 * 3.0 / 2.0;

/// Number of horizontal bands thresholded independently.
pub const BANDS: usize = 4;

/// Median of a slice; even lengths average the two central values.
///
/// Returns `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Convert row-major block sums into bits, one median per band.
///
/// A block is set when it is brighter than its band's median. Blocks within
/// 1 of the median are also set when the median lies in the bright half of
/// the value range, so flat bands don't collapse to all zeros.
pub fn threshold(sums: &[f64], pixels_per_block: f64) -> HashResult<Vec<bool>> {
    if sums.len() % BANDS != 0 {
        return Err(HashError::InvalidBitCount(sums.len()));
    }

    let half_block_value = pixels_per_block * HALF_PIXEL_VALUE;
    let band_size = sums.len() / BANDS;

    let mut bits = Vec::with_capacity(sums.len());
    if band_size == 0 {
        return Ok(bits);
    }
    for band in sums.chunks(band_size) {
        let m = median(band);
        bits.extend(
            band.iter()
                .map(|&v| v > m || ((v - m).abs() < 1.0 && m > half_block_value)),
        );
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_bands_use_their_own_median() {
        // Each band is [low, high]; band medians differ wildly
        let sums = [1.0, 2.0, 100.0, 200.0, 10.0, 5.0, 0.0, 7.0];
        let bits = threshold(&sums, 1.0).unwrap();
        assert_eq!(
            bits,
            vec![false, true, false, true, true, false, false, true]
        );
    }

    #[test]
    fn test_tie_break_bright_band_sets_bits() {
        let ppb = 4.0;
        let m = ppb * HALF_PIXEL_VALUE + 10.0;
        let bits = threshold(&[m; 8], ppb).unwrap();
        assert!(bits.iter().all(|&b| b));
    }

    #[test]
    fn test_tie_break_dark_band_clears_bits() {
        let ppb = 4.0;
        // Exactly at half_block_value is not "greater than"
        let m = ppb * HALF_PIXEL_VALUE;
        let bits = threshold(&[m; 8], ppb).unwrap();
        assert!(bits.iter().all(|&b| !b));
    }

    #[test]
    fn test_tie_break_tolerance_is_below_one() {
        let ppb = 1.0;
        // Medians 999.75 then 999.0; 998.0 sits exactly 1 below the second
        let sums = [999.5, 1000.0, 998.0, 1000.0, 0.0, 0.0, 0.0, 0.0];
        let bits = threshold(&sums, ppb).unwrap();
        assert_eq!(&bits[..4], &[true, true, false, true]);
    }

    #[test]
    fn test_rejects_length_not_multiple_of_four() {
        let err = threshold(&[1.0; 9], 1.0).unwrap_err();
        assert_eq!(err, HashError::InvalidBitCount(9));
    }
}
