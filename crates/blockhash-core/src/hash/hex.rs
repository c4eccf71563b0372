//! Hexhash encoding of bit sequences.

use crate::error::{HashError, HashResult};

/// Pack bits MSB-first into lowercase hex, one digit per four bits.
pub fn encode(bits: &[bool]) -> HashResult<String> {
    if bits.len() % 4 != 0 {
        return Err(HashError::InvalidBitCount(bits.len()));
    }

    let mut hex = String::with_capacity(bits.len() / 4);
    for chunk in bits.chunks(4) {
        let nibble = chunk
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        // nibble < 16
        hex.push(char::from_digit(nibble, 16).unwrap_or('0'));
    }
    Ok(hex)
}

/// Expand a hexhash back into its bit sequence.
pub fn decode(hex: &str) -> HashResult<Vec<bool>> {
    let mut bits = Vec::with_capacity(hex.len() * 4);
    for c in hex.chars() {
        let nibble = c
            .to_digit(16)
            .filter(|_| !c.is_ascii_uppercase())
            .ok_or_else(|| HashError::InvalidHexhash(hex.to_string()))?;
        bits.extend((0..4).rev().map(|shift| (nibble >> shift) & 1 == 1));
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_from(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_encode_known_pattern() {
        assert_eq!(encode(&bits_from("1111000011110000")).unwrap(), "f0f0");
    }

    #[test]
    fn test_encode_keeps_leading_zeros() {
        assert_eq!(encode(&bits_from("00000000000000010000")).unwrap(), "00010");
        assert_eq!(encode(&[false; 8]).unwrap(), "00");
        assert_eq!(encode(&[]).unwrap(), "");
    }

    #[test]
    fn test_encode_is_lowercase() {
        assert_eq!(encode(&bits_from("101011001101")).unwrap(), "acd");
    }

    #[test]
    fn test_encode_rejects_partial_nibble() {
        assert_eq!(
            encode(&bits_from("101")).unwrap_err(),
            HashError::InvalidBitCount(3)
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode("a1").unwrap(), bits_from("10100001"));
        assert!(decode("A1").is_err());
        assert!(decode("zz").is_err());
    }
}
