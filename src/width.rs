//! Vector Width Constants
//!
//! 8,192-bit hypervectors: exactly 128 u64 words or 1,024 bytes.
//! No padding in any encoding, so every lane of every vector is a full lane
//! and no operation ever has to mask a partial last word.

// ============================================================================
// VECTOR DIMENSIONS
// ============================================================================

/// Number of logical bits in every vector (2^13)
pub const DIMENSION: usize = 8_192;

/// Number of u64 words: 8192/64 = 128 (exact, no remainder)
pub const WORDS: usize = DIMENSION / 64;

/// Number of bytes: 8192/8 = 1,024
pub const BYTES: usize = DIMENSION / 8;

/// Bits per Packed64 word
pub const BITS_PER_WORD: usize = 64;

/// Bits per Packed8 byte
pub const BITS_PER_BYTE: usize = 8;

const _: () = assert!(DIMENSION % BITS_PER_WORD == 0, "DIMENSION must be a multiple of 64");

// ============================================================================
// STATISTICAL CONSTANTS (Hamming distribution of random vectors)
// ============================================================================

/// Expected Hamming distance between two uniform random vectors = n/2
pub const EXPECTED_RANDOM_DISTANCE: f64 = DIMENSION as f64 / 2.0;

/// Standard deviation: σ = √(n/4) = √2048 ≈ 45.25
pub const HAMMING_STD_DEV: f64 = 45.254_833_995_939_04;

/// Word mask with the upper 32 bits set (the `HALF` constant's word)
pub const HALF_WORD: u64 = u64::MAX << 32;

// ============================================================================
// UNITS
// ============================================================================

/// What a length counts: logical bits, Packed8 bytes or Packed64 words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Bits,
    Bytes,
    Words,
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Unit::Bits => "bits",
            Unit::Bytes => "bytes",
            Unit::Words => "words",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_consistent() {
        assert_eq!(WORDS * BITS_PER_WORD, DIMENSION);
        assert_eq!(BYTES * BITS_PER_BYTE, DIMENSION);
        assert_eq!(BYTES, WORDS * 8);
    }

    #[test]
    fn test_sigma() {
        let sigma = (DIMENSION as f64 / 4.0).sqrt();
        assert!((sigma - HAMMING_STD_DEV).abs() < 1e-9);
    }

    #[test]
    fn test_half_word() {
        assert_eq!(HALF_WORD.count_ones(), 32);
        assert_eq!(HALF_WORD, 0xFFFF_FFFF_0000_0000);
    }
}
