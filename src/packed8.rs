//! Byte-Packed Hypervector
//!
//! 8,192 bits in 1,024 bytes. The byte sequence is exactly the
//! little-endian image of the Packed64 words, so converting between the two
//! packed encodings never touches individual bits:
//!
//! ```text
//! byte[8w + k] = (word[w] >> (8k)) & 0xFF
//! bit i        = (byte[i / 8] >> (i % 8)) & 1
//! ```

use std::fmt;

use crate::hypervector::{convert, impl_bitwise_ops, Encoding, Hypervector};
use crate::lane::LaneVector;
use crate::packed64::Packed64Bhv;
use crate::rng::RandomSource;
use crate::unpacked::UnpackedBhv;
use crate::width::{Unit, BYTES, DIMENSION, WORDS};
use crate::{BhvError, Result};

/// An 8,192-bit vector stored as 1,024 bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Packed8Bhv {
    bytes: [u8; BYTES],
}

impl Default for Packed8Bhv {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Packed8Bhv {
    /// All bits false
    pub const ZERO: Self = Self { bytes: [0; BYTES] };

    /// All bits true
    pub const ONE: Self = Self { bytes: [u8::MAX; BYTES] };

    /// Create from a byte array
    #[inline]
    pub const fn from_byte_array(bytes: [u8; BYTES]) -> Self {
        Self { bytes }
    }

    /// Create from a byte slice
    pub fn from_bytes(slice: &[u8]) -> Result<Self> {
        if slice.len() != BYTES {
            return Err(BhvError::DimensionMismatch {
                expected: BYTES,
                got: slice.len(),
                unit: Unit::Bytes,
            });
        }
        let mut bytes = [0u8; BYTES];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// Get the raw bytes
    #[inline]
    pub fn bytes(&self) -> &[u8; BYTES] {
        &self.bytes
    }

    /// One bool per bit
    pub fn unpack(&self) -> UnpackedBhv {
        convert(self)
    }

    /// Reassemble little-endian words
    pub fn pack64(&self) -> Packed64Bhv {
        let mut words = [0u64; WORDS];
        for (word, chunk) in words.iter_mut().zip(self.bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *word = u64::from_le_bytes(le);
        }
        Packed64Bhv::from_word_array(words)
    }
}

impl LaneVector for Packed8Bhv {
    type Lane = u8;
    const LANES: usize = BYTES;

    #[inline]
    fn lanes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn from_lane_fn<F: FnMut(usize) -> u8>(f: F) -> Self {
        Self {
            bytes: std::array::from_fn(f),
        }
    }
}

impl Hypervector for Packed8Bhv {
    const ENCODING: Encoding = Encoding::Packed8;

    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    /// Same stream consumption as `Packed64Bhv::rand`, so a seed yields the
    /// same logical vector in both encodings
    fn rand(rng: &mut RandomSource) -> Self {
        Packed64Bhv::rand(rng).pack8()
    }
}

impl_bitwise_ops!(Packed8Bhv);

impl From<&Packed64Bhv> for Packed8Bhv {
    fn from(v: &Packed64Bhv) -> Self {
        v.pack8()
    }
}

impl From<Packed64Bhv> for Packed8Bhv {
    fn from(v: Packed64Bhv) -> Self {
        v.pack8()
    }
}

impl From<&UnpackedBhv> for Packed8Bhv {
    fn from(v: &UnpackedBhv) -> Self {
        v.pack8()
    }
}

impl From<UnpackedBhv> for Packed8Bhv {
    fn from(v: UnpackedBhv) -> Self {
        v.pack8()
    }
}

impl fmt::Debug for Packed8Bhv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packed8Bhv({} bits, {} set)", DIMENSION, self.active())
    }
}

impl serde::Serialize for Packed8Bhv {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.bytes)
    }
}

impl<'de> serde::Deserialize<'de> for Packed8Bhv {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = <Vec<u8> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Packed8Bhv::ZERO.active(), 0);
        assert_eq!(Packed8Bhv::ONE.active() as usize, DIMENSION);
        assert_eq!(Packed8Bhv::ONE.pack64(), Packed64Bhv::ONE);
        assert_eq!(Packed8Bhv::ZERO.unpack(), UnpackedBhv::zero());
    }

    #[test]
    fn test_bit_order() {
        let v = Packed8Bhv::ZERO.with_bit(3, true).with_bit(8, true);
        assert_eq!(v.bytes()[0], 0b0000_1000);
        assert_eq!(v.bytes()[1], 0b0000_0001);
        assert!(v.unpack().get_bit(3));
        assert!(v.unpack().get_bit(8));
        assert!(v.pack64().get_bit(3));
        assert_eq!(v.pack64().words()[0], (1 << 3) | (1 << 8));
    }

    #[test]
    fn test_rand_matches_packed64_stream() {
        let a = Packed8Bhv::rand(&mut RandomSource::from_seed(21));
        let b = Packed64Bhv::rand(&mut RandomSource::from_seed(21));
        assert_eq!(a.pack64(), b);
        assert_eq!(Packed8Bhv::from(&b), a);
    }

    #[test]
    fn test_algebra_agrees_with_packed64() {
        let mut rng = RandomSource::from_seed(22);
        let a = Packed8Bhv::rand(&mut rng);
        let b = Packed8Bhv::rand(&mut rng);
        let c = Packed8Bhv::rand(&mut rng);
        let (a64, b64, c64) = (a.pack64(), b.pack64(), c.pack64());

        assert_eq!(a.and(&b).pack64(), a64.and(&b64));
        assert_eq!(a.or(&b).pack64(), a64.or(&b64));
        assert_eq!(a.xor(&b).pack64(), a64.xor(&b64));
        assert_eq!(Hypervector::not(&a).pack64(), Hypervector::not(&a64));
        assert_eq!(a.select(&b, &c).pack64(), a64.select(&b64, &c64));
        assert_eq!(a.hamming(&b), a64.hamming(&b64));
        assert_eq!(a.active(), a64.active());
    }

    #[test]
    fn test_from_bytes_length_checked() {
        assert_eq!(
            Packed8Bhv::from_bytes(&[0u8; 10]).unwrap_err(),
            BhvError::DimensionMismatch { expected: BYTES, got: 10, unit: Unit::Bytes }
        );
        let v = Packed8Bhv::from_bytes(&[0xA5; BYTES]).unwrap();
        assert_eq!(v.active() as usize, DIMENSION / 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut rng = RandomSource::from_seed(23);
        let v = Packed8Bhv::rand(&mut rng);
        let json = serde_json::to_string(&v).unwrap();
        let back: Packed8Bhv = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
