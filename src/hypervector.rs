//! The Hypervector Contract
//!
//! One trait, implemented by every representation (and by any accelerated
//! backend), so call sites are written once and representations can be
//! swapped and cross-checked:
//!
//! ```text
//! rand()                  random(p)
//! and(a, b)   or(a, b)    xor(a, b)    not(a)
//! select(cond, when1, when0)
//! majority(vs)            active(a)    hamming(a, b)
//! zero()  one()
//! ```
//!
//! Operands of a binary operation are `&Self`, so mixing encodings is a
//! compile error. At runtime, the only place a foreign encoding can show up
//! is a serialized [`EncodedBhv`], and decoding it into the wrong type fails
//! with [`BhvError::EncodingMismatch`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lane::{self, Lane, LaneVector};
use crate::majority::{self, MajorityEngine};
use crate::rng::RandomSource;
use crate::width::{Unit, BYTES, DIMENSION};
use crate::{BhvError, Result};

/// Physical encoding of a hypervector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// One bool per bit
    Unpacked,
    /// 8 bits per byte
    Packed8,
    /// 64 bits per word
    Packed64,
}

/// Boolean hypervector operations shared by all representations
pub trait Hypervector: LaneVector + Clone + PartialEq + fmt::Debug + Send + Sync {
    /// Physical encoding of this representation
    const ENCODING: Encoding;

    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// All bits false
    fn zero() -> Self {
        lane::constant(<Self::Lane as Lane>::ZERO)
    }

    /// All bits true
    fn one() -> Self {
        lane::constant(<Self::Lane as Lane>::ONE)
    }

    /// Uniform random bits
    fn rand(rng: &mut RandomSource) -> Self;

    /// Each bit independently true with probability `p`
    fn random(rng: &mut RandomSource, p: f64) -> Result<Self> {
        let dist = RandomSource::bernoulli(p)?;
        Ok(Self::from_lane_fn(|_| {
            Self::Lane::from_bit_fn(|_| rng.sample(&dist))
        }))
    }

    // =========================================================================
    // BITWISE ALGEBRA
    // =========================================================================

    #[inline]
    fn and(&self, other: &Self) -> Self {
        lane::and(self, other)
    }

    #[inline]
    fn or(&self, other: &Self) -> Self {
        lane::or(self, other)
    }

    #[inline]
    fn xor(&self, other: &Self) -> Self {
        lane::xor(self, other)
    }

    #[inline]
    fn not(&self) -> Self {
        lane::not(self)
    }

    /// `when1` where `self` is true, `when0` elsewhere
    #[inline]
    fn select(&self, when1: &Self, when0: &Self) -> Self {
        lane::select(self, when1, when0)
    }

    // =========================================================================
    // BUNDLING
    // =========================================================================

    /// Elementwise strict majority.
    ///
    /// For an even number of inputs one random vector is drawn from `rng` and
    /// added, so the result is not a pure function of `vs` in that case.
    fn majority(vs: &[&Self], rng: &mut RandomSource) -> Result<Self> {
        MajorityEngine::default().majority(vs, rng)
    }

    /// Bits set in strictly more than `t` of `vs`
    fn threshold(vs: &[&Self], t: usize) -> Result<Self> {
        MajorityEngine::default().threshold(vs, t)
    }

    /// Each bit taken from a uniformly chosen input
    fn representative(vs: &[&Self], rng: &mut RandomSource) -> Result<Self> {
        majority::representative(vs, rng)
    }

    // =========================================================================
    // METRICS
    // =========================================================================

    /// Population count
    #[inline]
    fn active(&self) -> u32 {
        lane::active(self)
    }

    /// Number of differing bits
    #[inline]
    fn hamming(&self, other: &Self) -> u32 {
        lane::hamming(self, other)
    }

    // =========================================================================
    // BIT ACCESS
    // =========================================================================

    #[inline]
    fn get_bit(&self, index: usize) -> bool {
        debug_assert!(index < DIMENSION);
        lane::get_bit(self, index)
    }

    /// Copy with one bit changed
    fn with_bit(&self, index: usize, value: bool) -> Self {
        debug_assert!(index < DIMENSION);
        lane::with_bit(self, index, value)
    }

    // =========================================================================
    // SERIALIZED FORM
    // =========================================================================

    /// Tagged, encoding-independent byte image
    fn to_encoded(&self) -> EncodedBhv {
        let packed: crate::Packed8Bhv = convert(self);
        EncodedBhv {
            encoding: Self::ENCODING,
            dimension: DIMENSION,
            bytes: packed.bytes().to_vec(),
        }
    }

    /// Decode a tagged image; the tag must name this encoding
    fn from_encoded(encoded: &EncodedBhv) -> Result<Self> {
        if encoded.encoding != Self::ENCODING {
            return Err(BhvError::EncodingMismatch {
                expected: Self::ENCODING,
                got: encoded.encoding,
            });
        }
        if encoded.dimension != DIMENSION {
            return Err(BhvError::DimensionMismatch {
                expected: DIMENSION,
                got: encoded.dimension,
                unit: Unit::Bits,
            });
        }
        let packed = crate::Packed8Bhv::from_bytes(&encoded.bytes)?;
        Ok(convert(&packed))
    }
}

/// Bit-for-bit conversion between any two representations.
///
/// Logical bit `i` lands on lane `i / BITS`, position `i % BITS` of the
/// target, which is the little-endian-within-lane convention every encoding
/// uses.
pub fn convert<S, T>(source: &S) -> T
where
    S: LaneVector,
    T: LaneVector,
{
    let bits = T::Lane::BITS;
    T::from_lane_fn(|i| {
        T::Lane::from_bit_fn(|b| lane::get_bit(source, i * bits + b))
    })
}

// ============================================================================
// ENCODED ENVELOPE
// ============================================================================

/// Serialized hypervector with its encoding and dimension recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedBhv {
    pub encoding: Encoding,
    pub dimension: usize,
    /// Packed8 byte image (bit i = bit i%8 of byte i/8)
    pub bytes: Vec<u8>,
}

impl EncodedBhv {
    /// Whether the payload has the expected length for its dimension
    pub fn is_well_formed(&self) -> bool {
        self.dimension == DIMENSION && self.bytes.len() == BYTES
    }
}

// ============================================================================
// OPERATOR IMPLEMENTATIONS
// ============================================================================

/// `&`, `|`, `^` and `!` for owned and borrowed operands
macro_rules! impl_bitwise_ops {
    ($t:ty) => {
        impl ::std::ops::BitAnd for $t {
            type Output = $t;

            fn bitand(self, rhs: Self) -> Self::Output {
                $crate::lane::and(&self, &rhs)
            }
        }

        impl ::std::ops::BitAnd for &$t {
            type Output = $t;

            fn bitand(self, rhs: Self) -> Self::Output {
                $crate::lane::and(self, rhs)
            }
        }

        impl ::std::ops::BitOr for $t {
            type Output = $t;

            fn bitor(self, rhs: Self) -> Self::Output {
                $crate::lane::or(&self, &rhs)
            }
        }

        impl ::std::ops::BitOr for &$t {
            type Output = $t;

            fn bitor(self, rhs: Self) -> Self::Output {
                $crate::lane::or(self, rhs)
            }
        }

        impl ::std::ops::BitXor for $t {
            type Output = $t;

            fn bitxor(self, rhs: Self) -> Self::Output {
                $crate::lane::xor(&self, &rhs)
            }
        }

        impl ::std::ops::BitXor for &$t {
            type Output = $t;

            fn bitxor(self, rhs: Self) -> Self::Output {
                $crate::lane::xor(self, rhs)
            }
        }

        impl ::std::ops::Not for $t {
            type Output = $t;

            fn not(self) -> Self::Output {
                $crate::lane::not(&self)
            }
        }

        impl ::std::ops::Not for &$t {
            type Output = $t;

            fn not(self) -> Self::Output {
                $crate::lane::not(self)
            }
        }
    };
}

pub(crate) use impl_bitwise_ops;
