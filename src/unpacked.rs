//! Unpacked Hypervector
//!
//! One `bool` per logical bit. Slowest of the three encodings and the
//! easiest to read, so it doubles as the reference the packed encodings are
//! checked against: its majority and threshold always use per-bit counting.

use std::fmt;

use crate::hypervector::{convert, impl_bitwise_ops, Encoding, Hypervector};
use crate::lane::LaneVector;
use crate::majority::{MajorityEngine, MajorityStrategy};
use crate::packed64::Packed64Bhv;
use crate::packed8::Packed8Bhv;
use crate::rng::RandomSource;
use crate::width::{Unit, DIMENSION};
use crate::{BhvError, Result};

/// An 8,192-bit vector stored as 8,192 bools (heap allocated).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnpackedBhv {
    bits: Box<[bool; DIMENSION]>,
}

impl Default for UnpackedBhv {
    fn default() -> Self {
        Self::zero()
    }
}

impl UnpackedBhv {
    /// Create from a bool slice of exactly `DIMENSION` entries
    pub fn from_bools(bools: &[bool]) -> Result<Self> {
        if bools.len() != DIMENSION {
            return Err(BhvError::DimensionMismatch {
                expected: DIMENSION,
                got: bools.len(),
                unit: Unit::Bits,
            });
        }
        Ok(Self::from_lane_fn(|i| bools[i]))
    }

    /// The bits, in logical order
    #[inline]
    pub fn bits(&self) -> &[bool; DIMENSION] {
        &self.bits
    }

    pub fn pack8(&self) -> Packed8Bhv {
        convert(self)
    }

    pub fn pack64(&self) -> Packed64Bhv {
        convert(self)
    }
}

impl LaneVector for UnpackedBhv {
    type Lane = bool;
    const LANES: usize = DIMENSION;

    #[inline]
    fn lanes(&self) -> &[bool] {
        &self.bits[..]
    }

    fn from_lane_fn<F: FnMut(usize) -> bool>(f: F) -> Self {
        Self {
            bits: Box::new(std::array::from_fn(f)),
        }
    }
}

impl Hypervector for UnpackedBhv {
    const ENCODING: Encoding = Encoding::Unpacked;

    /// Drawn as Packed64 words and unpacked, so a seed gives the same bits
    /// in every encoding
    fn rand(rng: &mut RandomSource) -> Self {
        Packed64Bhv::rand(rng).unpack()
    }

    fn majority(vs: &[&Self], rng: &mut RandomSource) -> Result<Self> {
        MajorityEngine::with_strategy(MajorityStrategy::Counting).majority(vs, rng)
    }

    fn threshold(vs: &[&Self], t: usize) -> Result<Self> {
        MajorityEngine::with_strategy(MajorityStrategy::Counting).threshold(vs, t)
    }
}

impl_bitwise_ops!(UnpackedBhv);

impl From<&Packed64Bhv> for UnpackedBhv {
    fn from(v: &Packed64Bhv) -> Self {
        v.unpack()
    }
}

impl From<Packed64Bhv> for UnpackedBhv {
    fn from(v: Packed64Bhv) -> Self {
        v.unpack()
    }
}

impl From<&Packed8Bhv> for UnpackedBhv {
    fn from(v: &Packed8Bhv) -> Self {
        v.unpack()
    }
}

impl From<Packed8Bhv> for UnpackedBhv {
    fn from(v: Packed8Bhv) -> Self {
        v.unpack()
    }
}

impl fmt::Debug for UnpackedBhv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnpackedBhv({} bits, {} set)", DIMENSION, self.active())
    }
}

impl serde::Serialize for UnpackedBhv {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.bits[..], serializer)
    }
}

impl<'de> serde::Deserialize<'de> for UnpackedBhv {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bools = <Vec<bool> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_bools(&bools).map_err(serde::de::Error::custom)
    }
}
