//! Word-Packed Hypervector
//!
//! The performance encoding: 8,192 bits in 128 × u64 words, cache-line
//! aligned. Every bitwise operation and every majority gate processes a
//! whole word (64 bit positions) per instruction.
//!
//! # Memory Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ word[0]   │ word[1]    │ ... │ word[126] │ word[127] │
//! │ bits 0-63 │ bits 64-127│     │           │ bits      │
//! │           │            │     │           │ 8128-8191 │
//! └─────────────────────────────────────────────────────┘
//! bit i = (word[i / 64] >> (i % 64)) & 1
//! ```

use std::fmt;

use rand::seq::SliceRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::hypervector::{convert, impl_bitwise_ops, Encoding, Hypervector};
use crate::lane::LaneVector;
use crate::packed8::Packed8Bhv;
use crate::rng::RandomSource;
use crate::unpacked::UnpackedBhv;
use crate::width::{Unit, DIMENSION, HALF_WORD, WORDS};
use crate::{BhvError, Result};

/// An 8,192-bit vector stored as 128 packed u64 words.
#[derive(Clone, PartialEq, Eq, Hash)]
#[repr(C, align(64))]
pub struct Packed64Bhv {
    words: [u64; WORDS],
}

impl Default for Packed64Bhv {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Packed64Bhv {
    /// All bits false
    pub const ZERO: Self = Self { words: [0; WORDS] };

    /// All bits true
    pub const ONE: Self = Self { words: [u64::MAX; WORDS] };

    /// Upper half of every word set (exactly half the bits)
    pub const HALF: Self = Self { words: [HALF_WORD; WORDS] };

    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Create from a word array
    #[inline]
    pub const fn from_word_array(words: [u64; WORDS]) -> Self {
        Self { words }
    }

    /// Create from a slice of u64 words
    pub fn from_words(slice: &[u64]) -> Result<Self> {
        if slice.len() != WORDS {
            return Err(BhvError::DimensionMismatch {
                expected: WORDS,
                got: slice.len(),
                unit: Unit::Words,
            });
        }
        let mut words = [0u64; WORDS];
        words.copy_from_slice(slice);
        Ok(Self { words })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Get the raw words
    #[inline]
    pub fn words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// Density (fraction of bits set)
    #[inline]
    pub fn density(&self) -> f32 {
        crate::metric::density(self)
    }

    // =========================================================================
    // CONVERSIONS
    // =========================================================================

    /// One bool per bit
    pub fn unpack(&self) -> UnpackedBhv {
        convert(self)
    }

    /// Little-endian byte image of the words
    pub fn pack8(&self) -> Packed8Bhv {
        let mut bytes = [0u8; WORDS * 8];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Packed8Bhv::from_byte_array(bytes)
    }

    // =========================================================================
    // PERMUTATION
    // =========================================================================

    /// Swap the upper and lower 32-bit halves of every word (an involution)
    pub fn swap_halves(&self) -> Self {
        Self::from_lane_fn(|i| self.words[i].rotate_left(32))
    }

    /// Pseudorandom permutation of the words, derived from `perm`.
    ///
    /// `perm == 0` is the identity and `permute_words(-p)` undoes
    /// `permute_words(p)`.
    pub fn permute_words(&self, perm: i32) -> Self {
        if perm == 0 {
            return self.clone();
        }

        let permutation = word_permutation(perm.unsigned_abs());
        if perm > 0 {
            Self::from_lane_fn(|i| self.words[permutation[i]])
        } else {
            let mut words = [0u64; WORDS];
            for (i, &p) in permutation.iter().enumerate() {
                words[p] = self.words[i];
            }
            Self { words }
        }
    }
}

/// Word permutation for a seed; the same seed always gives the same shuffle
fn word_permutation(seed: u32) -> [usize; WORDS] {
    let mut permutation: [usize; WORDS] = std::array::from_fn(|i| i);
    permutation.shuffle(&mut StdRng::seed_from_u64(seed as u64));
    permutation
}

// =========================================================================
// TRAIT IMPLEMENTATIONS
// =========================================================================

impl LaneVector for Packed64Bhv {
    type Lane = u64;
    const LANES: usize = WORDS;

    #[inline]
    fn lanes(&self) -> &[u64] {
        &self.words
    }

    #[inline]
    fn from_lane_fn<F: FnMut(usize) -> u64>(f: F) -> Self {
        Self {
            words: std::array::from_fn(f),
        }
    }
}

impl Hypervector for Packed64Bhv {
    const ENCODING: Encoding = Encoding::Packed64;

    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn rand(rng: &mut RandomSource) -> Self {
        Self::from_lane_fn(|_| rng.next_word())
    }
}

impl_bitwise_ops!(Packed64Bhv);

impl From<&Packed8Bhv> for Packed64Bhv {
    fn from(v: &Packed8Bhv) -> Self {
        v.pack64()
    }
}

impl From<Packed8Bhv> for Packed64Bhv {
    fn from(v: Packed8Bhv) -> Self {
        v.pack64()
    }
}

impl From<&UnpackedBhv> for Packed64Bhv {
    fn from(v: &UnpackedBhv) -> Self {
        v.pack64()
    }
}

impl From<UnpackedBhv> for Packed64Bhv {
    fn from(v: UnpackedBhv) -> Self {
        v.pack64()
    }
}

impl fmt::Debug for Packed64Bhv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packed64Bhv({} bits, {} set, density={:.3})",
            DIMENSION,
            self.active(),
            self.density()
        )
    }
}

impl fmt::Display for Packed64Bhv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bhv64[{:016x}...{:016x}]",
            self.words[0],
            self.words[WORDS - 1]
        )
    }
}

// =========================================================================
// SERDE SUPPORT
// =========================================================================

impl serde::Serialize for Packed64Bhv {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.words[..], serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Packed64Bhv {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let words = <Vec<u64> as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_words(&words).map_err(serde::de::Error::custom)
    }
}

// =========================================================================
// TESTS
// =========================================================================
