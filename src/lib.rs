//! # BHV - Boolean Hypervectors
//!
//! Fixed-dimension bit vectors as the atomic unit of hyperdimensional
//! computing, with:
//! - **Three encodings** of the same logical bits (one-bool-per-bit,
//!   byte-packed, word-packed) and lossless conversion between them
//! - **Bitwise algebra** (AND, OR, XOR, NOT, select) computed a lane at a time
//! - **Boolean-circuit majority** over N vectors, built only from whole-lane
//!   bitwise gates, never from per-bit integer counters
//! - **Metrics**: population count and Hamming distance
//!
//! ## The Core Insight
//!
//! Bundling N vectors by majority vote is usually written as a per-bit sum:
//!
//! ```text
//! Per-bit counting:              Lane circuit:
//! ─────────────────              ─────────────────────────
//! for bit in 0..8192:            for word in 0..128:
//!     count = Σ v[k][bit]            out = maj(v[0][w], .., v[N-1][w])
//!     out[bit] = count > N/2
//!
//! 8192 × N scalar adds           128 × O(N) 64-bit gates
//! ```
//!
//! Every gate of the circuit processes 64 bit positions at once, so the cost
//! of a majority is O(N) word operations per word, independent of how the
//! bits inside a word are distributed.
//!
//! ## Vector Field Operations
//!
//! ```text
//! Bind:   A ⊗ B = A ⊕ B           (combine concepts)
//! Unbind: A ⊗ B ⊗ B = A           (recover component)
//! Bundle: majority(A, B, C)        (create prototype)
//! Mux:    C ? A : B = B ⊕ (C ∧ (A ⊕ B))
//! ```

// === Dimension ===
pub mod width;

// === Core primitives ===
pub mod lane;
pub mod rng;
pub mod hypervector;

// === Encodings ===
pub mod unpacked;
pub mod packed8;
pub mod packed64;

// === Engines ===
pub mod majority;
pub mod metric;

// ========================================================================
// Re-exports
// ========================================================================

pub use width::{DIMENSION, WORDS, BYTES, Unit};
pub use lane::{Lane, LaneVector};
pub use rng::RandomSource;
pub use hypervector::{Hypervector, Encoding, EncodedBhv};
pub use unpacked::UnpackedBhv;
pub use packed8::Packed8Bhv;
pub use packed64::Packed64Bhv;
pub use majority::{MajorityEngine, MajorityStrategy};
pub use metric::{hamming_to_similarity, similarity_to_hamming};

/// Error types for BHV operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BhvError {
    #[error("Vector dimension mismatch: expected {expected} {unit}, got {got}")]
    DimensionMismatch { expected: usize, got: usize, unit: Unit },

    #[error("Majority of an empty list of vectors is undefined")]
    EmptyMajorityInput,

    #[error("Activation probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Encoding mismatch: expected {expected:?}, got {got:?}")]
    EncodingMismatch { expected: Encoding, got: Encoding },
}

pub type Result<T> = std::result::Result<T, BhvError>;

/// Global configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BhvConfig {
    /// Seed for the random source (None: seed from OS entropy)
    pub seed: Option<u64>,
    /// How `majority` is evaluated for packed encodings
    pub majority_strategy: MajorityStrategy,
    /// Split majority work across threads (needs the `rayon` feature)
    pub parallel: bool,
}

impl Default for BhvConfig {
    fn default() -> Self {
        Self {
            seed: None,
            majority_strategy: MajorityStrategy::Circuit,
            parallel: false,
        }
    }
}
