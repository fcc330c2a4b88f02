//! Majority Engine - Boolean-Circuit Bundling
//!
//! Computes the elementwise strict majority (and general thresholds) of N
//! vectors using only whole-lane AND/OR/XOR/NOT gates. One gate on a `u64`
//! lane decides 64 bit positions at once; no per-bit integer counter is ever
//! materialized.
//!
//! # Circuits
//!
//! ```text
//! N = 3     maj3 = ab | bc | ca
//! N = 5     maj5 = a ? (b ? c|d|e : maj3(c,d,e))
//!                    : (b ? maj3(c,d,e) : cde)
//! N = 7     same case split on (a, b), one level deeper
//! N ≥ 9     bit-sliced counter folded left to right:
//!
//!             plane[k] holds bit k of the per-position vote count
//!             add(x):  carry = x
//!                      for k: plane[k], carry = plane[k] ⊕ carry, plane[k] ∧ carry
//!
//!           then an MSB-first comparator against the constant threshold:
//!             t_k = 1:  eq = eq ∧ plane[k]
//!             t_k = 0:  gt = gt ∨ (eq ∧ plane[k]);  eq = eq ∧ ¬plane[k]
//! ```
//!
//! The counter needs ⌈log2(N+1)⌉ lanes of state per word, independent of
//! the dimension, and each input costs one ripple of half adders.
//!
//! # Ties
//!
//! For even N one extra uniform random vector is appended before voting,
//! making the threshold well defined. The result then depends on the random
//! source, not only on the inputs.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::hypervector::Hypervector;
use crate::lane::{Lane, LaneVector};
use crate::rng::RandomSource;
use crate::{BhvConfig, BhvError, Result};

// ============================================================================
// FIXED-N CIRCUITS
// ============================================================================

/// At least 2 of 3 (sum of products)
#[inline(always)]
pub fn majority3<L: Lane>(a: L, b: L, c: L) -> L {
    (a & b) | (b & c) | (c & a)
}

/// At least 2 of 3 via one multiplexer
#[inline(always)]
pub fn majority3_select<L: Lane>(a: L, b: L, c: L) -> L {
    a.select(b | c, b & c)
}

/// At least 3 of 5: OR of all ten 3-subset ANDs, sharing pair terms
#[inline(always)]
pub fn majority5<L: Lane>(a: L, b: L, c: L, d: L, e: L) -> L {
    let ab = a & b;
    let cd = c & d;
    let de = d & e;
    let ce = c & e;

    (b & de) | (a & de)
        | (b & ce) | (a & ce)
        | (b & cd) | (a & cd) | (e & cd)
        | (ab & e) | (ab & d) | (ab & c)
}

/// At least 3 of 5 via case split on (a, b)
#[inline(always)]
pub fn majority5_select<L: Lane>(a: L, b: L, c: L, d: L, e: L) -> L {
    let mcde = majority3_select(c, d, e);
    a.select(
        b.select(c | d | e, mcde),
        b.select(mcde, c & d & e),
    )
}

/// At least 4 of 7 via case split on (a, b), then on (c, d)
#[inline(always)]
pub fn majority7<L: Lane>(a: L, b: L, c: L, d: L, e: L, f: L, g: L) -> L {
    let mefg = majority3_select(e, f, g);
    let mcdefg = majority5_select(c, d, e, f, g);
    a.select(
        // a ∧ b: need 2 of c..g
        b.select(
            c.select(d | e | f | g, d.select(e | f | g, mefg)),
            mcdefg,
        ),
        // ¬a: need 3 of c..g with b, 4 without
        b.select(
            mcdefg,
            c.select(d.select(mefg, e & f & g), d & e & f & g),
        ),
    )
}

// ============================================================================
// GENERAL-N CIRCUIT
// ============================================================================

/// Enough planes for any count representable in `usize`
const MAX_PLANES: usize = usize::BITS as usize;

/// Bit-sliced vote counter: plane `k` holds bit `k` of the count at every
/// position of the lane.
#[derive(Debug, Clone)]
pub struct SlicedCounter<L: Lane> {
    planes: [L; MAX_PLANES],
    width: usize,
    capacity: usize,
    votes: usize,
}

impl<L: Lane> SlicedCounter<L> {
    /// Counter able to hold counts up to `max_count`
    #[inline]
    pub fn with_capacity(max_count: usize) -> Self {
        let width = (usize::BITS - max_count.leading_zeros()).max(1) as usize;
        Self {
            planes: [L::ZERO; MAX_PLANES],
            width,
            capacity: max_count,
            votes: 0,
        }
    }

    /// Number of active planes
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Add one vote per position (ripple of half adders).
    ///
    /// At most `max_count` additions; past that the top carry would be lost.
    #[inline(always)]
    pub fn add(&mut self, votes: L) {
        debug_assert!(
            self.votes < self.capacity,
            "sliced counter holds at most {} votes",
            self.capacity
        );
        self.votes += 1;
        let mut carry = votes;
        for plane in &mut self.planes[..self.width] {
            let sum = *plane ^ carry;
            carry = *plane & carry;
            *plane = sum;
        }
    }

    /// Positions whose count is strictly greater than `threshold`
    #[inline]
    pub fn greater_than(&self, threshold: usize) -> L {
        // Counts never reach 2^width, so a threshold at or above it is unreachable
        if self.width < MAX_PLANES && threshold >> self.width != 0 {
            return L::ZERO;
        }

        let mut gt = L::ZERO;
        let mut eq = L::ONE;
        for k in (0..self.width).rev() {
            let plane = self.planes[k];
            if (threshold >> k) & 1 == 1 {
                eq = eq & plane;
            } else {
                gt = gt | (eq & plane);
                eq = eq & !plane;
            }
        }
        gt
    }

    /// Count at position `index` of the lane (diagnostics and tests)
    pub fn count_at(&self, index: usize) -> usize {
        (0..self.width)
            .filter(|&k| self.planes[k].bit(index))
            .map(|k| 1usize << k)
            .sum()
    }
}

/// Lane `i` of the threshold of `vs`, by the sliced counter circuit
#[inline]
fn threshold_lane<V: LaneVector>(vs: &[&V], threshold: usize, i: usize) -> V::Lane {
    let mut counter = SlicedCounter::with_capacity(vs.len());
    for v in vs {
        counter.add(v.lanes()[i]);
    }
    counter.greater_than(threshold)
}

/// Lane `i` of the threshold of `vs`, by per-bit integer counting
#[inline]
fn counting_lane<V: LaneVector>(vs: &[&V], threshold: usize, i: usize) -> V::Lane {
    V::Lane::from_bit_fn(|b| {
        let count = vs.iter().filter(|v| v.lanes()[i].bit(b)).count();
        count > threshold
    })
}

/// Reference threshold: unpack every position and count.
///
/// This is the oracle the circuits are verified against.
pub fn counting_threshold<V: LaneVector>(vs: &[&V], threshold: usize) -> V {
    V::from_lane_fn(|i| counting_lane(vs, threshold, i))
}

// ============================================================================
// MAJORITY ENGINE
// ============================================================================

/// How majority and threshold are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MajorityStrategy {
    /// Whole-lane boolean circuits
    #[default]
    Circuit,
    /// Per-bit population counting (reference)
    Counting,
}

/// Majority / threshold evaluator
#[derive(Debug, Clone, Default)]
pub struct MajorityEngine {
    strategy: MajorityStrategy,
    /// Split the lanes across threads (effective with the `rayon` feature)
    parallel: bool,
}

impl MajorityEngine {
    /// Circuit strategy, sequential
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an explicit strategy
    pub fn with_strategy(strategy: MajorityStrategy) -> Self {
        Self {
            strategy,
            parallel: false,
        }
    }

    /// Engine as described by a configuration
    pub fn from_config(config: &BhvConfig) -> Self {
        Self {
            strategy: config.majority_strategy,
            parallel: config.parallel,
        }
    }

    /// Enable or disable lane-parallel evaluation
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn strategy(&self) -> MajorityStrategy {
        self.strategy
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Elementwise strict majority of `vs`.
    ///
    /// - empty input: `EmptyMajorityInput`
    /// - one input: returned unchanged
    /// - even N: one random vector from `rng` is appended first
    pub fn majority<V: Hypervector>(&self, vs: &[&V], rng: &mut RandomSource) -> Result<V> {
        match vs.len() {
            0 => Err(BhvError::EmptyMajorityInput),
            1 => Ok(vs[0].clone()),
            n if n % 2 == 0 => {
                debug!(inputs = n, "even majority, injecting tie-break vector");
                let tie_breaker = V::rand(rng);
                let mut extended: Vec<&V> = Vec::with_capacity(n + 1);
                extended.extend_from_slice(vs);
                extended.push(&tie_breaker);
                Ok(self.odd_majority(&extended))
            }
            _ => Ok(self.odd_majority(vs)),
        }
    }

    /// Bits set in strictly more than `threshold` of `vs`
    pub fn threshold<V: Hypervector>(&self, vs: &[&V], threshold: usize) -> Result<V> {
        if vs.is_empty() {
            return Err(BhvError::EmptyMajorityInput);
        }
        trace!(inputs = vs.len(), threshold, strategy = ?self.strategy, "threshold");
        Ok(match self.strategy {
            MajorityStrategy::Circuit => {
                self.lanewise(vs, |vs, i| threshold_lane(vs, threshold, i))
            }
            MajorityStrategy::Counting => {
                self.lanewise(vs, |vs, i| counting_lane(vs, threshold, i))
            }
        })
    }

    fn odd_majority<V: Hypervector>(&self, vs: &[&V]) -> V {
        let n = vs.len();
        debug_assert!(n % 2 == 1);
        trace!(inputs = n, strategy = ?self.strategy, "majority");

        if self.strategy == MajorityStrategy::Counting {
            return self.lanewise(vs, |vs, i| counting_lane(vs, n / 2, i));
        }

        match n {
            1 => vs[0].clone(),
            3 => self.lanewise(vs, |vs, i| {
                majority3(vs[0].lanes()[i], vs[1].lanes()[i], vs[2].lanes()[i])
            }),
            5 => self.lanewise(vs, |vs, i| {
                majority5_select(
                    vs[0].lanes()[i],
                    vs[1].lanes()[i],
                    vs[2].lanes()[i],
                    vs[3].lanes()[i],
                    vs[4].lanes()[i],
                )
            }),
            7 => self.lanewise(vs, |vs, i| {
                majority7(
                    vs[0].lanes()[i],
                    vs[1].lanes()[i],
                    vs[2].lanes()[i],
                    vs[3].lanes()[i],
                    vs[4].lanes()[i],
                    vs[5].lanes()[i],
                    vs[6].lanes()[i],
                )
            }),
            _ => self.lanewise(vs, |vs, i| threshold_lane(vs, n / 2, i)),
        }
    }

    /// Build the output lane by lane; lanes are independent
    fn lanewise<V, F>(&self, vs: &[&V], f: F) -> V
    where
        V: Hypervector,
        F: Fn(&[&V], usize) -> V::Lane + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            if self.parallel {
                use rayon::prelude::*;

                let lanes: Vec<V::Lane> = (0..V::LANES)
                    .into_par_iter()
                    .map(|i| f(vs, i))
                    .collect();
                return V::from_lane_fn(|i| lanes[i]);
            }
        }

        V::from_lane_fn(|i| f(vs, i))
    }
}

// ============================================================================
// REPRESENTATIVE SAMPLING
// ============================================================================

/// Each output bit copied from a uniformly chosen input at that position
pub fn representative<V: Hypervector>(vs: &[&V], rng: &mut RandomSource) -> Result<V> {
    match vs.len() {
        0 => Err(BhvError::EmptyMajorityInput),
        1 => Ok(vs[0].clone()),
        2 => Ok(V::rand(rng).select(vs[0], vs[1])),
        n => Ok(V::from_lane_fn(|i| {
            V::Lane::from_bit_fn(|b| vs[rng.index(n)].lanes()[i].bit(b))
        })),
    }
}
