//! Lane Algebra - the Bitwise Algebra Core
//!
//! Every encoding is a fixed-length array of *lanes*: `bool` (1 bit),
//! `u8` (8 bits) or `u64` (64 bits). Boolean operations on vectors are the
//! same operation applied lane by lane, so they are written once here and
//! shared by all encodings:
//!
//! ```text
//! Unpacked:  [bool; 8192]  →  8192 lane ops per vector op
//! Packed8:   [u8;   1024]  →  1024 lane ops
//! Packed64:  [u64;   128]  →   128 lane ops
//! ```
//!
//! The Majority Engine is built on the same `Lane` trait, which is what
//! makes one gate of its circuit process a whole word of bit positions.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

// ============================================================================
// LANE
// ============================================================================

/// A unit of storage holding `BITS` boolean positions side by side.
pub trait Lane:
    Copy
    + Eq
    + fmt::Debug
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Bit positions per lane
    const BITS: usize;
    /// All positions false
    const ZERO: Self;
    /// All positions true
    const ONE: Self;

    /// Number of true positions
    fn count_ones(self) -> u32;

    /// Position `index` (little-endian within the lane)
    fn bit(self, index: usize) -> bool;

    /// Build a lane position by position
    fn from_bit_fn<F: FnMut(usize) -> bool>(f: F) -> Self;

    /// Multiplexer: `when1` where `self` is true, `when0` elsewhere.
    ///
    /// `when0 ^ (cond & (when1 ^ when0))` needs three gates and no NOT.
    #[inline(always)]
    fn select(self, when1: Self, when0: Self) -> Self {
        when0 ^ (self & (when1 ^ when0))
    }
}

impl Lane for bool {
    const BITS: usize = 1;
    const ZERO: Self = false;
    const ONE: Self = true;

    #[inline(always)]
    fn count_ones(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn bit(self, index: usize) -> bool {
        debug_assert!(index < Self::BITS);
        self
    }

    #[inline]
    fn from_bit_fn<F: FnMut(usize) -> bool>(mut f: F) -> Self {
        f(0)
    }
}

macro_rules! impl_int_lane {
    ($t:ty) => {
        impl Lane for $t {
            const BITS: usize = <$t>::BITS as usize;
            const ZERO: Self = 0;
            const ONE: Self = <$t>::MAX;

            #[inline(always)]
            fn count_ones(self) -> u32 {
                <$t>::count_ones(self)
            }

            #[inline(always)]
            fn bit(self, index: usize) -> bool {
                debug_assert!(index < <Self as Lane>::BITS);
                (self >> index) & 1 == 1
            }

            #[inline]
            fn from_bit_fn<F: FnMut(usize) -> bool>(mut f: F) -> Self {
                let mut lane: $t = 0;
                for index in 0..<Self as Lane>::BITS {
                    if f(index) {
                        lane |= 1 << index;
                    }
                }
                lane
            }
        }
    };
}

impl_int_lane!(u8);
impl_int_lane!(u64);

// ============================================================================
// LANE VECTOR
// ============================================================================

/// A fixed-dimension vector viewed as a sequence of lanes.
pub trait LaneVector: Sized {
    type Lane: Lane;

    /// Number of lanes (DIMENSION / Lane::BITS)
    const LANES: usize;

    /// The lanes, in logical bit order
    fn lanes(&self) -> &[Self::Lane];

    /// Build a vector lane by lane
    fn from_lane_fn<F: FnMut(usize) -> Self::Lane>(f: F) -> Self;
}

// ============================================================================
// ELEMENTWISE OPERATIONS
// ============================================================================

#[inline]
pub fn map1<V, F>(a: &V, f: F) -> V
where
    V: LaneVector,
    F: Fn(V::Lane) -> V::Lane,
{
    let a = a.lanes();
    V::from_lane_fn(|i| f(a[i]))
}

#[inline]
pub fn map2<V, F>(a: &V, b: &V, f: F) -> V
where
    V: LaneVector,
    F: Fn(V::Lane, V::Lane) -> V::Lane,
{
    let (a, b) = (a.lanes(), b.lanes());
    V::from_lane_fn(|i| f(a[i], b[i]))
}

#[inline]
pub fn map3<V, F>(a: &V, b: &V, c: &V, f: F) -> V
where
    V: LaneVector,
    F: Fn(V::Lane, V::Lane, V::Lane) -> V::Lane,
{
    let (a, b, c) = (a.lanes(), b.lanes(), c.lanes());
    V::from_lane_fn(|i| f(a[i], b[i], c[i]))
}

#[inline]
pub fn and<V: LaneVector>(a: &V, b: &V) -> V {
    map2(a, b, |x, y| x & y)
}

#[inline]
pub fn or<V: LaneVector>(a: &V, b: &V) -> V {
    map2(a, b, |x, y| x | y)
}

#[inline]
pub fn xor<V: LaneVector>(a: &V, b: &V) -> V {
    map2(a, b, |x, y| x ^ y)
}

#[inline]
pub fn not<V: LaneVector>(a: &V) -> V {
    map1(a, |x| !x)
}

#[inline]
pub fn select<V: LaneVector>(cond: &V, when1: &V, when0: &V) -> V {
    map3(cond, when1, when0, |c, t, f| c.select(t, f))
}

#[inline]
pub fn constant<V: LaneVector>(lane: V::Lane) -> V {
    V::from_lane_fn(|_| lane)
}

/// Total number of true bits
#[inline]
pub fn active<V: LaneVector>(a: &V) -> u32 {
    a.lanes().iter().map(|l| l.count_ones()).sum()
}

/// popcount(a ⊕ b) without materializing the XOR vector
#[inline]
pub fn hamming<V: LaneVector>(a: &V, b: &V) -> u32 {
    a.lanes()
        .iter()
        .zip(b.lanes())
        .map(|(&x, &y)| (x ^ y).count_ones())
        .sum()
}

/// Logical bit `index` of the vector
#[inline]
pub fn get_bit<V: LaneVector>(v: &V, index: usize) -> bool {
    let bits = V::Lane::BITS;
    v.lanes()[index / bits].bit(index % bits)
}

/// Copy of `v` with logical bit `index` set to `value`
pub fn with_bit<V: LaneVector>(v: &V, index: usize, value: bool) -> V {
    let bits = V::Lane::BITS;
    let (target_lane, target_bit) = (index / bits, index % bits);
    let lanes = v.lanes();
    V::from_lane_fn(|i| {
        if i == target_lane {
            let lane = lanes[i];
            V::Lane::from_bit_fn(|b| if b == target_bit { value } else { lane.bit(b) })
        } else {
            lanes[i]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_truth_table() {
        for cond in [false, true] {
            for t in [false, true] {
                for f in [false, true] {
                    let expected = if cond { t } else { f };
                    assert_eq!(cond.select(t, f), expected);
                }
            }
        }
    }

    #[test]
    fn test_select_word() {
        let cond = 0xFF00_FF00_FF00_FF00u64;
        let t = 0xAAAA_AAAA_AAAA_AAAAu64;
        let f = 0x5555_5555_5555_5555u64;
        assert_eq!(cond.select(t, f), (cond & t) | (!cond & f));
    }

    #[test]
    fn test_lane_constants() {
        assert_eq!(<u64 as Lane>::ONE.count_ones(), 64);
        assert_eq!(<u8 as Lane>::ONE.count_ones(), 8);
        assert_eq!(<bool as Lane>::ONE.count_ones(), 1);
        assert_eq!(<u64 as Lane>::ZERO.count_ones(), 0);
    }

    #[test]
    fn test_lane_bits() {
        assert_eq!(<bool as Lane>::BITS, 1usize);
        assert_eq!(<u8 as Lane>::BITS, 8usize);
        assert_eq!(<u64 as Lane>::BITS, 64usize);
        assert!(u64::MAX.bit(63));
        assert_eq!(u8::from_bit_fn(|i| i == 7), 0x80);
    }

    #[test]
    fn test_bit_little_endian() {
        let lane = 0b0000_0101u8;
        assert!(lane.bit(0));
        assert!(!lane.bit(1));
        assert!(lane.bit(2));
        assert!(!lane.bit(7));
    }

    #[test]
    fn test_from_bit_fn_roundtrip() {
        let word = 0xDEAD_BEEF_0123_4567u64;
        let rebuilt = u64::from_bit_fn(|i| word.bit(i));
        assert_eq!(rebuilt, word);

        let byte = 0x9Cu8;
        assert_eq!(u8::from_bit_fn(|i| byte.bit(i)), byte);
    }
}
