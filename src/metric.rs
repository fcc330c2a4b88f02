//! Similarity Metrics
//!
//! Population count and Hamming distance live on [`Hypervector`] itself;
//! this module maps distances onto scales that are easier to compare:
//!
//! ```text
//! similarity = 1 - d / D          (1.0 identical, 0.5 unrelated, 0.0 inverse)
//! sigmas     = (D/2 - d) / √(D/4)  (how far from a random pair)
//! ```

use crate::hypervector::Hypervector;
use crate::width::{DIMENSION, EXPECTED_RANDOM_DISTANCE, HAMMING_STD_DEV};

/// Convert Hamming distance to similarity (0.0 - 1.0)
#[inline]
pub fn hamming_to_similarity(distance: u32) -> f32 {
    1.0 - (distance as f32 / DIMENSION as f32)
}

/// Convert similarity to approximate Hamming distance.
///
/// NaN carries no information and maps to the distance of unrelated vectors.
#[inline]
pub fn similarity_to_hamming(similarity: f32) -> u32 {
    if similarity.is_nan() {
        return DIMENSION as u32 / 2;
    }
    ((1.0 - similarity.clamp(0.0, 1.0)) * DIMENSION as f32).round() as u32
}

/// Standard deviations by which `distance` falls below the expected
/// distance of two uniform random vectors. Positive means closer than chance.
#[inline]
pub fn sigmas_from_random(distance: u32) -> f64 {
    (EXPECTED_RANDOM_DISTANCE - distance as f64) / HAMMING_STD_DEV
}

/// Similarity of two vectors
#[inline]
pub fn similarity<V: Hypervector>(a: &V, b: &V) -> f32 {
    hamming_to_similarity(a.hamming(b))
}

/// Fraction of bits set
#[inline]
pub fn density<V: Hypervector>(v: &V) -> f32 {
    v.active() as f32 / DIMENSION as f32
}

/// Index and distance of the entry of `candidates` closest to `query`.
///
/// Ties go to the earliest index. `None` for an empty candidate list.
pub fn nearest<V: Hypervector>(query: &V, candidates: &[&V]) -> Option<(usize, u32)> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (i, query.hamming(c)))
        .min_by_key(|&(i, d)| (d, i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Packed64Bhv, Packed8Bhv, RandomSource};

    #[test]
    fn test_similarity_conversion() {
        assert_eq!(hamming_to_similarity(0), 1.0);
        assert_eq!(hamming_to_similarity(DIMENSION as u32), 0.0);
        assert_eq!(hamming_to_similarity(DIMENSION as u32 / 2), 0.5);

        assert_eq!(similarity_to_hamming(1.0), 0);
        assert_eq!(similarity_to_hamming(0.5), DIMENSION as u32 / 2);
        assert_eq!(similarity_to_hamming(-3.0), DIMENSION as u32);
        assert_eq!(similarity_to_hamming(f32::NAN), DIMENSION as u32 / 2);
        for d in [0u32, 1, 100, 4096, 8191] {
            assert_eq!(similarity_to_hamming(hamming_to_similarity(d)), d);
        }
    }

    #[test]
    fn test_sigmas() {
        assert_eq!(sigmas_from_random(DIMENSION as u32 / 2), 0.0);
        assert!(sigmas_from_random(0) > 90.0);
        assert!(sigmas_from_random(DIMENSION as u32) < -90.0);
    }

    #[test]
    fn test_random_pair_is_near_chance() {
        let mut rng = RandomSource::from_seed(41);
        let a = Packed64Bhv::rand(&mut rng);
        let b = Packed64Bhv::rand(&mut rng);
        assert!(sigmas_from_random(a.hamming(&b)).abs() < 6.0);
        assert!((similarity(&a, &b) - 0.5).abs() < 0.05);
        assert!((density(&a) - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_nearest() {
        let mut rng = RandomSource::from_seed(42);
        let target = Packed8Bhv::rand(&mut rng);
        let noise = Packed8Bhv::rand(&mut rng);
        let close = target.with_bit(0, !target.get_bit(0));

        assert_eq!(nearest(&target, &[]), None);
        assert_eq!(nearest(&target, &[&noise, &close]), Some((1, 1)));
        assert_eq!(nearest(&target, &[&noise, &target, &target]), Some((1, 0)));
    }
}
