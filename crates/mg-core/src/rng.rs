//! Random number generation for level generation
//!
//! Uses a seeded ChaCha RNG so that a level can be regenerated from its seed.
//! Every stage of the pipeline takes a `&mut MapRng`; there is no global source.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Map generation random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - a restored RNG restarts from its seed.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for MapRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MapRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(MapRng::new(seed))
    }
}

impl MapRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform integer in `lo..=hi`
    ///
    /// Returns `lo` when the range is empty.
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform count in `lo..=hi`, `lo` when the range is empty
    pub fn between(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Uniform float in `lo..=hi`
    pub fn fraction(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Returns true with probability `p` (clamped to 0..=1)
    pub fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen_bool(p)
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Raw 64 bits, used as a tie-break key
    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }

    /// Shuffle a slice in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl Default for MapRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = MapRng::new(42);
        for _ in 0..1000 {
            let n = rng.rn2(10);
            assert!(n < 10);
        }
    }

    #[test]
    fn test_range_inclusive() {
        let mut rng = MapRng::new(42);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..1000 {
            let n = rng.range(3, 5);
            assert!((3..=5).contains(&n));
            seen_lo |= n == 3;
            seen_hi |= n == 5;
        }
        assert!(seen_lo && seen_hi);
        assert_eq!(rng.range(7, 7), 7);
        assert_eq!(rng.range(9, 2), 9);
    }

    #[test]
    fn test_between_full_width() {
        let mut rng = MapRng::new(8);
        for _ in 0..100 {
            assert!(rng.between(u32::MAX - 1, u32::MAX) >= u32::MAX - 1);
        }
        assert_eq!(rng.between(u32::MAX, u32::MAX), u32::MAX);
        assert_eq!(rng.between(4, 1), 4);
    }

    #[test]
    fn test_fraction_bounds() {
        let mut rng = MapRng::new(7);
        for _ in 0..1000 {
            let f = rng.fraction(0.25, 0.75);
            assert!((0.25..=0.75).contains(&f));
        }
        assert_eq!(rng.fraction(0.5, 0.5), 0.5);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = MapRng::new(1);
        for _ in 0..100 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = MapRng::new(42);
        let mut rng2 = MapRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = MapRng::new(3);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_serde_keeps_seed() {
        let rng = MapRng::new(1234);
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: MapRng = serde_json::from_str(&json).unwrap();
        let mut fresh = MapRng::new(1234);
        assert_eq!(restored.seed(), 1234);
        assert_eq!(restored.rn2(1000), fresh.rn2(1000));
    }
}
