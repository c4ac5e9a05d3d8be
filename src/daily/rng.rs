//! Seeded random stream for daily generation
//!
//! PCG32 seeded from the date key. `seed_from_u64` and `random_range` are value-stable across platforms within a `rand` major
//! version, so the same key yields the same stream on wasm and native.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::date_key::DateKey;

/// Deterministic random stream keyed by a date
#[derive(Debug, Clone)]
pub struct DailyRng {
    rng: Pcg32,
}

impl DailyRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn for_key(key: &DateKey) -> Self {
        Self::new(key.seed())
    }

    /// Uniform index in [0, len). `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.random_range(0..=i);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = DailyRng::new(42);
        let mut b = DailyRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.index(30), b.index(30));
        }
    }

    #[test]
    fn test_index_in_bounds() {
        let mut rng = DailyRng::new(7);
        for len in 1..50 {
            assert!(rng.index(len) < len);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = DailyRng::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<u32> = (0..10).collect();
        let mut b = a.clone();
        DailyRng::new(5).shuffle(&mut a);
        DailyRng::new(5).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = DailyRng::new(1);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = vec![9];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![9]);
    }
}
