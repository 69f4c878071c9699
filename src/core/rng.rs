//! Deterministic random number generation.
//!
//! Every random decision in a game (the removal of shares, the deck shuffle,
//! the automated players' coin flips and picks) goes through a single
//! [`GameRng`] threaded down from the orchestrator. Seeding it makes a whole
//! game reproducible.
//!
//! ```
//! use startups_engine::core::GameRng;
//!
//! let mut a = GameRng::new(1977);
//! let mut b = GameRng::new(1977);
//! assert_eq!(a.index(100), b.index(100));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Uniform index in `0..len`.
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Pick a uniformly random element index among those matching `keep`.
    ///
    /// Returns `None` if nothing matches.
    pub fn choose_index_where<T>(&mut self, items: &[T], keep: impl Fn(&T) -> bool) -> Option<usize> {
        let candidates: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| keep(item))
            .map(|(i, _)| i)
            .collect();
        candidates.choose(&mut self.inner).copied()
    }

    /// Remove `count` elements chosen uniformly without replacement.
    ///
    /// Returns the removed elements. Removes everything if `count` exceeds
    /// the length.
    pub fn remove_random<T>(&mut self, items: &mut Vec<T>, count: usize) -> Vec<T> {
        let mut removed = Vec::with_capacity(count.min(items.len()));
        for _ in 0..count {
            if items.is_empty() {
                break;
            }
            let i = self.index(items.len());
            removed.push(items.swap_remove(i));
        }
        removed
    }
}
