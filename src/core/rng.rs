//! Deterministic random number generation.
//!
//! The engine only needs randomness while a match is being set up (deck
//! shuffles) and by collaborators that assemble decks or seed matches.
//! Everything after construction is a pure function of the intents applied.
//!
//! ## Context streams
//!
//! ```
//! use duel_ccg::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // Each participant's deck is shuffled from its own stream, so one
//! // shuffle never perturbs the other.
//! let mut alice = rng.for_context("alice");
//! let mut alice_again = GameRng::new(42).for_context("alice");
//!
//! let mut a: Vec<u32> = (0..40).collect();
//! let mut b = a.clone();
//! alice.shuffle(&mut a);
//! alice_again.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Seeded RNG with independent per-context streams.
///
/// Uses ChaCha8 for speed while keeping statistically sound output.
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

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same seed and context always produce the same stream.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Next raw 64-bit value (used to seed child matches).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    ///
    /// Uniform Fisher–Yates permutation; every ordering is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
