//! Pseudo-random choices for example generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Word list for random string values.
const LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat",
];

/// Half-open range of random numbers.
pub const NUMBER_RANGE: std::ops::Range<i32> = -5000..5000;

/// Random source used when generating in random mode.
pub struct Randomness {
    rng: StdRng,
}

impl Randomness {
    /// Reproducible randomness from `seed`, or entropy when absent.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    #[inline]
    pub fn number(&mut self) -> f64 {
        f64::from(self.rng.gen_range(NUMBER_RANGE))
    }

    /// Index in `0..len`; `len` must be non-zero.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Count in `0..=max`.
    #[inline]
    pub fn count(&mut self, max: usize) -> usize {
        self.rng.gen_range(0..=max)
    }

    /// A lorem ipsum phrase of one to four words.
    pub fn lorem(&mut self) -> String {
        let words = self.rng.gen_range(1..=4);
        (0..words)
            .filter_map(|_| LOREM_WORDS.choose(&mut self.rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
