//! Pseudo-random word source.
//!
//! One free-running LFSR per output bit, each with a different cycle length
//! and seed so the lanes drift against each other. Random-ish is plenty: the
//! words only reseed the automaton, they are never used for anything that
//! needs statistical quality.

use life_core::NoiseSource;
use life_lfsr::{Lfsr, LfsrConfig};

/// Base cycle length for lane 0; each further lane adds [`LANE_STRIDE`].
const BASE_STEPS: u32 = 501;
/// Cycle-length stride between lanes. Odd, so no two lanes share a period.
const LANE_STRIDE: u32 = 7;

/// Generates a pseudo-random word per request.
pub struct RandomWordGenerator {
    lanes: Vec<Lfsr>,
    word: u16,
}

impl RandomWordGenerator {
    /// Create a generator with `bits` output lanes (at most 16).
    ///
    /// # Panics
    ///
    /// Panics if `bits` is zero or greater than 16.
    #[must_use]
    pub fn new(bits: u32) -> Self {
        assert!(bits >= 1 && bits <= 16, "1 to 16 output lanes");
        let lanes = (0..bits)
            .map(|i| Lfsr::new(LfsrConfig::with_seed(BASE_STEPS + LANE_STRIDE * i, i)))
            .collect();
        let mut rng = Self { lanes, word: 0 };
        rng.word = rng.sample();
        rng
    }

    /// Current output bits, one per lane.
    fn sample(&self) -> u16 {
        self.lanes
            .iter()
            .enumerate()
            .fold(0, |word, (i, lfsr)| word | ((lfsr.value() as u16 & 1) << i))
    }
}

impl NoiseSource for RandomWordGenerator {
    fn tick(&mut self, enable: bool) {
        for lfsr in &mut self.lanes {
            lfsr.step();
        }
        if enable {
            self.word = self.sample();
        }
    }

    fn word(&self) -> u16 {
        self.word
    }
}
