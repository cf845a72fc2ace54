//! Deterministic random number generation.
//!
//! Every probabilistic decision in the engine draws from a [`RandomSource`]
//! passed in by the caller. There is no ambient generator: an encounter owns
//! its own [`Pcg32`], and tests can substitute a [`ScriptedRandom`] to force
//! hits, misses and crits.
//!
//! # Draw accounting
//!
//! Replays depend on the exact number of draws each operation consumes, so
//! every helper here consumes exactly one `next_u32` call (zero for the
//! degenerate `randint` range). Index selection maps a 32-bit draw onto the
//! range by multiply-shift instead of rejection sampling for that reason.

use crate::error::{EngineError, ErrorSeverity};

/// Errors raised by random selection helpers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RngError {
    /// `choice` or `weighted_index` called on an empty sequence.
    #[error("cannot choose from an empty sequence")]
    EmptyChoice,
}

impl EngineError for RngError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyChoice => "RNG_EMPTY_CHOICE",
        }
    }
}

/// Source of uniformly distributed random numbers.
pub trait RandomSource {
    /// Next raw 32-bit output.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn randf(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[low, high]` inclusive.
    ///
    /// Returns `low` without drawing when the range is empty or a single value.
    fn randint(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (i128::from(high) - i128::from(low) + 1) as u128;
        let offset = (u128::from(self.next_u32()) * span) >> 32;
        (i128::from(low) + offset as i128) as i64
    }

    /// Uniform index into a sequence of `len` elements.
    fn choose_index(&mut self, len: usize) -> Result<usize, RngError> {
        if len == 0 {
            return Err(RngError::EmptyChoice);
        }
        let index = (u128::from(self.next_u32()) * len as u128) >> 32;
        Ok(index as usize)
    }

    /// Weighted index selection.
    ///
    /// Draws `r = randf() * total` and returns the first index whose running
    /// weight sum reaches `r`. Negative weights count as zero; when the total
    /// is not positive the pick falls back to a uniform index.
    fn weighted_index(&mut self, weights: &[f64]) -> Result<usize, RngError> {
        if weights.is_empty() {
            return Err(RngError::EmptyChoice);
        }
        let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
        if !(total > 0.0) {
            return self.choose_index(weights.len());
        }

        let roll = self.randf() * total;
        let mut acc = 0.0;
        let mut last_positive = 0;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            acc += weight;
            last_positive = index;
            if roll <= acc {
                return Ok(index);
            }
        }
        // float accumulation can land a hair under `roll`
        Ok(last_positive)
    }
}

impl<'r> dyn RandomSource + 'r {
    /// Picks one element uniformly.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, RngError> {
        let index = self.choose_index(items.len())?;
        Ok(&items[index])
    }
}

// ============================================================================
// PCG32
// ============================================================================

/// Exported generator state.
///
/// Restoring this into any [`Pcg32`] makes its subsequent draws bit-identical
/// to the generator it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    pub state: u64,
    pub increment: u64,
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit LCG state, 32-bit output through an xorshift
/// followed by a state-dependent rotation.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    increment: u64,
}

impl Pcg32 {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// Default stream increment (must be odd).
    const INCREMENT: u64 = 1442695040888963407;

    /// Seeds a generator on the default stream.
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, Self::INCREMENT)
    }

    /// Seeds a generator on an explicit stream.
    ///
    /// Different streams with the same seed produce unrelated sequences.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = Self {
            state: 0,
            increment: stream | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Exports the full internal state.
    pub fn state(&self) -> RngState {
        RngState {
            state: self.state,
            increment: self.increment,
        }
    }

    /// Replaces the internal state with a previously exported one.
    pub fn set_state(&mut self, state: RngState) {
        self.state = state.state;
        self.increment = state.increment | 1;
    }

    /// Advance the LCG: `state' = state * multiplier + increment (mod 2^64)`.
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(self.increment);
    }

    /// XSH-RR output permutation.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }
}

// ============================================================================
// Scripted source
// ============================================================================

/// Replays a fixed cycle of `randf` values.
///
/// Each value in `[0, 1)` is converted to the raw draw that `randf` maps back
/// onto it, so `ScriptedRandom::new(vec![0.0])` makes every hit roll succeed
/// and `vec![0.999]` makes every hit roll fail. Useful for pinning outcomes in
/// tests without hunting for seeds.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
    consumed: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws,
            cursor: 0,
            consumed: 0,
        }
    }

    /// Number of raw draws taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u32(&mut self) -> u32 {
        self.consumed += 1;
        if self.draws.is_empty() {
            return 0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor = (self.cursor + 1) % self.draws.len();
        (value.clamp(0.0, 1.0) * 4_294_967_296.0).min(f64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Pcg32::new(42);
        let mut b = Pcg32::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Pcg32::new(1);
        let mut b = Pcg32::new(2);
        let a_draws: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_draws: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_draws, b_draws);
    }

    #[test]
    fn state_round_trip_continues_identically() {
        let mut original = Pcg32::new(1337);
        for _ in 0..10 {
            original.next_u32();
        }
        let saved = original.state();

        let mut restored = Pcg32::new(999);
        restored.set_state(saved);
        for _ in 0..32 {
            assert_eq!(original.randf().to_bits(), restored.randf().to_bits());
        }
    }

    #[test]
    fn randf_stays_in_unit_interval() {
        let mut rng = Pcg32::new(7);
        for _ in 0..1000 {
            let v = rng.randf();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn randint_is_inclusive_and_bounded() {
        let mut rng = Pcg32::new(11);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2000 {
            let v = rng.randint(1, 4);
            assert!((1..=4).contains(&v));
            seen_low |= v == 1;
            seen_high |= v == 4;
        }
        assert!(seen_low && seen_high);
        assert_eq!(rng.randint(5, 5), 5);
    }

    #[test]
    fn choice_on_empty_fails() {
        let mut rng = Pcg32::new(3);
        let source: &mut dyn RandomSource = &mut rng;
        let empty: [u8; 0] = [];
        assert_eq!(source.choice(&empty), Err(RngError::EmptyChoice));
        assert_eq!(source.choice(&[9]), Ok(&9));
    }

    #[test]
    fn weighted_index_respects_zero_weights() {
        let mut rng = Pcg32::new(5);
        for _ in 0..200 {
            let index = rng.weighted_index(&[0.0, 1.0, 0.0]).unwrap();
            assert_eq!(index, 1);
        }
    }

    #[test]
    fn weighted_index_consumes_one_draw() {
        let mut rng = ScriptedRandom::new(vec![0.5]);
        rng.weighted_index(&[1.0, 1.0, 2.0]).unwrap();
        assert_eq!(rng.consumed(), 1);
        rng.weighted_index(&[0.0, 0.0]).unwrap();
        assert_eq!(rng.consumed(), 2);
    }

    #[test]
    fn scripted_draws_map_back_onto_randf() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.25]);
        assert_eq!(rng.randf(), 0.0);
        assert_eq!(rng.randf(), 0.5);
        assert_eq!(rng.randf(), 0.25);
        assert_eq!(rng.randf(), 0.0);
    }
}
