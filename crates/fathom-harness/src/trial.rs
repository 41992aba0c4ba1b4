// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Trial Stream
//!
//! Reproducible generation of randomized estimator inputs.
//!
//! ## Motivation
//!
//! Uniform 64-bit draws alone would almost never produce small magnitudes,
//! yet small spreads and near-equal locations are exactly where fixed-point
//! estimators break. Each trial therefore consumes one extra 32-bit
//! *shift selector* word and partitions it into four 6-bit fields; each
//! 64-bit draw is right-shifted by its field, spreading the sampled
//! magnitudes across the full dynamic range from `0` to `2^64 - 1`.
//!
//! ## Draw order
//!
//! The stream consumes, per trial and in this exact order: the selector
//! word, then the `mu_0`, `mu_1`, `sigma_0`, `sigma_1` words. The selector
//! is consumed low bits first. This order is part of the reproducibility
//! contract: a given seed pair names one specific trial sequence, forever.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One randomized set of estimator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialInput {
    pub mu_0: u64,
    pub sigma_0: u64,
    pub mu_1: u64,
    pub sigma_1: u64,
}

/// A deterministic stream of [`TrialInput`]s drawn from an owned PRNG.
///
/// Generic over [`RngCore`] so tests can script the exact word sequence;
/// production runs use the ChaCha-backed [`ChaChaTrialStream`].
#[derive(Debug, Clone)]
pub struct TrialStream<R> {
    rng: R,
    drawn: u64,
}

/// The production trial stream, backed by ChaCha8.
pub type ChaChaTrialStream = TrialStream<ChaCha8Rng>;

impl ChaChaTrialStream {
    /// Creates the stream for a seed pair: `seed_word` keys the generator,
    /// `seed_stream` selects one of `2^64` independent sub-streams.
    pub fn from_seed(seed_word: u64, seed_stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed_word);
        rng.set_stream(seed_stream);
        Self::new(rng)
    }
}

impl<R> TrialStream<R>
where
    R: RngCore,
{
    /// Wraps an already-seeded generator.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng, drawn: 0 }
    }

    /// Number of trials drawn from this stream so far.
    #[inline]
    pub fn trials_drawn(&self) -> u64 {
        self.drawn
    }

    /// Draws the next trial.
    pub fn next_trial(&mut self) -> TrialInput {
        let mut shifts = self.rng.next_u32();
        let mu_0 = self.rng.next_u64() >> (shifts & 63);
        shifts >>= 6;
        let mu_1 = self.rng.next_u64() >> (shifts & 63);
        shifts >>= 6;
        let sigma_0 = self.rng.next_u64() >> (shifts & 63);
        shifts >>= 6;
        let sigma_1 = self.rng.next_u64() >> (shifts & 63);
        self.drawn += 1;
        TrialInput {
            mu_0,
            sigma_0,
            mu_1,
            sigma_1,
        }
    }
}
