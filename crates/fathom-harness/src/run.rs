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

//! # Validation Run Drivers
//!
//! The differential loop that proves (or refutes) the estimator's error
//! bounds, in two flavors: a sequential driver that reproduces the
//! canonical single-stream trial sequence, and a sharded driver that
//! splits the trial budget across scoped worker threads.
//!
//! ## Motivation
//!
//! Every trial is an independent pure-function evaluation, so the loop is
//! embarrassingly parallel. The sequential driver stays the default
//! because its exact trial sequence is the reproducibility anchor: trial
//! `n` of seed `(w, s)` always means the same four inputs. The sharded
//! driver trades that single sequence for `k` disjoint sub-streams
//! (stream selectors `s`, `s+1`, ..., `s+k-1`) and divides wall time by
//! `k` without weakening the acceptance criterion: each shard's trials
//! are held to the identical thresholds.
//!
//! ## Highlights
//!
//! - Run lifecycle: seed the stream, loop trials, then either abort on the
//!   first violation (reported with full trial context) or report the
//!   max-combined error statistics.
//! - The loop core is generic over the estimator function, so the failure
//!   path is exercised in tests with a deliberately wrong estimator; the
//!   shipped drivers pin it to [`fathom_model::overlap_estimate`].
//! - Sharded execution uses `std::thread::scope` with a shared
//!   `AtomicBool` stop signal: the first violating shard stops the rest
//!   within one polling block.

use crate::monitor::RunMonitor;
use crate::outcome::{RunOutcome, Violation};
use crate::regime::Regime;
use crate::stats::ErrorStatistics;
use crate::trial::{ChaChaTrialStream, TrialInput};
use fathom_reference::scaled_reference;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trial count of the canonical validation run.
pub const CANONICAL_TRIALS: u64 = 100_000_000;

/// Default progress reporting block.
pub const DEFAULT_PROGRESS_BLOCK: u64 = 10_000_000;

/// How often a shard worker polls the stop signal, as a trial-count mask.
const STOP_POLL_MASK: u64 = 1023;

/// Configuration of one validation run.
///
/// `Default` is the canonical acceptance scenario: `1e8` trials from seed
/// `(0, 0)`, progress every `1e7` trials, one shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    trials: u64,
    seed_word: u64,
    seed_stream: u64,
    progress_block: u64,
    shards: NonZeroUsize,
}

impl Default for RunConfig {
    #[inline]
    fn default() -> Self {
        Self {
            trials: CANONICAL_TRIALS,
            seed_word: 0,
            seed_stream: 0,
            progress_block: DEFAULT_PROGRESS_BLOCK,
            shards: NonZeroUsize::MIN,
        }
    }
}

impl RunConfig {
    /// Returns the canonical configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trial count.
    #[inline]
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the seed pair: generator key word and stream selector.
    #[inline]
    pub fn with_seed(mut self, seed_word: u64, seed_stream: u64) -> Self {
        self.seed_word = seed_word;
        self.seed_stream = seed_stream;
        self
    }

    /// Sets the progress block; `0` disables progress reporting.
    #[inline]
    pub fn with_progress_block(mut self, progress_block: u64) -> Self {
        self.progress_block = progress_block;
        self
    }

    /// Sets the shard count for [`run_sharded`].
    #[inline]
    pub fn with_shards(mut self, shards: NonZeroUsize) -> Self {
        self.shards = shards;
        self
    }

    #[inline]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    #[inline]
    pub fn seed_word(&self) -> u64 {
        self.seed_word
    }

    #[inline]
    pub fn seed_stream(&self) -> u64 {
        self.seed_stream
    }

    #[inline]
    pub fn progress_block(&self) -> u64 {
        self.progress_block
    }

    #[inline]
    pub fn shards(&self) -> NonZeroUsize {
        self.shards
    }
}

/// Evaluates one trial against the reference and its regime threshold.
///
/// The threshold comparison precedes the maxima update: a violating trial
/// is reported, never recorded.
fn check_trial<F>(
    trial: u64,
    input: TrialInput,
    estimate: &F,
    stats: &mut ErrorStatistics,
) -> Result<(), Violation>
where
    F: Fn(u64, u64, u64, u64) -> u64,
{
    let regime = Regime::classify(input.sigma_0, input.sigma_1);
    let y = estimate(input.mu_0, input.sigma_0, input.mu_1, input.sigma_1);
    let z = scaled_reference(input.mu_0, input.sigma_0, input.mu_1, input.sigma_1);
    let ulp = (y as f64 - z).abs();
    if ulp >= regime.threshold() {
        return Err(Violation {
            trial,
            input,
            estimate: y,
            reference: z,
            ulp,
            regime,
        });
    }
    stats.record(regime, ulp);
    Ok(())
}

/// Runs the differential loop with an arbitrary estimator function.
///
/// This is the single-stream core both shipped drivers are built on; it
/// is public so the failure path can be exercised with a deliberately
/// wrong estimator.
///
/// # Examples
///
/// ```
/// use fathom_harness::monitor::NoOpMonitor;
/// use fathom_harness::run::{RunConfig, run_differential};
///
/// let config = RunConfig::default().with_trials(1_000).with_progress_block(0);
/// let outcome = run_differential(&config, fathom_model::overlap_estimate, &mut NoOpMonitor);
/// assert!(outcome.is_pass());
/// ```
pub fn run_differential<F, M>(config: &RunConfig, estimate: F, monitor: &mut M) -> RunOutcome
where
    F: Fn(u64, u64, u64, u64) -> u64,
    M: RunMonitor,
{
    let mut stream = ChaChaTrialStream::from_seed(config.seed_word(), config.seed_stream());
    let mut stats = ErrorStatistics::default();
    for trial in 0..config.trials() {
        if config.progress_block() != 0 && trial % config.progress_block() == 0 {
            monitor.on_progress(trial);
        }
        let input = stream.next_trial();
        if let Err(violation) = check_trial(trial, input, &estimate, &mut stats) {
            return RunOutcome::Fail(violation);
        }
    }
    RunOutcome::Pass(stats)
}

/// Runs the canonical sequential validation of the production estimator.
pub fn run_sequential<M>(config: &RunConfig, monitor: &mut M) -> RunOutcome
where
    M: RunMonitor,
{
    run_differential(config, fathom_model::overlap_estimate, monitor)
}

/// Runs the sharded validation of the production estimator.
///
/// Shard `k` draws its trials from stream selector `seed_stream + k`, so
/// a single-shard configuration reproduces [`run_sequential`] exactly.
/// Emits no progress output; shard workers run silently and the combined
/// outcome carries the max-combined statistics.
pub fn run_sharded(config: &RunConfig) -> RunOutcome {
    run_sharded_with(config, fathom_model::overlap_estimate)
}

fn run_sharded_with<F>(config: &RunConfig, estimate: F) -> RunOutcome
where
    F: Fn(u64, u64, u64, u64) -> u64 + Sync,
{
    let shards = config.shards().get() as u64;
    let stop_signal = AtomicBool::new(false);
    let estimate = &estimate;

    let mut results = Vec::with_capacity(shards as usize);
    std::thread::scope(|scope| {
        let mut handles = Vec::with_capacity(shards as usize);
        for shard in 0..shards {
            let (first_trial, chunk) = shard_span(config.trials(), shards, shard);
            let stop_signal = &stop_signal;
            let handle = scope.spawn(move || {
                run_shard(config, shard, first_trial, chunk, stop_signal, estimate)
            });
            handles.push(handle);
        }
        for handle in handles {
            results.push(handle.join().expect("validation shard thread panicked"));
        }
    });

    let mut stats = ErrorStatistics::default();
    let mut first_failure: Option<Violation> = None;
    for result in results {
        match result {
            Ok(shard_stats) => stats.merge(&shard_stats),
            Err(violation) => {
                let earliest = first_failure
                    .as_ref()
                    .map_or(true, |f| violation.trial < f.trial);
                if earliest {
                    first_failure = Some(violation);
                }
            }
        }
    }
    match first_failure {
        Some(violation) => RunOutcome::Fail(violation),
        None => RunOutcome::Pass(stats),
    }
}

/// Global trial offset and chunk length of one shard; the spans of all
/// shards partition `[0, trials)`.
fn shard_span(trials: u64, shards: u64, shard: u64) -> (u64, u64) {
    let base = trials / shards;
    let remainder = trials % shards;
    let chunk = base + u64::from(shard < remainder);
    let first = shard * base + shard.min(remainder);
    (first, chunk)
}

fn run_shard<F>(
    config: &RunConfig,
    shard: u64,
    first_trial: u64,
    chunk: u64,
    stop_signal: &AtomicBool,
    estimate: &F,
) -> Result<ErrorStatistics, Violation>
where
    F: Fn(u64, u64, u64, u64) -> u64,
{
    let mut stream = ChaChaTrialStream::from_seed(
        config.seed_word(),
        config.seed_stream().wrapping_add(shard),
    );
    let mut stats = ErrorStatistics::default();
    for local in 0..chunk {
        if local & STOP_POLL_MASK == 0 && stop_signal.load(Ordering::Relaxed) {
            // another shard already failed; this shard's partial statistics
            // are discarded along with everything else on the failure path
            break;
        }
        let input = stream.next_trial();
        if let Err(violation) = check_trial(first_trial + local, input, estimate, &mut stats) {
            stop_signal.store(true, Ordering::Relaxed);
            return Err(violation);
        }
    }
    Ok(stats)
}
