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

//! # Fathom Harness
//!
//! **Differential Validation of the Fathom Overlap Estimator.**
//!
//! This crate drives randomized trials against the production estimator
//! and the high-precision reference, classifies each trial into a
//! precision regime, and enforces the regime's error budget. One
//! violating trial fails the whole run, immediately and with full
//! diagnostics; a completed run reports the worst errors it observed.
//!
//! ## Architecture
//!
//! * **`trial`**: the reproducible PRNG-backed input stream with its
//!   bit-sliced magnitude derivation.
//! * **`regime`**: fine/coarse classification and acceptance thresholds.
//! * **`stats`** and **`outcome`**: the accumulated maxima and the two
//!   terminal run states.
//! * **`run`**: sequential and sharded drivers over a generic
//!   differential core.
//! * **`monitor`**: progress reporting seam.
//!
//! The `overlap-differential` binary wires the drivers to the process
//! interface: exit `0` on pass, `1` on violation, `2` on usage errors.

pub mod monitor;
pub mod outcome;
pub mod regime;
pub mod run;
pub mod stats;
pub mod trial;

pub use outcome::{RunOutcome, Violation};
pub use regime::Regime;
pub use run::{RunConfig, run_differential, run_sequential, run_sharded};
pub use stats::ErrorStatistics;
pub use trial::{ChaChaTrialStream, TrialInput, TrialStream};
