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

//! Running worst-case error statistics for a validation run.

use crate::regime::Regime;
use fathom_core::fxp::OVERLAP_SCALE;

/// Error statistics accumulated over the passing trials of a run.
///
/// Two maxima are kept: the fine-regime maximum considers only fine
/// trials, while the coarse maximum is a global bound updated on every
/// trial (the coarse budget subsumes the fine one).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ErrorStatistics {
    /// Total trials recorded.
    pub trials: u64,
    /// How many of them were fine-regime.
    pub fine_trials: u64,
    /// Worst ULP error observed on a fine trial.
    pub max_fine_ulp: f64,
    /// Worst ULP error observed on any trial.
    pub max_coarse_ulp: f64,
}

impl ErrorStatistics {
    /// Records one passing trial.
    #[inline]
    pub fn record(&mut self, regime: Regime, ulp: f64) {
        self.trials += 1;
        if regime.is_fine() {
            self.fine_trials += 1;
            if ulp > self.max_fine_ulp {
                self.max_fine_ulp = ulp;
            }
        }
        if ulp > self.max_coarse_ulp {
            self.max_coarse_ulp = ulp;
        }
    }

    /// Folds another shard's statistics into this one: counters add,
    /// maxima max-combine.
    pub fn merge(&mut self, other: &ErrorStatistics) {
        self.trials += other.trials;
        self.fine_trials += other.fine_trials;
        self.max_fine_ulp = self.max_fine_ulp.max(other.max_fine_ulp);
        self.max_coarse_ulp = self.max_coarse_ulp.max(other.max_coarse_ulp);
    }

    /// Worst fine-regime error as a fraction of the coefficient range.
    #[inline]
    pub fn max_fine_rerr(&self) -> f64 {
        self.max_fine_ulp / OVERLAP_SCALE as f64
    }

    /// Worst global error as a fraction of the coefficient range.
    #[inline]
    pub fn max_coarse_rerr(&self) -> f64 {
        self.max_coarse_ulp / OVERLAP_SCALE as f64
    }
}

impl std::fmt::Display for ErrorStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pass (fine: max_rerr {:.1e} max_ulp {:.1}, coarse: max_rerr {:.1e} max_ulp {:.1})",
            self.max_fine_rerr(),
            self.max_fine_ulp,
            self.max_coarse_rerr(),
            self.max_coarse_ulp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fine_updates_both_maxima() {
        let mut stats = ErrorStatistics::default();
        stats.record(Regime::Fine, 0.4);
        assert_eq!(stats.trials, 1);
        assert_eq!(stats.fine_trials, 1);
        assert_eq!(stats.max_fine_ulp, 0.4);
        assert_eq!(stats.max_coarse_ulp, 0.4);
    }

    #[test]
    fn test_record_coarse_leaves_fine_maximum_alone() {
        let mut stats = ErrorStatistics::default();
        stats.record(Regime::Coarse, 100.0);
        assert_eq!(stats.trials, 1);
        assert_eq!(stats.fine_trials, 0);
        assert_eq!(stats.max_fine_ulp, 0.0);
        assert_eq!(stats.max_coarse_ulp, 100.0);
    }

    #[test]
    fn test_maxima_only_grow() {
        let mut stats = ErrorStatistics::default();
        stats.record(Regime::Fine, 1.5);
        stats.record(Regime::Fine, 0.2);
        stats.record(Regime::Coarse, 0.9);
        assert_eq!(stats.trials, 3);
        assert_eq!(stats.fine_trials, 2);
        assert_eq!(stats.max_fine_ulp, 1.5);
        assert_eq!(stats.max_coarse_ulp, 1.5);
    }

    #[test]
    fn test_merge_combines_shards() {
        let mut left = ErrorStatistics {
            trials: 10,
            fine_trials: 4,
            max_fine_ulp: 0.3,
            max_coarse_ulp: 12.0,
        };
        let right = ErrorStatistics {
            trials: 7,
            fine_trials: 6,
            max_fine_ulp: 0.8,
            max_coarse_ulp: 2.0,
        };
        left.merge(&right);
        assert_eq!(left.trials, 17);
        assert_eq!(left.fine_trials, 10);
        assert_eq!(left.max_fine_ulp, 0.8);
        assert_eq!(left.max_coarse_ulp, 12.0);
    }

    #[test]
    fn test_summary_line_format() {
        let stats = ErrorStatistics {
            trials: 100,
            fine_trials: 40,
            max_fine_ulp: 0.4,
            max_coarse_ulp: 12.5,
        };
        assert_eq!(
            stats.to_string(),
            "pass (fine: max_rerr 3.7e-10 max_ulp 0.4, coarse: max_rerr 1.2e-8 max_ulp 12.5)"
        );
    }
}
