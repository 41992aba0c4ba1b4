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

//! Precision regime classification.
//!
//! A trial is held to a tight error budget when the two spreads are
//! comparable and to a loose one when they are not. The split exists for
//! the benefit of estimators whose fixed-point representation loses
//! precision as the spread ratio grows; an estimator with a renormalized
//! working representation simply meets the tight budget everywhere.

/// Acceptance threshold for fine-regime trials, in `2^30`-scale ULPs
/// (relative error `2.4e-9` of the coefficient range).
pub const FINE_ULP_THRESHOLD: f64 = 2.6;

/// Acceptance threshold for coarse-regime trials, in `2^30`-scale ULPs
/// (relative error `3.1e-5` of the coefficient range).
pub const COARSE_ULP_THRESHOLD: f64 = 32768.0;

/// The error budget class of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// The two spreads are within a factor of two of each other.
    Fine,
    /// The two spreads differ by more than a factor of two.
    Coarse,
}

impl Regime {
    /// Classifies a trial from its two spread values.
    ///
    /// The rule is `min >= max >> 1` with integer shift semantics, so for
    /// example `(2, 5)` still counts as fine (`5 >> 1 == 2`).
    #[inline]
    pub fn classify(sigma_0: u64, sigma_1: u64) -> Self {
        let lo = sigma_0.min(sigma_1);
        let hi = sigma_0.max(sigma_1);
        if lo >= hi >> 1 { Regime::Fine } else { Regime::Coarse }
    }

    /// Returns the acceptance threshold of this regime in ULPs.
    #[inline]
    pub fn threshold(self) -> f64 {
        match self {
            Regime::Fine => FINE_ULP_THRESHOLD,
            Regime::Coarse => COARSE_ULP_THRESHOLD,
        }
    }

    /// Returns `true` for the fine regime.
    #[inline]
    pub fn is_fine(self) -> bool {
        matches!(self, Regime::Fine)
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Fine => write!(f, "fine"),
            Regime::Coarse => write!(f, "coarse"),
        }
    }
}
