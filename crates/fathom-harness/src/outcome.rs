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

//! Run outcomes: the terminal states of a validation run.

use crate::regime::Regime;
use crate::stats::ErrorStatistics;
use crate::trial::TrialInput;

/// A tolerance violation: one trial whose error reached its regime's
/// threshold. Fatal to the run; carries everything needed to reproduce
/// the offending evaluation by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Violation {
    /// Zero-based index of the offending trial.
    pub trial: u64,
    /// The four drawn parameters.
    pub input: TrialInput,
    /// Estimator output on the `2^30` scale.
    pub estimate: u64,
    /// Scaled reference output.
    pub reference: f64,
    /// Measured error in ULPs.
    pub ulp: f64,
    /// The budget class the trial was held to.
    pub regime: Regime,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FAIL (trial {}: a({},{}) b({},{}) y {} z {:.3} ulp {:.3})",
            self.trial,
            self.input.mu_0,
            self.input.sigma_0,
            self.input.mu_1,
            self.input.sigma_1,
            self.estimate,
            self.reference,
            self.ulp
        )
    }
}

/// Terminal state of a validation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// Every trial stayed within its budget; the statistics summarize the
    /// worst observed errors.
    Pass(ErrorStatistics),
    /// A trial violated its budget; the run aborted at that trial.
    Fail(Violation),
}

impl RunOutcome {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, RunOutcome::Pass(_))
    }

    #[inline]
    pub fn is_fail(&self) -> bool {
        matches!(self, RunOutcome::Fail(_))
    }

    /// The statistics of a passing run.
    #[inline]
    pub fn statistics(&self) -> Option<&ErrorStatistics> {
        match self {
            RunOutcome::Pass(stats) => Some(stats),
            RunOutcome::Fail(_) => None,
        }
    }

    /// The violation of a failing run.
    #[inline]
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            RunOutcome::Pass(_) => None,
            RunOutcome::Fail(violation) => Some(violation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_diagnostic_line() {
        let violation = Violation {
            trial: 17,
            input: TrialInput {
                mu_0: 3,
                sigma_0: 5,
                mu_1: 10,
                sigma_1: 0,
            },
            estimate: 12,
            reference: 14.5,
            ulp: 2.5,
            regime: Regime::Fine,
        };
        assert_eq!(
            violation.to_string(),
            "FAIL (trial 17: a(3,5) b(10,0) y 12 z 14.500 ulp 2.500)"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let pass = RunOutcome::Pass(ErrorStatistics::default());
        assert!(pass.is_pass());
        assert!(!pass.is_fail());
        assert!(pass.statistics().is_some());
        assert!(pass.violation().is_none());

        let fail = RunOutcome::Fail(Violation {
            trial: 0,
            input: TrialInput {
                mu_0: 0,
                sigma_0: 0,
                mu_1: 0,
                sigma_1: 0,
            },
            estimate: 0,
            reference: 40000.0,
            ulp: 40000.0,
            regime: Regime::Coarse,
        });
        assert!(fail.is_fail());
        assert!(fail.violation().is_some());
        assert!(fail.statistics().is_none());
    }
}
