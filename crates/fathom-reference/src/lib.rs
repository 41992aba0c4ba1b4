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

//! # Fathom Reference
//!
//! **The High-Precision Reference Oracle for Overlap Validation.**
//!
//! This crate computes the same overlap model as the deterministic
//! estimator, `erfc(|mu_0 - mu_1| / (sqrt(2) * (sigma_0 + sigma_1)))`,
//! but in ordinary `f64` arithmetic via `libm`, without any of the
//! fixed-point quantization the estimator is subject to.
//!
//! ## Purpose
//!
//! The reference exists solely to *validate* the estimator: the
//! differential harness evaluates both on the same inputs and measures the
//! divergence in `2^30`-scale ULPs. Its own error is a few `f64` ULPs of
//! the true value, roughly `2^-22` output-scale ULPs, four orders of
//! magnitude below the tightest acceptance threshold, so it is effectively
//! exact for that purpose.
//!
//! It must **never** be used by consensus-sensitive callers: floating-point
//! results may legally differ across platforms, which is the entire reason
//! the integer estimator exists.

/// Computes the overlap coefficient of two bell-shaped distributions as an
/// `f64` in `[0, 1]`.
///
/// Degenerate zero-spread pairs follow point-mass semantics: two point
/// masses overlap fully iff they sit at the same location.
///
/// # Examples
///
/// ```
/// use fathom_reference::overlap_reference;
///
/// assert_eq!(overlap_reference(7, 1000, 7, 1000), 1.0);
/// assert_eq!(overlap_reference(41, 0, 42, 0), 0.0);
/// let half_way = overlap_reference(0, 1, 2, 1);
/// assert!((half_way - 0.3173105078629141).abs() < 1e-12);
/// ```
pub fn overlap_reference(mu_0: u64, sigma_0: u64, mu_1: u64, sigma_1: u64) -> f64 {
    let spread = sigma_0 as u128 + sigma_1 as u128;
    if spread == 0 {
        return if mu_0 == mu_1 { 1.0 } else { 0.0 };
    }
    let separation = mu_0.abs_diff(mu_1);
    let x = separation as f64 / (std::f64::consts::SQRT_2 * spread as f64);
    libm::erfc(x)
}

/// [`overlap_reference`] on the estimator's fixed `2^30` output scale.
///
/// This is the quantity the differential harness subtracts from the
/// estimator output to obtain the ULP error of a trial.
#[inline]
pub fn scaled_reference(mu_0: u64, sigma_0: u64, mu_1: u64, sigma_1: u64) -> f64 {
    overlap_reference(mu_0, sigma_0, mu_1, sigma_1) * (1u64 << 30) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_pairs_overlap_fully() {
        assert_eq!(overlap_reference(7, 1000, 7, 1000), 1.0);
        assert_eq!(overlap_reference(u64::MAX, 1, u64::MAX, 1), 1.0);
        assert_eq!(overlap_reference(0, u64::MAX, 0, u64::MAX), 1.0);
    }

    #[test]
    fn test_point_mass_degeneracy() {
        assert_eq!(overlap_reference(42, 0, 42, 0), 1.0);
        assert_eq!(overlap_reference(41, 0, 42, 0), 0.0);
        assert_eq!(overlap_reference(0, 0, u64::MAX, 0), 0.0);
    }

    #[test]
    fn test_known_values() {
        let cases: &[(u64, u64, u64, u64, f64)] = &[
            (0, 1, 1, 1, 0.6170750774519738),
            (0, 1, 2, 1, 0.3173105078629141),
            (0, 1000, 5000, 1000, 0.01241933065155227),
            (100, 3, 104, 2, 0.4237107971667934),
            (0, 1, 12, 1, 1.973175290075396e-9),
        ];
        for &(mu_0, sigma_0, mu_1, sigma_1, want) in cases {
            let got = overlap_reference(mu_0, sigma_0, mu_1, sigma_1);
            assert!(
                (got - want).abs() <= want.abs() * 1e-12,
                "({mu_0}, {sigma_0}, {mu_1}, {sigma_1}): got {got}, want {want}"
            );
        }
    }

    #[test]
    fn test_symmetry() {
        let samples = [
            (0u64, 1u64, 1u64, 1u64),
            (123, 456, 789, 1011),
            (u64::MAX, 1, 0, u64::MAX),
            (5, 0, 9, 1000),
        ];
        for (a, b, c, d) in samples {
            assert_eq!(overlap_reference(a, b, c, d), overlap_reference(c, d, a, b));
        }
    }

    #[test]
    fn test_monotone_separation_decay() {
        let mut prev = 1.0f64;
        for d in (0..20_000u64).step_by(7) {
            let v = overlap_reference(0, 1000, d, 1000);
            assert!(v <= prev, "reference increased at separation {d}");
            prev = v;
        }
    }

    #[test]
    fn test_far_tail_underflows_to_zero() {
        // x is in the hundreds; erfc underflows cleanly rather than
        // producing a denormal surprise
        assert_eq!(overlap_reference(0, 1, 1000, 1), 0.0);
    }

    #[test]
    fn test_scaled_reference_is_scale_multiple() {
        for (a, b, c, d) in [(0u64, 1u64, 1u64, 1u64), (100, 3, 104, 2), (7, 9, 7, 9)] {
            let unit = overlap_reference(a, b, c, d);
            let scaled = scaled_reference(a, b, c, d);
            assert_eq!(scaled, unit * 1_073_741_824.0);
        }
    }
}
