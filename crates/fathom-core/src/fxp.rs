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

//! # Fixed-Point Primitives
//!
//! Q-format constants and rounding arithmetic shared across the Fathom
//! workspace.
//!
//! ## Motivation
//!
//! The overlap estimator must produce bit-identical results on every
//! platform, so every narrowing step in its pipeline has to round the same
//! way everywhere. This module fixes one convention (round half toward
//! positive infinity at the dropped bit position) and provides it both as a
//! generic primitive over any primitive integer and as the widening
//! multiply-shift form the polynomial kernel uses.
//!
//! ## Highlights
//!
//! - `shr_round`: rounding right shift, generic over [`PrimInt`].
//! - `mul_shift_round`: `i128` widening product with rounded renormalization,
//!   the Horner step of the kernel.
//! - The workspace-wide Q-format constants, including `RSQRT2_Q64`, the
//!   Q0.64 encoding of `1/sqrt(2)` used to normalize separations.

use num_traits::PrimInt;

/// Number of fractional bits of the overlap output scale.
pub const OVERLAP_SCALE_BITS: u32 = 30;

/// The fixed-point scale of an overlap coefficient: `2^30`.
///
/// An overlap result is an integer in `[0, OVERLAP_SCALE]`, with
/// `OVERLAP_SCALE` meaning fully overlapping distributions and `0` meaning
/// no measurable shared mass.
pub const OVERLAP_SCALE: u64 = 1 << OVERLAP_SCALE_BITS;

/// Fractional bits of the normalized separation argument (Q4.60).
pub const ARG_FRAC_BITS: u32 = 60;

/// Fractional bits of the kernel's polynomial coefficients and accumulator
/// (Q2.62).
pub const COEFF_FRAC_BITS: u32 = 62;

/// `1/sqrt(2)` in Q0.64: `floor(2^64 / sqrt(2))`.
///
/// Multiplying a separation by this constant and dividing by the spread
/// (pre-shifted by 4) yields the Q4.60 argument `d / (sqrt(2) * s)` in a
/// single widening multiply and divide. The encoding error of the constant
/// is below `2^-65` relative, far under the output quantization.
pub const RSQRT2_Q64: u64 = 13_043_817_825_332_782_212;

/// Right-shifts `value` by `shift` bits, rounding half toward positive
/// infinity at the dropped bit position.
///
/// A `shift` of zero returns `value` unchanged. For signed types the shift
/// is arithmetic, so the rounding convention holds for negative values as
/// well (`-12.5` rounds to `-12`).
///
/// The caller must leave one bit of headroom below the type's maximum; the
/// half-bias addition is checked in debug builds.
///
/// # Examples
///
/// ```
/// use fathom_core::fxp::shr_round;
///
/// assert_eq!(shr_round(96u64, 3), 12); // exact
/// assert_eq!(shr_round(100u64, 3), 13); // 12.5 rounds up
/// assert_eq!(shr_round(-100i64, 3), -12); // -12.5 rounds toward +inf
/// assert_eq!(shr_round(7u32, 0), 7);
/// ```
#[inline]
pub fn shr_round<T: PrimInt>(value: T, shift: u32) -> T {
    if shift == 0 {
        return value;
    }
    let half = T::one() << (shift as usize - 1);
    debug_assert!(
        value.checked_add(&half).is_some(),
        "shr_round: operand too close to the type maximum"
    );
    (value + half) >> (shift as usize)
}

/// Multiplies two Q-format operands and renormalizes the product by
/// right-shifting `shift` bits with rounding, in `i128` throughout.
///
/// This is the Horner step of the polynomial kernel: a Q2.62 accumulator
/// times a Q4.60 offset, renormalized back to Q2.62 by `shift = 60`. The
/// product is checked against `i128` overflow in debug builds; release
/// callers are expected to hold the documented magnitude bounds.
///
/// # Examples
///
/// ```
/// use fathom_core::fxp::mul_shift_round;
///
/// // (3 * 2^20) * (5 * 2^20) / 2^20 == 15 * 2^20
/// assert_eq!(mul_shift_round(3 << 20, 5 << 20, 20), 15 << 20);
/// // a product of exactly half a unit rounds up
/// assert_eq!(mul_shift_round(1 << 10, 1 << 9, 20), 1);
/// ```
#[inline]
pub fn mul_shift_round(a: i128, b: i128, shift: u32) -> i128 {
    debug_assert!(
        a.checked_mul(b).is_some(),
        "mul_shift_round: product overflows i128"
    );
    shr_round(a * b, shift)
}
