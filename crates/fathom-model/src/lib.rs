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

//! # Fathom Model
//!
//! **The Deterministic Overlap Estimator for the Fathom Oracle.**
//!
//! This crate computes the overlap coefficient between two bell-shaped
//! distributions, each given as a `(location, spread)` pair of unsigned
//! 64-bit integers, as a fixed-point value on the `2^30` scale, using
//! integer arithmetic only.
//!
//! ## Architecture
//!
//! * **`kernel`**: A piecewise-polynomial evaluation of the complementary
//!   error function on `[0, 5)` in Q4.60 -> Q2.62 fixed point.
//! * **`overlap`**: The public estimator. Reduces the four input parameters
//!   to a single renormalized argument and feeds it through the kernel.
//!
//! ## Design Philosophy
//!
//! 1. **Bit Determinism**: No floating-point instruction is ever executed.
//!    The same inputs produce the same output bits on every platform,
//!    toolchain, and optimization level.
//! 2. **Totality**: The full `u64` domain is legal. There is no input that
//!    panics, overflows, or returns a value outside `[0, 2^30]`.
//! 3. **Uniform Precision**: The argument is renormalized before table
//!    lookup, so the approximation error does not depend on the ratio of
//!    the two spreads.

pub mod kernel;
pub mod overlap;

pub use kernel::erfc_q62;
pub use overlap::overlap_estimate;
