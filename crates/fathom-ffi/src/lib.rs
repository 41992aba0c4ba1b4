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

//! # Fathom FFI
//!
//! **C-Compatible Bindings for the Fathom Overlap Estimator.**
//!
//! This crate exposes the deterministic overlap estimator to foreign
//! callers (C, C++, and anything speaking the C ABI). Because the
//! estimator is a total pure function over plain 64-bit integers, the
//! surface is value-oriented: no handles, no allocation, no lifecycle
//! calls, and no function in this crate can fail or panic.
//!
//! ## Exported API
//!
//! * `fathom_overlap_estimate`: the estimator itself.
//! * `fathom_overlap_scale`: the fixed output scale (`2^30`), for
//!   callers that interpret the result as a fraction of full overlap.
//! * `fathom_version`: the library version as a static C string.
//!
//! ## ABI Notes
//!
//! All parameters and results are `uint64_t`. Outputs are bit-identical
//! across platforms for identical inputs; foreign consensus-sensitive
//! callers may rely on that the same way native ones do.

use fathom_core::fxp::OVERLAP_SCALE;
use fathom_model::overlap_estimate;
use libc::c_char;

/// The crate version with a trailing NUL, so a pointer into it is a
/// valid C string for the life of the process.
static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");

/// Estimates the overlap coefficient of two bell-shaped distributions on
/// the fixed `2^30` scale.
///
/// Total over the full `uint64_t` domain: every input combination
/// returns a defined value in `[0, 2^30]`. Zero spreads follow
/// point-mass semantics (full overlap iff the locations are equal).
#[unsafe(no_mangle)]
pub extern "C" fn fathom_overlap_estimate(
    mu_0: u64,
    sigma_0: u64,
    mu_1: u64,
    sigma_1: u64,
) -> u64 {
    overlap_estimate(mu_0, sigma_0, mu_1, sigma_1)
}

/// Returns the fixed output scale: `fathom_overlap_estimate` results lie
/// in `[0, fathom_overlap_scale()]`.
#[unsafe(no_mangle)]
pub extern "C" fn fathom_overlap_scale() -> u64 {
    OVERLAP_SCALE
}

/// Returns the library version as a NUL-terminated static string.
///
/// The returned pointer is valid for the life of the process and must
/// not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn fathom_version() -> *const c_char {
    VERSION.as_ptr().cast()
}
