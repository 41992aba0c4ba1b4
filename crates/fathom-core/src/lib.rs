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

//! # Fathom Core
//!
//! Foundational fixed-point primitives for the Fathom overlap ecosystem.
//! This crate consolidates the scale constants and rounding arithmetic that
//! the estimator, the validation harness, and the embedding layer share.
//!
//! ## Modules
//!
//! - `fxp`: Q-format constants (output scale, argument and coefficient
//!   formats, the reciprocal-sqrt-2 normalization constant) and the rounding
//!   right-shift / rounded multiply-shift primitives every fixed-point
//!   reduction in the workspace funnels through.
//!
//! ## Purpose
//!
//! Keeping the rounding conventions in one place makes the bit-exactness
//! argument auditable: any two call sites that renormalize a Q-format value
//! do it through the same primitive with the same tie behavior, so the
//! estimator's platform-independence reduces to the platform-independence of
//! integer add, multiply, and arithmetic shift.

pub mod fxp;
