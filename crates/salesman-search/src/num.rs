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


//! # Solver Numeric Trait
//!
//! `SolverNumeric` collects the integer capabilities the search needs from a
//! cost type into a single alias:
//!
//! - `PrimInt + Signed` for comparisons, zero and bounds.
//! - `CheckedAdd` so that extending a partial tour can detect overflow and
//!   prune instead of wrapping.
//! - `Into<i64>` so the shared incumbent can mirror the best cost in an
//!   `AtomicI64`.
//! - `Send + Sync` for concurrent workers.
//!
//! This admits `i8`, `i16`, `i32` and `i64`. `isize` and `i128` do not convert
//! losslessly into `i64` and are excluded.

use num_traits::{CheckedAdd, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for integer cost types usable by the solver.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + CheckedAdd
    + Into<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + CheckedAdd
        + Into<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
{
}

#[cfg(test)]
mod tests {
    use super::SolverNumeric;

    fn widen<T: SolverNumeric>(value: T) -> i64 {
        value.into()
    }

    #[test]
    fn test_signed_primitives_qualify() {
        assert_eq!(widen(-3i8), -3);
        assert_eq!(widen(300i16), 300);
        assert_eq!(widen(70_000i32), 70_000);
        assert_eq!(widen(i64::MAX), i64::MAX);
    }
}
