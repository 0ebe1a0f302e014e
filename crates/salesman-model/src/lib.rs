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


//! # Salesman Model
//!
//! **The domain model for the exact travelling salesman solver.**
//!
//! This crate holds the data exchanged between the problem definition (a cost
//! matrix read from disk or built in code) and the search engine
//! (`salesman_bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: `CityIndex`, a strongly typed wrapper that keeps city
//!   positions apart from every other `usize` in the search.
//! * **`matrix`**: `CostMatrix` (immutable, flat row-major storage optimized for
//!   the search loop) and `CostMatrixBuilder` (mutable, for construction).
//! * **`tour`**: `Tour`, a complete closed tour starting at city 0 together with
//!   its total cost, plus validation against a matrix.
//! * **`loading`**: `MatrixLoader`, which turns whitespace-separated text into a
//!   validated `CostMatrix`.
//!
//! ## Design Philosophy
//!
//! 1.  **Fail-Fast**: matrices are validated on construction (square, at least
//!     one city, no negative costs) so the solver never sees an instance that
//!     breaks its pruning assumptions.
//! 2.  **Memory Layout**: costs live in one flat vector; a row is a contiguous
//!     slice, which is what the expansion step of the search iterates over.

pub mod index;
pub mod loading;
pub mod matrix;
pub mod tour;
