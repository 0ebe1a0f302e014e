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


//! Salesman-BnB: parallel branch-and-bound for the travelling salesman problem
//!
//! Solves the exact TSP over a `salesman_model::matrix::CostMatrix<T>`: find
//! the cheapest tour that starts and ends at city 0 and visits every other
//! city once.
//!
//! Core flow
//! - `partition::WorkPartitioner` builds the first level of the search tree
//!   and cuts it into one contiguous slice per worker.
//! - `engine::SearchEngine` runs one depth-first search per worker on scoped
//!   threads, each over its own `stack::ExplorationStack`.
//! - Workers prune against a shared `salesman_search::incumbent::SharedIncumbent`
//!   and only synchronize when they find a cheaper complete tour.
//!
//! Assumptions and guarantees
//! - Costs are non-negative, so path costs never decrease along a branch and
//!   pruning by path cost is exact.
//! - The optimal cost is independent of the number of workers. Which of
//!   several equally cheap tours is returned is not.
//!
//! Module map
//! - `engine`: the solver and per-worker search sessions.
//! - `partial`: partial tours (search tree nodes).
//! - `stack`: per-worker LIFO of pending partial tours.
//! - `partition`: static frontier partitioning.
//! - `monitor`: tree-search monitors (log, no-op).
//! - `result`: search outcomes with termination reasons.
//! - `stats`: per-worker counters and timing.

pub mod engine;
pub mod monitor;
pub mod partial;
pub mod partition;
pub mod result;
pub mod stack;
pub mod stats;
