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


//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing one
//! worker of the branch-and-bound search.
//!
//! Lifecycle
//! - enter → {node explored → prune | solution}* → exit
//! - The worker's `WorkerStatistics` is passed to every callback.
//!
//! Callbacks take `&mut self` and run on the worker's thread inside the hot
//! loop; keep them cheap.

use crate::{partial::PartialTour, stats::WorkerStatistics};
use salesman_model::{matrix::CostMatrix, tour::Tour};
use salesman_search::num::SolverNumeric;

/// Reasons for pruning a search state or candidate child.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The cost already reaches the incumbent's cost.
    BoundDominated,
    /// The cost is not representable in the cost type.
    Overflow,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Overflow => write!(f, "Overflow"),
        }
    }
}

/// Trait for observing the search of a single worker.
pub trait TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the worker pops its first state.
    fn on_enter_search(&mut self, worker: usize, matrix: &CostMatrix<T>);
    /// Called for every state popped from the worker's stack.
    fn on_node_explored(&mut self, state: &PartialTour<T>, statistics: &WorkerStatistics);
    /// Called when a state, or a child of it, is discarded.
    fn on_prune(
        &mut self,
        state: &PartialTour<T>,
        reason: PruneReason,
        statistics: &WorkerStatistics,
    );
    /// Called when this worker installs a new incumbent tour.
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &WorkerStatistics);
    /// Called once after the worker's stack is exhausted.
    fn on_exit_search(&mut self, statistics: &WorkerStatistics);
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T, M> TreeSearchMonitor<T> for Box<M>
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn on_enter_search(&mut self, worker: usize, matrix: &CostMatrix<T>) {
        (**self).on_enter_search(worker, matrix)
    }

    #[inline]
    fn on_node_explored(&mut self, state: &PartialTour<T>, statistics: &WorkerStatistics) {
        (**self).on_node_explored(state, statistics)
    }

    #[inline]
    fn on_prune(
        &mut self,
        state: &PartialTour<T>,
        reason: PruneReason,
        statistics: &WorkerStatistics,
    ) {
        (**self).on_prune(state, reason, statistics)
    }

    #[inline]
    fn on_solution_found(&mut self, tour: &Tour<T>, statistics: &WorkerStatistics) {
        (**self).on_solution_found(tour, statistics)
    }

    #[inline]
    fn on_exit_search(&mut self, statistics: &WorkerStatistics) {
        (**self).on_exit_search(statistics)
    }
}
