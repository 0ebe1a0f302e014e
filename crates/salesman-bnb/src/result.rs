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


use crate::stats::WorkerStatistics;
use num_traits::{PrimInt, Signed};
use salesman_model::tour::Tour;
use salesman_search::{
    result::{SolverResult, TerminationReason},
    stats::SolverStatistics,
};

/// Result of a parallel search after all workers have been joined.
#[derive(Debug, Clone)]
pub struct SearchOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
    worker_statistics: Vec<WorkerStatistics>,
}

impl<T> SearchOutcome<T> {
    #[inline]
    pub fn optimal(
        tour: Tour<T>,
        statistics: SolverStatistics,
        worker_statistics: Vec<WorkerStatistics>,
    ) -> Self {
        Self {
            result: SolverResult::Optimal(tour),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
            worker_statistics,
        }
    }

    #[inline]
    pub fn infeasible(
        statistics: SolverStatistics,
        worker_statistics: Vec<WorkerStatistics>,
    ) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
            worker_statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Returns the aggregated statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Returns the statistics of every worker, indexed by worker.
    #[inline]
    pub fn worker_statistics(&self) -> &[WorkerStatistics] {
        &self.worker_statistics
    }

    /// Returns the best tour, if one was found.
    #[inline]
    pub fn tour(&self) -> Option<&Tour<T>> {
        self.result.tour()
    }

    /// Consumes the outcome and returns the best tour, if one was found.
    #[inline]
    pub fn into_tour(self) -> Option<Tour<T>> {
        self.result.into_tour()
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchOutcome(result: {}, termination_reason: {}, workers: {})",
            self.result,
            self.termination_reason,
            self.worker_statistics.len()
        )
    }
}
