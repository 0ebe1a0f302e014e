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


use salesman_search::stats::{SolverStatistics, SolverStatisticsBuilder};
use std::time::Duration;

/// Statistics collected by a single search worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerStatistics {
    /// Index of the worker that produced these statistics.
    pub worker: usize,
    /// Number of frontier states the worker was seeded with.
    pub seeds: u64,
    /// Total states popped from the stack.
    pub nodes_explored: u64,
    /// States or candidate children discarded because their cost reached the bound.
    pub prunings_bound: u64,
    /// Candidate children discarded because their cost overflowed the cost type.
    pub prunings_overflow: u64,
    /// Complete tours this worker installed as the new incumbent.
    pub solutions_installed: u64,
    /// Complete tours that beat the stale bound but lost the re-check under the lock.
    pub solutions_rejected: u64,
    /// Largest number of pending states on the stack.
    pub peak_stack_len: usize,
    /// Estimated bytes held by the stack at its peak, including the states' buffers.
    pub peak_memory_bytes: usize,
    /// Wall time the worker spent searching.
    pub time_total: Duration,
}

impl WorkerStatistics {
    /// Creates empty statistics for `worker`.
    #[inline]
    pub fn new(worker: usize) -> Self {
        Self {
            worker,
            ..Self::default()
        }
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_overflow(&mut self) {
        self.prunings_overflow = self.prunings_overflow.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_installed(&mut self) {
        self.solutions_installed = self.solutions_installed.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_rejected(&mut self) {
        self.solutions_rejected = self.solutions_rejected.saturating_add(1);
    }

    #[inline]
    pub fn set_seeds(&mut self, seeds: usize) {
        self.seeds = seeds as u64;
    }

    /// Records the stack high-water mark and the memory held at that point.
    #[inline]
    pub fn set_peak_stack(&mut self, peak_len: usize, peak_memory_bytes: usize) {
        self.peak_stack_len = peak_len;
        self.peak_memory_bytes = peak_memory_bytes;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Combines per-worker statistics into solver-wide totals.
    pub fn aggregate(
        workers: &[WorkerStatistics],
        solutions_found: u64,
        solve_duration: Duration,
    ) -> SolverStatistics {
        let nodes_explored = workers.iter().map(|w| w.nodes_explored).sum();
        let prunings_bound = workers.iter().map(|w| w.prunings_bound).sum();
        let prunings_overflow = workers.iter().map(|w| w.prunings_overflow).sum();
        let max_memory_bytes = workers.iter().map(|w| w.peak_memory_bytes).sum();

        SolverStatisticsBuilder::new()
            .solutions_found(solutions_found)
            .used_threads(workers.len())
            .nodes_explored(nodes_explored)
            .prunings_bound(prunings_bound)
            .prunings_overflow(prunings_overflow)
            .max_memory_bytes(max_memory_bytes)
            .solve_duration(solve_duration)
            .build()
    }
}

impl std::fmt::Display for WorkerStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Worker {} Statistics:", self.worker)?;
        writeln!(f, "  Seeds:                {}", self.seeds)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (overflow):  {}", self.prunings_overflow)?;
        writeln!(f, "  Solutions installed:  {}", self.solutions_installed)?;
        writeln!(f, "  Solutions rejected:   {}", self.solutions_rejected)?;
        writeln!(f, "  Peak stack length:    {}", self.peak_stack_len)?;
        writeln!(f, "  Peak memory (bytes):  {}", self.peak_memory_bytes)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_increment() {
        let mut stats = WorkerStatistics::new(3);
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_pruning_bound();
        stats.on_pruning_overflow();
        stats.on_solution_installed();
        stats.on_solution_rejected();
        stats.set_seeds(4);
        stats.set_peak_stack(10, 80);

        assert_eq!(stats.worker, 3);
        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.prunings_overflow, 1);
        assert_eq!(stats.solutions_installed, 1);
        assert_eq!(stats.solutions_rejected, 1);
        assert_eq!(stats.seeds, 4);
        assert_eq!(stats.peak_stack_len, 10);
        assert_eq!(stats.peak_memory_bytes, 80);
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = WorkerStatistics {
            nodes_explored: u64::MAX,
            ..WorkerStatistics::default()
        };
        stats.on_node_explored();
        assert_eq!(stats.nodes_explored, u64::MAX);
    }

    #[test]
    fn test_aggregate_sums_workers() {
        let mut a = WorkerStatistics::new(0);
        a.nodes_explored = 10;
        a.prunings_bound = 3;
        a.prunings_overflow = 1;
        a.peak_memory_bytes = 100;
        let mut b = WorkerStatistics::new(1);
        b.nodes_explored = 5;
        b.prunings_bound = 2;
        b.peak_memory_bytes = 50;

        let total = WorkerStatistics::aggregate(&[a, b], 2, Duration::from_millis(5));
        assert_eq!(total.used_threads, 2);
        assert_eq!(total.nodes_explored, 15);
        assert_eq!(total.prunings_bound, 5);
        assert_eq!(total.prunings_overflow, 1);
        assert_eq!(total.max_memory_bytes, 150);
        assert_eq!(total.solutions_found, 2);
        assert_eq!(total.solve_duration, Duration::from_millis(5));
    }

    #[test]
    fn test_display_mentions_worker() {
        let stats = WorkerStatistics::new(7);
        let rendered = format!("{}", stats);
        assert!(rendered.starts_with("Worker 7 Statistics:"));
        assert!(rendered.contains("Nodes explored:       0"));
    }
}
