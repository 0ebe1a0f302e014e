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


//! Parallel branch-and-bound depth-first search.
//!
//! The `SearchEngine` splits the first level of the search tree across a fixed
//! pool of scoped worker threads. Each worker runs an independent depth-first
//! search over its own `ExplorationStack` and synchronizes with the others
//! only through the `SharedIncumbent`:
//!
//! - the pruning bound is a relaxed atomic load, taken once per popped state;
//! - a complete tour that beats the bound is offered to the incumbent, which
//!   re-checks under its mutex and installs it only on strict improvement.
//!
//! A stale bound can only cause extra exploration, so the tour left in the
//! incumbent once every worker has been joined is optimal. Children are
//! pushed in descending city order, so within a worker lower city indices are
//! explored first. Costs that overflow the cost type are pruned.
//!
//! ## Usage
//!
//! ```rust
//! use salesman_bnb::engine::SearchEngine;
//! use salesman_model::matrix::CostMatrix;
//!
//! let matrix = CostMatrix::from_rows([
//!     [0i64, 10, 15, 20],
//!     [10, 0, 35, 25],
//!     [15, 35, 0, 30],
//!     [20, 25, 30, 0],
//! ])
//! .unwrap();
//!
//! let outcome = SearchEngine::new(2).solve(&matrix);
//! assert_eq!(outcome.tour().unwrap().cost(), 80);
//! ```

use crate::{
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, TreeSearchMonitor},
    },
    partial::PartialTour,
    partition::WorkPartitioner,
    result::SearchOutcome,
    stack::ExplorationStack,
    stats::WorkerStatistics,
};
use salesman_model::matrix::CostMatrix;
use salesman_search::{
    incumbent::{SharedIncumbent, improves_bound},
    num::SolverNumeric,
};
use std::time::Instant;

/// Exact parallel solver over a fixed number of worker threads.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine<T> {
    num_workers: usize,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SearchEngine<T>
where
    T: SolverNumeric,
{
    /// Creates an engine that searches with `num_workers` threads.
    ///
    /// # Panics
    ///
    /// Panics if `num_workers` is zero.
    #[inline]
    pub fn new(num_workers: usize) -> Self {
        assert!(
            num_workers > 0,
            "called `SearchEngine::new` with zero workers"
        );

        Self {
            num_workers,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the number of worker threads.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Solves `matrix` to optimality without monitoring.
    #[inline]
    pub fn solve(&self, matrix: &CostMatrix<T>) -> SearchOutcome<T> {
        self.solve_with_monitors(matrix, |_| NoOperationMonitor::new())
    }

    /// Solves `matrix` to optimality; `factory` builds one monitor per worker
    /// on that worker's thread.
    #[inline]
    pub fn solve_with_monitors<M, F>(&self, matrix: &CostMatrix<T>, factory: F) -> SearchOutcome<T>
    where
        M: TreeSearchMonitor<T>,
        F: Fn(usize) -> M + Sync,
    {
        let incumbent = SharedIncumbent::new();
        self.solve_with_incumbent(matrix, &incumbent, factory)
    }

    /// Solves `matrix` against an externally owned incumbent. A tour already
    /// held by `incumbent` bounds the search from the start and is returned
    /// if nothing cheaper exists.
    pub fn solve_with_incumbent<M, F>(
        &self,
        matrix: &CostMatrix<T>,
        incumbent: &SharedIncumbent<T>,
        factory: F,
    ) -> SearchOutcome<T>
    where
        M: TreeSearchMonitor<T>,
        F: Fn(usize) -> M + Sync,
    {
        let start_time = Instant::now();
        let installs_before = incumbent.num_installs();
        let num_cities = matrix.num_cities();

        let partitioner = WorkPartitioner::new(self.num_workers);
        let frontier = WorkPartitioner::divide_work(matrix);
        let mut seeds = partitioner.distribute(frontier);
        // With a single city the root is already complete and the frontier is empty.
        if num_cities == 1 {
            if let Some(first) = seeds.first_mut() {
                first.push(PartialTour::root(num_cities));
            }
        }

        log::info!(
            "starting search over {} cities with {} workers ({})",
            num_cities,
            self.num_workers,
            incumbent
        );

        let factory = &factory;
        let worker_statistics: Vec<WorkerStatistics> = std::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .into_iter()
                .enumerate()
                .map(|(worker, seed)| {
                    scope.spawn(move || {
                        WorkerSession::new(worker, matrix, incumbent, factory(worker), seed).run()
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().expect("search worker thread panicked"))
                .collect()
        });

        let solutions_found = incumbent.num_installs() - installs_before;
        let statistics =
            WorkerStatistics::aggregate(&worker_statistics, solutions_found, start_time.elapsed());

        match incumbent.snapshot() {
            Some(tour) => {
                log::info!(
                    "search finished in {:.2?}: optimal cost {} after {} nodes",
                    statistics.solve_duration,
                    tour.cost(),
                    statistics.nodes_explored
                );
                SearchOutcome::optimal(tour, statistics, worker_statistics)
            }
            None => {
                log::warn!(
                    "search finished in {:.2?}: no tour cost is representable",
                    statistics.solve_duration
                );
                SearchOutcome::infeasible(statistics, worker_statistics)
            }
        }
    }
}

impl<T> std::fmt::Debug for SearchEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("num_workers", &self.num_workers)
            .finish()
    }
}

impl<T> std::fmt::Display for SearchEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchEngine(num_workers: {})", self.num_workers)
    }
}

/// The depth-first search run by one worker thread.
struct WorkerSession<'a, T, M>
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T>,
{
    matrix: &'a CostMatrix<T>,
    incumbent: &'a SharedIncumbent<T>,
    monitor: M,
    stack: ExplorationStack<T>,
    stats: WorkerStatistics,
    start_time: Instant,
}

impl<'a, T, M> WorkerSession<'a, T, M>
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        worker: usize,
        matrix: &'a CostMatrix<T>,
        incumbent: &'a SharedIncumbent<T>,
        monitor: M,
        seeds: Vec<PartialTour<T>>,
    ) -> Self {
        let mut stack = ExplorationStack::preallocated(matrix.num_cities(), seeds.len());
        let mut stats = WorkerStatistics::new(worker);
        stats.set_seeds(seeds.len());
        stack.extend(seeds);

        Self {
            matrix,
            incumbent,
            monitor,
            stack,
            stats,
            start_time: Instant::now(),
        }
    }

    /// Runs the search from the seeded stack until it is exhausted.
    fn run(mut self) -> WorkerStatistics {
        let num_cities = self.matrix.num_cities();

        log::debug!(
            "worker {} starting with {} seeds",
            self.stats.worker,
            self.stats.seeds
        );
        self.monitor.on_enter_search(self.stats.worker, self.matrix);

        while let Some(state) = self.stack.pop() {
            self.stats.on_node_explored();
            self.monitor.on_node_explored(&state, &self.stats);

            let bound = self.incumbent.upper_bound();
            let cost: i64 = state.cost().into();

            if state.is_complete() {
                self.complete(state, bound);
            } else if improves_bound(cost, bound) {
                self.expand(&state, bound);
            } else {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&state, PruneReason::BoundDominated, &self.stats);
            }
        }

        let peak_len = self.stack.peak_len();
        self.stats.set_peak_stack(
            peak_len,
            self.stack.allocated_memory_bytes()
                + peak_len * PartialTour::<T>::estimated_heap_bytes(num_cities),
        );
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        log::debug!(
            "worker {} finished: {} nodes, {} installs, peak stack {}",
            self.stats.worker,
            self.stats.nodes_explored,
            self.stats.solutions_installed,
            self.stats.peak_stack_len
        );

        self.stats
    }

    /// Closes a complete path and offers it to the incumbent.
    #[inline]
    fn complete(&mut self, state: PartialTour<T>, bound: i64) {
        let total = match state.closing_cost(self.matrix) {
            Some(total) => total,
            None => {
                self.stats.on_pruning_overflow();
                self.monitor
                    .on_prune(&state, PruneReason::Overflow, &self.stats);
                return;
            }
        };

        let total_i64: i64 = total.into();
        if !improves_bound(total_i64, bound) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        let tour = state.into_tour(total);
        if self.incumbent.try_install(&tour) {
            self.stats.on_solution_installed();
            log::debug!(
                "worker {} installed tour with cost {}",
                self.stats.worker,
                total
            );
            self.monitor.on_solution_found(&tour, &self.stats);
        } else {
            self.stats.on_solution_rejected();
        }
    }

    /// Pushes every unvisited successor whose path cost stays below `bound`.
    #[inline]
    fn expand(&mut self, state: &PartialTour<T>, bound: i64) {
        let row = self.matrix.row(state.current_city());

        for next in state.unvisited_descending() {
            match state.cost().checked_add(&row[next.get()]) {
                None => {
                    self.stats.on_pruning_overflow();
                    self.monitor
                        .on_prune(state, PruneReason::Overflow, &self.stats);
                }
                Some(cost) if improves_bound(cost.into(), bound) => {
                    self.stack.push(state.child(next, cost));
                }
                Some(_) => {
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(state, PruneReason::BoundDominated, &self.stats);
                }
            }
        }
    }
}
