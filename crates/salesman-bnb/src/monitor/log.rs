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


use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    partial::PartialTour,
    stats::WorkerStatistics,
};
use salesman_model::{matrix::CostMatrix, tour::Tour};
use salesman_search::num::SolverNumeric;
use std::time::{Duration, Instant};

/// Writes periodic progress lines for one worker through the `log` facade.
///
/// The wall clock is only consulted when `nodes_explored & clock_check_mask == 0`,
/// so the mask should be of the form `2^k - 1`.
#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    worker: usize,
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_cost: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            worker: 0,
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_cost: None,
        }
    }

    /// Returns the cheapest tour cost this worker has installed.
    #[inline]
    pub fn best_cost(&self) -> Option<T> {
        self.best_cost
    }

    #[inline(always)]
    fn log_line(&mut self, state: &PartialTour<T>, stats: &WorkerStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best_cost {
            Some(cost) => format!("{}", cost),
            None => "-".to_string(),
        };

        log::info!(
            "worker {:>3} | {:>8.1}s | nodes {:>14} | depth {:>3} | best {:>12} | pruned {:>14}",
            self.worker,
            elapsed,
            stats.nodes_explored,
            state.visit_count(),
            best,
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, worker: usize, matrix: &CostMatrix<T>) {
        self.worker = worker;
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_cost = None;
        log::debug!(
            "worker {:>3} | searching {} cities",
            worker,
            matrix.num_cities()
        );
    }

    fn on_node_explored(&mut self, state: &PartialTour<T>, stats: &WorkerStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_prune(&mut self, _state: &PartialTour<T>, _reason: PruneReason, _stats: &WorkerStatistics) {}

    fn on_solution_found(&mut self, tour: &Tour<T>, _stats: &WorkerStatistics) {
        self.best_cost = Some(tour.cost());
        log::info!(
            "worker {:>3} | {:>8.1}s | new incumbent with cost {}",
            self.worker,
            self.start_time.elapsed().as_secs_f32(),
            tour.cost()
        );
    }

    fn on_exit_search(&mut self, stats: &WorkerStatistics) {
        log::info!(
            "worker {:>3} | finished after {} nodes in {:.2?}",
            self.worker,
            stats.nodes_explored,
            self.start_time.elapsed()
        );
    }
}
