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


/// Statistics aggregated over all workers of one solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    /// Number of tours installed into the shared incumbent.
    pub solutions_found: u64,
    /// Number of worker threads used.
    pub used_threads: usize,
    /// Total search states popped across all workers.
    pub nodes_explored: u64,
    /// Total states or candidates discarded by the pruning bound.
    pub prunings_bound: u64,
    /// Total candidates discarded because their cost overflowed the cost type.
    pub prunings_overflow: u64,
    /// Sum of the peak stack memory of every worker, in bytes.
    pub max_memory_bytes: usize,
    /// Total wall-clock duration of the solve.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Prunings (bound): {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (overflow): {}", self.prunings_overflow)?;
        writeln!(f, "  Max Memory Used (bytes): {}", self.max_memory_bytes)?;
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    solutions_found: u64,
    used_threads: usize,
    nodes_explored: u64,
    prunings_bound: u64,
    prunings_overflow: u64,
    max_memory_bytes: usize,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    /// Creates a new `SolverStatisticsBuilder` with default values.
    #[inline]
    pub fn new() -> Self {
        Self {
            solutions_found: 0,
            used_threads: 1,
            nodes_explored: 0,
            prunings_bound: 0,
            prunings_overflow: 0,
            max_memory_bytes: 0,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    /// Sets the number of tours installed into the incumbent.
    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.solutions_found = solutions_found;
        self
    }

    /// Sets the number of worker threads.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    /// Sets the number of explored search states.
    #[inline]
    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.nodes_explored = nodes_explored;
        self
    }

    /// Sets the number of prunings caused by the incumbent bound.
    #[inline]
    pub fn prunings_bound(mut self, prunings_bound: u64) -> Self {
        self.prunings_bound = prunings_bound;
        self
    }

    /// Sets the number of prunings caused by cost overflow.
    #[inline]
    pub fn prunings_overflow(mut self, prunings_overflow: u64) -> Self {
        self.prunings_overflow = prunings_overflow;
        self
    }

    /// Sets the peak memory used by the search stacks, in bytes.
    #[inline]
    pub fn max_memory_bytes(mut self, max_memory_bytes: usize) -> Self {
        self.max_memory_bytes = max_memory_bytes;
        self
    }

    /// Sets the total wall-clock duration of the solve.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            solutions_found: self.solutions_found,
            used_threads: self.used_threads,
            nodes_explored: self.nodes_explored,
            prunings_bound: self.prunings_bound,
            prunings_overflow: self.prunings_overflow,
            max_memory_bytes: self.max_memory_bytes,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverStatistics, SolverStatisticsBuilder};
    use std::time::Duration;

    #[test]
    fn builder_constructs_expected_struct() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .used_threads(8)
            .nodes_explored(1_000)
            .prunings_bound(250)
            .prunings_overflow(4)
            .max_memory_bytes(4096)
            .solve_duration(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.used_threads, 8);
        assert_eq!(stats.nodes_explored, 1_000);
        assert_eq!(stats.prunings_bound, 250);
        assert_eq!(stats.prunings_overflow, 4);
        assert_eq!(stats.max_memory_bytes, 4096);
        assert_eq!(stats.solve_duration, Duration::from_millis(1234));
    }

    #[test]
    fn builder_defaults_to_single_thread() {
        let stats = SolverStatisticsBuilder::default().build();
        assert_eq!(stats.used_threads, 1);
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.solve_duration, Duration::ZERO);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SolverStatistics {
            solutions_found: 2,
            used_threads: 4,
            nodes_explored: 99,
            prunings_bound: 7,
            prunings_overflow: 3,
            max_memory_bytes: 2_000_000,
            solve_duration: Duration::from_millis(1234),
        };

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Solver Statistics:"));
        assert!(rendered.contains("Solutions Found: 2"));
        assert!(rendered.contains("Used Threads: 4"));
        assert!(rendered.contains("Nodes Explored: 99"));
        assert!(rendered.contains("Prunings (bound): 7"));
        assert!(rendered.contains("Prunings (overflow): 3"));
        assert!(rendered.contains("Max Memory Used (bytes): 2000000"));
        assert!(rendered.contains("Solve Duration (secs): 1.234"));
    }
}
