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


//! Static work partitioning.
//!
//! The frontier is the first level of the search tree: one path `0 -> c` for
//! every city `c` in `1..N`. It is cut into contiguous slices, one per worker,
//! each of length `M / W`; the last slice also takes the remainder. When there
//! are more workers than frontier states the leading slices are empty and the
//! last worker receives the whole frontier. Slices never overlap and together
//! cover every frontier index exactly once.

use crate::partial::PartialTour;
use salesman_model::{index::CityIndex, matrix::CostMatrix};
use salesman_search::num::SolverNumeric;
use std::ops::Range;

/// Splits the first level of the search tree across a fixed number of workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkPartitioner {
    num_workers: usize,
}

impl WorkPartitioner {
    /// Creates a partitioner for `num_workers` workers.
    ///
    /// # Panics
    ///
    /// Panics if `num_workers` is zero.
    #[inline]
    pub fn new(num_workers: usize) -> Self {
        assert!(
            num_workers > 0,
            "called `WorkPartitioner::new` with zero workers"
        );

        Self { num_workers }
    }

    /// Returns the number of workers.
    #[inline]
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Builds the frontier: entry `c - 1` is the path `0 -> c` with cost `matrix[0][c]`.
    pub fn divide_work<T>(matrix: &CostMatrix<T>) -> Vec<PartialTour<T>>
    where
        T: SolverNumeric,
    {
        let root = PartialTour::root(matrix.num_cities());
        matrix
            .cities()
            .skip(1)
            .map(|city| root.child(city, matrix.cost(CityIndex::START, city)))
            .collect()
    }

    /// Returns one contiguous index range per worker covering `0..frontier_len`.
    pub fn assign_slices(&self, frontier_len: usize) -> Vec<Range<usize>> {
        let chunk = frontier_len / self.num_workers;
        (0..self.num_workers)
            .map(|worker| {
                let start = worker * chunk;
                let end = if worker + 1 == self.num_workers {
                    frontier_len
                } else {
                    start + chunk
                };
                start..end
            })
            .collect()
    }

    /// Moves the frontier into per-worker seed lists following `assign_slices`.
    pub fn distribute<T>(&self, frontier: Vec<PartialTour<T>>) -> Vec<Vec<PartialTour<T>>> {
        let slices = self.assign_slices(frontier.len());
        let mut states = frontier.into_iter();
        slices
            .into_iter()
            .map(|slice| states.by_ref().take(slice.len()).collect())
            .collect()
    }
}

impl std::fmt::Display for WorkPartitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WorkPartitioner(num_workers: {})", self.num_workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_exactly_once(slices: &[Range<usize>], len: usize) -> bool {
        let mut hits = vec![0usize; len];
        for slice in slices {
            for i in slice.clone() {
                if i >= len {
                    return false;
                }
                hits[i] += 1;
            }
        }
        hits.iter().all(|&h| h == 1)
    }

    #[test]
    fn test_divide_work_builds_first_level() {
        let m = CostMatrix::from_rows(vec![
            vec![0i64, 10, 15, 20],
            vec![10, 0, 35, 25],
            vec![15, 35, 0, 30],
            vec![20, 25, 30, 0],
        ])
        .unwrap();

        let frontier = WorkPartitioner::divide_work(&m);
        assert_eq!(frontier.len(), 3);
        for (i, state) in frontier.iter().enumerate() {
            let city = CityIndex::new(i + 1);
            assert_eq!(state.order(), &[CityIndex::START, city]);
            assert_eq!(state.cost(), m.cost(CityIndex::START, city));
            assert_eq!(state.visit_count(), 2);
        }
    }

    #[test]
    fn test_divide_work_single_city_is_empty() {
        let m = CostMatrix::from_rows(vec![vec![0i64]]).unwrap();
        assert!(WorkPartitioner::divide_work(&m).is_empty());
    }

    #[test]
    fn test_assign_slices_even_and_remainder() {
        let p = WorkPartitioner::new(3);
        assert_eq!(p.assign_slices(9), vec![0..3, 3..6, 6..9]);
        assert_eq!(p.assign_slices(10), vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn test_assign_slices_more_workers_than_states() {
        let p = WorkPartitioner::new(5);
        assert_eq!(p.assign_slices(3), vec![0..0, 0..0, 0..0, 0..0, 0..3]);
    }

    #[test]
    fn test_assign_slices_partition_completeness() {
        for len in 0..20 {
            for workers in 1..25 {
                let slices = WorkPartitioner::new(workers).assign_slices(len);
                assert_eq!(slices.len(), workers);
                assert!(
                    covers_exactly_once(&slices, len),
                    "len {} workers {}: {:?}",
                    len,
                    workers,
                    slices
                );
            }
        }
    }

    #[test]
    fn test_distribute_moves_every_state_once() {
        let m = CostMatrix::from_rows(
            (0..7).map(|i| (0..7).map(|j| (i * 7 + j) as i64).collect::<Vec<_>>()),
        )
        .unwrap();

        for workers in 1..10 {
            let p = WorkPartitioner::new(workers);
            let seeds = p.distribute(WorkPartitioner::divide_work(&m));
            assert_eq!(seeds.len(), workers);

            let mut cities: Vec<usize> = seeds
                .iter()
                .flatten()
                .map(|s| s.current_city().get())
                .collect();
            cities.sort_unstable();
            assert_eq!(cities, (1..7).collect::<Vec<_>>());
        }
    }

    #[test]
    #[should_panic(expected = "called `WorkPartitioner::new` with zero workers")]
    fn test_zero_workers_panics() {
        let _ = WorkPartitioner::new(0);
    }
}
