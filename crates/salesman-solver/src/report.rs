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


use salesman_bnb::result::SearchOutcome;
use salesman_search::num::SolverNumeric;
use std::io::{self, Write};

/// Writes the best tour as `Best path: ...` and `Distance: ...` lines, or
/// `No tour found`. With `with_statistics` the aggregated and per-worker
/// statistics follow.
pub fn write_report<W, T>(
    out: &mut W,
    outcome: &SearchOutcome<T>,
    with_statistics: bool,
) -> io::Result<()>
where
    W: Write,
    T: SolverNumeric,
{
    match outcome.tour() {
        Some(tour) => {
            write!(out, "Best path:")?;
            for city in tour.order() {
                write!(out, " {}", city.get())?;
            }
            writeln!(out)?;
            writeln!(out, "Distance: {}", tour.cost())?;
        }
        None => writeln!(out, "No tour found")?,
    }

    if with_statistics {
        writeln!(out)?;
        write!(out, "{}", outcome.statistics())?;
        for worker in outcome.worker_statistics() {
            write!(out, "{}", worker)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesman_bnb::stats::WorkerStatistics;
    use salesman_model::{index::CityIndex, tour::Tour};
    use salesman_search::stats::SolverStatisticsBuilder;

    fn render(outcome: &SearchOutcome<i64>, with_statistics: bool) -> String {
        let mut out = Vec::new();
        write_report(&mut out, outcome, with_statistics).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_optimal_report_format() {
        let tour = Tour::new([0, 1, 3, 2].into_iter().map(CityIndex::new).collect(), 80);
        let outcome = SearchOutcome::optimal(
            tour,
            SolverStatisticsBuilder::new().build(),
            vec![WorkerStatistics::new(0)],
        );

        assert_eq!(render(&outcome, false), "Best path: 0 1 3 2\nDistance: 80\n");
    }

    #[test]
    fn test_infeasible_report_format() {
        let outcome: SearchOutcome<i64> =
            SearchOutcome::infeasible(SolverStatisticsBuilder::new().build(), Vec::new());
        assert_eq!(render(&outcome, false), "No tour found\n");
    }

    #[test]
    fn test_statistics_block() {
        let tour = Tour::new(vec![CityIndex::new(0), CityIndex::new(1)], 10);
        let outcome = SearchOutcome::optimal(
            tour,
            SolverStatisticsBuilder::new().used_threads(2).build(),
            vec![WorkerStatistics::new(0), WorkerStatistics::new(1)],
        );

        let rendered = render(&outcome, true);
        assert!(rendered.starts_with("Best path: 0 1\nDistance: 10\n\nSolver Statistics:\n"));
        assert!(rendered.contains("Used Threads: 2"));
        assert!(rendered.contains("Worker 0 Statistics:"));
        assert!(rendered.contains("Worker 1 Statistics:"));
    }
}
