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


//! Command line front end for the parallel branch-and-bound solver.
//!
//! Reads a `CITIES x CITIES` cost matrix from a text file, solves it with
//! `salesman_bnb::engine::SearchEngine` on `THREADS` workers and prints the
//! optimal tour:
//!
//! ```text
//! $ salesman 4 4 matrix.txt
//! Best path: 0 2 3 1
//! Distance: 80
//! ```

pub mod error;
pub mod logging;
pub mod options;
pub mod report;

pub use error::{Error, Result};

use log::info;
use options::SolverOptions;
use salesman_bnb::{
    engine::SearchEngine, monitor::log::LogTreeSearchMonitor, result::SearchOutcome,
};
use salesman_model::loading::MatrixLoader;
use std::io;

/// Nodes between two wall-clock checks of the progress monitor.
const PROGRESS_CLOCK_MASK: u64 = 0xFFFF;

/// Loads the matrix named by `options` and solves it to optimality.
pub fn solve(options: &SolverOptions) -> Result<SearchOutcome<i64>> {
    if options.threads == 0 {
        return Err(Error::invalid_input("thread count must be at least 1"));
    }
    if options.cities == 0 {
        return Err(Error::invalid_input("city count must be at least 1"));
    }

    let matrix = MatrixLoader::<i64>::new()
        .with_num_cities(options.cities)
        .from_path(&options.path)?;
    info!("loaded {} from {}", matrix, options.path.display());
    match matrix.num_tours() {
        Some(tours) => info!(
            "search space: {} tours, symmetric: {}",
            tours,
            matrix.is_symmetric()
        ),
        None => info!(
            "search space: more than {} tours, symmetric: {}",
            u128::MAX,
            matrix.is_symmetric()
        ),
    }

    let engine = SearchEngine::new(options.threads);
    let outcome = match options.progress_interval() {
        Some(interval) => engine.solve_with_monitors(&matrix, |_| {
            LogTreeSearchMonitor::new(interval, PROGRESS_CLOCK_MASK)
        }),
        None => engine.solve(&matrix),
    };

    Ok(outcome)
}

/// Solves the instance and writes the report to stdout.
pub fn run(options: &SolverOptions) -> Result<()> {
    let outcome = solve(options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &outcome, options.stats)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    fn write_matrix(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "salesman-solver-{}-{}.txt",
            name,
            std::process::id()
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn options(threads: &str, cities: &str, path: &Path) -> SolverOptions {
        SolverOptions::try_parse_from([
            "salesman",
            threads,
            cities,
            path.to_str().unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_solves_matrix_file() {
        let path = write_matrix(
            "four",
            "# four cities\n0 10 15 20\n10 0 35 25\n15 35 0 30\n20 25 30 0\n",
        );

        for threads in ["1", "3", "8"] {
            let outcome = solve(&options(threads, "4", &path)).unwrap();
            let tour = outcome.tour().unwrap();
            assert_eq!(tour.cost(), 80);
            assert_eq!(tour.order()[0].get(), 0);
        }

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_progress_monitor_does_not_change_result() {
        let path = write_matrix("progress", "0 5\n5 0\n");
        let mut opts = options("2", "2", &path);
        opts.progress_interval = Some(0);

        let outcome = solve(&opts).unwrap();
        assert_eq!(outcome.tour().unwrap().cost(), 10);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_short_file_is_a_load_error() {
        let path = write_matrix("short", "0 1 2\n1 0\n");
        let err = solve(&options("2", "3", &path)).unwrap_err();
        assert!(matches!(err, Error::Load(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let path = std::env::temp_dir().join("salesman-solver-does-not-exist.txt");
        let err = solve(&options("1", "2", &path)).unwrap_err();
        assert!(matches!(err, Error::Load(_)));
    }

    #[test]
    fn test_zero_threads_is_invalid_input() {
        let path = PathBuf::from("unused.txt");
        let mut opts = options("1", "2", &path);
        opts.threads = 0;
        assert!(matches!(solve(&opts), Err(Error::InvalidInput(_))));
    }
}
