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


use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

/// Verbosity of the diagnostic log written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Disable logging
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_filter())
    }
}

/// Runtime options of the solver, parsed from the command line.
#[derive(Parser, Clone, Debug)]
#[command(name = "salesman")]
#[command(about = "Exact travelling salesman solver using parallel branch and bound")]
#[command(version)]
pub struct SolverOptions {
    /// Number of worker threads
    #[arg(value_parser = parse_positive)]
    pub threads: usize,

    /// Number of cities; exactly CITIES x CITIES costs are read from PATH
    #[arg(value_parser = parse_positive)]
    pub cities: usize,

    /// Whitespace-separated cost matrix, row `i` holding the costs of leaving city `i`
    pub path: PathBuf,

    /// Log verbosity on stderr
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Prefix log lines with a timestamp
    #[arg(long)]
    pub log_timestamp: bool,

    /// Log per-worker progress every SECS seconds
    #[arg(long, value_name = "SECS")]
    pub progress_interval: Option<u64>,

    /// Print search statistics after the result
    #[arg(long)]
    pub stats: bool,
}

impl SolverOptions {
    /// Returns the progress logging interval, if enabled.
    pub fn progress_interval(&self) -> Option<Duration> {
        self.progress_interval.map(Duration::from_secs)
    }
}

impl std::fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "threads={} cities={} path={} log_level={} stats={}",
            self.threads,
            self.cities,
            self.path.display(),
            self.log_level,
            self.stats
        )?;
        if let Some(secs) = self.progress_interval {
            write!(f, " progress_interval={}s", secs)?;
        }
        Ok(())
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|e| format!("`{raw}` is not a valid count ({e})"))?;
    if value == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(value)
}
