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


//! Instance loader for cost matrices.
//!
//! Reads whitespace-separated integers, row by row: row `i`, column `j` is the
//! cost of travelling from city `i` to city `j`. Anything after a `#` on a line
//! is a comment. The number of cities is either supplied up front (the command
//! line takes it as an argument) or inferred from the width of the first line
//! that carries data.
//!
//! When the number of cities is given, exactly `N * N` tokens are consumed and
//! anything after them is ignored. Missing tokens, tokens that do not parse as
//! the cost type and negative costs are reported with the offending line.

use crate::matrix::{CostMatrix, MatrixError};
use num_traits::{PrimInt, Signed};
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// The error type for the matrix loading process.
#[derive(Debug, Error)]
pub enum MatrixLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before all `N * N` costs were read.
    #[error("unexpected end of input after {read} of {expected} costs")]
    UnexpectedEof { read: usize, expected: usize },
    /// A token could not be parsed into the cost type.
    #[error("line {line}: could not parse token '{token}' as {type_name}")]
    Parse {
        line: usize,
        token: String,
        type_name: &'static str,
    },
    /// The number of cities is zero or the input holds no data at all.
    #[error("the number of cities must be a positive integer")]
    InvalidDimensions,
    /// The costs were read but do not form a valid matrix.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// A configurable loader for cost matrices.
///
/// # Examples
///
/// ```rust
/// use salesman_model::loading::MatrixLoader;
///
/// let m = MatrixLoader::<i64>::new()
///     .from_str("0 5\n5 0\n")
///     .unwrap();
/// assert_eq!(m.num_cities(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLoader<T> {
    num_cities: Option<usize>,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for MatrixLoader<T> {
    fn default() -> Self {
        Self {
            num_cities: None,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> MatrixLoader<T>
where
    T: PrimInt + Signed + FromStr,
{
    /// Creates a loader that infers the number of cities from the first data line.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the number of cities. Exactly `n * n` costs will be read.
    #[inline]
    pub fn with_num_cities(mut self, n: usize) -> Self {
        self.num_cities = Some(n);
        self
    }

    /// Returns the configured number of cities, if any.
    #[inline]
    pub fn num_cities(&self) -> Option<usize> {
        self.num_cities
    }

    /// Loads a matrix from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<CostMatrix<T>, MatrixLoaderError> {
        let mut sc = Scanner::new(rdr);

        let n = match self.num_cities {
            Some(n) => n,
            None => sc.peek_line_width()?,
        };
        if n == 0 {
            return Err(MatrixLoaderError::InvalidDimensions);
        }

        let expected = n
            .checked_mul(n)
            .ok_or(MatrixLoaderError::InvalidDimensions)?;
        // The dimension may come from the command line; grow with the input instead.
        let mut costs = Vec::with_capacity(expected.min(1 << 16));
        while costs.len() < expected {
            match sc.next::<T>()? {
                Some(cost) => costs.push(cost),
                None => {
                    return Err(MatrixLoaderError::UnexpectedEof {
                        read: costs.len(),
                        expected,
                    });
                }
            }
        }

        Ok(CostMatrix::from_flat(n, costs)?)
    }

    /// Loads a matrix from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<CostMatrix<T>, MatrixLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a matrix from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<CostMatrix<T>, MatrixLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a matrix from a string slice.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<CostMatrix<T>, MatrixLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

/// Splits a reader into whitespace-separated tokens, one line at a time,
/// dropping `#` comments.
struct Scanner<R> {
    rdr: R,
    buf: String,
    line: usize,
    tokens: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            line: 0,
            tokens: VecDeque::new(),
        }
    }

    /// Reads lines until one carries tokens. Returns `Ok(false)` on EOF.
    fn fill(&mut self) -> Result<bool, MatrixLoaderError> {
        while self.tokens.is_empty() {
            self.buf.clear();
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;

            let data = match self.buf.find('#') {
                Some(pos) => &self.buf[..pos],
                None => &self.buf,
            };
            self.tokens
                .extend(data.split_whitespace().map(str::to_owned));
        }
        Ok(true)
    }

    /// Returns the number of tokens on the next line with data without consuming them.
    fn peek_line_width(&mut self) -> Result<usize, MatrixLoaderError> {
        if !self.fill()? {
            return Err(MatrixLoaderError::InvalidDimensions);
        }
        Ok(self.tokens.len())
    }

    /// Reads the next token and parses it into `T`, or `None` on EOF.
    fn next<T: FromStr>(&mut self) -> Result<Option<T>, MatrixLoaderError> {
        if !self.fill()? {
            return Ok(None);
        }
        let Some(token) = self.tokens.pop_front() else {
            return Ok(None);
        };

        token
            .parse::<T>()
            .map(Some)
            .map_err(|_| MatrixLoaderError::Parse {
                line: self.line,
                token,
                type_name: std::any::type_name::<T>(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CityIndex;
    use std::io::Write;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    const FOUR_CITIES: &str = "\
# four city instance
0 10 15 20
10 0 35 25   # trailing comment
15 35 0 30

20 25 30 0
";

    #[test]
    fn test_infers_dimension_from_first_data_line() {
        let m = MatrixLoader::<i64>::new().from_str(FOUR_CITIES).unwrap();
        assert_eq!(m.num_cities(), 4);
        assert_eq!(m.cost(ci(1), ci(3)), 25);
        assert_eq!(m.cost(ci(3), ci(2)), 30);
    }

    #[test]
    fn test_fixed_dimension_ignores_line_layout() {
        let m = MatrixLoader::<i32>::new()
            .with_num_cities(2)
            .from_str("0 5 5\n0")
            .unwrap();
        assert_eq!(m.cost(ci(0), ci(1)), 5);
        assert_eq!(m.cost(ci(1), ci(0)), 5);
    }

    #[test]
    fn test_fixed_dimension_ignores_trailing_tokens() {
        let m = MatrixLoader::<i64>::new()
            .with_num_cities(1)
            .from_str("7 8 9")
            .unwrap();
        assert_eq!(m.num_cities(), 1);
        assert_eq!(m.cost(ci(0), ci(0)), 7);
    }

    #[test]
    fn test_unexpected_eof_reports_progress() {
        let err = MatrixLoader::<i64>::new()
            .with_num_cities(3)
            .from_str("0 1 2\n1 0 3\n")
            .unwrap_err();
        assert!(matches!(
            err,
            MatrixLoaderError::UnexpectedEof {
                read: 6,
                expected: 9
            }
        ));
    }

    #[test]
    fn test_parse_error_names_line_and_token() {
        let err = MatrixLoader::<i64>::new()
            .from_str("0 1\n1 x\n")
            .unwrap_err();
        match err {
            MatrixLoaderError::Parse {
                line,
                token,
                type_name,
            } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
                assert_eq!(type_name, "i64");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let err = MatrixLoader::<i64>::new()
            .from_str("0 -1\n1 0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            MatrixLoaderError::Matrix(MatrixError::NegativeCost { from: 0, to: 1 })
        ));
    }

    #[test]
    fn test_empty_input_and_zero_dimension_are_invalid() {
        let empty = MatrixLoader::<i64>::new().from_str("# nothing here\n\n");
        assert!(matches!(empty, Err(MatrixLoaderError::InvalidDimensions)));

        let zero = MatrixLoader::<i64>::new().with_num_cities(0).from_str("1");
        assert!(matches!(zero, Err(MatrixLoaderError::InvalidDimensions)));
    }

    #[test]
    fn test_from_path_reads_file_and_reports_missing_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("salesman-loader-{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(b"0 5\n5 0\n").unwrap();
        }

        let m = MatrixLoader::<i64>::new().from_path(&path).unwrap();
        assert_eq!(m.cost(ci(0), ci(1)), 5);
        std::fs::remove_file(&path).unwrap();

        let missing = MatrixLoader::<i64>::new().from_path(dir.join("salesman-does-not-exist.txt"));
        assert!(matches!(missing, Err(MatrixLoaderError::Io(_))));
    }
}
