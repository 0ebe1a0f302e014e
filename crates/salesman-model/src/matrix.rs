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


//! Cost matrices.
//!
//! `CostMatrix<T>` stores the travel cost between every ordered pair of cities
//! in a single row-major vector: `cost(from, to)` lives at
//! `from * num_cities + to`. Rows are therefore contiguous, which is exactly the
//! access pattern of the search when it expands a partial tour from its
//! current city.
//!
//! Matrices are immutable once built. Use `CostMatrix::from_rows` for nested
//! data or `CostMatrixBuilder` to fill entries one by one. Both validate the
//! instance: at least one city, square shape and non-negative costs. The
//! branch-and-bound pruning rule is only sound for non-negative edge weights,
//! so a negative entry is rejected here instead of silently producing a wrong
//! optimum later.

use crate::index::CityIndex;
use num_traits::{PrimInt, Signed};
use thiserror::Error;

/// The error type for invalid cost matrices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The matrix has no cities.
    #[error("cost matrix must contain at least one city")]
    Empty,
    /// A row does not have one entry per city.
    #[error("row {row} has {found} entries but the matrix has {expected} cities")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A travel cost is negative.
    #[error("travel cost from city {from} to city {to} is negative")]
    NegativeCost { from: usize, to: usize },
}

/// A square matrix of travel costs between cities.
#[derive(Clone, PartialEq, Eq)]
pub struct CostMatrix<T> {
    num_cities: usize,
    costs: Vec<T>,
}

impl<T> CostMatrix<T>
where
    T: PrimInt + Signed,
{
    /// Builds a matrix from nested rows, where `rows[i][j]` is the cost of
    /// travelling from city `i` to city `j`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use salesman_model::{index::CityIndex, matrix::CostMatrix};
    ///
    /// let m = CostMatrix::from_rows([[0i64, 5], [5, 0]]).unwrap();
    /// assert_eq!(m.num_cities(), 2);
    /// assert_eq!(m.cost(CityIndex::new(0), CityIndex::new(1)), 5);
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let rows: Vec<R> = rows.into_iter().collect();
        let num_cities = rows.len();
        if num_cities == 0 {
            return Err(MatrixError::Empty);
        }

        let mut costs = Vec::with_capacity(num_cities * num_cities);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != num_cities {
                return Err(MatrixError::NotSquare {
                    row: row_index,
                    expected: num_cities,
                    found: row.len(),
                });
            }
            costs.extend_from_slice(row);
        }

        Self::from_flat(num_cities, costs)
    }

    /// Builds a matrix from a flat row-major vector of `num_cities * num_cities` costs.
    pub fn from_flat(num_cities: usize, costs: Vec<T>) -> Result<Self, MatrixError> {
        if num_cities == 0 {
            return Err(MatrixError::Empty);
        }
        if costs.len() != num_cities * num_cities {
            let row = costs.len() / num_cities;
            return Err(MatrixError::NotSquare {
                row,
                expected: num_cities,
                found: costs.len() % num_cities,
            });
        }
        if let Some(position) = costs.iter().position(|c| c.is_negative()) {
            return Err(MatrixError::NegativeCost {
                from: position / num_cities,
                to: position % num_cities,
            });
        }

        Ok(Self { num_cities, costs })
    }

    /// Returns the number of cities.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Returns the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn cost(&self, from: CityIndex, to: CityIndex) -> T {
        debug_assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrix::cost` with city index out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            from.get(),
            to.get()
        );

        self.costs[from.get() * self.num_cities + to.get()]
    }

    /// Returns all costs of leaving `from`, indexed by destination.
    #[inline]
    pub fn row(&self, from: CityIndex) -> &[T] {
        let start = from.get() * self.num_cities;
        &self.costs[start..start + self.num_cities]
    }

    /// Returns an iterator over all cities of the instance.
    #[inline]
    pub fn cities(&self) -> impl DoubleEndedIterator<Item = CityIndex> + ExactSizeIterator {
        (0..self.num_cities).map(CityIndex::new)
    }

    /// Returns `true` if `cost(i, j) == cost(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.num_cities;
        (0..n).all(|i| (i + 1..n).all(|j| self.costs[i * n + j] == self.costs[j * n + i]))
    }

    /// Returns the number of distinct tours starting at city 0, `(N - 1)!`,
    /// or `None` if it does not fit into a `u128`.
    pub fn num_tours(&self) -> Option<u128> {
        (1..self.num_cities as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
    }
}

impl<T> std::fmt::Debug for CostMatrix<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<&[T]> = self.costs.chunks(self.num_cities.max(1)).collect();
        f.debug_struct("CostMatrix")
            .field("num_cities", &self.num_cities)
            .field("rows", &rows)
            .finish()
    }
}

impl<T> std::fmt::Display for CostMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CostMatrix(num_cities: {})", self.num_cities)
    }
}

/// A mutable builder for `CostMatrix`. All costs start at zero.
#[derive(Clone, Debug)]
pub struct CostMatrixBuilder<T> {
    num_cities: usize,
    costs: Vec<T>,
}

impl<T> CostMatrixBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder for `num_cities` cities with every cost set to zero.
    #[inline]
    pub fn new(num_cities: usize) -> Self {
        Self {
            num_cities,
            costs: vec![T::zero(); num_cities * num_cities],
        }
    }

    /// Returns the number of cities.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Sets the cost of travelling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_cost(&mut self, from: CityIndex, to: CityIndex, cost: T) -> &mut Self {
        assert!(
            from.get() < self.num_cities && to.get() < self.num_cities,
            "called `CostMatrixBuilder::set_cost` with city index out of bounds: the len is {} but the indices are {} and {}",
            self.num_cities,
            from.get(),
            to.get()
        );

        self.costs[from.get() * self.num_cities + to.get()] = cost;
        self
    }

    /// Sets the cost in both directions between `a` and `b`.
    #[inline]
    pub fn set_symmetric_cost(&mut self, a: CityIndex, b: CityIndex, cost: T) -> &mut Self {
        self.set_cost(a, b, cost);
        self.set_cost(b, a, cost)
    }

    /// Validates and builds the matrix.
    #[inline]
    pub fn build(self) -> Result<CostMatrix<T>, MatrixError> {
        CostMatrix::from_flat(self.num_cities, self.costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    #[test]
    fn test_from_rows_indexes_row_major() {
        let m = CostMatrix::from_rows([[0i64, 1, 2], [3, 0, 4], [5, 6, 0]]).unwrap();
        assert_eq!(m.num_cities(), 3);
        assert_eq!(m.cost(ci(0), ci(2)), 2);
        assert_eq!(m.cost(ci(2), ci(0)), 5);
        assert_eq!(m.cost(ci(1), ci(2)), 4);
        assert_eq!(m.row(ci(1)), &[3, 0, 4]);
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        let rows: Vec<Vec<i64>> = Vec::new();
        assert_eq!(CostMatrix::from_rows(rows), Err(MatrixError::Empty));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows = vec![vec![0i64, 1, 2], vec![1, 0], vec![2, 1, 0]];
        assert_eq!(
            CostMatrix::from_rows(rows),
            Err(MatrixError::NotSquare {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_negative_costs() {
        let err = CostMatrix::from_rows([[0i32, 4], [-1, 0]]).unwrap_err();
        assert_eq!(err, MatrixError::NegativeCost { from: 1, to: 0 });
        assert_eq!(err.to_string(), "travel cost from city 1 to city 0 is negative");
    }

    #[test]
    fn test_from_flat_rejects_wrong_length() {
        assert!(matches!(
            CostMatrix::from_flat(2, vec![0i64, 1, 2]),
            Err(MatrixError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_builder_sets_costs_and_builds() {
        let mut b = CostMatrixBuilder::<i64>::new(3);
        b.set_symmetric_cost(ci(0), ci(1), 7)
            .set_cost(ci(1), ci(2), 3)
            .set_cost(ci(2), ci(1), 4);
        let m = b.build().unwrap();
        assert_eq!(m.cost(ci(0), ci(1)), 7);
        assert_eq!(m.cost(ci(1), ci(0)), 7);
        assert_eq!(m.cost(ci(1), ci(2)), 3);
        assert_eq!(m.cost(ci(2), ci(1)), 4);
        assert_eq!(m.cost(ci(0), ci(2)), 0);
        assert!(!m.is_symmetric());
    }

    #[test]
    #[should_panic(expected = "called `CostMatrixBuilder::set_cost` with city index out of bounds")]
    fn test_builder_panics_on_out_of_bounds() {
        let mut b = CostMatrixBuilder::<i64>::new(2);
        b.set_cost(ci(2), ci(0), 1);
    }

    #[test]
    fn test_builder_with_zero_cities_fails_to_build() {
        assert_eq!(
            CostMatrixBuilder::<i64>::new(0).build(),
            Err(MatrixError::Empty)
        );
    }

    #[test]
    fn test_symmetry_detection() {
        let m = CostMatrix::from_rows([[0i64, 2, 3], [2, 0, 4], [3, 4, 0]]).unwrap();
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_num_tours_is_factorial_of_n_minus_one() {
        let m = CostMatrixBuilder::<i64>::new(5).build().unwrap();
        assert_eq!(m.num_tours(), Some(24));

        let single = CostMatrixBuilder::<i64>::new(1).build().unwrap();
        assert_eq!(single.num_tours(), Some(1));

        let huge = CostMatrixBuilder::<i8>::new(40).build().unwrap();
        assert_eq!(huge.num_tours(), None);
    }

    #[test]
    fn test_cities_iterates_all_indices() {
        let m = CostMatrixBuilder::<i64>::new(4).build().unwrap();
        let cities: Vec<usize> = m.cities().rev().map(CityIndex::get).collect();
        assert_eq!(cities, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_display_and_debug() {
        let m = CostMatrix::from_rows([[0i64, 1], [1, 0]]).unwrap();
        assert_eq!(format!("{}", m), "CostMatrix(num_cities: 2)");
        let dbg = format!("{:?}", m);
        assert!(dbg.contains("num_cities: 2"));
        assert!(dbg.contains("[0, 1]"));
    }
}
