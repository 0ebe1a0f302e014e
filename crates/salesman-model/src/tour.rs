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


//! Complete tours.
//!
//! A `Tour<T>` is the final answer of the solver: the visiting order of all
//! cities, beginning at city 0, and the total cost of the *closed* tour, i.e.
//! the path cost plus the edge from the last city back to city 0.

use crate::{index::CityIndex, matrix::CostMatrix};
use num_traits::{PrimInt, Signed};
use thiserror::Error;

/// Reasons a tour does not describe a valid solution for a given matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError<T> {
    /// The tour does not visit exactly one entry per city.
    #[error("tour visits {found} cities but the matrix has {expected}")]
    WrongLength { expected: usize, found: usize },
    /// The tour does not begin at city 0.
    #[error("tour starts at {0} instead of the start city")]
    WrongStart(CityIndex),
    /// A city index outside the matrix.
    #[error("tour contains {0}, which is not part of the matrix")]
    CityOutOfRange(CityIndex),
    /// A city appears more than once.
    #[error("tour visits {0} more than once")]
    DuplicateCity(CityIndex),
    /// The reported cost does not match the cost recomputed from the matrix.
    #[error("tour reports cost {reported} but its edges sum to {actual}")]
    CostMismatch { reported: T, actual: T },
    /// The cost of the tour overflows the cost type.
    #[error("tour cost overflows the cost type")]
    CostOverflow,
}

/// A complete tour over all cities, starting and ending at city 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour<T> {
    /// Cities in visiting order; `order[0]` is the start city.
    order: Vec<CityIndex>,
    /// Total cost including the closing edge back to the start city.
    cost: T,
}

impl<T> Tour<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `Tour`.
    ///
    /// # Panics
    ///
    /// Panics if `order` is empty.
    pub fn new(order: Vec<CityIndex>, cost: T) -> Self {
        assert!(
            !order.is_empty(),
            "called `Tour::new` with an empty visiting order"
        );

        Self { order, cost }
    }

    /// Returns the cities in visiting order.
    #[inline]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Returns the total cost of the closed tour.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the number of cities on the tour.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.order.len()
    }

    /// Returns the edges of the closed tour, including the edge back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (CityIndex, CityIndex)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }

    /// Recomputes the closed-tour cost from `matrix`, or `None` on overflow.
    pub fn recompute_cost(&self, matrix: &CostMatrix<T>) -> Option<T> {
        self.edges()
            .try_fold(T::zero(), |acc, (from, to)| acc.checked_add(&matrix.cost(from, to)))
    }

    /// Checks that this tour is a valid solution for `matrix`: a permutation
    /// of all cities that starts at city 0 and whose reported cost equals the
    /// sum of its edges.
    pub fn validate(&self, matrix: &CostMatrix<T>) -> Result<(), TourError<T>> {
        let n = matrix.num_cities();
        if self.order.len() != n {
            return Err(TourError::WrongLength {
                expected: n,
                found: self.order.len(),
            });
        }
        if !self.order[0].is_start() {
            return Err(TourError::WrongStart(self.order[0]));
        }

        let mut seen = vec![false; n];
        for &city in &self.order {
            let slot = seen
                .get_mut(city.get())
                .ok_or(TourError::CityOutOfRange(city))?;
            if *slot {
                return Err(TourError::DuplicateCity(city));
            }
            *slot = true;
        }

        let actual = self.recompute_cost(matrix).ok_or(TourError::CostOverflow)?;
        if actual != self.cost {
            return Err(TourError::CostMismatch {
                reported: self.cost,
                actual,
            });
        }

        Ok(())
    }
}

impl<T> std::fmt::Display for Tour<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tour(cost: {}, order: [", self.cost)?;
        for (i, city) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", city.get())?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci(i: usize) -> CityIndex {
        CityIndex::new(i)
    }

    fn order(raw: &[usize]) -> Vec<CityIndex> {
        raw.iter().copied().map(ci).collect()
    }

    fn four_city_matrix() -> CostMatrix<i64> {
        CostMatrix::from_rows([
            [0, 10, 15, 20],
            [10, 0, 35, 25],
            [15, 35, 0, 30],
            [20, 25, 30, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let t = Tour::new(order(&[0, 2, 1]), 12i64);
        assert_eq!(t.cost(), 12);
        assert_eq!(t.num_cities(), 3);
        assert_eq!(t.order(), &[ci(0), ci(2), ci(1)]);
    }

    #[test]
    #[should_panic(expected = "called `Tour::new` with an empty visiting order")]
    fn test_new_rejects_empty_order() {
        let _ = Tour::<i64>::new(Vec::new(), 0);
    }

    #[test]
    fn test_edges_close_the_cycle() {
        let t = Tour::new(order(&[0, 1, 3, 2]), 80i64);
        let edges: Vec<(usize, usize)> = t.edges().map(|(a, b)| (a.get(), b.get())).collect();
        assert_eq!(edges, vec![(0, 1), (1, 3), (3, 2), (2, 0)]);
    }

    #[test]
    fn test_validate_accepts_optimal_four_city_tour() {
        let m = four_city_matrix();
        let t = Tour::new(order(&[0, 1, 3, 2]), 80);
        assert_eq!(t.recompute_cost(&m), Some(80));
        assert_eq!(t.validate(&m), Ok(()));
    }

    #[test]
    fn test_validate_rejects_structural_problems() {
        let m = four_city_matrix();

        let short = Tour::new(order(&[0, 1, 2]), 60);
        assert_eq!(
            short.validate(&m),
            Err(TourError::WrongLength {
                expected: 4,
                found: 3
            })
        );

        let wrong_start = Tour::new(order(&[1, 0, 3, 2]), 80);
        assert_eq!(wrong_start.validate(&m), Err(TourError::WrongStart(ci(1))));

        let duplicate = Tour::new(order(&[0, 1, 1, 2]), 80);
        assert_eq!(duplicate.validate(&m), Err(TourError::DuplicateCity(ci(1))));

        let out_of_range = Tour::new(order(&[0, 1, 9, 2]), 80);
        assert_eq!(
            out_of_range.validate(&m),
            Err(TourError::CityOutOfRange(ci(9)))
        );
    }

    #[test]
    fn test_validate_rejects_cost_mismatch() {
        let m = four_city_matrix();
        let t = Tour::new(order(&[0, 1, 3, 2]), 65);
        assert_eq!(
            t.validate(&m),
            Err(TourError::CostMismatch {
                reported: 65,
                actual: 80
            })
        );
    }

    #[test]
    fn test_recompute_cost_detects_overflow() {
        let m = CostMatrix::from_rows([[0i8, 100], [100, 0]]).unwrap();
        let t = Tour::new(order(&[0, 1]), 0i8);
        assert_eq!(t.recompute_cost(&m), None);
        assert_eq!(t.validate(&m), Err(TourError::CostOverflow));
    }

    #[test]
    fn test_single_city_tour_uses_self_loop() {
        let m = CostMatrix::from_rows([[3i64]]).unwrap();
        let t = Tour::new(order(&[0]), 3);
        assert_eq!(t.validate(&m), Ok(()));
    }

    #[test]
    fn test_display() {
        let t = Tour::new(order(&[0, 1]), 10i64);
        assert_eq!(format!("{}", t), "Tour(cost: 10, order: [0, 1])");
    }
}
