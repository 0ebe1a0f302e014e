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


//! Partial tours: the nodes of the branch-and-bound tree.
//!
//! A `PartialTour` is a path that starts at city 0 and visits a subset of the
//! cities exactly once. It owns its visited set and visiting order, so a child
//! created with `extend` shares nothing with its parent and can be pushed onto
//! any worker's stack independently.

use fixedbitset::FixedBitSet;
use salesman_model::{index::CityIndex, matrix::CostMatrix, tour::Tour};
use salesman_search::num::SolverNumeric;

/// A path from city 0 through some subset of the cities.
///
/// Invariants:
/// - `visited.count_ones(..) == order.len()`, and both describe the same cities.
/// - `order[0] == 0` and `order.len() >= 1`.
/// - `cost` is the sum of the edges along `order`.
#[derive(Clone, PartialEq, Eq)]
pub struct PartialTour<T> {
    visited: FixedBitSet,
    order: Vec<CityIndex>,
    cost: T,
}

impl<T> PartialTour<T>
where
    T: SolverNumeric,
{
    /// Creates the root of the search tree: only city 0 visited, cost zero.
    ///
    /// # Panics
    ///
    /// Panics if `num_cities` is zero.
    pub fn root(num_cities: usize) -> Self {
        assert!(
            num_cities > 0,
            "called `PartialTour::root` with zero cities"
        );

        let mut visited = FixedBitSet::with_capacity(num_cities);
        visited.insert(CityIndex::START.get());
        let mut order = Vec::with_capacity(num_cities);
        order.push(CityIndex::START);

        Self {
            visited,
            order,
            cost: T::zero(),
        }
    }

    /// Returns a copy of this path extended by `next`, travelling along an
    /// edge of cost `edge_cost`. Returns `None` if the accumulated cost
    /// overflows `T`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `next` is out of range or already visited.
    #[inline]
    pub fn extend(&self, next: CityIndex, edge_cost: T) -> Option<Self> {
        let cost = self.cost.checked_add(&edge_cost)?;
        Some(self.child(next, cost))
    }

    /// Builds the child reaching `next` with the already accumulated `cost`.
    #[inline]
    pub(crate) fn child(&self, next: CityIndex, cost: T) -> Self {
        debug_assert!(
            next.get() < self.num_cities(),
            "called `PartialTour::extend` with city index out of bounds: the len is {} but the index is {}",
            self.num_cities(),
            next.get()
        );
        debug_assert!(
            !self.is_visited(next),
            "called `PartialTour::extend` with already visited city: {}",
            next
        );

        let mut visited = self.visited.clone();
        visited.insert(next.get());
        let mut order = Vec::with_capacity(self.num_cities());
        order.extend_from_slice(&self.order);
        order.push(next);

        Self {
            visited,
            order,
            cost,
        }
    }

    /// Returns the accumulated path cost.
    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    /// Returns the cost of the path closed back to city 0, or `None` on overflow.
    #[inline]
    pub fn closing_cost(&self, matrix: &CostMatrix<T>) -> Option<T> {
        self.cost
            .checked_add(&matrix.cost(self.current_city(), CityIndex::START))
    }

    /// Converts a complete path into a `Tour` with the given closed cost.
    #[inline]
    pub fn into_tour(self, total_cost: T) -> Tour<T> {
        debug_assert!(
            self.is_complete(),
            "called `PartialTour::into_tour` on an incomplete path: visited {} of {} cities",
            self.visit_count(),
            self.num_cities()
        );

        Tour::new(self.order, total_cost)
    }
}

impl<T> PartialTour<T> {
    /// Returns the number of cities of the instance.
    #[inline]
    pub fn num_cities(&self) -> usize {
        self.visited.len()
    }

    /// Returns how many cities the path has visited.
    #[inline]
    pub fn visit_count(&self) -> usize {
        self.order.len()
    }

    /// Returns the last city on the path.
    #[inline]
    pub fn current_city(&self) -> CityIndex {
        // `order` always holds at least the start city.
        self.order[self.order.len() - 1]
    }

    /// Returns the visited cities in order.
    #[inline]
    pub fn order(&self) -> &[CityIndex] {
        &self.order
    }

    /// Returns `true` if `city` is on the path.
    #[inline]
    pub fn is_visited(&self, city: CityIndex) -> bool {
        self.visited.contains(city.get())
    }

    /// Returns `true` once every city has been visited.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.order.len() == self.num_cities()
    }

    /// Returns the cities not yet on the path, highest index first.
    ///
    /// Pushing children in this order makes the lowest index pop first.
    #[inline]
    pub fn unvisited_descending(&self) -> impl Iterator<Item = CityIndex> + '_ {
        (1..self.num_cities())
            .rev()
            .filter(move |&k| !self.visited.contains(k))
            .map(CityIndex::new)
    }

    /// Returns an estimate of the heap bytes one state owns for `num_cities`:
    /// its visited set and its visiting order.
    #[inline]
    pub fn estimated_heap_bytes(num_cities: usize) -> usize {
        let bitset_bytes = num_cities.div_ceil(usize::BITS as usize) * std::mem::size_of::<usize>();
        let order_bytes = num_cities * std::mem::size_of::<CityIndex>();
        bitset_bytes + order_bytes
    }
}

impl<T> std::fmt::Debug for PartialTour<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialTour")
            .field("order", &self.order)
            .field("cost", &self.cost)
            .field("num_cities", &self.visited.len())
            .finish()
    }
}

impl<T> std::fmt::Display for PartialTour<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PartialTour(visited: {}/{}, cost: {})",
            self.order.len(),
            self.visited.len(),
            self.cost
        )
    }
}
