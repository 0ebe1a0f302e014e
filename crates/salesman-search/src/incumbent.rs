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


//! # Shared Incumbent (Best Tour Register)
//!
//! A concurrent container for the best complete tour discovered so far. It
//! exposes a fast, lock-free upper bound via an atomic and stores the actual
//! `Tour<T>` behind a `Mutex` as the source of truth.
//!
//! ## Protocol
//!
//! - Workers read `upper_bound()` without locking to prune. The value may be
//!   stale, but it only ever decreases, so a stale read can only cause extra
//!   exploration and never the loss of the optimum.
//! - `try_install` first compares against the atomic hint, then re-checks
//!   against the tour held in the mutex. Cost and tour are replaced together
//!   inside the critical section, and the atomic is updated before the lock is
//!   released, so no reader can pair a cost with the wrong tour.
//! - Only strict improvements are installed; among equal-cost tours the first
//!   one to commit wins.
//! - The sentinel `i64::MAX` means "no tour yet". A tour may itself cost
//!   `i64::MAX`, so the atomic alone cannot tell the two apart: a bound of
//!   `i64::MAX` admits every cost (see `improves_bound`) and the mutex decides.
//!
//! ## Usage
//!
//! ```rust
//! use salesman_model::{index::CityIndex, tour::Tour};
//! use salesman_search::incumbent::SharedIncumbent;
//!
//! let inc: SharedIncumbent<i64> = SharedIncumbent::new();
//! let candidate = Tour::new(vec![CityIndex::new(0), CityIndex::new(1)], 10);
//!
//! assert!(inc.try_install(&candidate));
//! assert_eq!(inc.upper_bound(), 10);
//! assert_eq!(inc.snapshot().unwrap().cost(), 10);
//! ```

use crate::num::SolverNumeric;
use salesman_model::tour::Tour;
use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicI64, AtomicU64, Ordering},
};

/// Returns `true` if a cost of `cost` may improve on an incumbent whose
/// atomic upper bound reads `bound`.
///
/// Below the sentinel this is a strict `cost < bound`. At the sentinel every
/// representable cost is admitted, because the incumbent may hold no tour.
#[inline(always)]
pub fn improves_bound(cost: i64, bound: i64) -> bool {
    cost < bound || bound == i64::MAX
}

/// A concurrent holder for the best (incumbent) tour found during search.
///
/// Concurrency and memory ordering:
/// - The upper bound is loaded/stored with `Ordering::Relaxed`. It serves as a
///   pruning hint; the tour and its cost are synchronized via the `Mutex`.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Cost of the incumbent tour stored as `i64` for atomic access.
    upper_bound: AtomicI64,
    /// Number of successful installs.
    installs: AtomicU64,
    /// The incumbent tour.
    tour: Mutex<Option<Tour<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.tour.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(tour) => write!(f, "Incumbent(upper_bound: {})", tour.cost()),
            None => write!(f, "Incumbent(upper_bound: inf)"),
        }
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no tour installed.
    /// The initial upper bound is `i64::MAX`.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            installs: AtomicU64::new(0),
            tour: Mutex::new(None),
        }
    }

    /// Returns the current upper bound. Lock-free and possibly stale.
    #[inline(always)]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// Returns how many tours have been installed so far.
    #[inline]
    pub fn num_installs(&self) -> u64 {
        self.installs.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the current incumbent tour, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Tour<T>>
    where
        T: Clone,
    {
        let guard = self.tour.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Consumes the register and returns the incumbent tour, if any.
    #[inline]
    pub fn into_tour(self) -> Option<Tour<T>> {
        self.tour
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> SharedIncumbent<T>
where
    T: SolverNumeric,
{
    /// Creates a register that already holds `tour`, e.g. a known heuristic
    /// tour used to warm-start pruning.
    #[inline]
    pub fn with_tour(tour: Tour<T>) -> Self {
        let incumbent = Self::new();
        incumbent.try_install(&tour);
        incumbent
    }

    /// Attempts to install `candidate` as the new incumbent.
    /// Returns `true` if it strictly improved on the current tour.
    pub fn try_install(&self, candidate: &Tour<T>) -> bool {
        let candidate_cost: i64 = candidate.cost().into();

        // We are minimizing, so lower is better.
        if !improves_bound(candidate_cost, self.upper_bound()) {
            return false;
        }

        let mut guard = self.tour.lock().unwrap_or_else(PoisonError::into_inner);
        // Another worker may have installed a better tour while we waited for the lock.
        if let Some(current) = guard.as_ref() {
            let current_cost: i64 = current.cost().into();
            if candidate_cost >= current_cost {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.upper_bound.store(candidate_cost, Ordering::Relaxed);
        self.installs.fetch_add(1, Ordering::Relaxed);

        true
    }
}
