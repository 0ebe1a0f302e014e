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


use crate::partial::PartialTour;

/// A LIFO stack of pending search states owned by one worker.
///
/// The stack is growable, so pushing never fails. `preallocated` reserves the
/// worst-case depth-first occupancy up front: the seed states plus at most
/// `N - d` children for every depth `d`, i.e. `seed_len + N * (N - 1) / 2`.
/// The high-water mark is tracked for statistics.
#[derive(Clone, Debug)]
pub struct ExplorationStack<T> {
    entries: Vec<PartialTour<T>>,
    peak_len: usize,
}

impl<T> Default for ExplorationStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ExplorationStack<T> {
    /// Creates a new, empty `ExplorationStack`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            peak_len: 0,
        }
    }

    /// Creates a stack with room for a full depth-first search over
    /// `num_cities` cities starting from `seed_len` seed states.
    #[inline]
    pub fn preallocated(num_cities: usize, seed_len: usize) -> Self {
        Self {
            entries: Vec::with_capacity(Self::depth_first_bound(num_cities, seed_len)),
            peak_len: 0,
        }
    }

    /// Returns the maximum number of states a depth-first search can hold at once.
    #[inline]
    pub fn depth_first_bound(num_cities: usize, seed_len: usize) -> usize {
        let per_path = num_cities.saturating_mul(num_cities.saturating_sub(1)) / 2;
        seed_len.saturating_add(per_path)
    }

    /// Pushes a state onto the top of the stack.
    #[inline]
    pub fn push(&mut self, state: PartialTour<T>) {
        self.entries.push(state);
        self.peak_len = self.peak_len.max(self.entries.len());
    }

    /// Removes and returns the top state, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<PartialTour<T>> {
        self.entries.pop()
    }

    /// Returns the number of pending states.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no pending states.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the largest length the stack reached since creation.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Returns the bytes allocated for the stack slots. Heap buffers owned by
    /// the states themselves are not included.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<PartialTour<T>>()
    }
}

impl<T> Extend<PartialTour<T>> for ExplorationStack<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = PartialTour<T>>,
    {
        self.entries.extend(iter);
        self.peak_len = self.peak_len.max(self.entries.len());
    }
}

impl<T> std::fmt::Display for ExplorationStack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ExplorationStack(len: {}, peak: {}, capacity: {})",
            self.entries.len(),
            self.peak_len,
            self.entries.capacity()
        )
    }
}
