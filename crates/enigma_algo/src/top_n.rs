//! Bounded collector keeping the `N` smallest items seen.
//!
//! Backed by a max-heap of at most `N` elements, so the current worst is
//! always at the root and a rejected insert costs one comparison.
//!
//! Determinism: the held set depends only on the multiset of inserted items
//! (under `T: Ord`), never on insertion order, as long as `Ord` is total.

use std::collections::BinaryHeap;

#[derive(Clone, Debug)]
pub struct TopN<T: Ord> {
    capacity: usize,
    heap: BinaryHeap<T>,
}

impl<T: Ord> TopN<T> {
    /// Collector for the `capacity` smallest items.
    ///
    /// # Panics
    /// If `capacity == 0`; callers validate result counts up front.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "TopN capacity must be at least 1");
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The largest held item (the first one to be displaced).
    pub fn peek_worst(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Offer `item`. Returns `None` if it was kept without displacing anything,
    /// `Some(displaced)` if it replaced the worst item, or `Some(item)` back if
    /// it was rejected.
    pub fn maybe_add(&mut self, item: T) -> Option<T> {
        if self.heap.len() < self.capacity {
            self.heap.push(item);
            return None;
        }

        match self.heap.peek_mut() {
            // Overwriting the root re-sifts when the `PeekMut` guard drops.
            Some(mut worst) if item < *worst => Some(std::mem::replace(&mut *worst, item)),
            _ => Some(item),
        }
    }

    /// Fold every item of `other` into `self`.
    pub fn merge(&mut self, other: TopN<T>) {
        for item in other.heap {
            self.maybe_add(item);
        }
    }

    /// Held items, ascending.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.heap.into_sorted_vec()
    }

}

impl<T: Ord> Extend<T> for TopN<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.maybe_add(item);
        }
    }
}

impl<T: Ord> IntoIterator for TopN<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Ascending order.
    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}
