//! Balanced-tree ordered set.
//!
//! [`TreeSet`] stores its keys in a persistent red-black tree. Compared to
//! [`FlatSet`](super::FlatSet) it pays a logarithmic, pointer-chasing cost per
//! membership test, but it can grow one key at a time in O(log n) and answers
//! range queries without scanning.
//!
//! # Examples
//!
//! ```rust
//! use skewset::set::TreeSet;
//!
//! let set = TreeSet::new().insert(3).insert(1).insert(2);
//! let keys: Vec<i64> = set.iter().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//!
//! let big: TreeSet<i64> = (0..1000).collect();
//! let window: Vec<i64> = big.range(10..13).copied().collect();
//! assert_eq!(window, vec![10, 11, 12]);
//! ```

use std::marker::PhantomData;
use std::ops::RangeBounds;
use std::rc::Rc;

use super::tree::{InOrder, Range, RedBlackTree};
use super::{OrderedSet, SameFamily, SetAccumulator, SetKind};

/// A persistent ordered set of unique keys backed by a red-black tree.
///
/// # Time Complexity
///
/// | Operation  | Complexity   |
/// |------------|--------------|
/// | `insert`   | O(log n)     |
/// | `contains` | O(log n)     |
/// | `len`      | O(1)         |
/// | `range`    | O(log n + k) |
/// | `iter`     | O(n)         |
#[derive(Clone)]
pub struct TreeSet<K> {
    tree: RedBlackTree<K, ()>,
}

impl<K> TreeSet<K> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns a lazy iterator over the keys in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> TreeSetIterator<'_, K> {
        TreeSetIterator {
            inner: self.tree.iter(),
        }
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(key, ())| key)
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(key, ())| key)
    }
}

impl<K: Clone + Ord> TreeSet<K> {
    /// Returns `true` if the set contains `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::TreeSet;
    ///
    /// let set: TreeSet<i64> = (1..=10).collect();
    /// assert!(set.contains(&7));
    /// assert!(!set.contains(&11));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Inserts a key, returning a new set that shares structure with `self`.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        Self {
            tree: self.tree.insert(key, ()),
        }
    }

    /// Creates a set from strictly ascending keys in O(n).
    ///
    /// # Preconditions
    ///
    /// Keys must be strictly ascending; debug builds check this.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::TreeSet;
    ///
    /// let set = TreeSet::from_sorted_vec(vec![1, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub fn from_sorted_vec(keys: Vec<K>) -> Self {
        debug_assert!(
            keys.windows(2).all(|window| window[0] < window[1]),
            "from_sorted_vec requires strictly increasing keys"
        );
        Self {
            tree: RedBlackTree::from_sorted_entries(keys.into_iter().map(|key| (key, ())).collect()),
        }
    }

    /// Returns a lazy iterator over the keys inside `range`, ascending.
    ///
    /// # Complexity
    ///
    /// O(log n) to position, then O(1) amortised per key.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> TreeSetRangeIterator<'_, K> {
        TreeSetRangeIterator {
            inner: self.tree.range(range),
        }
    }

    /// Starts a transient builder seeded with this set.
    #[must_use]
    pub fn transient(&self) -> TransientTreeSet<K> {
        TransientTreeSet {
            set: self.clone(),
            _marker: PhantomData,
        }
    }

    #[cfg(test)]
    fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()
    }
}

impl<K> Default for TreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord> FromIterator<K> for TreeSet<K> {
    /// Collects keys in any order; duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys: Vec<K> = iter.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::from_sorted_vec(keys)
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for TreeSet<K> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for TreeSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for TreeSet<K> {}

impl<'a, K> IntoIterator for &'a TreeSet<K> {
    type Item = &'a K;
    type IntoIter = TreeSetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Ord> OrderedSet<K> for TreeSet<K> {
    type Iter<'a>
        = TreeSetIterator<'a, K>
    where
        K: 'a;

    #[inline]
    fn kind(&self) -> SetKind {
        SetKind::Tree
    }

    #[inline]
    fn cardinality(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        Self::contains(self, key)
    }

    #[inline]
    fn iter_ascending(&self) -> Self::Iter<'_> {
        self.iter()
    }
}

impl<K: Clone + Ord> SameFamily<K> for TreeSet<K> {
    type Accumulator = TransientTreeSet<K>;

    fn new_accumulator(&self) -> Self::Accumulator {
        TransientTreeSet::new()
    }
}

/// Lazy ascending iterator over the keys of a [`TreeSet`].
pub struct TreeSetIterator<'a, K> {
    inner: InOrder<'a, K, ()>,
}

impl<'a, K> Iterator for TreeSetIterator<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, ())| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Lazy ascending iterator over the keys of a [`TreeSet`] inside a range.
pub struct TreeSetRangeIterator<'a, K> {
    inner: Range<'a, K, ()>,
}

impl<'a, K: Ord> Iterator for TreeSetRangeIterator<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, ())| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// A mutable builder for [`TreeSet`].
///
/// Each insertion path-copies into the owned tree, so growing a tree set one
/// key at a time stays O(log n) per key. Like every transient it is neither
/// `Send` nor `Sync`.
pub struct TransientTreeSet<K> {
    set: TreeSet<K>,
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientTreeSet<i64>: Send, Sync);

impl<K> TransientTreeSet<K> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            set: TreeSet::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the number of distinct keys inserted so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns `true` if nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Converts the builder into a persistent [`TreeSet`].
    #[must_use]
    pub fn persistent(self) -> TreeSet<K> {
        self.set
    }
}

impl<K: Clone + Ord> TransientTreeSet<K> {
    /// Inserts a key. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        if self.set.contains(&key) {
            return false;
        }
        self.set = self.set.insert(key);
        true
    }
}

impl<K> Default for TransientTreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord> SetAccumulator<K> for TransientTreeSet<K> {
    type Output = TreeSet<K>;

    fn insert(&mut self, key: K) {
        Self::insert(self, key);
    }

    fn finish(self) -> Self::Output {
        self.persistent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn collect_sorts_and_deduplicates() {
        let set: TreeSet<i64> = [4, 2, 4, 1, 2].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(set.check_invariants(), Ok(()));
    }

    #[rstest]
    fn insert_is_persistent() {
        let original: TreeSet<i64> = (0..20).collect();
        let updated = original.insert(100);

        assert_eq!(original.len(), 20);
        assert!(!original.contains(&100));
        assert_eq!(updated.len(), 21);
        assert!(updated.contains(&100));
        assert_eq!(updated.check_invariants(), Ok(()));
    }

    #[rstest]
    fn iteration_restarts_from_the_smallest_key() {
        let set: TreeSet<i64> = (0..5).collect();
        let first: Vec<i64> = set.iter().copied().collect();
        let second: Vec<i64> = set.iter().copied().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn transient_accumulates_through_the_trait() {
        let seed: TreeSet<i64> = TreeSet::new();
        let mut accumulator = seed.new_accumulator();
        for key in [3, 1, 2, 3] {
            SetAccumulator::insert(&mut accumulator, key);
        }
        let set = accumulator.finish();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(set.kind(), SetKind::Tree);
    }

    #[rstest]
    fn first_and_last_follow_order() {
        let set: TreeSet<i64> = [9, -3, 4].into_iter().collect();
        assert_eq!(set.first(), Some(&-3));
        assert_eq!(set.last(), Some(&9));
    }
}
