//! Flat, array-backed ordered set.
//!
//! [`FlatSet`] keeps its keys sorted and deduplicated in contiguous storage:
//!
//! - Sets of up to 8 keys live inline in a `SmallVec` (no heap allocation)
//! - Larger sets live in a sorted `Vec` shared through `Arc`
//! - The representation moves between the two as keys are added or removed
//!
//! Because both states are sorted slices, membership is a binary search and
//! ascending iteration is a slice walk. This is the "flat family" of the
//! algebra engine: cheap to probe, cheap to scan, expensive to grow one key at
//! a time. Bulk construction goes through [`FlatSet::from_sorted_vec`],
//! [`FlatSet::from_sorted_iter`], `collect()` or a [`TransientFlatSet`].
//!
//! # Time Complexity
//!
//! | Operation      | Inline (n <= 8) | Shared (n > 8) |
//! |----------------|-----------------|----------------|
//! | `insert`       | O(n)            | O(n)           |
//! | `remove`       | O(n)            | O(n)           |
//! | `contains`     | O(log n)        | O(log n)       |
//! | `len`          | O(1)            | O(1)           |
//! | `iter`         | O(1) + O(n)     | O(1) + O(n)    |
//! | `union`        | O(n + m)        | O(n + m)       |
//! | `difference`   | O(n + m)        | O(n + m)       |
//! | `intersection` | O(n + m)        | O(n + m)       |
//!
//! # Examples
//!
//! ```rust
//! use skewset::set::FlatSet;
//!
//! let set = FlatSet::new().insert(3).insert(1).insert(2);
//! assert_eq!(set.as_slice(), &[1, 2, 3]);
//!
//! // Persistent: the original is unchanged
//! let bigger = set.insert(4);
//! assert_eq!(set.len(), 3);
//! assert_eq!(bigger.len(), 4);
//! ```

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use super::{OrderedSet, SameFamily, SetAccumulator, SetKind};

/// Sets with more keys than this are stored in a shared `Vec`.
const INLINE_CAPACITY: usize = 8;

/// A sorted, deduplicated vector wrapped in `Arc` for structural sharing.
#[derive(Clone)]
struct SortedVec<K>(Arc<Vec<K>>);

impl<K: Ord> SortedVec<K> {
    #[inline]
    fn from_sorted(vec: Vec<K>) -> Self {
        debug_assert!(is_strictly_sorted(&vec), "{}", SORTED_INVARIANT_PANIC_MESSAGE);
        Self(Arc::new(vec))
    }
}

impl<K> SortedVec<K> {
    #[inline]
    fn as_slice(&self) -> &[K] {
        &self.0
    }
}

#[derive(Clone)]
enum FlatSetInner<K> {
    Empty,
    Inline(SmallVec<[K; INLINE_CAPACITY]>),
    Shared(SortedVec<K>),
}

/// A persistent ordered set of unique keys backed by sorted contiguous storage.
///
/// All operations are immutable and return new instances; clones of sets
/// with more than 8 keys share their storage.
///
/// # Examples
///
/// ```rust
/// use skewset::set::FlatSet;
///
/// let set: FlatSet<i64> = [5, 1, 3, 1].into_iter().collect();
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(&3));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
/// ```
#[derive(Clone)]
pub struct FlatSet<K> {
    inner: FlatSetInner<K>,
}

impl<K> FlatSet<K> {
    /// Creates a new empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set: FlatSet<i64> = FlatSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: FlatSetInner::Empty,
        }
    }

    /// Returns the number of keys in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the set contains no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.inner, FlatSetInner::Empty)
    }

    /// Returns the keys as a sorted slice.
    ///
    /// # Complexity
    ///
    /// O(1) in every state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.as_slice(), &[2, 4, 6]);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[K] {
        match &self.inner {
            FlatSetInner::Empty => &[],
            FlatSetInner::Inline(vec) => vec.as_slice(),
            FlatSetInner::Shared(sorted_vec) => sorted_vec.as_slice(),
        }
    }

    /// Returns an iterator over the keys in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> FlatSetIterator<'_, K> {
        FlatSetIterator {
            inner: self.as_slice().iter(),
        }
    }

    /// Returns the smallest key, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.as_slice().first()
    }

    /// Returns the largest key, or `None` if the set is empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.as_slice().last()
    }

    #[cfg(test)]
    const fn is_inline_state(&self) -> bool {
        matches!(self.inner, FlatSetInner::Inline(_))
    }

    #[cfg(test)]
    const fn is_shared_state(&self) -> bool {
        matches!(self.inner, FlatSetInner::Shared(_))
    }
}

impl<K: Clone + Ord> FlatSet<K> {
    /// Returns `true` if the set contains `key`.
    ///
    /// # Complexity
    ///
    /// O(log n) binary search in every state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_vec(vec![1, 2, 3]);
    /// assert!(set.contains(&2));
    /// assert!(!set.contains(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.as_slice().binary_search(key).is_ok()
    }

    /// Inserts a key, returning a new set.
    ///
    /// Inserting a key that is already present returns a clone of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::new().insert(2).insert(1);
    /// assert_eq!(set.as_slice(), &[1, 2]);
    /// assert_eq!(set.insert(1).len(), 2);
    /// ```
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        let slice = self.as_slice();
        match slice.binary_search(&key) {
            Ok(_) => self.clone(),
            Err(position) => {
                let mut keys = Vec::with_capacity(slice.len() + 1);
                keys.extend_from_slice(&slice[..position]);
                keys.push(key);
                keys.extend_from_slice(&slice[position..]);
                Self::from_sorted_vec(keys)
            }
        }
    }

    /// Removes a key, returning a new set.
    ///
    /// Removing a key that is absent returns a clone of `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_vec(vec![1, 2, 3]);
    /// let smaller = set.remove(&2);
    /// assert_eq!(smaller.as_slice(), &[1, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        let slice = self.as_slice();
        match slice.binary_search(key) {
            Err(_) => self.clone(),
            Ok(position) => {
                let mut keys = Vec::with_capacity(slice.len() - 1);
                keys.extend_from_slice(&slice[..position]);
                keys.extend_from_slice(&slice[position + 1..]);
                Self::from_sorted_vec(keys)
            }
        }
    }

    /// Creates a set from an iterator yielding strictly ascending keys.
    ///
    /// # Preconditions
    ///
    /// The iterator must yield keys in strictly ascending order. Debug builds
    /// check this; release builds produce an invalid set (a logic error, not
    /// memory unsafety).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_iter(1..=20);
    /// assert_eq!(set.len(), 20);
    /// ```
    #[must_use]
    pub fn from_sorted_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut inline: SmallVec<[K; INLINE_CAPACITY]> = SmallVec::new();
        let mut iter = iter.into_iter();

        for key in iter.by_ref() {
            debug_assert!(
                inline.last().is_none_or(|last| last < &key),
                "{}",
                SORTED_INVARIANT_PANIC_MESSAGE
            );

            if inline.len() >= INLINE_CAPACITY {
                let (lower, _) = iter.size_hint();
                let mut keys = Vec::with_capacity(inline.len() + 1 + lower);
                keys.extend(inline.drain(..));
                keys.push(key);
                keys.extend(iter);
                return Self::from_shared_vec(keys);
            }
            inline.push(key);
        }

        if inline.is_empty() {
            Self::new()
        } else {
            Self {
                inner: FlatSetInner::Inline(inline),
            }
        }
    }

    /// Creates a set from a strictly ascending `Vec`, taking ownership of it.
    ///
    /// # Preconditions
    ///
    /// Same as [`FlatSet::from_sorted_iter`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_vec(vec![2, 4, 6, 8, 10]);
    /// assert_eq!(set.len(), 5);
    /// ```
    #[must_use]
    pub fn from_sorted_vec(keys: Vec<K>) -> Self {
        debug_assert!(is_strictly_sorted(&keys), "{}", SORTED_INVARIANT_PANIC_MESSAGE);

        if keys.is_empty() {
            Self::new()
        } else if keys.len() <= INLINE_CAPACITY {
            Self {
                inner: FlatSetInner::Inline(SmallVec::from_vec(keys)),
            }
        } else {
            Self::from_shared_vec(keys)
        }
    }

    /// Returns the keys as a new sorted `Vec`.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<K> {
        self.as_slice().to_vec()
    }

    /// Starts a transient builder seeded with the keys of this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let set = FlatSet::from_sorted_vec(vec![1, 2]);
    /// let mut transient = set.transient();
    /// transient.insert(3);
    /// assert_eq!(transient.persistent().as_slice(), &[1, 2, 3]);
    /// ```
    #[must_use]
    pub fn transient(&self) -> TransientFlatSet<K> {
        TransientFlatSet {
            keys: self.to_sorted_vec(),
            _marker: PhantomData,
        }
    }

    fn from_shared_vec(keys: Vec<K>) -> Self {
        Self {
            inner: FlatSetInner::Shared(SortedVec::from_sorted(keys)),
        }
    }

    /// Returns the union of two sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let left = FlatSet::from_sorted_vec(vec![1, 3, 5]);
    /// let right = FlatSet::from_sorted_vec(vec![2, 3, 4]);
    /// assert_eq!(left.union(&right).as_slice(), &[1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_sorted_vec(union_slices(self.as_slice(), other.as_slice()))
    }

    /// Returns the keys of `self` that are not in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let left = FlatSet::from_sorted_vec(vec![1, 2, 3, 4, 5]);
    /// let right = FlatSet::from_sorted_vec(vec![3, 4, 5, 6, 7]);
    /// assert_eq!(left.difference(&right).as_slice(), &[1, 2]);
    /// ```
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Self::from_sorted_vec(difference_slices(self.as_slice(), other.as_slice()))
    }

    /// Returns the keys present in both sets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::FlatSet;
    ///
    /// let left = FlatSet::from_sorted_vec(vec![1, 2, 3, 4, 5]);
    /// let right = FlatSet::from_sorted_vec(vec![3, 4, 5, 6, 7]);
    /// assert_eq!(left.intersection(&right).as_slice(), &[3, 4, 5]);
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::new();
        }
        Self::from_sorted_vec(intersection_slices(self.as_slice(), other.as_slice()))
    }
}

impl<K> Default for FlatSet<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord> FromIterator<K> for FlatSet<K> {
    /// Collects keys in any order; duplicates are dropped.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut keys: Vec<K> = iter.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::from_sorted_vec(keys)
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for FlatSet<K> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.as_slice()).finish()
    }
}

impl<K: PartialEq> PartialEq for FlatSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<K: Eq> Eq for FlatSet<K> {}

impl<'a, K> IntoIterator for &'a FlatSet<K> {
    type Item = &'a K;
    type IntoIter = FlatSetIterator<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone + Ord> OrderedSet<K> for FlatSet<K> {
    type Iter<'a>
        = FlatSetIterator<'a, K>
    where
        K: 'a;

    #[inline]
    fn kind(&self) -> SetKind {
        SetKind::Flat
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

impl<K: Clone + Ord> SameFamily<K> for FlatSet<K> {
    type Accumulator = TransientFlatSet<K>;

    #[inline]
    fn new_accumulator(&self) -> Self::Accumulator {
        TransientFlatSet::new()
    }
}

/// Ascending iterator over the keys of a [`FlatSet`].
pub struct FlatSetIterator<'a, K> {
    inner: std::slice::Iter<'a, K>,
}

impl<'a, K> Iterator for FlatSetIterator<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for FlatSetIterator<'_, K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> DoubleEndedIterator for FlatSetIterator<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// A mutable builder for [`FlatSet`].
///
/// Keys inserted in ascending order are appended in amortised O(1); keys
/// inserted out of order are placed by binary search. The finished set is
/// always sorted and duplicate free.
///
/// A transient is owned by a single builder and is deliberately neither
/// `Send` nor `Sync`; the finished [`FlatSet`] is both.
///
/// # Examples
///
/// ```rust
/// use skewset::set::TransientFlatSet;
///
/// let mut transient = TransientFlatSet::new();
/// transient.insert(1);
/// transient.insert(5);
/// transient.insert(3);
/// transient.insert(5);
///
/// let set = transient.persistent();
/// assert_eq!(set.as_slice(), &[1, 3, 5]);
/// ```
pub struct TransientFlatSet<K> {
    keys: Vec<K>,
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientFlatSet<i64>: Send, Sync);

impl<K> TransientFlatSet<K> {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            keys: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Creates an empty builder with room for `capacity` keys.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            _marker: PhantomData,
        }
    }

    /// Returns the number of distinct keys inserted so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing has been inserted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Clone + Ord> TransientFlatSet<K> {
    /// Inserts a key. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        match self.keys.last().map(|last| last.cmp(&key)) {
            None | Some(Ordering::Less) => {
                self.keys.push(key);
                true
            }
            Some(Ordering::Equal) => false,
            Some(Ordering::Greater) => match self.keys.binary_search(&key) {
                Ok(_) => false,
                Err(position) => {
                    self.keys.insert(position, key);
                    true
                }
            },
        }
    }

    /// Converts the builder into a persistent [`FlatSet`].
    #[must_use]
    pub fn persistent(self) -> FlatSet<K> {
        FlatSet::from_sorted_vec(self.keys)
    }
}

impl<K> Default for TransientFlatSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord> Extend<K> for TransientFlatSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Clone + Ord> SetAccumulator<K> for TransientFlatSet<K> {
    type Output = FlatSet<K>;

    #[inline]
    fn insert(&mut self, key: K) {
        Self::insert(self, key);
    }

    #[inline]
    fn finish(self) -> Self::Output {
        self.persistent()
    }
}

/// Merges two strictly ascending slices into their sorted union.
///
/// When the ranges do not overlap the comparison loop is skipped and the
/// slices are concatenated.
pub(crate) fn union_slices<K: Clone + Ord>(left: &[K], right: &[K]) -> Vec<K> {
    let (Some(left_first), Some(left_last)) = (left.first(), left.last()) else {
        return right.to_vec();
    };
    let (Some(right_first), Some(right_last)) = (right.first(), right.last()) else {
        return left.to_vec();
    };

    let mut result = Vec::with_capacity(left.len() + right.len());

    if left_last < right_first {
        result.extend_from_slice(left);
        result.extend_from_slice(right);
        return result;
    }
    if right_last < left_first {
        result.extend_from_slice(right);
        result.extend_from_slice(left);
        return result;
    }

    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => {
                result.push(right[right_index].clone());
                right_index += 1;
            }
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result.extend_from_slice(&right[right_index..]);
    result
}

/// Returns the keys of `left` that are not in `right`, both strictly ascending.
pub(crate) fn difference_slices<K: Clone + Ord>(left: &[K], right: &[K]) -> Vec<K> {
    let (Some(left_first), Some(left_last)) = (left.first(), left.last()) else {
        return Vec::new();
    };
    let (Some(right_first), Some(right_last)) = (right.first(), right.last()) else {
        return left.to_vec();
    };

    // Disjoint ranges: nothing to remove
    if left_last < right_first || right_last < left_first {
        return left.to_vec();
    }

    let mut result = Vec::with_capacity(left.len());
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                result.push(left[left_index].clone());
                left_index += 1;
            }
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result.extend_from_slice(&left[left_index..]);
    result
}

/// Returns the keys present in both strictly ascending slices.
pub(crate) fn intersection_slices<K: Clone + Ord>(left: &[K], right: &[K]) -> Vec<K> {
    let (Some(left_first), Some(left_last)) = (left.first(), left.last()) else {
        return Vec::new();
    };
    let (Some(right_first), Some(right_last)) = (right.first(), right.last()) else {
        return Vec::new();
    };

    if left_last < right_first || right_last < left_first {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(left.len().min(right.len()));
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => left_index += 1,
            Ordering::Greater => right_index += 1,
            Ordering::Equal => {
                result.push(left[left_index].clone());
                left_index += 1;
                right_index += 1;
            }
        }
    }

    result
}

const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "from_sorted_* requires strictly increasing keys (sorted + deduplicated)";

#[inline]
fn is_strictly_sorted<K: Ord>(slice: &[K]) -> bool {
    slice.windows(2).all(|window| window[0] < window[1])
}
