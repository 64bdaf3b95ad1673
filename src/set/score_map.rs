//! Weighted key map used for relevance scoring.
//!
//! A [`ScoreMap`] maps each key to a [`Weight`]. Set algebra treats it as the
//! set of its keys; weighted intersection additionally reads the weights.

use std::marker::PhantomData;
use std::ops::RangeBounds;
use std::rc::Rc;

use super::tree::{InOrder, Range, RedBlackTree};
use super::{OrderedSet, SetKind, Weight};

/// A persistent map from keys to weights, ordered by key.
///
/// # Examples
///
/// ```rust
/// use skewset::set::ScoreMap;
///
/// let scores: ScoreMap<i64> = [(3, 30), (1, 10)].into_iter().collect();
/// assert_eq!(scores.get(&3), Some(30));
/// assert_eq!(scores.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
///
/// let bumped = scores.insert(1, 11);
/// assert_eq!(bumped.get(&1), Some(11));
/// assert_eq!(scores.get(&1), Some(10));
/// ```
#[derive(Clone)]
pub struct ScoreMap<K> {
    tree: RedBlackTree<K, Weight>,
}

impl<K> ScoreMap<K> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: RedBlackTree::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map has no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the entries in ascending key order.
    #[must_use]
    pub fn iter(&self) -> ScoreMapIterator<'_, K> {
        ScoreMapIterator {
            inner: self.tree.iter(),
        }
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> ScoreMapKeys<'_, K> {
        ScoreMapKeys {
            inner: self.tree.iter(),
        }
    }
}

impl<K: Clone + Ord> ScoreMap<K> {
    /// Returns the weight stored for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Weight> {
        self.tree.get(key).copied()
    }

    /// Returns `true` if `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Inserts or replaces an entry, returning a new map.
    #[must_use]
    pub fn insert(&self, key: K, weight: Weight) -> Self {
        Self {
            tree: self.tree.insert(key, weight),
        }
    }

    /// Creates a map from entries with strictly ascending keys in O(n).
    #[must_use]
    pub fn from_sorted_entries(entries: Vec<(K, Weight)>) -> Self {
        debug_assert!(
            entries.windows(2).all(|window| window[0].0 < window[1].0),
            "from_sorted_entries requires strictly increasing keys"
        );
        Self {
            tree: RedBlackTree::from_sorted_entries(entries),
        }
    }

    /// Returns the entries whose key lies inside `range`.
    pub fn range<R: RangeBounds<K>>(&self, range: R) -> ScoreMapRangeIterator<'_, K> {
        ScoreMapRangeIterator {
            inner: self.tree.range(range),
        }
    }

    /// Starts a transient builder seeded with this map.
    #[must_use]
    pub fn transient(&self) -> TransientScoreMap<K> {
        TransientScoreMap {
            map: self.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K> Default for ScoreMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord> FromIterator<(K, Weight)> for ScoreMap<K> {
    /// Collects entries in any order. When a key repeats, the last weight wins.
    fn from_iter<I: IntoIterator<Item = (K, Weight)>>(iter: I) -> Self {
        let mut entries: Vec<(K, Weight)> = iter.into_iter().collect();
        // Stable sort keeps later duplicates after earlier ones.
        entries.sort_by(|left, right| left.0.cmp(&right.0));
        let mut unique: Vec<(K, Weight)> = Vec::with_capacity(entries.len());
        for (key, weight) in entries {
            match unique.last_mut() {
                Some(last) if last.0 == key => last.1 = weight,
                _ => unique.push((key, weight)),
            }
        }
        Self::from_sorted_entries(unique)
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for ScoreMap<K> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for ScoreMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for ScoreMap<K> {}

impl<K: Clone + Ord> OrderedSet<K> for ScoreMap<K> {
    type Iter<'a>
        = ScoreMapKeys<'a, K>
    where
        K: 'a;

    #[inline]
    fn kind(&self) -> SetKind {
        SetKind::Scored
    }

    #[inline]
    fn cardinality(&self) -> usize {
        self.len()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.contains_key(key)
    }

    #[inline]
    fn iter_ascending(&self) -> Self::Iter<'_> {
        self.keys()
    }
}

/// Ascending `(key, weight)` iterator over a [`ScoreMap`].
pub struct ScoreMapIterator<'a, K> {
    inner: InOrder<'a, K, Weight>,
}

impl<'a, K> Iterator for ScoreMapIterator<'a, K> {
    type Item = (&'a K, Weight);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, weight)| (key, *weight))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Ascending key iterator over a [`ScoreMap`].
pub struct ScoreMapKeys<'a, K> {
    inner: InOrder<'a, K, Weight>,
}

impl<'a, K> Iterator for ScoreMapKeys<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Ascending `(key, weight)` iterator over a key range of a [`ScoreMap`].
pub struct ScoreMapRangeIterator<'a, K> {
    inner: Range<'a, K, Weight>,
}

impl<'a, K: Ord> Iterator for ScoreMapRangeIterator<'a, K> {
    type Item = (&'a K, Weight);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, weight)| (key, *weight))
    }
}

/// A mutable builder for [`ScoreMap`]. Not `Send`, not `Sync`.
pub struct TransientScoreMap<K> {
    map: ScoreMap<K>,
    _marker: PhantomData<Rc<()>>,
}

static_assertions::assert_not_impl_any!(TransientScoreMap<i64>: Send, Sync);

impl<K> TransientScoreMap<K> {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            map: ScoreMap::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the number of entries so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no entry has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Converts the builder into a persistent [`ScoreMap`].
    #[must_use]
    pub fn persistent(self) -> ScoreMap<K> {
        self.map
    }
}

impl<K: Clone + Ord> TransientScoreMap<K> {
    /// Inserts or replaces the weight for `key`.
    pub fn insert(&mut self, key: K, weight: Weight) {
        self.map = self.map.insert(key, weight);
    }
}

impl<K> Default for TransientScoreMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn last_duplicate_weight_wins_on_collect() {
        let map: ScoreMap<i64> = [(2, 1), (1, 5), (2, 9)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&2), Some(9));
    }

    #[rstest]
    fn keys_and_entries_agree() {
        let map: ScoreMap<i64> = (0..50).map(|key| (key, key * 2)).collect();
        let keys: Vec<i64> = map.keys().copied().collect();
        let entries: Vec<i64> = map.iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, entries);
        assert_eq!(map.iter_ascending().count(), map.cardinality());
    }

    #[rstest]
    fn range_returns_weights() {
        let map: ScoreMap<i64> = (0..10).map(|key| (key, key + 100)).collect();
        let window: Vec<(i64, Weight)> = map.range(3..=4).map(|(key, weight)| (*key, weight)).collect();
        assert_eq!(window, vec![(3, 103), (4, 104)]);
    }

    #[rstest]
    fn transient_replaces_weights() {
        let mut transient = TransientScoreMap::new();
        transient.insert(1, 1);
        transient.insert(1, 7);
        transient.insert(0, 3);
        let map = transient.persistent();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&0, 3), (&1, 7)]);
    }

    #[rstest]
    fn kind_is_scored() {
        let map: ScoreMap<i64> = ScoreMap::new();
        assert_eq!(map.kind(), SetKind::Scored);
        assert!(OrderedSet::is_empty(&map));
    }
}
