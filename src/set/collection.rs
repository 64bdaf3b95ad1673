//! Sealed operand and result variants.
//!
//! [`Operand`] borrows any representation for the duration of one algebra
//! call; [`Collection`] owns the result an operation hands back. Both are
//! closed enumerations, so classifying an operand is an exhaustive `match`.

use super::{
    FlatSet, FlatSetIterator, OrderedSet, ScoreMap, ScoreMapIterator, ScoreMapKeys, SetKind,
    TreeSet, TreeSetIterator, Weight,
};

/// A borrowed set of any representation.
///
/// # Examples
///
/// ```rust
/// use skewset::set::{FlatSet, Operand, OrderedSet, SetKind, TreeSet};
///
/// let flat: FlatSet<i64> = [1, 2].into_iter().collect();
/// let tree: TreeSet<i64> = [2, 3].into_iter().collect();
///
/// let left = Operand::from(&flat);
/// let right = Operand::from(&tree);
/// assert_eq!(left.kind(), SetKind::Flat);
/// assert!(right.contains(&3));
/// ```
pub enum Operand<'a, K> {
    /// A flat set.
    Flat(&'a FlatSet<K>),
    /// A tree set.
    Tree(&'a TreeSet<K>),
    /// A weighted mapping.
    Scored(&'a ScoreMap<K>),
}

impl<K> Clone for Operand<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Operand<'_, K> {}

impl<K: std::fmt::Debug> std::fmt::Debug for Operand<'_, K> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat(set) => formatter.debug_tuple("Flat").field(set).finish(),
            Self::Tree(set) => formatter.debug_tuple("Tree").field(set).finish(),
            Self::Scored(map) => formatter.debug_tuple("Scored").field(map).finish(),
        }
    }
}

impl<'a, K> Operand<'a, K> {
    /// Returns every entry with its weight, ascending by key.
    ///
    /// Plain sets give each key a weight of 1.
    #[must_use]
    pub fn iter_weighted(self) -> WeightedEntries<'a, K> {
        match self {
            Self::Flat(set) => WeightedEntries::Flat(set.iter()),
            Self::Tree(set) => WeightedEntries::Tree(set.iter()),
            Self::Scored(map) => WeightedEntries::Scored(map.iter()),
        }
    }
}

impl<K: Clone + Ord> Operand<'_, K> {
    /// Returns the weight of `key`, or `None` if it is not a member.
    #[must_use]
    pub fn weight_of(&self, key: &K) -> Option<Weight> {
        match self {
            Self::Flat(set) => set.contains(key).then_some(1),
            Self::Tree(set) => set.contains(key).then_some(1),
            Self::Scored(map) => map.get(key),
        }
    }

    /// Returns an owned copy. Storage is shared, not duplicated.
    #[must_use]
    pub fn to_collection(&self) -> Collection<K> {
        match self {
            Self::Flat(set) => Collection::Flat((*set).clone()),
            Self::Tree(set) => Collection::Tree((*set).clone()),
            Self::Scored(map) => Collection::Scored((*map).clone()),
        }
    }
}

impl<'a, K> From<&'a FlatSet<K>> for Operand<'a, K> {
    fn from(set: &'a FlatSet<K>) -> Self {
        Self::Flat(set)
    }
}

impl<'a, K> From<&'a TreeSet<K>> for Operand<'a, K> {
    fn from(set: &'a TreeSet<K>) -> Self {
        Self::Tree(set)
    }
}

impl<'a, K> From<&'a ScoreMap<K>> for Operand<'a, K> {
    fn from(map: &'a ScoreMap<K>) -> Self {
        Self::Scored(map)
    }
}

impl<'a, K> From<&'a Collection<K>> for Operand<'a, K> {
    fn from(collection: &'a Collection<K>) -> Self {
        collection.operand()
    }
}

impl<K: Clone + Ord> OrderedSet<K> for Operand<'_, K> {
    type Iter<'b>
        = CollectionIterator<'b, K>
    where
        Self: 'b,
        K: 'b;

    fn kind(&self) -> SetKind {
        match self {
            Self::Flat(_) => SetKind::Flat,
            Self::Tree(_) => SetKind::Tree,
            Self::Scored(_) => SetKind::Scored,
        }
    }

    fn cardinality(&self) -> usize {
        match self {
            Self::Flat(set) => set.len(),
            Self::Tree(set) => set.len(),
            Self::Scored(map) => map.len(),
        }
    }

    fn contains(&self, key: &K) -> bool {
        match self {
            Self::Flat(set) => set.contains(key),
            Self::Tree(set) => set.contains(key),
            Self::Scored(map) => map.contains_key(key),
        }
    }

    fn iter_ascending(&self) -> Self::Iter<'_> {
        match self {
            Self::Flat(set) => CollectionIterator::Flat(set.iter()),
            Self::Tree(set) => CollectionIterator::Tree(set.iter()),
            Self::Scored(map) => CollectionIterator::Scored(map.keys()),
        }
    }
}

/// Ascending key iterator over an [`Operand`] or [`Collection`].
pub enum CollectionIterator<'a, K> {
    /// Keys of a flat set.
    Flat(FlatSetIterator<'a, K>),
    /// Keys of a tree set.
    Tree(TreeSetIterator<'a, K>),
    /// Keys of a mapping.
    Scored(ScoreMapKeys<'a, K>),
}

impl<'a, K> Iterator for CollectionIterator<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Flat(iter) => iter.next(),
            Self::Tree(iter) => iter.next(),
            Self::Scored(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Flat(iter) => iter.size_hint(),
            Self::Tree(iter) => iter.size_hint(),
            Self::Scored(iter) => iter.size_hint(),
        }
    }
}

/// Ascending `(key, weight)` iterator returned by [`Operand::iter_weighted`].
pub enum WeightedEntries<'a, K> {
    /// Keys of a flat set, each weighted 1.
    Flat(FlatSetIterator<'a, K>),
    /// Keys of a tree set, each weighted 1.
    Tree(TreeSetIterator<'a, K>),
    /// Entries of a mapping.
    Scored(ScoreMapIterator<'a, K>),
}

impl<'a, K> Iterator for WeightedEntries<'a, K> {
    type Item = (&'a K, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Flat(iter) => iter.next().map(|key| (key, 1)),
            Self::Tree(iter) => iter.next().map(|key| (key, 1)),
            Self::Scored(iter) => iter.next(),
        }
    }
}

/// An owned set of any representation, as returned by the algebra.
///
/// Equality compares representation and contents; use
/// [`Collection::to_sorted_vec`] to compare keys only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collection<K> {
    /// A flat set.
    Flat(FlatSet<K>),
    /// A tree set.
    Tree(TreeSet<K>),
    /// A weighted mapping.
    Scored(ScoreMap<K>),
}

impl<K> Collection<K> {
    /// Borrows this collection as an algebra operand.
    #[must_use]
    pub const fn operand(&self) -> Operand<'_, K> {
        match self {
            Self::Flat(set) => Operand::Flat(set),
            Self::Tree(set) => Operand::Tree(set),
            Self::Scored(map) => Operand::Scored(map),
        }
    }

    /// Returns the representation.
    #[must_use]
    pub const fn kind(&self) -> SetKind {
        match self {
            Self::Flat(_) => SetKind::Flat,
            Self::Tree(_) => SetKind::Tree,
            Self::Scored(_) => SetKind::Scored,
        }
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(set) => set.len(),
            Self::Tree(set) => set.len(),
            Self::Scored(map) => map.len(),
        }
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keys in ascending order.
    #[must_use]
    pub fn iter(&self) -> CollectionIterator<'_, K> {
        match self {
            Self::Flat(set) => CollectionIterator::Flat(set.iter()),
            Self::Tree(set) => CollectionIterator::Tree(set.iter()),
            Self::Scored(map) => CollectionIterator::Scored(map.keys()),
        }
    }

    /// Returns the flat set, if this is one.
    #[must_use]
    pub const fn as_flat(&self) -> Option<&FlatSet<K>> {
        match self {
            Self::Flat(set) => Some(set),
            Self::Tree(_) | Self::Scored(_) => None,
        }
    }

    /// Returns the tree set, if this is one.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&TreeSet<K>> {
        match self {
            Self::Tree(set) => Some(set),
            Self::Flat(_) | Self::Scored(_) => None,
        }
    }

    /// Returns the weighted mapping, if this is one.
    #[must_use]
    pub const fn as_scored(&self) -> Option<&ScoreMap<K>> {
        match self {
            Self::Scored(map) => Some(map),
            Self::Flat(_) | Self::Tree(_) => None,
        }
    }
}

impl<K: Clone + Ord> Collection<K> {
    /// Returns `true` if `key` is a member.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.operand().contains(key)
    }

    /// Returns the keys as an ascending `Vec`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::{Collection, TreeSet};
    ///
    /// let tree: TreeSet<i64> = [3, 1, 2].into_iter().collect();
    /// let collection = Collection::from(tree);
    /// assert_eq!(collection.to_sorted_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<K> {
        match self {
            Self::Flat(set) => set.to_sorted_vec(),
            Self::Tree(_) | Self::Scored(_) => self.iter().cloned().collect(),
        }
    }
}

impl<K> From<FlatSet<K>> for Collection<K> {
    fn from(set: FlatSet<K>) -> Self {
        Self::Flat(set)
    }
}

impl<K> From<TreeSet<K>> for Collection<K> {
    fn from(set: TreeSet<K>) -> Self {
        Self::Tree(set)
    }
}

impl<K> From<ScoreMap<K>> for Collection<K> {
    fn from(map: ScoreMap<K>) -> Self {
        Self::Scored(map)
    }
}

/// Unions any number of operands into one flat set.
///
/// Weights of mappings are ignored; only keys take part.
///
/// # Examples
///
/// ```rust
/// use skewset::set::{multiunion, FlatSet, Operand, TreeSet};
///
/// let first: FlatSet<i64> = [1, 5].into_iter().collect();
/// let second: TreeSet<i64> = [2, 5, 9].into_iter().collect();
///
/// let union = multiunion([Operand::from(&first), Operand::from(&second)]);
/// assert_eq!(union.as_slice(), &[1, 2, 5, 9]);
/// ```
pub fn multiunion<'a, K, I>(operands: I) -> FlatSet<K>
where
    K: Clone + Ord + 'a,
    I: IntoIterator<Item = Operand<'a, K>>,
{
    let mut keys: Vec<K> = Vec::new();
    for operand in operands {
        keys.extend(operand.iter_ascending().cloned());
    }
    keys.sort_unstable();
    keys.dedup();
    FlatSet::from_sorted_vec(keys)
}
