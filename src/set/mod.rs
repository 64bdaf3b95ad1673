//! Ordered set representations and the capability contract shared by them.
//!
//! The algebra engine never looks at a concrete set type directly. It asks an
//! operand for its [`SetKind`], its cardinality, whether it contains a key and
//! for an ascending iteration of its keys. This module defines that contract
//! and the concrete representations that implement it:
//!
//! - [`FlatSet`]: sorted contiguous storage. Membership is a binary search over
//!   a slice, iteration is a slice walk. Cheap to probe, cheap to scan, but not
//!   incrementally mergeable.
//! - [`TreeSet`]: persistent red-black tree of keys. Logarithmic membership
//!   with pointer chasing, cheap range queries and cheap incremental insertion.
//! - [`ScoreMap`]: persistent red-black tree mapping keys to a [`Weight`].
//!   Used for relevance scoring; it takes part in set algebra through its keys.
//!
//! The sealed variants [`Operand`] (borrowed) and [`Collection`] (owned) close
//! the set of representations so that every classification is an exhaustive
//! `match`.
//!
//! # Examples
//!
//! ```rust
//! use skewset::set::{FlatSet, OrderedSet, SetKind, TreeSet};
//!
//! let flat: FlatSet<i64> = [3, 1, 2].into_iter().collect();
//! let tree: TreeSet<i64> = (1..=1000).collect();
//!
//! assert_eq!(flat.kind(), SetKind::Flat);
//! assert_eq!(tree.kind(), SetKind::Tree);
//! assert_eq!(flat.cardinality(), 3);
//! assert!(tree.contains(&500));
//!
//! let keys: Vec<i64> = flat.iter_ascending().copied().collect();
//! assert_eq!(keys, vec![1, 2, 3]);
//! ```

mod collection;
mod flat;
mod score_map;
mod tree;
mod tree_set;

pub use collection::Collection;
pub use collection::CollectionIterator;
pub use collection::Operand;
pub use collection::WeightedEntries;
pub use collection::multiunion;
pub use flat::FlatSet;
pub use flat::FlatSetIterator;
pub use flat::TransientFlatSet;
pub use score_map::ScoreMap;
pub use score_map::ScoreMapIterator;
pub use score_map::ScoreMapKeys;
pub use score_map::ScoreMapRangeIterator;
pub use score_map::TransientScoreMap;
pub use tree_set::TransientTreeSet;
pub use tree_set::TreeSet;
pub use tree_set::TreeSetIterator;
pub use tree_set::TreeSetRangeIterator;

/// Weight attached to a key by weighted representations and weighted algebra.
pub type Weight = i64;

/// The closed set of representations an operand can have.
///
/// The engine's cost model is driven by what a kind implies about membership
/// cost, never by the kind's identity alone. The predicates below are written
/// as exhaustive matches so a new kind cannot be added without deciding how it
/// classifies.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SetKind {
    /// Sorted contiguous keys ([`FlatSet`]).
    Flat,
    /// Balanced tree of keys ([`TreeSet`]).
    Tree,
    /// Balanced tree of key/weight entries ([`ScoreMap`]).
    Scored,
}

impl SetKind {
    /// Returns `true` for the flat family: near-constant membership tests and
    /// contiguous iteration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::SetKind;
    ///
    /// assert!(SetKind::Flat.is_flat());
    /// assert!(!SetKind::Tree.is_flat());
    /// assert!(!SetKind::Scored.is_flat());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_flat(self) -> bool {
        match self {
            Self::Flat => true,
            Self::Tree | Self::Scored => false,
        }
    }

    /// Returns `true` for kinds that carry keys only.
    ///
    /// Weighted intersection of two plain sets degenerates to a plain
    /// intersection with the weights summed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use skewset::set::SetKind;
    ///
    /// assert!(SetKind::Flat.is_plain_set());
    /// assert!(SetKind::Tree.is_plain_set());
    /// assert!(!SetKind::Scored.is_plain_set());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_plain_set(self) -> bool {
        match self {
            Self::Flat | Self::Tree => true,
            Self::Scored => false,
        }
    }
}

/// Read-only capabilities every set representation provides to the algebra.
///
/// Implementations must uphold:
///
/// - `iter_ascending` yields every key exactly once, in strictly ascending
///   order, and a fresh call restarts from the smallest key.
/// - `cardinality` equals the number of keys `iter_ascending` yields.
/// - `contains(k)` is `true` exactly for the keys `iter_ascending` yields.
pub trait OrderedSet<K> {
    /// Ascending iterator over borrowed keys.
    type Iter<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Returns the representation of this set.
    fn kind(&self) -> SetKind;

    /// Returns the number of keys.
    fn cardinality(&self) -> usize;

    /// Returns `true` if the set holds no keys.
    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    /// Returns `true` if `key` is a member.
    fn contains(&self, key: &K) -> bool;

    /// Returns a lazy iterator over the keys in ascending order.
    fn iter_ascending(&self) -> Self::Iter<'_>;
}

/// A write-only builder that a result set is accumulated into.
///
/// Keys inserted in ascending order are appended in amortised constant time.
/// Out-of-order and duplicate keys are accepted and still produce a valid set.
pub trait SetAccumulator<K> {
    /// The finished set type.
    type Output;

    /// Adds `key` to the accumulator.
    fn insert(&mut self, key: K);

    /// Consumes the accumulator and returns the finished set.
    fn finish(self) -> Self::Output;
}

/// Sets that can start a fresh, empty accumulator of their own representation.
pub trait SameFamily<K>: OrderedSet<K> {
    /// The accumulator type; it finishes into `Self`.
    type Accumulator: SetAccumulator<K, Output = Self>;

    /// Returns a new, empty accumulator of the same representation as `self`.
    fn new_accumulator(&self) -> Self::Accumulator;
}

static_assertions::assert_impl_all!(FlatSet<i64>: Send, Sync);
static_assertions::assert_impl_all!(TreeSet<i64>: Send, Sync);
static_assertions::assert_impl_all!(ScoreMap<i64>: Send, Sync);
static_assertions::assert_impl_all!(Collection<i64>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::flat(SetKind::Flat, true, true)]
    #[case::tree(SetKind::Tree, false, true)]
    #[case::scored(SetKind::Scored, false, false)]
    fn kind_predicates(#[case] kind: SetKind, #[case] flat: bool, #[case] plain: bool) {
        assert_eq!(kind.is_flat(), flat);
        assert_eq!(kind.is_plain_set(), plain);
    }

    #[rstest]
    fn default_is_empty_follows_cardinality() {
        let empty: FlatSet<i64> = FlatSet::new();
        let tree: TreeSet<i64> = [1].into_iter().collect();

        assert!(OrderedSet::is_empty(&empty));
        assert!(!OrderedSet::is_empty(&tree));
    }
}
