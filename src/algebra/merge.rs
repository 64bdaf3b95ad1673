//! The baseline algebra.
//!
//! [`MergeAlgebra`] is the always-correct oracle the engine falls back to.
//! [`SortedMerge`] implements it with linear two-pointer walks over ascending
//! iterations. Any other correct implementation can be injected in its place.

use std::cmp::Ordering;

use crate::set::{Collection, FlatSet, Operand, OrderedSet, ScoreMap, Weight};

/// Reference implementation of the three operations over optional operands.
///
/// `None` stands for an absent operand. Implementations must follow these
/// absent-operand rules:
///
/// | call                        | result             |
/// |-----------------------------|--------------------|
/// | `intersection(None, None)`  | `None`             |
/// | `intersection(None, b)`     | `Some(b)`          |
/// | `intersection(a, None)`     | `Some(a)`          |
/// | `difference(None, _)`       | `None`             |
/// | `difference(a, None)`       | `Some(a)`          |
/// | `weighted(None, None)`      | `(0, None)`        |
/// | `weighted(None, b)`         | `(w2, Some(b))`    |
/// | `weighted(a, None)`         | `(w1, Some(a))`    |
pub trait MergeAlgebra<K> {
    /// Keys present in both operands, as a flat set.
    fn intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>>;

    /// Keys of `left` absent from `right`.
    ///
    /// A mapping on the left keeps its weights; a set on the left yields a
    /// flat set.
    fn difference(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>>;

    /// Intersection that also combines weights.
    ///
    /// Two plain sets give `(left_weight + right_weight, left ∩ right)`. Any
    /// pairing with a mapping gives weight 1 and a mapping whose value for
    /// each common key is `a * left_weight + b * right_weight`, where a plain
    /// set member counts as 1.
    fn weighted_intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
        left_weight: Weight,
        right_weight: Weight,
    ) -> (Weight, Option<Collection<K>>);
}

/// Linear sorted-merge implementation of [`MergeAlgebra`].
///
/// # Examples
///
/// ```rust
/// use skewset::algebra::{MergeAlgebra, SortedMerge};
/// use skewset::set::{FlatSet, Operand, TreeSet};
///
/// let left: FlatSet<i64> = [1, 2, 3].into_iter().collect();
/// let right: TreeSet<i64> = [2, 3, 4].into_iter().collect();
///
/// let result = SortedMerge
///     .intersection(Some(Operand::from(&left)), Some(Operand::from(&right)))
///     .unwrap();
/// assert_eq!(result.to_sorted_vec(), vec![2, 3]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortedMerge;

impl<K: Clone + Ord> MergeAlgebra<K> for SortedMerge {
    fn intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>> {
        match (left, right) {
            (None, None) => None,
            (None, Some(right)) => Some(right.to_collection()),
            (Some(left), None) => Some(left.to_collection()),
            (Some(Operand::Flat(left)), Some(Operand::Flat(right))) => {
                Some(Collection::Flat(left.intersection(right)))
            }
            (Some(left), Some(right)) => {
                let mut keys = Vec::new();
                intersect_with(left.iter_weighted(), right.iter_weighted(), |key, _, _| {
                    keys.push(key.clone());
                });
                Some(Collection::Flat(FlatSet::from_sorted_vec(keys)))
            }
        }
    }

    fn difference(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>> {
        match (left, right) {
            (None, _) => None,
            (Some(left), None) => Some(left.to_collection()),
            (Some(Operand::Flat(left)), Some(Operand::Flat(right))) => {
                Some(Collection::Flat(left.difference(right)))
            }
            (Some(Operand::Scored(left)), Some(right)) => {
                let mut entries = Vec::new();
                subtract_with(left.iter(), right.iter_ascending(), |key, weight| {
                    entries.push((key.clone(), weight));
                });
                Some(Collection::Scored(ScoreMap::from_sorted_entries(entries)))
            }
            (Some(left), Some(right)) => {
                let mut keys = Vec::new();
                subtract_with(left.iter_weighted(), right.iter_ascending(), |key, _| {
                    keys.push(key.clone());
                });
                Some(Collection::Flat(FlatSet::from_sorted_vec(keys)))
            }
        }
    }

    fn weighted_intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
        left_weight: Weight,
        right_weight: Weight,
    ) -> (Weight, Option<Collection<K>>) {
        match (left, right) {
            (None, None) => (0, None),
            (None, Some(right)) => (right_weight, Some(right.to_collection())),
            (Some(left), None) => (left_weight, Some(left.to_collection())),
            (Some(left), Some(right)) if left.kind().is_plain_set() && right.kind().is_plain_set() => (
                left_weight.saturating_add(right_weight),
                self.intersection(Some(left), Some(right)),
            ),
            (Some(left), Some(right)) => {
                let mut entries = Vec::new();
                intersect_with(
                    left.iter_weighted(),
                    right.iter_weighted(),
                    |key, left_value, right_value| {
                        let combined = left_value
                            .saturating_mul(left_weight)
                            .saturating_add(right_value.saturating_mul(right_weight));
                        entries.push((key.clone(), combined));
                    },
                );
                (1, Some(Collection::Scored(ScoreMap::from_sorted_entries(entries))))
            }
        }
    }
}

/// Calls `emit` with each key present in both ascending entry streams.
fn intersect_with<'a, 'b, K, L, R, F>(mut left: L, mut right: R, mut emit: F)
where
    K: Ord + 'a + 'b,
    L: Iterator<Item = (&'a K, Weight)>,
    R: Iterator<Item = (&'b K, Weight)>,
    F: FnMut(&'a K, Weight, Weight),
{
    let mut left_entry = left.next();
    let mut right_entry = right.next();
    while let (Some((left_key, left_value)), Some((right_key, right_value))) =
        (left_entry, right_entry)
    {
        match left_key.cmp(right_key) {
            Ordering::Less => left_entry = left.next(),
            Ordering::Greater => right_entry = right.next(),
            Ordering::Equal => {
                emit(left_key, left_value, right_value);
                left_entry = left.next();
                right_entry = right.next();
            }
        }
    }
}

/// Calls `emit` with each left entry whose key is missing from `right`.
fn subtract_with<'a, 'b, K, L, R, F>(left: L, mut right: R, mut emit: F)
where
    K: Ord + 'a + 'b,
    L: Iterator<Item = (&'a K, Weight)>,
    R: Iterator<Item = &'b K>,
    F: FnMut(&'a K, Weight),
{
    let mut right_key = right.next();
    for (key, weight) in left {
        while let Some(candidate) = right_key {
            if candidate < key {
                right_key = right.next();
            } else {
                break;
            }
        }
        match right_key {
            Some(candidate) if candidate == key => {}
            _ => emit(key, weight),
        }
    }
}
