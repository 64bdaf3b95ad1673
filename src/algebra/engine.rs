//! Strategy selection and dispatch.

use std::marker::PhantomData;

use super::merge::{MergeAlgebra, SortedMerge};
use super::policy::{AlgebraPolicy, PolicyError};
use super::probe::{probe_difference, probe_intersection};
use crate::set::{Collection, Operand, OrderedSet, Weight};

/// Which operand a probe path iterates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The first operand.
    Left,
    /// The second operand.
    Right,
}

/// How an operation will be executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Delegate to the baseline [`MergeAlgebra`].
    Merge,
    /// Walk the small flat operand on the given side and probe the other.
    Probe(Side),
    /// Weighted intersection of two plain sets: sum the weights and run the
    /// adaptive intersection.
    PlainSets,
}

/// Chooses the strategy for an intersection.
///
/// Only kinds and cardinalities are read; no operand is iterated. Absent or
/// empty operands always go to the baseline.
///
/// # Examples
///
/// ```rust
/// use skewset::algebra::{plan_intersection, AlgebraPolicy, Side, Strategy};
/// use skewset::set::{FlatSet, Operand, TreeSet};
///
/// let small: FlatSet<i64> = [1, 2, 3].into_iter().collect();
/// let big: TreeSet<i64> = (2..=10_000).collect();
/// let policy = AlgebraPolicy::default();
///
/// assert_eq!(
///     plan_intersection(&policy, Some(Operand::from(&big)), Some(Operand::from(&small))),
///     Strategy::Probe(Side::Right)
/// );
/// assert_eq!(plan_intersection(&policy, None, Some(Operand::from(&small))), Strategy::Merge);
/// ```
pub fn plan_intersection<K: Clone + Ord>(
    policy: &AlgebraPolicy,
    left: Option<Operand<'_, K>>,
    right: Option<Operand<'_, K>>,
) -> Strategy {
    let (Some(left), Some(right)) = (left, right) else {
        return Strategy::Merge;
    };
    if left.is_empty() || right.is_empty() {
        return Strategy::Merge;
    }

    let threshold = policy.small_set_threshold();
    match (left.kind().is_flat(), right.kind().is_flat()) {
        (true, false) if left.cardinality() < threshold => Strategy::Probe(Side::Left),
        (false, true) if right.cardinality() < threshold => Strategy::Probe(Side::Right),
        _ => Strategy::Merge,
    }
}

/// Chooses the strategy for `left \ right`.
///
/// The probe runs only when `left` is flat, has fewer keys than the
/// small-set threshold, and `right.len() / left.len()` (floor division) is
/// strictly greater than the big/small ratio.
pub fn plan_difference<K: Clone + Ord>(
    policy: &AlgebraPolicy,
    left: Option<Operand<'_, K>>,
    right: Option<Operand<'_, K>>,
) -> Strategy {
    let (Some(left), Some(right)) = (left, right) else {
        return Strategy::Merge;
    };
    if left.is_empty() || right.is_empty() || !left.kind().is_flat() {
        return Strategy::Merge;
    }

    let small = left.cardinality();
    if small >= policy.small_set_threshold() {
        return Strategy::Merge;
    }
    if right.cardinality() / small > policy.big_small_ratio() {
        Strategy::Probe(Side::Left)
    } else {
        Strategy::Merge
    }
}

/// Chooses the strategy for a weighted intersection.
///
/// Two present plain sets take [`Strategy::PlainSets`]; everything else goes
/// to the baseline.
pub fn plan_weighted_intersection<K: Clone + Ord>(
    left: Option<Operand<'_, K>>,
    right: Option<Operand<'_, K>>,
) -> Strategy {
    match (left, right) {
        (Some(left), Some(right)) if left.kind().is_plain_set() && right.kind().is_plain_set() => {
            Strategy::PlainSets
        }
        _ => Strategy::Merge,
    }
}

/// The adaptive set algebra engine.
///
/// An engine is configured once with a baseline [`MergeAlgebra`] and an
/// [`AlgebraPolicy`]. Each call classifies its operands, then either probes
/// the big operand with the keys of a small flat one or hands the call to the
/// baseline. Results never depend on which path ran.
///
/// Swapping the baseline or the policy means building a new engine.
///
/// # Examples
///
/// ```rust
/// use skewset::algebra::SetAlgebra;
/// use skewset::set::{FlatSet, Operand, TreeSet};
///
/// let algebra = SetAlgebra::new();
/// let small: FlatSet<i64> = [1, 2, 3].into_iter().collect();
/// let big: TreeSet<i64> = (2..=10_000).collect();
///
/// let result = algebra
///     .intersection(Some(Operand::from(&small)), Some(Operand::from(&big)))
///     .unwrap();
/// assert_eq!(result.to_sorted_vec(), vec![2, 3]);
///
/// let (weight, _) = algebra.weighted_intersection(
///     Some(Operand::from(&small)),
///     Some(Operand::from(&big)),
///     2,
///     3,
/// );
/// assert_eq!(weight, 5);
/// ```
pub struct SetAlgebra<K, M = SortedMerge> {
    merge: M,
    policy: AlgebraPolicy,
    _key: PhantomData<fn() -> K>,
}

impl<K: Clone + Ord> SetAlgebra<K, SortedMerge> {
    /// Creates an engine with the sorted-merge baseline and default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::configured(SortedMerge, AlgebraPolicy::default())
    }

    /// Creates an engine with the sorted-merge baseline and `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if `policy` fails validation.
    pub fn with_policy(policy: AlgebraPolicy) -> Result<Self, PolicyError> {
        Self::with_merge(SortedMerge, policy)
    }
}

impl<K: Clone + Ord> Default for SetAlgebra<K, SortedMerge> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, M: MergeAlgebra<K>> SetAlgebra<K, M> {
    /// Creates an engine with a custom baseline.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if `policy` fails validation.
    pub fn with_merge(merge: M, policy: AlgebraPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self::configured(merge, policy))
    }

    fn configured(merge: M, policy: AlgebraPolicy) -> Self {
        tracing::debug!(
            merge = std::any::type_name::<M>(),
            small_set_threshold = policy.small_set_threshold(),
            big_small_ratio = policy.big_small_ratio(),
            "configured set algebra"
        );
        Self {
            merge,
            policy,
            _key: PhantomData,
        }
    }

    /// Returns the policy.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> &AlgebraPolicy {
        &self.policy
    }

    /// Returns the baseline.
    #[inline]
    #[must_use]
    pub const fn merge(&self) -> &M {
        &self.merge
    }

    /// Keys present in both operands.
    ///
    /// Absent operands follow the baseline: one absent side returns the
    /// other operand, both absent returns `None`.
    pub fn intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>> {
        let strategy = plan_intersection(&self.policy, left, right);
        trace_call("intersection", strategy, left, right);
        match (strategy, left, right) {
            (Strategy::Probe(Side::Left), Some(Operand::Flat(small)), Some(big)) => {
                Some(Collection::Flat(probe_intersection(small, &big)))
            }
            (Strategy::Probe(Side::Right), Some(big), Some(Operand::Flat(small))) => {
                Some(Collection::Flat(probe_intersection(small, &big)))
            }
            _ => self.merge.intersection(left, right),
        }
    }

    /// Keys of `left` that are not in `right`.
    pub fn difference(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
    ) -> Option<Collection<K>> {
        let strategy = plan_difference(&self.policy, left, right);
        trace_call("difference", strategy, left, right);
        match (strategy, left, right) {
            (Strategy::Probe(Side::Left), Some(Operand::Flat(small)), Some(big)) => {
                Some(Collection::Flat(probe_difference(small, &big)))
            }
            _ => self.merge.difference(left, right),
        }
    }

    /// Intersection that also combines weights.
    ///
    /// For two plain sets the weight is `left_weight + right_weight`
    /// (saturating) and the set is [`SetAlgebra::intersection`]. Every other
    /// pairing is answered by the baseline.
    pub fn weighted_intersection(
        &self,
        left: Option<Operand<'_, K>>,
        right: Option<Operand<'_, K>>,
        left_weight: Weight,
        right_weight: Weight,
    ) -> (Weight, Option<Collection<K>>) {
        let strategy = plan_weighted_intersection(left, right);
        trace_call("weighted_intersection", strategy, left, right);
        match strategy {
            Strategy::PlainSets => (
                left_weight.saturating_add(right_weight),
                self.intersection(left, right),
            ),
            Strategy::Merge | Strategy::Probe(_) => {
                self.merge
                    .weighted_intersection(left, right, left_weight, right_weight)
            }
        }
    }
}

impl<K, M: Clone> Clone for SetAlgebra<K, M> {
    fn clone(&self) -> Self {
        Self {
            merge: self.merge.clone(),
            policy: self.policy,
            _key: PhantomData,
        }
    }
}

impl<K, M: std::fmt::Debug> std::fmt::Debug for SetAlgebra<K, M> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SetAlgebra")
            .field("merge", &self.merge)
            .field("policy", &self.policy)
            .finish()
    }
}

static_assertions::assert_impl_all!(SetAlgebra<i64>: Send, Sync);

fn trace_call<K: Clone + Ord>(
    operation: &'static str,
    strategy: Strategy,
    left: Option<Operand<'_, K>>,
    right: Option<Operand<'_, K>>,
) {
    tracing::trace!(
        operation,
        ?strategy,
        left_len = ?left.map(|operand| operand.cardinality()),
        right_len = ?right.map(|operand| operand.cardinality()),
        "set algebra call"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::{FlatSet, ScoreMap, TreeSet};
    use rstest::rstest;

    fn flat(len: i64) -> FlatSet<i64> {
        (0..len).collect()
    }

    fn tree(len: i64) -> TreeSet<i64> {
        (0..len).collect()
    }

    #[rstest]
    #[case::both_flat(true, true, Strategy::Merge)]
    #[case::both_tree(false, false, Strategy::Merge)]
    #[case::flat_left(true, false, Strategy::Probe(Side::Left))]
    #[case::flat_right(false, true, Strategy::Probe(Side::Right))]
    fn intersection_plan_by_kind(
        #[case] left_flat: bool,
        #[case] right_flat: bool,
        #[case] expected: Strategy,
    ) {
        let (small_flat, small_tree) = (flat(10), tree(10));
        let (big_flat, big_tree) = (flat(5_000), tree(5_000));
        let left = if left_flat {
            Operand::from(&small_flat)
        } else {
            Operand::from(&small_tree)
        };
        let right = if right_flat {
            Operand::from(&big_flat)
        } else {
            Operand::from(&big_tree)
        };

        assert_eq!(
            plan_intersection(&AlgebraPolicy::default(), Some(left), Some(right)),
            expected
        );
    }

    #[rstest]
    fn zero_threshold_disables_probes() {
        let policy = AlgebraPolicy::new(0, 20).unwrap();
        let small = flat(1);
        let big = tree(100_000);

        assert_eq!(
            plan_intersection(&policy, Some(Operand::from(&small)), Some(Operand::from(&big))),
            Strategy::Merge
        );
        assert_eq!(
            plan_difference(&policy, Some(Operand::from(&small)), Some(Operand::from(&big))),
            Strategy::Merge
        );
    }

    #[rstest]
    fn mapping_operand_can_be_the_probed_side() {
        let small = flat(5);
        let scores: ScoreMap<i64> = (0..1_000).map(|key| (key, key)).collect();
        let algebra = SetAlgebra::new();

        assert_eq!(
            plan_intersection(
                algebra.policy(),
                Some(Operand::from(&scores)),
                Some(Operand::from(&small))
            ),
            Strategy::Probe(Side::Right)
        );
        let result = algebra.intersection(Some(Operand::from(&scores)), Some(Operand::from(&small)));
        assert_eq!(result, Some(Collection::Flat(flat(5))));
    }

    #[rstest]
    fn weighted_plan_uses_the_plain_set_allow_list() {
        let set = flat(3);
        let tree_set = tree(3);
        let scores: ScoreMap<i64> = [(1, 1)].into_iter().collect();

        assert_eq!(
            plan_weighted_intersection(Some(Operand::from(&set)), Some(Operand::from(&tree_set))),
            Strategy::PlainSets
        );
        assert_eq!(
            plan_weighted_intersection(Some(Operand::from(&set)), Some(Operand::from(&scores))),
            Strategy::Merge
        );
        assert_eq!(
            plan_weighted_intersection(None, Some(Operand::from(&set))),
            Strategy::Merge
        );
    }

    #[rstest]
    fn invalid_policy_is_rejected_at_construction() {
        let policy = AlgebraPolicy::default().with_big_small_ratio(0);
        assert!(SetAlgebra::<i64>::with_policy(policy).is_err());
    }
}
