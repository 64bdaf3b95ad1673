//! Membership-probe fast paths.
//!
//! Both loops walk the small operand in ascending order and ask the big
//! operand about each key, so the accumulator only ever sees ascending
//! appends. They are written against the set contract alone.

use crate::set::{OrderedSet, SameFamily, SetAccumulator};

/// Keys of `small` that `big` contains, in the representation of `small`.
///
/// # Complexity
///
/// O(|small| × cost of `big.contains`).
pub(crate) fn probe_intersection<K, S, B>(small: &S, big: &B) -> S
where
    K: Clone,
    S: SameFamily<K>,
    B: OrderedSet<K> + ?Sized,
{
    let mut accumulator = small.new_accumulator();
    for key in small.iter_ascending() {
        if big.contains(key) {
            accumulator.insert(key.clone());
        }
    }
    accumulator.finish()
}

/// Keys of `small` that `big` does not contain, in the representation of
/// `small`.
pub(crate) fn probe_difference<K, S, B>(small: &S, big: &B) -> S
where
    K: Clone,
    S: SameFamily<K>,
    B: OrderedSet<K> + ?Sized,
{
    let mut accumulator = small.new_accumulator();
    for key in small.iter_ascending() {
        if !big.contains(key) {
            accumulator.insert(key.clone());
        }
    }
    accumulator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set::{FlatSet, Operand, ScoreMap, TreeSet};
    use rstest::rstest;

    #[rstest]
    fn intersection_probes_any_big_kind() {
        let small: FlatSet<i64> = [1, 2, 3].into_iter().collect();
        let tree: TreeSet<i64> = (2..=10_000).collect();
        let scored: ScoreMap<i64> = [(3, 9), (4, 16)].into_iter().collect();

        assert_eq!(probe_intersection(&small, &tree).as_slice(), &[2, 3]);
        assert_eq!(probe_intersection(&small, &Operand::from(&scored)).as_slice(), &[3]);
    }

    #[rstest]
    fn difference_keeps_missing_keys() {
        let small: FlatSet<i64> = [1, 50, 99].into_iter().collect();
        let big: TreeSet<i64> = (0..60).collect();

        assert_eq!(probe_difference(&small, &big).as_slice(), &[99]);
    }

    #[rstest]
    fn probes_also_build_tree_results() {
        let small: TreeSet<i64> = [4, 5, 6].into_iter().collect();
        let big: FlatSet<i64> = [5].into_iter().collect();

        let kept = probe_difference(&small, &big);
        assert_eq!(kept.iter().copied().collect::<Vec<_>>(), vec![4, 6]);
    }

    #[rstest]
    fn empty_small_side_yields_empty() {
        let small: FlatSet<i64> = FlatSet::new();
        let big: FlatSet<i64> = (0..10).collect();

        assert!(probe_intersection(&small, &big).is_empty());
        assert!(probe_difference(&small, &big).is_empty());
    }
}
