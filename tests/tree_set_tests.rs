//! Unit tests for TreeSet and TransientTreeSet.

use rstest::rstest;
use skewset::set::{OrderedSet, SetKind, TransientTreeSet, TreeSet};
use std::ops::Bound;

#[rstest]
fn test_new_creates_empty_set() {
    let set: TreeSet<i64> = TreeSet::new();
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
}

#[rstest]
fn test_incremental_inserts_iterate_in_order() {
    let mut set = TreeSet::new();
    for key in [50, 10, 40, 20, 30, 10] {
        set = set.insert(key);
    }

    assert_eq!(set.len(), 5);
    assert_eq!(set.iter().copied().collect::<Vec<i64>>(), vec![10, 20, 30, 40, 50]);
}

#[rstest]
fn test_large_descending_build_supports_lookups() {
    let set: TreeSet<i64> = (0..10_000).rev().collect();

    assert_eq!(set.len(), 10_000);
    assert!(set.contains(&0));
    assert!(set.contains(&9_999));
    assert!(!set.contains(&10_000));
    assert_eq!(set.first(), Some(&0));
    assert_eq!(set.last(), Some(&9_999));
}

#[rstest]
#[case::half_open((Bound::Included(10), Bound::Excluded(13)), vec![10, 11, 12])]
#[case::inclusive((Bound::Included(97), Bound::Included(99)), vec![97, 98, 99])]
#[case::unbounded_start((Bound::Unbounded, Bound::Excluded(2)), vec![0, 1])]
#[case::past_the_end((Bound::Excluded(99), Bound::Unbounded), vec![])]
#[case::empty_window((Bound::Included(5), Bound::Excluded(5)), vec![])]
fn test_range(#[case] bounds: (Bound<i64>, Bound<i64>), #[case] expected: Vec<i64>) {
    let set: TreeSet<i64> = (0..100).collect();
    assert_eq!(set.range(bounds).copied().collect::<Vec<_>>(), expected);
}

#[rstest]
fn test_range_on_sparse_keys() {
    let set: TreeSet<i64> = (0..100).map(|key| key * 10).collect();
    let window: Vec<i64> = set.range(15..=45).copied().collect();
    assert_eq!(window, vec![20, 30, 40]);
}

#[rstest]
fn test_equality_ignores_construction_order() {
    let built = TreeSet::new().insert(3).insert(1).insert(2);
    let collected: TreeSet<i64> = (1..=3).collect();
    assert_eq!(built, collected);
}

#[rstest]
fn test_ordered_set_contract() {
    let set: TreeSet<i64> = [2, 4, 6].into_iter().collect();

    assert_eq!(set.kind(), SetKind::Tree);
    assert_eq!(set.cardinality(), 3);
    assert!(OrderedSet::contains(&set, &4));
    assert!(!OrderedSet::contains(&set, &5));
    assert_eq!(set.iter_ascending().count(), 3);
}

#[rstest]
fn test_transient_builds_persistent_set() {
    let mut transient = TransientTreeSet::new();
    assert!(transient.insert(2));
    assert!(transient.insert(1));
    assert!(!transient.insert(2));
    assert_eq!(transient.len(), 2);

    let set = transient.persistent();
    assert_eq!(set.iter().copied().collect::<Vec<i64>>(), vec![1, 2]);
}

#[rstest]
fn test_transient_seeded_from_persistent_leaves_source_untouched() {
    let base: TreeSet<i64> = (0..5).collect();
    let mut transient = base.transient();
    transient.insert(99);

    assert_eq!(transient.persistent().len(), 6);
    assert_eq!(base.len(), 5);
}
