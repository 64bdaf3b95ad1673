//! Unit tests for ScoreMap.

use rstest::rstest;
use skewset::set::{OrderedSet, ScoreMap, SetKind, TransientScoreMap, Weight};

#[rstest]
fn test_new_creates_empty_map() {
    let map: ScoreMap<i64> = ScoreMap::new();
    assert!(map.is_empty());
    assert_eq!(map.get(&1), None);
}

#[rstest]
fn test_insert_and_replace() {
    let map = ScoreMap::new().insert(1, 10).insert(2, 20);
    let replaced = map.insert(1, 15);

    assert_eq!(map.get(&1), Some(10));
    assert_eq!(replaced.get(&1), Some(15));
    assert_eq!(replaced.len(), 2);
}

#[rstest]
fn test_entries_are_ordered_by_key() {
    let map: ScoreMap<i64> = [(30, 1), (10, 3), (20, 2)].into_iter().collect();
    let entries: Vec<(i64, Weight)> = map.iter().map(|(key, weight)| (*key, weight)).collect();

    assert_eq!(entries, vec![(10, 3), (20, 2), (30, 1)]);
}

#[rstest]
fn test_keys_drive_the_set_contract() {
    let map: ScoreMap<i64> = [(1, -5), (2, 0)].into_iter().collect();

    assert_eq!(map.kind(), SetKind::Scored);
    assert_eq!(map.cardinality(), 2);
    assert!(map.contains_key(&2));
    assert!(OrderedSet::contains(&map, &1));
    assert_eq!(map.iter_ascending().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[rstest]
fn test_range_yields_weights() {
    let map: ScoreMap<i64> = (0..20).map(|key| (key, key * key)).collect();
    let squares: Vec<Weight> = map.range(3..6).map(|(_, weight)| weight).collect();

    assert_eq!(squares, vec![9, 16, 25]);
}

#[rstest]
fn test_transient_seeded_from_persistent() {
    let base: ScoreMap<i64> = [(1, 1)].into_iter().collect();
    let mut transient: TransientScoreMap<i64> = base.transient();
    transient.insert(2, 4);
    transient.insert(1, 9);

    let updated = transient.persistent();
    assert_eq!(updated.get(&1), Some(9));
    assert_eq!(updated.get(&2), Some(4));
    assert_eq!(base.get(&1), Some(1));
}
