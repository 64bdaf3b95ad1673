//! Adaptive engine vs sorted-merge baseline on skewed operands.
//!
//! A small flat set is intersected with, and subtracted from, a large set.
//! The small set's keys are either packed at the start of the large set's
//! range, packed at its end, or spread evenly across it.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use skewset::algebra::{MergeAlgebra, SetAlgebra, SortedMerge};
use skewset::set::{Collection, FlatSet, Operand, TreeSet};
use std::hint::black_box;

const SMALL_SET_SIZE: i64 = 30;
const BIG_SET_SIZE: i64 = 1_000_000;

fn small_sets() -> [(&'static str, FlatSet<i64>); 3] {
    [
        ("heavy_start", (0..SMALL_SET_SIZE).collect()),
        (
            "heavy_end",
            (BIG_SET_SIZE - SMALL_SET_SIZE..BIG_SET_SIZE).collect(),
        ),
        (
            "even_distribution",
            (0..BIG_SET_SIZE)
                .step_by((BIG_SET_SIZE / SMALL_SET_SIZE) as usize)
                .collect(),
        ),
    ]
}

fn big_sets() -> [(&'static str, Collection<i64>); 2] {
    [
        (
            "tree",
            Collection::Tree((0..BIG_SET_SIZE).collect::<TreeSet<i64>>()),
        ),
        (
            "flat",
            Collection::Flat(FlatSet::from_sorted_iter(0..BIG_SET_SIZE)),
        ),
    ]
}

fn benchmark_intersection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("intersection_small_vs_big");
    let algebra = SetAlgebra::new();

    for (big_name, big) in big_sets() {
        for (small_name, small) in small_sets() {
            let label = format!("{small_name}/{big_name}");
            let (left, right) = (Some(Operand::from(&small)), Some(big.operand()));

            group.bench_with_input(BenchmarkId::new("adaptive", &label), &label, |bencher, _| {
                bencher.iter(|| black_box(algebra.intersection(black_box(left), black_box(right))));
            });
            group.bench_with_input(BenchmarkId::new("merge", &label), &label, |bencher, _| {
                bencher.iter(|| black_box(SortedMerge.intersection(black_box(left), black_box(right))));
            });
        }
    }

    group.finish();
}

fn benchmark_difference(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("difference_small_minus_big");
    let algebra = SetAlgebra::new();

    for (big_name, big) in big_sets() {
        for (small_name, small) in small_sets() {
            let label = format!("{small_name}/{big_name}");
            let (left, right) = (Some(Operand::from(&small)), Some(big.operand()));

            group.bench_with_input(BenchmarkId::new("adaptive", &label), &label, |bencher, _| {
                bencher.iter(|| black_box(algebra.difference(black_box(left), black_box(right))));
            });
            group.bench_with_input(BenchmarkId::new("merge", &label), &label, |bencher, _| {
                bencher.iter(|| black_box(SortedMerge.difference(black_box(left), black_box(right))));
            });
        }
    }

    group.finish();
}

fn benchmark_balanced_operands(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("intersection_balanced");
    let algebra = SetAlgebra::new();

    for size in [SMALL_SET_SIZE, BIG_SET_SIZE / 10] {
        let left_tree: TreeSet<i64> = (0..size).collect();
        let right_tree: TreeSet<i64> = (0..size).collect();
        let left_flat: FlatSet<i64> = (0..size).collect();
        let right_flat: FlatSet<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("tree_sets", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(algebra.intersection(
                    Some(Operand::from(&left_tree)),
                    Some(Operand::from(&right_tree)),
                ))
            });
        });
        group.bench_with_input(BenchmarkId::new("flat_sets", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(algebra.intersection(
                    Some(Operand::from(&left_flat)),
                    Some(Operand::from(&right_flat)),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_intersection,
    benchmark_difference,
    benchmark_balanced_operands
);
criterion_main!(benches);
