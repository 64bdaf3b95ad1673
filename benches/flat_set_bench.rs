//! FlatSet and TreeSet construction and membership benchmarks.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use skewset::set::{FlatSet, TransientFlatSet, TreeSet};
use std::hint::black_box;

const SIZES: [i64; 4] = [100, 1_000, 10_000, 100_000];

fn batch_size_for(size: i64) -> BatchSize {
    if size < 1_000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_construction");

    for size in SIZES {
        let sorted: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("flat_from_sorted_vec", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || sorted.clone(),
                |keys| black_box(FlatSet::from_sorted_vec(black_box(keys))),
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("flat_transient_append", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || sorted.clone(),
                |keys| {
                    let mut transient = TransientFlatSet::with_capacity(keys.len());
                    transient.extend(keys);
                    black_box(transient.persistent())
                },
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("tree_from_sorted_vec", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || sorted.clone(),
                |keys| black_box(TreeSet::from_sorted_vec(black_box(keys))),
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_membership(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_membership");

    for size in SIZES {
        let flat: FlatSet<i64> = (0..size).collect();
        let tree: TreeSet<i64> = (0..size).collect();
        let probes: Vec<i64> = (0..size).step_by(7).collect();

        group.bench_with_input(BenchmarkId::new("flat_contains", size), &size, |bencher, _| {
            bencher.iter(|| probes.iter().filter(|key| flat.contains(black_box(key))).count());
        });
        group.bench_with_input(BenchmarkId::new("tree_contains", size), &size, |bencher, _| {
            bencher.iter(|| probes.iter().filter(|key| tree.contains(black_box(key))).count());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_construction, benchmark_membership);
criterion_main!(benches);
