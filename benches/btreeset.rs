//! Benchmarks for the Standard Library's [`BTreeSet`].

use std::collections::BTreeSet;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut set: BTreeSet<usize> = std::iter::repeat_with(|| rng.random())
                .take(size)
                .collect();

            b.iter(|| {
                set.insert(rng.random());
            });
        });
    }
}

/// Benchmarking removal followed by re-insertion
pub fn erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Erase");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut set: BTreeSet<usize> = (0..size).collect();

            b.iter(|| {
                let value = rng.random_range(0..size);
                black_box(set.remove(&value));
                set.insert(value);
            });
        });
    }
}

/// Benchmarking membership tests
pub fn contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeSet Contains");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let set: BTreeSet<usize> = (0..size).map(|x| 2 * x).collect();
            let probes: Vec<usize> = std::iter::repeat_with(|| rng.random_range(0..2 * size))
                .take(10)
                .collect();

            b.iter(|| {
                for probe in &probes {
                    black_box(set.contains(probe));
                }
            });
        });
    }
}

/// Benchmarking iteration
pub fn iter(c: &mut Criterion) {
    c.bench_function("BTreeSet Iter", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let set: BTreeSet<usize> = std::iter::repeat_with(|| rng.random())
            .take(100_000)
            .collect();

        b.iter(|| {
            for el in &set {
                black_box(el);
            }
        });
    });
}
