//! Outlier classification benchmarks
//!
//! Measures both detection methods over synthetic elapsed-time series of
//! increasing size to catch algorithmic regressions (quantiles dominate at
//! O(n log n), z-score at O(n)).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use demora::{detect_outliers_iqr, detect_outliers_zscore, ElapsedSeries};

/// Synthetic series: clustered durations with sparse extremes and missing rows
fn synthetic_series(n: usize) -> (ElapsedSeries, Vec<String>) {
    let values: Vec<Option<f64>> = (0..n)
        .map(|i| match i % 97 {
            0 => None,
            1 => Some(40.0 + (i % 7) as f64),
            _ => Some(2.0 + (i % 13) as f64 * 0.01),
        })
        .collect();
    let ids = (0..n).map(|i| format!("{:06}", i)).collect();
    (ElapsedSeries::new(values), ids)
}

fn bench_iqr(c: &mut Criterion) {
    let mut group = c.benchmark_group("iqr");
    for n in [100, 1_000, 10_000] {
        let (series, ids) = synthetic_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let report =
                    detect_outliers_iqr(black_box(&series), black_box(&ids), 0.5).unwrap();
                black_box(report);
            });
        });
    }
    group.finish();
}

fn bench_zscore(c: &mut Criterion) {
    let mut group = c.benchmark_group("zscore");
    for n in [100, 1_000, 10_000] {
        let (series, ids) = synthetic_series(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let report =
                    detect_outliers_zscore(black_box(&series), black_box(&ids), 2.0).unwrap();
                black_box(report);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_iqr, bench_zscore);
criterion_main!(benches);
