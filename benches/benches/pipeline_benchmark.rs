//! Planning, stitching and aggregation benchmarks.
//!
//! Run with: `cargo bench --package coinbox-bench`

use chrono::Utc;
use coinbox_bench::{echo_chunks, hours_after_start, synthetic_series};
use coinbox_lib::{BucketLayout, aggregate, classify, plan, stitch_chunks};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Range lengths in days.
const RANGES: &[usize] = &[31, 365, 5 * 365];

fn plan_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let Some(from) = hours_after_start(0) else {
        return;
    };

    for &days in RANGES {
        let Some(to) = hours_after_start(days as i64 * 24) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(days), &to, |b, &to| {
            b.iter(|| plan(black_box(from), black_box(to), 2000));
        });
    }
    group.finish();
}

fn stitch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("stitch");
    let Some(from) = hours_after_start(0) else {
        return;
    };

    for &days in RANGES {
        let Some(to) = hours_after_start(days as i64 * 24) else {
            continue;
        };
        let Ok(chunks) = plan(from, to, 2000) else {
            continue;
        };
        let responses = echo_chunks(&chunks);
        group.throughput(Throughput::Elements((days * 24) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &responses, |b, r| {
            b.iter(|| stitch_chunks(black_box(r.clone())));
        });
    }
    group.finish();
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for &days in RANGES {
        let series = synthetic_series(days);
        let layout = BucketLayout::fitted(&series, &Utc, 24);
        group.throughput(Throughput::Elements(series.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(days), &series, |b, s| {
            b.iter(|| {
                let buckets = aggregate(black_box(s), &Utc, &layout);
                buckets.map(|buckets| classify(&buckets))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, plan_benchmark, stitch_benchmark, aggregate_benchmark);
criterion_main!(benches);
