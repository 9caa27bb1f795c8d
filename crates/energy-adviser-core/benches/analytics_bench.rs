//! Performance benchmarks for the analytics module
//!
//! Every analyzer is a single pass over the readings (plus a sort over at
//! most 24 hour buckets), so all benchmarks should scale linearly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use energy_adviser_core::analytics::{
    analyze_night_consumption, analyze_peak_hours, calculate_summary, calculate_trends,
    detect_outliers, generate_recommendations, Analysis,
};
use energy_adviser_core::{AnalysisReport, Reading, Thresholds};

/// Hourly readings with a daily profile and an occasional spike
fn generate_test_readings(count: usize) -> Vec<Reading> {
    (0..count)
        .map(|i| {
            let day = i / 24 % 28;
            let hour = i % 24;
            let base = match hour {
                0..=5 => 0.3,
                6..=18 => 1.1,
                _ => 1.9,
            };
            let spike = if i % 997 == 0 { 15.0 } else { 0.0 };
            Reading::new(
                Some(format!("2024-02-{:02}T{:02}:00:00Z", day + 1, hour)),
                base + spike,
            )
        })
        .collect()
}

/// Benchmark 1: each analyzer with varying series lengths
fn analyzers_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");

    for count in [24, 720, 8760] {
        let readings = generate_test_readings(count);
        group.bench_with_input(BenchmarkId::new("summary", count), &readings, |b, r| {
            b.iter(|| black_box(calculate_summary(r)));
        });
        group.bench_with_input(BenchmarkId::new("outliers", count), &readings, |b, r| {
            b.iter(|| black_box(detect_outliers(r)));
        });
        group.bench_with_input(BenchmarkId::new("peak_hours", count), &readings, |b, r| {
            b.iter(|| black_box(analyze_peak_hours(r)));
        });
        group.bench_with_input(BenchmarkId::new("night", count), &readings, |b, r| {
            b.iter(|| black_box(analyze_night_consumption(r)));
        });
        group.bench_with_input(BenchmarkId::new("trends", count), &readings, |b, r| {
            b.iter(|| black_box(calculate_trends(r)));
        });
    }

    group.finish();
}

/// Benchmark 2: recommendation rules over a precomputed analysis
fn recommendations_benchmark(c: &mut Criterion) {
    let readings = generate_test_readings(8760);
    let analysis = Analysis::compute(&readings, &Thresholds::default());

    c.bench_function("generate_recommendations", |b| {
        b.iter(|| black_box(generate_recommendations(&analysis)));
    });
}

/// Benchmark 3: full report
fn full_report_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_report");

    for count in [720, 8760] {
        let readings = generate_test_readings(count);
        group.bench_with_input(BenchmarkId::new("readings", count), &readings, |b, r| {
            b.iter(|| black_box(AnalysisReport::compute(r)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    analyzers_benchmark,
    recommendations_benchmark,
    full_report_benchmark
);
criterion_main!(benches);
