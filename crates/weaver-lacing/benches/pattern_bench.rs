//! Benchmarks for Wheel Weaver lacing
//!
//! Measures performance of:
//! - Request validation
//! - Full pattern generation across hole counts
//! - Valve-seam resolution on hole counts that do not tile evenly

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use weaver_lacing::{compute_pattern, BuildParameters, PatternRequest, SUPPORTED_HOLE_COUNTS};

fn request(holes: i64, crosses: i64) -> PatternRequest {
    PatternRequest {
        holes,
        crosses,
        ..PatternRequest::default()
    }
}

/// Benchmark validating a raw request
fn bench_validate(c: &mut Criterion) {
    let req = PatternRequest::default();
    c.bench_function("validate_request", |b| {
        b.iter(|| BuildParameters::new(black_box(&req)))
    });
}

/// Benchmark generating the table for each supported hole count
fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_pattern");

    for holes in SUPPORTED_HOLE_COUNTS {
        let params = BuildParameters::new(&request(i64::from(holes), 3)).unwrap();
        group.throughput(Throughput::Elements(u64::from(holes)));
        group.bench_with_input(BenchmarkId::from_parameter(holes), &params, |b, p| {
            b.iter(|| compute_pattern(black_box(p)))
        });
    }
    group.finish();
}

/// Benchmark hole counts with an odd number of holes per flange
fn bench_seam(c: &mut Criterion) {
    let mut group = c.benchmark_group("seam_resolution");

    for holes in [22i64, 46, 118] {
        let params = BuildParameters::new(&request(holes, 2)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(holes), &params, |b, p| {
            b.iter(|| compute_pattern(black_box(p)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate, bench_compute, bench_seam);
criterion_main!(benches);
