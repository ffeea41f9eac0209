//! Criterion micro-benchmarks for influence field maintenance.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vivarium_bench::light_field;

/// Benchmark: full recompute of a 100x100-sector field with 10 lights.
fn bench_recompute_10k_sectors(c: &mut Criterion) {
    let mut field = light_field(500.0, 5.0, 10, 42);

    c.bench_function("recompute_10k_sectors_10_sources", |b| {
        b.iter(|| {
            field.recompute();
            black_box(field.sample(250.0, 250.0));
        });
    });
}

/// Benchmark: sampling a clean field, the per-sensor cost each tick.
fn bench_sample_clean(c: &mut Criterion) {
    let mut field = light_field(500.0, 5.0, 10, 42);
    field.refresh();

    c.bench_function("sample_1k_points", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..1000 {
                let t = f64::from(i) * 0.499;
                total += field.sample(t, 499.0 - t);
            }
            black_box(total)
        });
    });
}

criterion_group!(benches, bench_recompute_10k_sectors, bench_sample_clean);
criterion_main!(benches);
