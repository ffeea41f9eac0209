//! Criterion benchmarks for whole-world ticks.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vivarium_bench::{vehicle_world, wanderer_world};

/// Benchmark: one tick of 50 vehicles sensing 10 lights.
fn bench_vehicle_tick(c: &mut Criterion) {
    let mut world = vehicle_world(50, 10, 42);

    c.bench_function("tick_50_vehicles_10_lights", |b| {
        b.iter(|| black_box(world.tick(0.02).unwrap()));
    });
}

/// Benchmark: ten ticks of 20 wanderers on a 50x50 maze, including
/// planning and the graph rebuilds their movement triggers.
fn bench_wanderer_ticks(c: &mut Criterion) {
    c.bench_function("ten_ticks_20_wanderers_50x50", |b| {
        b.iter_batched(
            || wanderer_world(50, 20, 42).0,
            |mut world| {
                for _ in 0..10 {
                    black_box(world.tick(0.1).unwrap());
                }
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_vehicle_tick, bench_wanderer_ticks);
criterion_main!(benches);
