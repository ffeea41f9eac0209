//! Criterion micro-benchmarks for grid-to-graph construction.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vivarium_bench::maze_grid;
use vivarium_space::{GraphBuilder, Neighbourhood};

/// Benchmark: build a fresh von Neumann graph from a 100x100 maze.
fn bench_build_von_neumann_10k(c: &mut Criterion) {
    let grid = maze_grid(100, 42);
    let builder = GraphBuilder::new(Neighbourhood::VonNeumann);

    c.bench_function("build_von_neumann_10k", |b| {
        b.iter(|| black_box(builder.build(&grid)));
    });
}

/// Benchmark: rebuild a Moore graph in place, reusing its storage.
fn bench_rebuild_moore_10k(c: &mut Criterion) {
    let grid = maze_grid(100, 42);
    let builder = GraphBuilder::new(Neighbourhood::Moore);
    let mut graph = builder.build(&grid);

    c.bench_function("rebuild_moore_10k", |b| {
        b.iter(|| {
            builder.rebuild(&grid, &mut graph);
            black_box(graph.edge_count());
        });
    });
}

criterion_group!(benches, bench_build_von_neumann_10k, bench_rebuild_moore_10k);
criterion_main!(benches);
