//! Criterion micro-benchmarks for A* search.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vivarium_bench::maze_grid;
use vivarium_path::{AStar, EuclideanHeuristic, ZeroHeuristic};
use vivarium_space::{GraphBuilder, Neighbourhood};

/// Benchmark: corner-to-corner search on a 100x100 Moore maze.
fn bench_astar_corner_to_corner(c: &mut Criterion) {
    let grid = maze_grid(100, 42);
    let graph = GraphBuilder::new(Neighbourhood::Moore).build(&grid);
    let source = grid.node_id(0, 0).unwrap();
    let dest = grid.node_id(99, 99).unwrap();
    let heuristic = EuclideanHeuristic::new(&grid, dest).unwrap();
    let search = AStar::new(&graph);

    c.bench_function("astar_euclidean_100x100", |b| {
        b.iter(|| black_box(search.find_path(source, dest, &heuristic).unwrap()));
    });

    // Same search with no guidance: Dijkstra order.
    c.bench_function("astar_zero_heuristic_100x100", |b| {
        b.iter(|| black_box(search.find_path(source, dest, &ZeroHeuristic).unwrap()));
    });
}

criterion_group!(benches, bench_astar_corner_to_corner);
criterion_main!(benches);
