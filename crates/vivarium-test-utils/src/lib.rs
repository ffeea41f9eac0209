//! Test utilities for Vivarium development.
//!
//! - [`dijkstra_cost`]: brute-force shortest path cost, the oracle for A*.
//! - [`grid_from_codes`]: compact grid construction for property tests.
//! - [`fixtures`]: scripted agents, probe perceptions and a recording
//!   renderer that log what the world did, in order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use vivarium_core::NodeId;
use vivarium_engine::{Topology, WorldConfig};
use vivarium_space::{CellState, EdgeBehavior, Graph, OccupancyGrid, WeightedGraph};

/// Cheapest cost from `source` to `dest`, or `None` if unreachable.
///
/// Plain O(V²) Dijkstra with no heap and no heuristic.
pub fn dijkstra_cost(graph: &Graph, source: NodeId, dest: NodeId) -> Option<f64> {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let index = |n: NodeId| nodes.iter().position(|m| *m == n);
    let mut dist = vec![f64::INFINITY; nodes.len()];
    let mut done = vec![false; nodes.len()];
    dist[index(source)?] = 0.0;
    loop {
        let next = (0..nodes.len())
            .filter(|&i| !done[i] && dist[i].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]));
        let Some(u) = next else {
            break;
        };
        done[u] = true;
        for edge in graph.connections(nodes[u]) {
            if let Some(v) = index(edge.to) {
                let candidate = dist[u] + edge.weight;
                if candidate < dist[v] {
                    dist[v] = candidate;
                }
            }
        }
    }
    let d = dist[index(dest)?];
    d.is_finite().then_some(d)
}

/// Build a grid `width` cells wide from per-cell codes in row-major order.
///
/// `0` free, `1` wall, any other `n` weighted with multiplier `n`.
///
/// # Panics
///
/// Panics if `codes` is empty or not a multiple of `width`.
pub fn grid_from_codes(width: u32, codes: &[u8]) -> OccupancyGrid {
    let height = codes.len() as u32 / width;
    assert_eq!(codes.len() as u32, width * height, "ragged code list");
    let mut grid = OccupancyGrid::new(width, height).expect("non-empty grid");
    for (i, code) in codes.iter().enumerate() {
        let state = match code {
            0 => CellState::Free,
            1 => CellState::Wall,
            n => CellState::Weighted(f64::from(*n)),
        };
        let (x, y) = ((i as u32 % width) as i32, (i as u32 / width) as i32);
        grid.set(x, y, state).expect("in-bounds cell");
    }
    grid
}

/// A closed continuous world of the given size.
pub fn continuous_config(width: f64, height: f64) -> WorldConfig {
    WorldConfig {
        topology: Topology::Continuous { width, height },
        ..WorldConfig::default()
    }
}

/// A grid world with unit cell size.
pub fn grid_config(cols: u32, rows: u32, edge: EdgeBehavior) -> WorldConfig {
    WorldConfig {
        topology: Topology::Grid {
            cols,
            rows,
            cell_size: 1.0,
            edge,
        },
        ..WorldConfig::default()
    }
}
