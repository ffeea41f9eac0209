//! Occupancy grid to navigation graph conversion.

use crate::graph::{Edge, Graph};
use crate::grid::OccupancyGrid;
use crate::neighbourhood::Neighbourhood;
use smallvec::SmallVec;
use tracing::debug;

/// Builds a [`Graph`] from an [`OccupancyGrid`].
///
/// For every non-wall cell and every in-bounds neighbour offset, the edge
/// weight is the Euclidean distance between the two cell centres scaled by
/// the neighbour's cost multiplier. Walls produce no node, and no edge ever
/// points into a wall. Cost is `O(W * H * |pattern|)`.
///
/// # Examples
///
/// ```
/// use vivarium_space::{GraphBuilder, Neighbourhood, OccupancyGrid, WeightedGraph};
///
/// let grid = OccupancyGrid::new(3, 3).unwrap();
/// let graph = GraphBuilder::new(Neighbourhood::VonNeumann).build(&grid);
/// let center = grid.node_id(1, 1).unwrap();
/// assert_eq!(graph.connections(center).len(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphBuilder {
    neighbourhood: Neighbourhood,
}

impl GraphBuilder {
    /// A builder using the given neighbourhood pattern.
    pub fn new(neighbourhood: Neighbourhood) -> Self {
        Self { neighbourhood }
    }

    /// The neighbourhood pattern in use.
    pub fn neighbourhood(&self) -> Neighbourhood {
        self.neighbourhood
    }

    /// Build a fresh graph for `grid`.
    pub fn build(&self, grid: &OccupancyGrid) -> Graph {
        let mut graph = Graph::new();
        self.rebuild(grid, &mut graph);
        graph
    }

    /// Replace the contents of `graph` with the graph for `grid`.
    ///
    /// Prior nodes and edges are discarded; nothing from an earlier build
    /// survives.
    pub fn rebuild(&self, grid: &OccupancyGrid, graph: &mut Graph) {
        graph.clear();
        for ((x, y), state) in grid.iter() {
            if state.is_wall() {
                continue;
            }
            let mut edges: SmallVec<[Edge; 8]> = SmallVec::new();
            for (nx, ny) in grid.neighbours(x, y, self.neighbourhood) {
                let Some(multiplier) = grid.get(nx, ny).and_then(|s| s.multiplier()) else {
                    continue;
                };
                let dx = f64::from(nx - x);
                let dy = f64::from(ny - y);
                let weight = (dx * dx + dy * dy).sqrt() * multiplier;
                if let Some(to) = grid.node_id(nx, ny) {
                    edges.push(Edge::new(to, weight));
                }
            }
            if let Some(node) = grid.node_id(x, y) {
                graph.add_node(node, edges);
            }
        }
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            neighbourhood = ?self.neighbourhood,
            "rebuilt navigation graph"
        );
    }
}
