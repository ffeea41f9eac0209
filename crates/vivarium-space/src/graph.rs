//! Weighted adjacency graph and the [`WeightedGraph`] search interface.

use indexmap::IndexMap;
use smallvec::SmallVec;
use vivarium_core::NodeId;

/// A directed, weighted connection to a neighbouring node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Destination node.
    pub to: NodeId,
    /// Traversal cost; always finite and strictly positive.
    pub weight: f64,
}

impl Edge {
    /// Create an edge to `to` with the given weight.
    pub fn new(to: NodeId, weight: f64) -> Self {
        Self { to, weight }
    }
}

/// Read access to a weighted graph, as needed by best-first search.
///
/// Implemented by [`Graph`]; user graphs can implement it to plug into
/// the pathfinder directly.
pub trait WeightedGraph {
    /// Whether `node` is present in the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Outgoing edges of `node`, in insertion order. Empty for absent nodes.
    fn connections(&self, node: NodeId) -> &[Edge];
}

/// Adjacency lists keyed by node id.
///
/// Insertion order of nodes is preserved, so iteration is deterministic.
/// Edges with non-positive or non-finite weight are never stored: a
/// blocked connection is represented by omission, not by a zero weight.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adjacency: IndexMap<NodeId, SmallVec<[Edge; 8]>>,
}

impl Graph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` with the given connections, replacing any previous list.
    pub fn add_node(&mut self, node: NodeId, connections: impl IntoIterator<Item = Edge>) {
        let edges = connections
            .into_iter()
            .filter(|e| e.weight.is_finite() && e.weight > 0.0)
            .collect();
        self.adjacency.insert(node, edges);
    }

    /// Remove every node and edge.
    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(SmallVec::len).sum()
    }

    /// Node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// `(node, edges)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[Edge])> + '_ {
        self.adjacency.iter().map(|(n, e)| (*n, e.as_slice()))
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.connections(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.weight)
    }
}

impl WeightedGraph for Graph {
    fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn connections(&self, node: NodeId) -> &[Edge] {
        self.adjacency
            .get(&node)
            .map(SmallVec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_drops_blocked_edges() {
        let mut g = Graph::new();
        g.add_node(
            NodeId(0),
            [
                Edge::new(NodeId(1), 1.0),
                Edge::new(NodeId(2), 0.0),
                Edge::new(NodeId(3), -2.0),
                Edge::new(NodeId(4), f64::INFINITY),
            ],
        );
        assert_eq!(g.connections(NodeId(0)), &[Edge::new(NodeId(1), 1.0)]);
    }

    #[test]
    fn add_node_replaces_previous_list() {
        let mut g = Graph::new();
        g.add_node(NodeId(0), [Edge::new(NodeId(1), 1.0)]);
        g.add_node(NodeId(0), [Edge::new(NodeId(2), 2.0)]);
        assert_eq!(g.len(), 1);
        assert_eq!(g.weight(NodeId(0), NodeId(1)), None);
        assert_eq!(g.weight(NodeId(0), NodeId(2)), Some(2.0));
    }

    #[test]
    fn absent_node_has_no_connections() {
        let g = Graph::new();
        assert!(!g.contains(NodeId(5)));
        assert!(g.connections(NodeId(5)).is_empty());
    }

    #[test]
    fn node_with_no_edges_is_still_present() {
        let mut g = Graph::new();
        g.add_node(NodeId(9), []);
        assert!(g.contains(NodeId(9)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn nodes_keep_insertion_order() {
        let mut g = Graph::new();
        for id in [4, 1, 3] {
            g.add_node(NodeId(id), []);
        }
        let order: Vec<_> = g.nodes().collect();
        assert_eq!(order, vec![NodeId(4), NodeId(1), NodeId(3)]);
        g.clear();
        assert!(g.is_empty());
    }
}
