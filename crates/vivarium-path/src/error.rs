//! Error types for path queries.

use std::fmt;
use vivarium_core::NodeId;

/// Which endpoint of a query failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// The start node.
    Source,
    /// The goal node.
    Destination,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors from [`AStar::find_path`](crate::AStar::find_path).
///
/// An unreachable destination is not an error; it is reported as `Ok(None)`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The source or destination is not a node of the graph.
    #[error("{role} node {node} is not in the graph")]
    UnknownNode {
        /// The missing node.
        node: NodeId,
        /// Which endpoint it was.
        role: NodeRole,
    },
    /// The search closed `limit` nodes without reaching the destination.
    #[error("search expanded {limit} nodes without reaching the destination")]
    ExpansionLimit {
        /// The configured expansion cap.
        limit: usize,
    },
}
