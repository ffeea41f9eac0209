//! Remaining-cost estimators.

use crate::error::{NodeRole, PathError};
use vivarium_core::{NodeId, Point2};
use vivarium_space::OccupancyGrid;

/// Estimates the remaining cost from a node to the goal.
///
/// For the search to return optimal paths the estimate must never exceed
/// the true remaining cost, and must be non-negative. Closed nodes are
/// never reopened, so it must also be consistent: `h(a) <= w(a, b) + h(b)`
/// for every edge. Any `Fn(NodeId) -> f64` closure is a heuristic.
pub trait Heuristic {
    /// Estimated cost from `node` to the goal.
    fn estimate(&self, node: NodeId) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(NodeId) -> f64,
{
    fn estimate(&self, node: NodeId) -> f64 {
        self(node)
    }
}

/// Always estimates zero, turning A* into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: NodeId) -> f64 {
        0.0
    }
}

/// Straight-line distance between cell centres on an [`OccupancyGrid`].
///
/// Admissible for graphs built by
/// [`GraphBuilder`](vivarium_space::GraphBuilder) as long as no cell has a
/// cost multiplier below 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EuclideanHeuristic {
    width: u32,
    goal: Point2,
}

impl EuclideanHeuristic {
    /// Heuristic towards `goal` on `grid`.
    ///
    /// Fails if `goal` does not name a cell of the grid.
    pub fn new(grid: &OccupancyGrid, goal: NodeId) -> Result<Self, PathError> {
        let goal_center = grid.cell_center(goal).ok_or(PathError::UnknownNode {
            node: goal,
            role: NodeRole::Destination,
        })?;
        Ok(Self {
            width: grid.width(),
            goal: goal_center,
        })
    }

    /// Centre of the goal cell.
    pub fn goal(&self) -> Point2 {
        self.goal
    }
}

impl Heuristic for EuclideanHeuristic {
    fn estimate(&self, node: NodeId) -> f64 {
        let w = self.width as usize;
        let x = (node.0 % w) as f64 + 0.5;
        let y = (node.0 / w) as f64 + 0.5;
        self.goal.distance_to(x, y)
    }
}
