//! Best-first search with explicit open and closed sets.
//!
//! Search nodes live in an arena and are referred to by slot index. Two
//! keys are kept apart:
//!
//! - the **identity key** (graph node id) drives open-set lookup and
//!   closed-set membership;
//! - the **priority key** (`f = g + h`) drives heap ordering.
//!
//! Relaxation pushes a fresh heap entry and repoints the identity index at
//! it; the superseded entry stays in the heap and is discarded when popped.

use crate::error::{NodeRole, PathError};
use crate::heuristic::Heuristic;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;
use vivarium_core::NodeId;
use vivarium_space::WeightedGraph;

/// A route returned by the search.
///
/// `nodes` runs from the first step after the source up to and including
/// the destination; the source itself is omitted. `cost` is the summed edge
/// weight along the route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    /// Steps in travel order, excluding the source.
    pub nodes: Vec<NodeId>,
    /// Total edge weight.
    pub cost: f64,
}

impl Path {
    /// Number of steps.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path has no steps (source equals destination).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first step to take, if any.
    pub fn next_step(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// The final node, if any.
    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

impl IntoIterator for Path {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    node: NodeId,
    g: f64,
    f: f64,
    previous: Option<usize>,
}

impl SearchNode {
    fn identity_key(&self) -> NodeId {
        self.node
    }

    fn priority_key(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.f)
    }
}

/// Heap entry ordered so that the smallest `f` pops first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OpenEntry {
    priority: OrderedFloat<f64>,
    slot: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    best: HashMap<NodeId, usize>,
}

impl OpenSet {
    fn slot_of(&self, node: NodeId) -> Option<usize> {
        self.best.get(&node).copied()
    }

    fn push(&mut self, arena: &[SearchNode], slot: usize) {
        let entry = &arena[slot];
        self.best.insert(entry.identity_key(), slot);
        self.heap.push(OpenEntry {
            priority: entry.priority_key(),
            slot,
        });
    }

    fn pop(&mut self, arena: &[SearchNode]) -> Option<usize> {
        while let Some(OpenEntry { slot, .. }) = self.heap.pop() {
            let node = arena[slot].identity_key();
            if self.best.get(&node) == Some(&slot) {
                self.best.remove(&node);
                return Some(slot);
            }
        }
        None
    }
}

/// A* search over a borrowed graph.
///
/// # Examples
///
/// ```
/// use vivarium_path::{AStar, EuclideanHeuristic};
/// use vivarium_space::{GraphBuilder, Neighbourhood, OccupancyGrid};
///
/// let grid = OccupancyGrid::from_ascii("...\n.#.\n...").unwrap();
/// let graph = GraphBuilder::new(Neighbourhood::VonNeumann).build(&grid);
/// let from = grid.node_id(0, 0).unwrap();
/// let to = grid.node_id(2, 2).unwrap();
/// let h = EuclideanHeuristic::new(&grid, to).unwrap();
///
/// let path = AStar::new(&graph).find_path(from, to, &h).unwrap().unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path.cost, 4.0);
/// ```
#[derive(Debug)]
pub struct AStar<'g, G: WeightedGraph + ?Sized> {
    graph: &'g G,
    max_expansions: Option<usize>,
}

impl<'g, G: WeightedGraph + ?Sized> Clone for AStar<'g, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'g, G: WeightedGraph + ?Sized> Copy for AStar<'g, G> {}

impl<'g, G: WeightedGraph + ?Sized> AStar<'g, G> {
    /// Unbounded search over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_expansions: None,
        }
    }

    /// Cap the number of nodes the search may close.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// The expansion cap, if any.
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Cheapest path from `source` to `dest`.
    ///
    /// Returns `Ok(None)` when the open set empties without reaching `dest`.
    /// Closed nodes are never reopened, so optimality relies on a
    /// consistent heuristic.
    ///
    /// # Errors
    ///
    /// [`PathError::UnknownNode`] if either endpoint is absent from the
    /// graph; [`PathError::ExpansionLimit`] if the cap is reached first.
    pub fn find_path<H>(
        &self,
        source: NodeId,
        dest: NodeId,
        heuristic: &H,
    ) -> Result<Option<Path>, PathError>
    where
        H: Heuristic + ?Sized,
    {
        if !self.graph.contains(source) {
            return Err(PathError::UnknownNode {
                node: source,
                role: NodeRole::Source,
            });
        }
        if !self.graph.contains(dest) {
            return Err(PathError::UnknownNode {
                node: dest,
                role: NodeRole::Destination,
            });
        }
        if source == dest {
            return Ok(Some(Path::default()));
        }

        let mut arena = vec![SearchNode {
            node: source,
            g: 0.0,
            f: heuristic.estimate(source),
            previous: None,
        }];
        let mut open = OpenSet::default();
        let mut closed: HashSet<NodeId> = HashSet::new();
        open.push(&arena, 0);

        while let Some(slot) = open.pop(&arena) {
            let current = arena[slot];
            if current.identity_key() == dest {
                let path = reconstruct(&arena, slot);
                debug!(
                    %source,
                    %dest,
                    steps = path.len(),
                    cost = path.cost,
                    expanded = closed.len(),
                    "path found"
                );
                return Ok(Some(path));
            }
            if let Some(limit) = self.max_expansions {
                if closed.len() >= limit {
                    debug!(%source, %dest, limit, "expansion limit reached");
                    return Err(PathError::ExpansionLimit { limit });
                }
            }
            closed.insert(current.node);

            for edge in self.graph.connections(current.node) {
                if closed.contains(&edge.to) {
                    continue;
                }
                let g = current.g + edge.weight;
                let f = g + heuristic.estimate(edge.to);
                let improves = match open.slot_of(edge.to) {
                    Some(existing) => OrderedFloat(f) < arena[existing].priority_key(),
                    None => true,
                };
                if improves {
                    arena.push(SearchNode {
                        node: edge.to,
                        g,
                        f,
                        previous: Some(slot),
                    });
                    open.push(&arena, arena.len() - 1);
                }
            }
        }

        debug!(%source, %dest, expanded = closed.len(), "no path");
        Ok(None)
    }
}

/// Walk back-pointers from `goal` and return the route in travel order.
fn reconstruct(arena: &[SearchNode], goal: usize) -> Path {
    let cost = arena[goal].g;
    let mut nodes = Vec::new();
    let mut cursor = Some(goal);
    while let Some(slot) = cursor {
        let entry = &arena[slot];
        if entry.previous.is_none() {
            break;
        }
        nodes.push(entry.node);
        cursor = entry.previous;
    }
    nodes.reverse();
    Path { nodes, cost }
}

/// Shorthand for `AStar::new(graph).find_path(source, dest, heuristic)`.
pub fn find_path<G, H>(
    graph: &G,
    source: NodeId,
    dest: NodeId,
    heuristic: &H,
) -> Result<Option<Path>, PathError>
where
    G: WeightedGraph + ?Sized,
    H: Heuristic + ?Sized,
{
    AStar::new(graph).find_path(source, dest, heuristic)
}
