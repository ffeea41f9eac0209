//! Navigation graph derived from world contents.

use crate::object::SimObject;
use tracing::debug;
use vivarium_space::{CellState, Graph, GraphBuilder, Neighbourhood, OccupancyGrid, SpaceError};

/// Decides how an object affects the cell it stands in.
///
/// `None` means the object does not affect navigation.
pub type CellClassifier = Box<dyn Fn(&dyn SimObject) -> Option<CellState>>;

/// An occupancy grid and its graph, rebuilt wholesale when stale.
pub struct Navigation {
    builder: GraphBuilder,
    classifier: Option<CellClassifier>,
    grid: OccupancyGrid,
    graph: Graph,
    max_expansions: Option<usize>,
    stale: bool,
    rebuilds: u64,
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation")
            .field("builder", &self.builder)
            .field("has_classifier", &self.classifier.is_some())
            .field("nodes", &self.graph.len())
            .field("stale", &self.stale)
            .finish()
    }
}

impl Navigation {
    /// An all-free navigation layer of `cols x rows` cells.
    pub fn new(
        cols: u32,
        rows: u32,
        neighbourhood: Neighbourhood,
        max_expansions: Option<usize>,
    ) -> Result<Self, SpaceError> {
        Ok(Self {
            builder: GraphBuilder::new(neighbourhood),
            classifier: None,
            grid: OccupancyGrid::new(cols, rows)?,
            graph: Graph::new(),
            max_expansions,
            stale: true,
            rebuilds: 0,
        })
    }

    /// Install the classifier and mark the layer stale.
    pub fn set_classifier(&mut self, classifier: CellClassifier) {
        self.classifier = Some(classifier);
        self.stale = true;
    }

    /// Mark the layer stale.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Whether a rebuild is pending.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of rebuilds so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// The occupancy grid as of the last rebuild.
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// The graph as of the last rebuild.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Search budget applied to path queries.
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Reclassify every cell from `objects` and rebuild the graph.
    ///
    /// Walls win over weights; among weights the largest multiplier wins.
    pub fn rebuild<'a>(
        &mut self,
        objects: impl IntoIterator<Item = (&'a dyn SimObject, (i32, i32))>,
    ) -> Result<(), SpaceError> {
        self.grid.clear();
        if let Some(classify) = &self.classifier {
            for (object, (x, y)) in objects {
                let Some(state) = classify(object) else {
                    continue;
                };
                let Some(current) = self.grid.get(x, y) else {
                    continue;
                };
                let merged = match (current, state) {
                    (CellState::Wall, _) | (_, CellState::Wall) => CellState::Wall,
                    (CellState::Weighted(a), CellState::Weighted(b)) => {
                        CellState::Weighted(a.max(b))
                    }
                    (CellState::Free, s) | (s, CellState::Free) => s,
                };
                self.grid.set(x, y, merged)?;
            }
        }
        self.builder.rebuild(&self.grid, &mut self.graph);
        self.stale = false;
        self.rebuilds += 1;
        debug!(rebuilds = self.rebuilds, "navigation layer rebuilt");
        Ok(())
    }
}
