//! Neighbourhood patterns for grid connectivity.

use serde::{Deserialize, Serialize};

/// Cardinal offsets as `(dx, dy)`: W, E, S, N.
const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// All 8 offsets as `(dx, dy)`, row by row.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Which cells count as adjacent on a square grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighbourhood {
    /// 4-connected: the cells sharing an edge.
    #[default]
    VonNeumann,
    /// 8-connected: the cells sharing an edge or a corner.
    Moore,
}

impl Neighbourhood {
    /// The `(dx, dy)` offsets of this pattern.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::VonNeumann => &OFFSETS_4,
            Self::Moore => &OFFSETS_8,
        }
    }

    /// Maximum number of neighbours a cell can have.
    pub fn degree(self) -> usize {
        self.offsets().len()
    }
}
