//! World shapes and their boundary policies.

use crate::body::Body;
use crate::object::Bounds;
use serde::{Deserialize, Serialize};
use vivarium_space::EdgeBehavior;

/// The extent objects live in.
///
/// A continuous world is closed: positions are clamped into
/// `[0, width] x [0, height]`. A grid world measures positions in cells,
/// so an object at `(2.0, 3.0)` sits in column 2, row 3; positions are
/// confined to `[0, cols - 1] x [0, rows - 1]` by clamping, or wrapped
/// modulo `cols`/`rows` when the edge behaviour is
/// [`EdgeBehavior::Wrap`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Topology {
    /// Continuous closed plane.
    Continuous {
        /// Extent in x.
        width: f64,
        /// Extent in y.
        height: f64,
    },
    /// Cell grid, optionally toroidal.
    Grid {
        /// Number of columns.
        cols: u32,
        /// Number of rows.
        rows: u32,
        /// Display size of one cell.
        cell_size: f64,
        /// Clamp or wrap at the edges.
        #[serde(default)]
        edge: EdgeBehavior,
    },
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Continuous {
            width: 500.0,
            height: 500.0,
        }
    }
}

impl Topology {
    /// Whether this is a grid world.
    pub fn is_grid(&self) -> bool {
        matches!(self, Topology::Grid { .. })
    }

    /// Valid position range after boundary enforcement.
    pub fn bounds(&self) -> Bounds {
        match *self {
            Topology::Continuous { width, height } => Bounds::new(width, height),
            Topology::Grid { cols, rows, .. } => {
                Bounds::new(f64::from(cols) - 1.0, f64::from(rows) - 1.0)
            }
        }
    }

    /// Extent covered by an influence field, in position units.
    pub fn extent(&self) -> (f64, f64) {
        match *self {
            Topology::Continuous { width, height } => (width, height),
            Topology::Grid { cols, rows, .. } => (f64::from(cols), f64::from(rows)),
        }
    }

    /// Display units per position unit.
    pub fn display_scale(&self) -> f64 {
        match *self {
            Topology::Continuous { .. } => 1.0,
            Topology::Grid { cell_size, .. } => cell_size,
        }
    }

    /// Bring `body` back inside the world, each axis independently.
    pub fn enforce(&self, body: &mut Body) {
        let (x, y) = (body.x(), body.y());
        let (nx, ny) = match *self {
            Topology::Continuous { width, height } => (
                EdgeBehavior::Clamp.resolve(x, 0.0, width, width),
                EdgeBehavior::Clamp.resolve(y, 0.0, height, height),
            ),
            Topology::Grid {
                cols, rows, edge, ..
            } => {
                let (w, h) = (f64::from(cols), f64::from(rows));
                (
                    edge.resolve(x, 0.0, w - 1.0, w),
                    edge.resolve(y, 0.0, h - 1.0, h),
                )
            }
        };
        if nx != x || ny != y {
            body.move_to(nx, ny);
        }
    }

    /// Grid cell containing a position, or `None` in a continuous world.
    pub fn cell_of(&self, x: f64, y: f64) -> Option<(i32, i32)> {
        match *self {
            Topology::Continuous { .. } => None,
            Topology::Grid { .. } => Some((x.floor() as i32, y.floor() as i32)),
        }
    }

    /// Grid cell under a display-space point, or `None` in a continuous
    /// world.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<(i32, i32)> {
        match *self {
            Topology::Continuous { .. } => None,
            Topology::Grid { cell_size, .. } => Some((
                (px / cell_size).floor() as i32,
                (py / cell_size).floor() as i32,
            )),
        }
    }

    /// Column and row counts of a grid world.
    pub fn grid_size(&self) -> Option<(u32, u32)> {
        match *self {
            Topology::Continuous { .. } => None,
            Topology::Grid { cols, rows, .. } => Some((cols, rows)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(edge: EdgeBehavior) -> Topology {
        Topology::Grid {
            cols: 10,
            rows: 8,
            cell_size: 20.0,
            edge,
        }
    }

    #[test]
    fn continuous_world_clamps_to_width() {
        let t = Topology::Continuous {
            width: 100.0,
            height: 50.0,
        };
        let mut b = Body::new(105.0, 20.0);
        t.enforce(&mut b);
        assert_eq!((b.x(), b.y()), (100.0, 20.0));
        let mut b = Body::new(-3.0, 60.0);
        t.enforce(&mut b);
        assert_eq!((b.x(), b.y()), (0.0, 50.0));
    }

    #[test]
    fn toroidal_grid_wraps() {
        let t = grid(EdgeBehavior::Wrap);
        let mut b = Body::new(15.0, -1.0);
        t.enforce(&mut b);
        assert_eq!((b.x(), b.y()), (5.0, 7.0));
    }

    #[test]
    fn closed_grid_clamps_to_last_cell() {
        let t = grid(EdgeBehavior::Clamp);
        let mut b = Body::new(15.0, -1.0);
        t.enforce(&mut b);
        assert_eq!((b.x(), b.y()), (9.0, 0.0));
    }

    #[test]
    fn cell_lookups() {
        let t = grid(EdgeBehavior::Clamp);
        assert_eq!(t.cell_of(3.7, 2.0), Some((3, 2)));
        assert_eq!(t.cell_at(45.0, 19.9), Some((2, 0)));
        assert_eq!(t.bounds(), Bounds::new(9.0, 7.0));
        assert_eq!(Topology::default().cell_of(1.0, 1.0), None);
    }

    #[test]
    fn topology_from_toml() {
        let t: Topology =
            toml::from_str("kind = \"grid\"\ncols = 4\nrows = 3\ncell_size = 10.0\nedge = \"wrap\"")
                .unwrap();
        assert_eq!(
            t,
            Topology::Grid {
                cols: 4,
                rows: 3,
                cell_size: 10.0,
                edge: EdgeBehavior::Wrap,
            }
        );
    }
}
