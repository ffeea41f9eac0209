//! Occupancy grid: the cell-state layer the graph builder reads.

use crate::error::SpaceError;
use crate::neighbourhood::Neighbourhood;
use vivarium_core::{NodeId, Point2};

/// Traversal state of one grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CellState {
    /// Traversable at base cost.
    #[default]
    Free,
    /// Never traversable; produces no graph node.
    Wall,
    /// Traversable; entering the cell costs `distance * multiplier`.
    Weighted(f64),
}

impl CellState {
    /// A weighted cell, validating the multiplier.
    pub fn weighted(multiplier: f64) -> Result<Self, SpaceError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(SpaceError::InvalidCost { cost: multiplier });
        }
        Ok(Self::Weighted(multiplier))
    }

    /// Whether this cell blocks movement.
    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Cost multiplier applied to edges entering this cell, or `None` for walls.
    pub fn multiplier(self) -> Option<f64> {
        match self {
            Self::Free => Some(1.0),
            Self::Wall => None,
            Self::Weighted(m) => Some(m),
        }
    }
}

/// A `width x height` grid of [`CellState`]s, stored row-major.
///
/// Cell `(x, y)` has node id `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
}

impl OccupancyGrid {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create an all-free grid.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Free; width as usize * height as usize],
        })
    }

    /// Parse a grid from an ASCII map, one text line per row starting at `y = 0`.
    ///
    /// `.` is free, `#` is a wall, and a digit `1..=9` is a weighted cell
    /// whose multiplier is the digit. Leading and trailing blank lines are
    /// ignored; all rows must have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// use vivarium_space::{CellState, OccupancyGrid};
    ///
    /// let grid = OccupancyGrid::from_ascii(".#.\n...\n.3.").unwrap();
    /// assert_eq!(grid.get(1, 0), Some(CellState::Wall));
    /// assert_eq!(grid.get(1, 2), Some(CellState::Weighted(3.0)));
    /// ```
    pub fn from_ascii(map: &str) -> Result<Self, SpaceError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => return Err(SpaceError::EmptyGrid),
        };
        let width = rows[0].chars().count();
        let mut grid = Self::new(width as u32, rows.len() as u32)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(SpaceError::InvalidMap {
                    reason: format!("row {y} has {} cells, expected {width}", row.chars().count()),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let state = match ch {
                    '.' => CellState::Free,
                    '#' => CellState::Wall,
                    '1'..='9' => CellState::Weighted(f64::from(ch as u8 - b'0')),
                    other => {
                        return Err(SpaceError::InvalidMap {
                            reason: format!("unexpected character {other:?} at ({x}, {y})"),
                        })
                    }
                };
                grid.cells[y * width + x] = state;
            }
        }
        Ok(grid)
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// State of cell `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite the state of cell `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, state: CellState) -> Result<(), SpaceError> {
        if let CellState::Weighted(m) = state {
            CellState::weighted(m)?;
        }
        let i = self.index(x, y).ok_or(SpaceError::CellOutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.cells[i] = state;
        Ok(())
    }

    /// Reset every cell to [`CellState::Free`].
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Free);
    }

    /// Node id of cell `(x, y)`, or `None` if out of bounds.
    pub fn node_id(&self, x: i32, y: i32) -> Option<NodeId> {
        self.index(x, y).map(NodeId)
    }

    /// Cell coordinate of a node id, or `None` if the id is outside the grid.
    pub fn location(&self, node: NodeId) -> Option<(i32, i32)> {
        if node.0 >= self.cells.len() {
            return None;
        }
        let w = self.width as usize;
        Some(((node.0 % w) as i32, (node.0 / w) as i32))
    }

    /// Centre of a node's cell, in cell units.
    pub fn cell_center(&self, node: NodeId) -> Option<Point2> {
        self.location(node)
            .map(|(x, y)| Point2::new(f64::from(x) + 0.5, f64::from(y) + 0.5))
    }

    /// In-bounds neighbours of `(x, y)` under `neighbourhood`.
    pub fn neighbours(
        &self,
        x: i32,
        y: i32,
        neighbourhood: Neighbourhood,
    ) -> impl Iterator<Item = (i32, i32)> + '_ {
        neighbourhood
            .offsets()
            .iter()
            .map(move |&(dx, dy)| (x + dx, y + dy))
            .filter(move |&(nx, ny)| self.in_bounds(nx, ny))
    }

    /// Iterate over `((x, y), state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), CellState)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &s)| (((i % w) as i32, (i / w) as i32), s))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_empty() {
        assert_eq!(OccupancyGrid::new(0, 3), Err(SpaceError::EmptyGrid));
        assert_eq!(OccupancyGrid::new(3, 0), Err(SpaceError::EmptyGrid));
    }

    #[test]
    fn new_rejects_dims_exceeding_i32_max() {
        let big = i32::MAX as u32 + 1;
        assert!(matches!(
            OccupancyGrid::new(big, 1),
            Err(SpaceError::DimensionTooLarge { name: "width", .. })
        ));
        assert!(matches!(
            OccupancyGrid::new(1, big),
            Err(SpaceError::DimensionTooLarge { name: "height", .. })
        ));
    }

    #[test]
    fn node_id_is_row_major() {
        let g = OccupancyGrid::new(5, 4).unwrap();
        assert_eq!(g.node_id(0, 0), Some(NodeId(0)));
        assert_eq!(g.node_id(4, 0), Some(NodeId(4)));
        assert_eq!(g.node_id(0, 1), Some(NodeId(5)));
        assert_eq!(g.node_id(3, 2), Some(NodeId(13)));
        assert_eq!(g.node_id(5, 0), None);
        assert_eq!(g.node_id(-1, 0), None);
    }

    #[test]
    fn location_inverts_node_id() {
        let g = OccupancyGrid::new(5, 4).unwrap();
        assert_eq!(g.location(NodeId(13)), Some((3, 2)));
        assert_eq!(g.location(NodeId(20)), None);
    }

    #[test]
    fn set_out_of_bounds_is_error() {
        let mut g = OccupancyGrid::new(2, 2).unwrap();
        assert!(matches!(
            g.set(2, 0, CellState::Wall),
            Err(SpaceError::CellOutOfBounds { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn set_rejects_bad_multiplier() {
        let mut g = OccupancyGrid::new(2, 2).unwrap();
        assert!(g.set(0, 0, CellState::Weighted(0.0)).is_err());
        assert!(g.set(0, 0, CellState::Weighted(f64::NAN)).is_err());
        assert!(g.set(0, 0, CellState::Weighted(2.5)).is_ok());
    }

    #[test]
    fn corner_neighbours() {
        let g = OccupancyGrid::new(3, 3).unwrap();
        assert_eq!(g.neighbours(0, 0, Neighbourhood::VonNeumann).count(), 2);
        assert_eq!(g.neighbours(0, 0, Neighbourhood::Moore).count(), 3);
        assert_eq!(g.neighbours(1, 1, Neighbourhood::Moore).count(), 8);
    }

    #[test]
    fn from_ascii_parses_all_cell_kinds() {
        let g = OccupancyGrid::from_ascii("\n  .#\n  2.\n").unwrap();
        assert_eq!(g.width(), 2);
        assert_eq!(g.height(), 2);
        assert_eq!(g.get(0, 0), Some(CellState::Free));
        assert_eq!(g.get(1, 0), Some(CellState::Wall));
        assert_eq!(g.get(0, 1), Some(CellState::Weighted(2.0)));
    }

    #[test]
    fn from_ascii_rejects_ragged_rows() {
        assert!(matches!(
            OccupancyGrid::from_ascii("..\n."),
            Err(SpaceError::InvalidMap { .. })
        ));
    }

    #[test]
    fn from_ascii_rejects_unknown_glyph() {
        assert!(matches!(
            OccupancyGrid::from_ascii(".x"),
            Err(SpaceError::InvalidMap { .. })
        ));
    }

    proptest! {
        #[test]
        fn node_id_location_roundtrip(w in 1u32..20, h in 1u32..20, x in 0i32..20, y in 0i32..20) {
            let g = OccupancyGrid::new(w, h).unwrap();
            let x = x % w as i32;
            let y = y % h as i32;
            let id = g.node_id(x, y).unwrap();
            prop_assert_eq!(g.location(id), Some((x, y)));
        }
    }
}
