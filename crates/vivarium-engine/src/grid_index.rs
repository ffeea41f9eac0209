//! Per-cell object membership for grid worlds.

use indexmap::IndexMap;
use smallvec::SmallVec;
use vivarium_core::ObjectId;
use vivarium_space::Neighbourhood;

/// Which objects occupy which cell.
///
/// Every indexed object is listed in exactly one cell, the one its
/// position falls in after boundary enforcement.
#[derive(Clone, Debug)]
pub struct GridIndex {
    cols: u32,
    rows: u32,
    cells: Vec<SmallVec<[ObjectId; 4]>>,
    located: IndexMap<ObjectId, (i32, i32)>,
}

impl GridIndex {
    /// An empty index over `cols x rows` cells.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![SmallVec::new(); cols as usize * rows as usize],
            located: IndexMap::new(),
        }
    }

    fn slot(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as u32) < self.cols && (y as u32) < self.rows {
            Some(y as usize * self.cols as usize + x as usize)
        } else {
            None
        }
    }

    /// Record `id` in cell `(x, y)`, moving it if already indexed.
    /// Returns whether its cell changed. Out-of-range cells are ignored.
    pub fn place(&mut self, id: ObjectId, x: i32, y: i32) -> bool {
        if self.located.get(&id) == Some(&(x, y)) {
            return false;
        }
        let Some(slot) = self.slot(x, y) else {
            return false;
        };
        self.remove(id);
        self.cells[slot].push(id);
        self.located.insert(id, (x, y));
        true
    }

    /// Drop `id` from the index, returning its last cell.
    pub fn remove(&mut self, id: ObjectId) -> Option<(i32, i32)> {
        let (x, y) = self.located.shift_remove(&id)?;
        if let Some(slot) = self.slot(x, y) {
            self.cells[slot].retain(|o| *o != id);
        }
        Some((x, y))
    }

    /// The cell `id` occupies.
    pub fn cell_of(&self, id: ObjectId) -> Option<(i32, i32)> {
        self.located.get(&id).copied()
    }

    /// Objects in cell `(x, y)`, in arrival order. Empty out of range.
    pub fn contents(&self, x: i32, y: i32) -> &[ObjectId] {
        self.slot(x, y).map_or(&[], |s| self.cells[s].as_slice())
    }

    /// Objects in the in-bounds Moore ring around `(x, y)`, excluding the
    /// cell itself.
    pub fn neighbours(&self, x: i32, y: i32) -> Vec<ObjectId> {
        Neighbourhood::Moore
            .offsets()
            .iter()
            .flat_map(|&(dx, dy)| self.contents(x + dx, y + dy).iter().copied())
            .collect()
    }

    /// Number of indexed objects.
    pub fn len(&self) -> usize {
        self.located.len()
    }

    /// Whether nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.located.is_empty()
    }
}
