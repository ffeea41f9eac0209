//! The sector cache and its source registry.

use crate::error::InfluenceError;
use crate::source::Influence;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vivarium_core::{Point2, SourceId};

/// When a dirty field is brought up to date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputePolicy {
    /// Recompute inside every mutating call.
    Eager,
    /// Leave the cache stale until [`InfluenceField::recompute`] or
    /// [`InfluenceField::refresh`] is called.
    #[default]
    Deferred,
}

/// A rectangular scalar field discretized into square sectors.
///
/// The extent is the half-open rectangle `[0, width) x [0, height)`. The
/// number of sector columns is `ceil(width / sector)`, and likewise for
/// rows, so every point of the extent falls in some cell. Cell values are
/// the sum of all source contributions at the cell centre, clamped to
/// `[0, maximum]`.
///
/// # Examples
///
/// ```
/// use vivarium_influence::{CircularSource, InfluenceField};
///
/// let mut field = InfluenceField::new(100.0, 100.0, 10.0, 1.0).unwrap();
/// field.add_source(CircularSource::linear(55.0, 55.0, 1.0, 0.01)).unwrap();
/// assert_eq!(field.sample(55.0, 55.0), 0.0); // not yet recomputed
/// field.recompute();
/// assert_eq!(field.sample(55.0, 55.0), 1.0);
/// ```
#[derive(Debug)]
pub struct InfluenceField {
    width: f64,
    height: f64,
    sector: f64,
    cols: usize,
    rows: usize,
    maximum: f64,
    policy: RecomputePolicy,
    cells: Vec<f64>,
    sources: IndexMap<SourceId, Box<dyn Influence>>,
    next_id: u32,
    dirty: bool,
}

impl InfluenceField {
    /// Largest number of sectors a field may hold.
    pub const MAX_CELLS: usize = 1 << 24;

    /// Columns and rows of sectors needed to cover `width` by `height`.
    ///
    /// # Errors
    ///
    /// [`InfluenceError::InvalidGeometry`] if the count exceeds
    /// [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn sector_counts(width: f64, height: f64, sector: f64) -> Result<(usize, usize), InfluenceError> {
        let cols = (width / sector).ceil() as usize;
        let rows = (height / sector).ceil() as usize;
        match cols.checked_mul(rows) {
            Some(cells) if cells <= Self::MAX_CELLS => Ok((cols, rows)),
            _ => Err(InfluenceError::InvalidGeometry {
                reason: format!(
                    "{cols} x {rows} sectors exceeds the limit of {}",
                    Self::MAX_CELLS
                ),
            }),
        }
    }

    /// Create an empty field.
    ///
    /// # Errors
    ///
    /// [`InfluenceError::InvalidGeometry`] unless `width`, `height`,
    /// `sector` and `maximum` are all finite and positive, and the sector
    /// count stays within [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn new(width: f64, height: f64, sector: f64, maximum: f64) -> Result<Self, InfluenceError> {
        for (name, value) in [
            ("width", width),
            ("height", height),
            ("sector", sector),
            ("maximum", maximum),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(InfluenceError::InvalidGeometry {
                    reason: format!("{name} must be finite and positive, got {value}"),
                });
            }
        }
        let (cols, rows) = Self::sector_counts(width, height, sector)?;
        Ok(Self {
            width,
            height,
            sector,
            cols,
            rows,
            maximum,
            policy: RecomputePolicy::default(),
            cells: vec![0.0; cols * rows],
            sources: IndexMap::new(),
            next_id: 0,
            dirty: false,
        })
    }

    /// Set the recompute policy.
    pub fn with_policy(mut self, policy: RecomputePolicy) -> Self {
        self.policy = policy;
        self
    }

    // ── Geometry ────────────────────────────────────────────────

    /// Field width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Field height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sector edge length.
    pub fn sector(&self) -> f64 {
        self.sector
    }

    /// Number of sector columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of sector rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cap applied to every cell value.
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// The recompute policy.
    pub fn policy(&self) -> RecomputePolicy {
        self.policy
    }

    /// Whether `(x, y)` lies inside the extent.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        let col = ((x / self.sector) as usize).min(self.cols - 1);
        let row = ((y / self.sector) as usize).min(self.rows - 1);
        Some(row * self.cols + col)
    }

    fn cell_center(&self, col: usize, row: usize) -> Point2 {
        Point2::new(
            (col as f64 + 0.5) * self.sector,
            (row as f64 + 0.5) * self.sector,
        )
    }

    // ── Sources ─────────────────────────────────────────────────

    /// Register a source.
    ///
    /// # Errors
    ///
    /// [`InfluenceError::OutOfBounds`] if the source's anchor lies outside
    /// the extent; the source is dropped and the field is unchanged.
    pub fn add_source(
        &mut self,
        source: impl Influence + 'static,
    ) -> Result<SourceId, InfluenceError> {
        self.add_boxed(Box::new(source))
    }

    /// Register an already boxed source. See [`add_source`](Self::add_source).
    pub fn add_boxed(&mut self, source: Box<dyn Influence>) -> Result<SourceId, InfluenceError> {
        let at = source.anchor();
        if !self.contains(at.x, at.y) {
            warn!(x = at.x, y = at.y, "rejected influence source outside field");
            return Err(InfluenceError::OutOfBounds { x: at.x, y: at.y });
        }
        let id = SourceId(self.next_id);
        self.next_id += 1;
        self.sources.insert(id, source);
        self.mark_dirty();
        Ok(id)
    }

    /// Unregister a source and hand it back.
    pub fn remove_source(&mut self, id: SourceId) -> Result<Box<dyn Influence>, InfluenceError> {
        let source = self
            .sources
            .shift_remove(&id)
            .ok_or(InfluenceError::UnknownSource(id))?;
        self.mark_dirty();
        Ok(source)
    }

    /// Move a registered source.
    ///
    /// # Errors
    ///
    /// [`InfluenceError::UnknownSource`] for an unregistered id and
    /// [`InfluenceError::OutOfBounds`] if `to` is outside the extent, in
    /// which case the source stays where it was.
    pub fn move_source(&mut self, id: SourceId, to: Point2) -> Result<(), InfluenceError> {
        if !self.contains(to.x, to.y) {
            return Err(InfluenceError::OutOfBounds { x: to.x, y: to.y });
        }
        let source = self
            .sources
            .get_mut(&id)
            .ok_or(InfluenceError::UnknownSource(id))?;
        if source.anchor() != to {
            source.set_anchor(to);
            self.mark_dirty();
        }
        Ok(())
    }

    /// Remove every source that has decayed to nothing. Returns how many
    /// were removed.
    ///
    /// Exhausted sources are never removed automatically.
    pub fn prune_exhausted(&mut self) -> usize {
        let before = self.sources.len();
        self.sources.retain(|_, s| !s.is_exhausted());
        let removed = before - self.sources.len();
        if removed > 0 {
            debug!(removed, "pruned exhausted influence sources");
            self.mark_dirty();
        }
        removed
    }

    /// The source registered under `id`.
    pub fn source(&self, id: SourceId) -> Option<&dyn Influence> {
        self.sources.get(&id).map(|s| s.as_ref())
    }

    /// Registered sources in insertion order.
    pub fn sources(&self) -> impl Iterator<Item = (SourceId, &dyn Influence)> + '_ {
        self.sources.iter().map(|(id, s)| (*id, s.as_ref()))
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    // ── Time and cache ──────────────────────────────────────────

    /// Step every source's decay by `dt` seconds. Marks the field dirty if
    /// any source changed and returns whether one did.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut changed = false;
        for source in self.sources.values_mut() {
            changed |= source.advance(dt);
        }
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// Whether the cache is stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Rebuild every cell from the registered sources and clear the dirty
    /// flag.
    pub fn recompute(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = self.cell_center(col, row);
                let sum: f64 = self.sources.values().map(|s| s.value_at(c.x, c.y)).sum();
                self.cells[row * self.cols + col] = sum.clamp(0.0, self.maximum);
            }
        }
        self.dirty = false;
        debug!(
            cols = self.cols,
            rows = self.rows,
            sources = self.sources.len(),
            "recomputed influence field"
        );
    }

    /// Recompute if dirty. Returns whether a recompute happened.
    pub fn refresh(&mut self) -> bool {
        if self.dirty {
            self.recompute();
            true
        } else {
            false
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        if self.policy == RecomputePolicy::Eager {
            self.recompute();
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Cached value of the sector containing `(x, y)`; zero outside the
    /// extent.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.cell_index(x, y).map_or(0.0, |i| self.cells[i])
    }

    /// Cached value of sector `(col, row)`.
    pub fn cell_value(&self, col: usize, row: usize) -> Option<f64> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Cached value of sector `(col, row)` divided by the maximum, in
    /// `[0, 1]`.
    pub fn normalized(&self, col: usize, row: usize) -> Option<f64> {
        self.cell_value(col, row).map(|v| v / self.maximum)
    }
}
