//! Error types for grid construction and cell access.

use thiserror::Error;

/// Errors arising from grid construction or cell queries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpaceError {
    /// Attempted to construct a grid with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// A grid dimension exceeds the supported maximum.
    #[error("{name} = {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension was too large.
        name: &'static str,
        /// The requested value.
        value: u32,
        /// The supported maximum.
        max: u32,
    },
    /// A cell coordinate lies outside the grid.
    #[error("cell ({x}, {y}) out of bounds for {width}x{height} grid")]
    CellOutOfBounds {
        /// Column of the offending cell.
        x: i32,
        /// Row of the offending cell.
        y: i32,
        /// Grid width in cells.
        width: u32,
        /// Grid height in cells.
        height: u32,
    },
    /// A weighted cell was given a non-positive or non-finite multiplier.
    #[error("cell cost multiplier must be finite and > 0, got {cost}")]
    InvalidCost {
        /// The rejected multiplier.
        cost: f64,
    },
    /// An ASCII map could not be parsed.
    #[error("invalid map: {reason}")]
    InvalidMap {
        /// What went wrong.
        reason: String,
    },
}
