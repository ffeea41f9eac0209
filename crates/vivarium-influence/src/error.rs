//! Error types for influence fields.

use vivarium_core::SourceId;

/// Errors from [`InfluenceField`](crate::InfluenceField) operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InfluenceError {
    /// A source anchor lies outside the field extent. The source was not
    /// registered.
    #[error("influence source at ({x}, {y}) lies outside the field")]
    OutOfBounds {
        /// Anchor x coordinate.
        x: f64,
        /// Anchor y coordinate.
        y: f64,
    },
    /// Field dimensions, sector size or maximum are unusable.
    #[error("invalid field geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong.
        reason: String,
    },
    /// No source is registered under this id.
    #[error("no influence source with id {0}")]
    UnknownSource(SourceId),
}
