//! Minimal 2D geometry: points and heading normalization.

use serde::{Deserialize, Serialize};

/// Degrees-to-radians conversion factor.
pub const DEG2RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians-to-degrees conversion factor.
pub const RAD2DEG: f64 = 180.0 / std::f64::consts::PI;

/// A point in continuous world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2 {
    /// Create a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2) -> f64 {
        self.distance_to(other.x, other.y)
    }

    /// Euclidean distance to the point `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Rotate the offset `(dx, dy)` by `heading` degrees and add it to this point.
    ///
    /// Used to place body-relative sensors in world space.
    pub fn offset_rotated(&self, dx: f64, dy: f64, heading: f64) -> Point2 {
        let (s, c) = (heading * DEG2RAD).sin_cos();
        Point2::new(self.x + c * dx - s * dy, self.y + s * dx + c * dy)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Normalize a heading in degrees into `[0, 360)`.
///
/// `370` becomes `10` and `-10` becomes `350`. Non-finite input is
/// mapped to `0`.
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}
