//! Distance-to-value functions.

use serde::{Deserialize, Serialize};

/// Maps a source strength and a distance to a contributed value.
///
/// Implementations must be pure functions of their arguments. Any
/// `Fn(f64, f64) -> f64` closure taking `(strength, distance)` is a falloff.
pub trait Falloff {
    /// Value contributed at `distance` by a source of `strength`.
    fn contribution(&self, strength: f64, distance: f64) -> f64;
}

impl<F> Falloff for F
where
    F: Fn(f64, f64) -> f64,
{
    fn contribution(&self, strength: f64, distance: f64) -> f64 {
        self(strength, distance)
    }
}

/// `strength - rate * distance`, floored at zero.
///
/// The value reaches zero at `strength / rate`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearFalloff {
    /// Loss per unit distance.
    pub rate: f64,
}

impl LinearFalloff {
    /// Linear falloff losing `rate` per unit distance.
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Distance at which a source of `strength` stops contributing.
    pub fn reach(&self, strength: f64) -> f64 {
        if self.rate > 0.0 {
            (strength / self.rate).max(0.0)
        } else {
            f64::INFINITY
        }
    }
}

impl Default for LinearFalloff {
    fn default() -> Self {
        Self { rate: 0.01 }
    }
}

impl Falloff for LinearFalloff {
    fn contribution(&self, strength: f64, distance: f64) -> f64 {
        (strength - self.rate * distance).max(0.0)
    }
}

/// Inverse-square style falloff, `strength * r² / (r² + d²)`.
///
/// Equals `strength` at the source and half of it at distance `radius`.
/// Values below `limit` are cut to zero so that the field has a finite
/// footprint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiffuseFalloff {
    /// Distance at which the value halves.
    pub radius: f64,
    /// Values below this read as zero.
    pub limit: f64,
}

impl DiffuseFalloff {
    /// Diffuse falloff with the given half-value radius and cut-off.
    pub fn new(radius: f64, limit: f64) -> Self {
        Self { radius, limit }
    }
}

impl Falloff for DiffuseFalloff {
    fn contribution(&self, strength: f64, distance: f64) -> f64 {
        let r2 = self.radius * self.radius;
        let denom = r2 + distance * distance;
        if denom <= 0.0 {
            return strength.max(0.0);
        }
        let value = strength * r2 / denom;
        if value < self.limit {
            0.0
        } else {
            value
        }
    }
}
