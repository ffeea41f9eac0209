//! Point sources of influence.

use crate::falloff::{Falloff, LinearFalloff};
use std::fmt;
use vivarium_core::Point2;

/// A point emitter placed in an [`InfluenceField`](crate::InfluenceField).
///
/// A source's value at a query point depends only on its own state and the
/// point. The field sums the values of all its sources.
pub trait Influence: fmt::Debug {
    /// Position the source is anchored at.
    fn anchor(&self) -> Point2;

    /// Move the source.
    fn set_anchor(&mut self, anchor: Point2);

    /// Current strength.
    fn strength(&self) -> f64;

    /// Step internal decay by `dt` seconds. Returns whether the source's
    /// output changed.
    fn advance(&mut self, dt: f64) -> bool;

    /// Value contributed at `(x, y)`.
    fn value_at(&self, x: f64, y: f64) -> f64;

    /// Whether the source has decayed to nothing.
    fn is_exhausted(&self) -> bool {
        self.strength() <= 0.0
    }
}

/// A source whose value depends on the distance from its anchor.
///
/// Strength decreases by `decay` per second and stops at zero.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularSource<F = LinearFalloff> {
    anchor: Point2,
    strength: f64,
    decay: f64,
    falloff: F,
}

impl CircularSource<LinearFalloff> {
    /// Linear-falloff source losing `rate` per unit distance.
    pub fn linear(x: f64, y: f64, strength: f64, rate: f64) -> Self {
        Self::new(Point2::new(x, y), strength, LinearFalloff::new(rate))
    }
}

impl<F: Falloff> CircularSource<F> {
    /// A non-decaying source at `anchor`.
    pub fn new(anchor: Point2, strength: f64, falloff: F) -> Self {
        Self {
            anchor,
            strength,
            decay: 0.0,
            falloff,
        }
    }

    /// Lose `per_second` strength every second.
    pub fn with_decay(mut self, per_second: f64) -> Self {
        self.decay = per_second;
        self
    }

    /// Decay rate per second.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// The falloff function.
    pub fn falloff(&self) -> &F {
        &self.falloff
    }
}

impl<F> Influence for CircularSource<F>
where
    F: Falloff + fmt::Debug,
{
    fn anchor(&self) -> Point2 {
        self.anchor
    }

    fn set_anchor(&mut self, anchor: Point2) {
        self.anchor = anchor;
    }

    fn strength(&self) -> f64 {
        self.strength
    }

    fn advance(&mut self, dt: f64) -> bool {
        if self.decay == 0.0 || dt == 0.0 || self.strength <= 0.0 {
            return false;
        }
        let before = self.strength;
        self.strength = (self.strength - self.decay * dt).max(0.0);
        self.strength != before
    }

    fn value_at(&self, x: f64, y: f64) -> f64 {
        let distance = self.anchor.distance_to(x, y);
        self.falloff.contribution(self.strength, distance)
    }
}
