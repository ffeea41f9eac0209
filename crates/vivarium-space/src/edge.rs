//! Boundary behavior for world positions.

use serde::{Deserialize, Serialize};

/// How positions are brought back inside a bounded world.
///
/// Applied per axis, independently.
///
/// # Examples
///
/// ```
/// use vivarium_space::EdgeBehavior;
///
/// assert_eq!(EdgeBehavior::Clamp.resolve(105.0, 0.0, 100.0, 100.0), 100.0);
/// assert_eq!(EdgeBehavior::Wrap.resolve(105.0, 0.0, 99.0, 100.0), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeBehavior {
    /// Out-of-bounds positions are pinned to the nearest bound (closed world).
    #[default]
    Clamp,
    /// Out-of-bounds positions wrap to the opposite side (toroidal world).
    Wrap,
}

impl EdgeBehavior {
    /// Resolve one axis value.
    ///
    /// `Clamp` pins `value` into `[min, max]`. `Wrap` leaves values inside
    /// `[min, max]` untouched and otherwise reduces them modulo `period`.
    pub fn resolve(self, value: f64, min: f64, max: f64, period: f64) -> f64 {
        match self {
            Self::Clamp => value.clamp(min, max),
            Self::Wrap => {
                if value >= min && value <= max {
                    value
                } else {
                    let wrapped = value.rem_euclid(period);
                    // Tiny negative inputs can round up to `period`.
                    if wrapped >= period {
                        min
                    } else {
                        wrapped
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pins_both_sides() {
        assert_eq!(EdgeBehavior::Clamp.resolve(-3.0, 0.0, 10.0, 10.0), 0.0);
        assert_eq!(EdgeBehavior::Clamp.resolve(13.0, 0.0, 10.0, 10.0), 10.0);
        assert_eq!(EdgeBehavior::Clamp.resolve(4.5, 0.0, 10.0, 10.0), 4.5);
    }

    #[test]
    fn wrap_reduces_modulo_period() {
        assert_eq!(EdgeBehavior::Wrap.resolve(-1.0, 0.0, 9.0, 10.0), 9.0);
        assert_eq!(EdgeBehavior::Wrap.resolve(25.0, 0.0, 9.0, 10.0), 5.0);
        assert_eq!(EdgeBehavior::Wrap.resolve(3.0, 0.0, 9.0, 10.0), 3.0);
        assert_eq!(EdgeBehavior::Wrap.resolve(-1e-18, 0.0, 9.0, 10.0), 0.0);
    }

    #[test]
    fn default_is_closed() {
        assert_eq!(EdgeBehavior::default(), EdgeBehavior::Clamp);
    }
}
