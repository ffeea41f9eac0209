//! Kinematic state shared by every simulated object.

use vivarium_core::{normalize_degrees, Point2, DEG2RAD, RAD2DEG};

/// Position, heading and constant-velocity motion of an object.
///
/// The heading is in degrees and is normalized to `[0, 360)` on every
/// write. The velocity vector is derived from the scalar speed and the
/// current heading, so turning an object also turns its motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    position: Point2,
    heading: f64,
    speed: f64,
    angular_velocity: f64,
}

impl Body {
    /// A stationary body at `(x, y)` facing heading 0.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            ..Self::default()
        }
    }

    /// Builder-style heading.
    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.set_heading(degrees);
        self
    }

    /// Builder-style speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Current position.
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Current x coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Current y coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Heading in degrees, in `[0, 360)`.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Scalar speed along the heading.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Turn rate in degrees per second.
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Velocity vector `(vx, vy)` derived from speed and heading.
    pub fn velocity(&self) -> (f64, f64) {
        let rad = self.heading * DEG2RAD;
        (self.speed * rad.cos(), self.speed * rad.sin())
    }

    /// Teleport to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = Point2::new(x, y);
    }

    /// Shift by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Turn by `degrees`.
    pub fn rotate(&mut self, degrees: f64) {
        self.set_heading(self.heading + degrees);
    }

    /// Set the heading, normalizing into `[0, 360)`.
    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = normalize_degrees(degrees);
    }

    /// Set the scalar speed.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Set the turn rate in degrees per second.
    pub fn set_angular_velocity(&mut self, degrees_per_second: f64) {
        self.angular_velocity = degrees_per_second;
    }

    /// Drive the body as a two-wheeled differential vehicle.
    ///
    /// `left` and `right` are throttle fractions scaled by `max`. Speed is
    /// the mean wheel speed; the turn rate is the wheel speed difference
    /// over the `axle` length.
    pub fn set_wheel_speeds(&mut self, left: f64, right: f64, axle: f64, max: f64) {
        let l = left * max;
        let r = right * max;
        self.speed = (l + r) / 2.0;
        self.angular_velocity = if axle > 0.0 {
            (r - l) / axle * RAD2DEG
        } else {
            0.0
        };
    }

    /// Advance by `dt` seconds of constant-velocity motion.
    ///
    /// The heading is only rewritten when the turn rate is non-zero.
    pub fn integrate(&mut self, dt: f64) {
        if self.angular_velocity != 0.0 {
            self.set_heading(self.heading + self.angular_velocity * dt);
        }
        let (vx, vy) = self.velocity();
        self.position.x += vx * dt;
        self.position.y += vy * dt;
    }
}
