//! Braitenberg vehicles.
//!
//! A vehicle has two light sensors at its front corners and two wheels
//! driven by a differential drive. The [`Wiring`] decides which sensor
//! feeds which wheel and whether light speeds the wheel up or slows it
//! down.

use std::any::Any;
use vivarium_engine::{
    Action, Agent, AgentBuilder, AgentError, Body, Color, Shape, SimObject, ThinkContext,
};

use crate::light::LightSensor;

/// Sensor channel on the left front corner.
pub const LEFT: &str = "left";
/// Sensor channel on the right front corner.
pub const RIGHT: &str = "right";

/// How sensors connect to wheels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wiring {
    /// Vehicle 2a: each sensor excites the wheel on its own side. Turns
    /// away from light.
    Fear,
    /// Vehicle 2b: each sensor excites the opposite wheel. Turns towards
    /// light and speeds up.
    Aggression,
    /// Vehicle 3a: each sensor inhibits the wheel on its own side. Turns
    /// towards light and slows down near it.
    Love,
    /// Vehicle 3b: each sensor inhibits the opposite wheel. Slows near
    /// light and turns away.
    Explorer,
}

impl Wiring {
    /// Wheel throttles `(left, right)` for the two sensor readings.
    pub fn throttles(self, left: f64, right: f64) -> (f64, f64) {
        match self {
            Wiring::Fear => (left, right),
            Wiring::Aggression => (right, left),
            Wiring::Love => (1.0 - left, 1.0 - right),
            Wiring::Explorer => (1.0 - right, 1.0 - left),
        }
    }
}

/// The vehicle chassis: a 20 x 10 box with two wheels.
#[derive(Clone, Debug)]
pub struct VehicleBody {
    body: Body,
    shapes: Vec<Shape>,
}

impl VehicleBody {
    /// Chassis length along the heading.
    pub const WIDTH: f64 = 20.0;
    /// Chassis width across the heading; also the axle length.
    pub const HEIGHT: f64 = 10.0;
    /// Wheel speed at full throttle.
    pub const MAX_WHEEL_SPEED: f64 = 100.0;

    /// A chassis at `(x, y)` facing `heading` degrees.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        let (w, h) = (Self::WIDTH, Self::HEIGHT);
        let wheel = Shape::rect(w * 0.3, h * 0.4).with_color(Color::GREY);
        Self {
            body: Body::new(x, y).with_heading(heading),
            shapes: vec![
                Shape::rect(w, h),
                wheel.clone().offset(-w / 2.0, -h / 2.0),
                wheel.offset(-w / 2.0, h / 2.0),
            ],
        }
    }

    /// Draw a sensor marker at `(x, y)` in body coordinates.
    pub fn with_sensor_marker(mut self, x: f64, y: f64) -> Self {
        self.shapes.push(Shape::Triangle {
            points: [(x, y), (x + 3.0, y - 2.0), (x + 3.0, y + 2.0)],
            color: Color::RED,
        });
        self
    }
}

impl SimObject for VehicleBody {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A Braitenberg vehicle: reads its two light sensors every tick and sets
/// its wheel throttles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vehicle {
    wiring: Wiring,
}

impl Vehicle {
    /// A vehicle with the given wiring.
    pub fn new(wiring: Wiring) -> Self {
        Self { wiring }
    }

    /// The vehicle's wiring.
    pub fn wiring(&self) -> Wiring {
        self.wiring
    }

    /// Everything needed to add a vehicle at `(x, y)` facing `heading`:
    /// the agent, its chassis and its two sensors.
    pub fn builder(wiring: Wiring, x: f64, y: f64, heading: f64) -> AgentBuilder {
        let (dx, dy) = (VehicleBody::WIDTH / 2.0, VehicleBody::HEIGHT / 2.0);
        let chassis = VehicleBody::new(x, y, heading)
            .with_sensor_marker(dx, dy)
            .with_sensor_marker(dx, -dy);
        AgentBuilder::new(Vehicle::new(wiring))
            .body(chassis)
            .perception(LightSensor::new(LEFT, dx, dy))
            .perception(LightSensor::new(RIGHT, dx, -dy))
    }
}

impl Agent for Vehicle {
    fn think(&mut self, ctx: &ThinkContext<'_>) -> Result<Vec<Action>, AgentError> {
        let (left, right) = self.wiring.throttles(ctx.scalar(LEFT)?, ctx.scalar(RIGHT)?);
        Ok(vec![Action::SetWheels {
            left,
            right,
            axle: VehicleBody::HEIGHT,
            max: VehicleBody::MAX_WHEEL_SPEED,
        }])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
