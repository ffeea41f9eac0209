//! Lights in the influence field and the sensors that read them.

use std::any::Any;
use tracing::debug;
use vivarium_core::{ObjectId, Point2, SourceId};
use vivarium_engine::{Body, Color, Percept, Perception, Shape, SimObject, World, WorldError};
use vivarium_influence::{CircularSource, DiffuseFalloff};

/// Values below this read as darkness.
const LIGHT_CUTOFF: f64 = 0.001;

/// A stationary lamp. Its light lives in the world's influence field; see
/// [`place_light`].
#[derive(Clone, Debug)]
pub struct LightSource {
    body: Body,
    radius: f64,
    shapes: [Shape; 1],
}

impl LightSource {
    /// A lamp at `(x, y)` whose light halves at `radius`.
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            body: Body::new(x, y),
            radius,
            shapes: [Shape::circle(4.0).with_color(Color::YELLOW)],
        }
    }

    /// Distance at which the light halves.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The field source matching this lamp: full strength at the lamp,
    /// diffuse quadratic falloff.
    pub fn source(&self) -> CircularSource<DiffuseFalloff> {
        CircularSource::new(
            self.body.position(),
            1.0,
            DiffuseFalloff::new(self.radius, LIGHT_CUTOFF),
        )
    }
}

impl SimObject for LightSource {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, _dt: f64, _bounds: vivarium_engine::Bounds) {}

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

/// Add a lamp object and its light in one step.
///
/// The light is anchored where the world actually placed the lamp. If the
/// field rejects the light, the lamp is removed again.
///
/// # Errors
///
/// [`WorldError::NoField`] if the world has no influence field, or any
/// error from adding the object or the source.
pub fn place_light(world: &mut World, x: f64, y: f64, radius: f64) -> Result<(ObjectId, SourceId), WorldError> {
    let id = world.add_object(LightSource::new(x, y, radius))?;
    let source = world
        .object(id)
        .and_then(|o| o.downcast_ref::<LightSource>())
        .map(LightSource::source)
        .ok_or(WorldError::UnknownObject(id))?;
    match world.add_influence(source) {
        Ok(sid) => {
            debug!(object = %id, source = %sid, radius, "light placed");
            Ok((id, sid))
        }
        Err(e) => {
            world.remove_object(id)?;
            Err(e)
        }
    }
}

/// Reads the influence field at a point fixed to the body.
///
/// The offset is in body coordinates: `+x` points along the heading,
/// `+y` to the left of it.
#[derive(Clone, Debug)]
pub struct LightSensor {
    name: String,
    offset: Point2,
}

impl LightSensor {
    /// A sensor named `name` mounted at `(dx, dy)` from the body centre.
    pub fn new(name: impl Into<String>, dx: f64, dy: f64) -> Self {
        Self {
            name: name.into(),
            offset: Point2::new(dx, dy),
        }
    }

    /// Mount point in body coordinates.
    pub fn offset(&self) -> Point2 {
        self.offset
    }

    /// World position of the sensor on `body`.
    pub fn position_on(&self, body: &Body) -> Point2 {
        body.position()
            .offset_rotated(self.offset.x, self.offset.y, body.heading())
    }
}

impl Perception for LightSensor {
    fn name(&self) -> &str {
        &self.name
    }

    fn perceive(&self, body: Option<&Body>, world: &World) -> Percept {
        let value = body.map_or(0.0, |b| {
            let at = self.position_on(b);
            world.sample_field(at.x, at.y)
        });
        Percept::Scalar(value)
    }
}
