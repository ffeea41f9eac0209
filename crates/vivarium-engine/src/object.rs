//! The [`SimObject`] trait and two general-purpose objects.

use crate::body::Body;
use crate::shape::Shape;
use std::any::Any;
use std::fmt;

/// The region positions are confined to after boundary enforcement.
///
/// Positions are valid in `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Largest valid x.
    pub width: f64,
    /// Largest valid y.
    pub height: f64,
}

impl Bounds {
    /// Bounds `[0, width] x [0, height]`.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `(x, y)` lies within the bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Anything the world can hold, move and draw.
///
/// Implementors provide access to their [`Body`]; the default
/// [`update`](SimObject::update) integrates it. Downcast a
/// `dyn SimObject` with [`is`](trait.SimObject.html#method.is) and
/// [`downcast_ref`](trait.SimObject.html#method.downcast_ref).
pub trait SimObject: Any + fmt::Debug {
    /// Kinematic state.
    fn body(&self) -> &Body;

    /// Mutable kinematic state.
    fn body_mut(&mut self) -> &mut Body;

    /// Advance one tick. Runs before the world enforces its boundary.
    fn update(&mut self, dt: f64, bounds: Bounds) {
        let _ = bounds;
        self.body_mut().integrate(dt);
    }

    /// Shapes to draw, in object-local coordinates.
    fn shapes(&self) -> &[Shape] {
        &[]
    }

    /// Whether `(x, y)` hits this object. Used by point queries.
    fn hit_test(&self, x: f64, y: f64) -> bool {
        let _ = (x, y);
        false
    }

    /// Upcast for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn SimObject + 'a {
    /// Whether the concrete type is `T`.
    pub fn is<T: SimObject>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// The object as a `T`, if it is one.
    pub fn downcast_ref<T: SimObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// The object as a mutable `T`, if it is one.
    pub fn downcast_mut<T: SimObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// A plain object: a body plus shapes, with an optional hit radius.
#[derive(Clone, Debug, Default)]
pub struct Prop {
    body: Body,
    shapes: Vec<Shape>,
    radius: f64,
}

impl Prop {
    /// A prop with the given body.
    pub fn new(body: Body) -> Self {
        Self {
            body,
            shapes: Vec::new(),
            radius: 0.0,
        }
    }

    /// Add a shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Points within `radius` of the position hit the prop.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

impl SimObject for Prop {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn hit_test(&self, x: f64, y: f64) -> bool {
        self.radius > 0.0 && self.body.position().distance_to(x, y) <= self.radius
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A moving object that reflects its heading when it crosses the bounds.
#[derive(Clone, Debug)]
pub struct Bouncer {
    body: Body,
    shapes: Vec<Shape>,
}

impl Bouncer {
    /// A bouncer with the given body and a small circle shape.
    pub fn new(body: Body) -> Self {
        Self {
            body,
            shapes: vec![Shape::circle(5.0)],
        }
    }
}

impl SimObject for Bouncer {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, dt: f64, bounds: Bounds) {
        self.body.integrate(dt);
        let (x, y) = (self.body.x(), self.body.y());
        if x > bounds.width || x < 0.0 {
            self.body.set_heading(180.0 - self.body.heading());
        }
        if y > bounds.height || y < 0.0 {
            self.body.set_heading(360.0 - self.body.heading());
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcasting_dyn_objects() {
        let mut obj: Box<dyn SimObject> = Box::new(Prop::new(Body::new(1.0, 2.0)));
        assert!(obj.is::<Prop>());
        assert!(!obj.is::<Bouncer>());
        assert!(obj.downcast_ref::<Prop>().is_some());
        assert!(obj.downcast_mut::<Bouncer>().is_none());
    }

    #[test]
    fn prop_hit_test_uses_radius() {
        let p = Prop::new(Body::new(0.0, 0.0)).with_radius(2.0);
        assert!(p.hit_test(1.0, 1.0));
        assert!(!p.hit_test(3.0, 0.0));
        assert!(!Prop::new(Body::default()).hit_test(0.0, 0.0));
    }

    #[test]
    fn default_update_integrates() {
        let mut p = Prop::new(Body::new(0.0, 0.0).with_speed(2.0));
        p.update(1.5, Bounds::new(10.0, 10.0));
        assert!((p.body().x() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bouncer_reflects_off_vertical_wall() {
        let mut b = Bouncer::new(Body::new(9.5, 5.0).with_heading(30.0).with_speed(1.0));
        b.update(1.0, Bounds::new(10.0, 10.0));
        assert!((b.body().heading() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn bouncer_reflects_off_horizontal_wall() {
        let mut b = Bouncer::new(Body::new(5.0, 0.5).with_heading(300.0).with_speed(1.0));
        b.update(1.0, Bounds::new(10.0, 10.0));
        assert!((b.body().heading() - 60.0).abs() < 1e-9);
    }
}
