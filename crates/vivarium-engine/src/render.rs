//! Render hooks.
//!
//! The world never draws anything itself. [`World::render`] walks its
//! state and calls a [`Renderer`] supplied by the platform layer.
//!
//! [`World::render`]: crate::World::render

use crate::body::Body;
use crate::shape::Shape;
use vivarium_core::{ObjectId, Point2};

/// Receives draw calls for one frame. Coordinates are in display units.
pub trait Renderer {
    /// Draw an object's shapes, translated to `body`'s position and
    /// rotated by its heading.
    fn draw_object(&mut self, id: ObjectId, body: &Body, shapes: &[Shape]);

    /// Draw one influence field sector with its lower-left corner at
    /// `(col * size, row * size)`. `intensity` is normalized to `[0, 1]`.
    fn draw_field_cell(&mut self, col: usize, row: usize, size: f64, intensity: f64) {
        let _ = (col, row, size, intensity);
    }

    /// Draw one navigation graph edge between cell centres.
    fn draw_graph_edge(&mut self, from: Point2, to: Point2) {
        let _ = (from, to);
    }
}

/// Which optional layers [`World::render`](crate::World::render) emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit influence field sectors.
    pub show_field: bool,
    /// Emit navigation graph edges.
    pub show_graph: bool,
}
