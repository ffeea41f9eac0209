//! Static objects that shape the navigation graph.

use std::any::Any;
use vivarium_engine::{Body, CellClassifier, Color, Shape, SimObject};
use vivarium_space::CellState;

/// An impassable cell.
#[derive(Clone, Debug)]
pub struct Wall {
    body: Body,
    shapes: [Shape; 1],
}

impl Wall {
    /// A wall at cell `(x, y)`, drawn as a `size`-wide white square.
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self {
            body: Body::new(x, y),
            shapes: [Shape::rect(size, size)],
        }
    }
}

impl SimObject for Wall {
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

/// Rough ground. Entering the cell costs `10 * height` times the step
/// length.
#[derive(Clone, Debug)]
pub struct Terrain {
    body: Body,
    height: f64,
    shapes: [Shape; 1],
}

impl Terrain {
    /// Terrain of the given height at cell `(x, y)`. Higher ground is
    /// drawn brighter.
    pub fn new(x: f64, y: f64, height: f64, size: f64) -> Self {
        let tint = Color::rgb(255, 255, 0).scaled(height.clamp(0.0, 1.0));
        Self {
            body: Body::new(x, y),
            height,
            shapes: [Shape::rect(size, size).with_color(tint)],
        }
    }

    /// Height of the ground.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Cost multiplier for entering this cell.
    pub fn cost(&self) -> f64 {
        10.0 * self.height
    }
}

impl SimObject for Terrain {
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

/// How the reference objects affect navigation: walls block, terrain
/// weights, everything else is ignored.
///
/// Terrain with a non-positive cost counts as flat ground.
pub fn classify(object: &dyn SimObject) -> Option<CellState> {
    if object.is::<Wall>() {
        return Some(CellState::Wall);
    }
    let terrain = object.downcast_ref::<Terrain>()?;
    Some(CellState::weighted(terrain.cost()).unwrap_or(CellState::Free))
}

/// [`classify`], boxed for [`World::set_cell_classifier`].
///
/// [`World::set_cell_classifier`]: vivarium_engine::World::set_cell_classifier
pub fn terrain_classifier() -> CellClassifier {
    Box::new(classify)
}
