//! Drawing primitives handed to a [`Renderer`](crate::Renderer).
//!
//! Coordinates are local to the owning object: the renderer translates by
//! the object's position and rotates by its heading.

/// An RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// White.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Light grey, used for grid lines.
    pub const GREY: Color = Color::rgb(200, 200, 200);
    /// Red.
    pub const RED: Color = Color::rgb(220, 0, 0);
    /// Yellow.
    pub const YELLOW: Color = Color::rgb(210, 210, 0);

    /// Colour from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// This colour scaled by `factor` in `[0, 1]`.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let s = |c: u8| (f64::from(c) * f).round() as u8;
        Self::rgb(s(self.r), s(self.g), s(self.b))
    }
}

/// A primitive in object-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle centred on `(cx, cy)`.
    Rect {
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Centre x.
        cx: f64,
        /// Centre y.
        cy: f64,
        /// Fill colour.
        color: Color,
    },
    /// Circle of radius `radius` centred on `(cx, cy)`.
    Circle {
        /// Radius.
        radius: f64,
        /// Centre x.
        cx: f64,
        /// Centre y.
        cy: f64,
        /// Fill colour.
        color: Color,
    },
    /// Segment between two points.
    Line {
        /// Start point.
        from: (f64, f64),
        /// End point.
        to: (f64, f64),
        /// Stroke colour.
        color: Color,
    },
    /// Filled triangle.
    Triangle {
        /// Corner points.
        points: [(f64, f64); 3],
        /// Fill colour.
        color: Color,
    },
    /// Grid lines covering `width x height` every `cell` units.
    Grid {
        /// Total width.
        width: f64,
        /// Total height.
        height: f64,
        /// Cell edge length.
        cell: f64,
        /// Line colour.
        color: Color,
    },
}

impl Shape {
    /// White rectangle centred on the origin.
    pub fn rect(width: f64, height: f64) -> Self {
        Shape::Rect {
            width,
            height,
            cx: 0.0,
            cy: 0.0,
            color: Color::WHITE,
        }
    }

    /// White circle centred on the origin.
    pub fn circle(radius: f64) -> Self {
        Shape::Circle {
            radius,
            cx: 0.0,
            cy: 0.0,
            color: Color::WHITE,
        }
    }

    /// Replace the colour.
    pub fn with_color(mut self, new: Color) -> Self {
        match &mut self {
            Shape::Rect { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Line { color, .. }
            | Shape::Triangle { color, .. }
            | Shape::Grid { color, .. } => *color = new,
        }
        self
    }

    /// Move the shape's anchor by `(dx, dy)`.
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        match &mut self {
            Shape::Rect { cx, cy, .. } | Shape::Circle { cx, cy, .. } => {
                *cx += dx;
                *cy += dy;
            }
            Shape::Line { from, to, .. } => {
                for p in [from, to] {
                    p.0 += dx;
                    p.1 += dy;
                }
            }
            Shape::Triangle { points, .. } => {
                for p in points.iter_mut() {
                    p.0 += dx;
                    p.1 += dy;
                }
            }
            Shape::Grid { .. } => {}
        }
        self
    }

    /// The shape's colour.
    pub fn color(&self) -> Color {
        match self {
            Shape::Rect { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Line { color, .. }
            | Shape::Triangle { color, .. }
            | Shape::Grid { color, .. } => *color,
        }
    }
}
