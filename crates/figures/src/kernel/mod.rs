//! Primitive 2D geometry kernel shared by every shape builder.
//!
//! Purpose
//! - Small vector helpers (unit vectors, perpendiculars, rotation, points on
//!   circles) and axis-aligned bounds used for auto-fitting the view.
//!
//! Conventions
//! - Points and vectors are `nalgebra::Vector2<f64>`.
//! - Angles are degrees, 0° = +x, 90° = +y, counter-clockwise.
//! - Normalising a vector shorter than `DEGENERATE_EPS` yields `fallback_up()`
//!   instead of NaN, so a single degenerate annotation never poisons a figure.
//!
//! Code cross-refs: `shapes::Polygon`, `annotate::place`

mod bounds;
mod ops;

pub use bounds::Bounds2;
pub use ops::{
    angle_of, centroid, direction, fallback_up, lerp, midpoint, normalize_degrees,
    perpendicular, point_on_circle, rotate_point, rotate_points, translate_points, try_unit,
    unit_vector, DEGENERATE_EPS,
};

use nalgebra::Vector2;

/// A position in the diagram plane.
pub type Point = Vector2<f64>;
/// A displacement or direction in the diagram plane.
pub type Vec2 = Vector2<f64>;

/// Directed line segment between two points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
    #[inline]
    pub fn vector(&self) -> Vec2 {
        self.end - self.start
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        midpoint(self.start, self.end)
    }
    /// Point at fraction `t` along the segment (0 = start, 1 = end).
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        lerp(self.start, self.end, t)
    }
    /// Unit direction start → end (fallback up for zero length).
    #[inline]
    pub fn direction(&self) -> Vec2 {
        unit_vector(self.vector())
    }
}

#[cfg(test)]
mod tests;
