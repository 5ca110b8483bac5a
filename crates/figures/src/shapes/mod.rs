//! Shape builders: semantic parameters in, vertex/point sets out.
//!
//! Purpose
//! - Closed-form constructions for every figure family: triangles from side
//!   lengths, quadrilateral presets, circles and their parts, number lines,
//!   vector chains and free-body scenes.
//!
//! Why this design
//! - Builders validate once and return owned values (`Polygon`, `Circle`, ...);
//!   everything downstream (queries, annotation) is total on those values.
//! - Rotation is always applied about the origin before translating to the
//!   requested centre, so a builder's output is `R(θ)·local + center`.
//!
//! Code cross-refs: `queries` (derived facts), `annotate` (labels and marks)

pub mod circle;
pub mod freebody;
pub mod number_line;
mod polygon;
pub mod quad;
pub mod triangle;
pub mod vectors;

pub use circle::{Arc, Circle};
pub use polygon::Polygon;
pub use quad::QuadPreset;
pub use triangle::TrianglePreset;

use crate::kernel::{rotate_points, translate_points, Point};

/// `R(angle)·local + center` for every point.
pub(crate) fn place_local(local: &[Point], angle_deg: f64, center: Point) -> Vec<Point> {
    let rotated = if angle_deg != 0.0 {
        rotate_points(local, angle_deg, Point::zeros())
    } else {
        local.to_vec()
    };
    translate_points(&rotated, center)
}
