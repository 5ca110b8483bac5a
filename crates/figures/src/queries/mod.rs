//! Derived-geometry queries: angles, lengths, normals, bisectors and circle measures.
//!
//! Purpose
//! - Closed-form facts computed from a shape's own vertices, used both for
//!   display (side lengths, angle values) and to drive annotation placement.
//!
//! Tie-break conventions
//! - Vertex angles are always the non-reflex angle between the two edges.
//! - Circle measures use the shorter arc unless `ArcChoice::Major` is asked for.
//! - "Outward" is decided against the opposite vertex (triangles) or the
//!   vertex centroid (everything else), never from the winding order.
//!
//! Code cross-refs: `shapes::Polygon`, `annotate::{side_label, angle_label}`

mod circle;
mod polygon;

pub use circle::{
    arc_length, arc_length_with, chord_length, minor_sweep, sector_area, sector_area_with,
    segment_area, segment_area_with, sweep, ArcChoice,
};

#[cfg(test)]
mod tests;
