//! Annotation placement: where labels, ticks, arrows and arcs go.
//!
//! Purpose
//! - Turn an anchor (point, segment, arc) plus a `DirectionPolicy` and a
//!   distance into a single placement point, and build the small marks that
//!   decorate shapes (equal-length ticks, parallel arrows, angle arcs).
//!
//! Why this design
//! - Placement is a stateless pure function; nothing here knows about other
//!   labels, so no collision detection is attempted.
//! - Degenerate directions never fail: they fall back to "up" (see
//!   `kernel::unit_vector`) so one bad label cannot block a figure.
//!
//! Code cross-refs: `queries` (normals, bisectors), `diagram::*` (callers)

mod direction;
pub mod marks;
mod placement;

pub use direction::DirectionPolicy;
pub use marks::{ArrowStyle, TickStyle};
pub use placement::{
    angle_label, arc_label, place, side_label, vertex_label, Anchor, Annotation,
};

#[cfg(test)]
mod tests;
