//! Small geometric marks: equal-length ticks, parallel arrows, right-angle
//! squares, angle arcs and arrowheads.

use crate::kernel::{normalize_degrees, perpendicular, unit_vector, Point, Segment, Vec2};
use crate::shapes::{Arc, Polygon};

/// Equal-length tick geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickStyle {
    /// Full length of each tick, centred on the side.
    pub length: f64,
    /// Distance between neighbouring ticks along the side.
    pub spacing: f64,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            length: 0.15,
            spacing: 0.12,
        }
    }
}

impl TickStyle {
    /// Longer, wider-spaced ticks used on quadrilaterals.
    pub fn quad() -> Self {
        Self {
            length: 0.25,
            spacing: 0.15,
        }
    }
}

/// Parallel-arrow geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrowStyle {
    pub size: f64,
    pub spacing: f64,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            size: 0.3,
            spacing: 0.2,
        }
    }
}

/// Offsets `(k − (count−1)/2)·spacing`, symmetric about zero.
fn centred_offsets(count: usize, spacing: f64) -> impl Iterator<Item = f64> {
    let half = (count as f64 - 1.0) / 2.0;
    (0..count).map(move |k| (k as f64 - half) * spacing)
}

/// `count` ticks across side `i`, centred on its midpoint.
pub fn tick_marks(poly: &Polygon, side: usize, count: usize, style: TickStyle) -> Vec<Segment> {
    let s = poly.side(side);
    let along = s.direction();
    let across = poly.outward_normal(side) * (style.length / 2.0);
    let mid = s.midpoint();
    centred_offsets(count, style.spacing)
        .map(|off| {
            let c = mid + along * off;
            Segment::new(c - across, c + across)
        })
        .collect()
}

/// `count` "V" arrowheads on a segment, each pointing along start → end.
///
/// Every mark is `[wing, tip, wing]`.
pub fn parallel_arrows(segment: &Segment, count: usize, style: ArrowStyle) -> Vec<[Point; 3]> {
    let u = segment.direction();
    let wing = perpendicular(u) * (style.size * 0.4);
    let mid = segment.midpoint();
    centred_offsets(count, style.spacing)
        .map(|off| {
            let tip = mid + u * off;
            let back = tip - u * (style.size * 0.5);
            [back + wing, tip, back - wing]
        })
        .collect()
}

/// Two strokes of a square of side `size` in the corner between the arms.
///
/// Returned as the polyline `[on arm 1, corner, on arm 2]`.
pub fn right_angle_marker(vertex: Point, arm1: Vec2, arm2: Vec2, size: f64) -> [Point; 3] {
    let a = unit_vector(arm1) * size;
    let b = unit_vector(arm2) * size;
    [vertex + a, vertex + a + b, vertex + b]
}

/// Right-angle square at vertex `i` of a polygon.
pub fn right_angle_marker_at(poly: &Polygon, i: usize, size: f64) -> [Point; 3] {
    let (to_prev, to_next) = poly.edge_vectors(i);
    right_angle_marker(poly.vertex(i), to_prev, to_next, size)
}

/// Arc of `radius` spanning the interior angle at vertex `i`.
pub fn angle_arc(poly: &Polygon, i: usize, radius: f64) -> Arc {
    let (start, end) = poly.interior_arc_angles(i);
    Arc::new(poly.vertex(i), radius, start, end)
}

/// Shorter arc between two central angles, at an already-scaled radius.
pub fn central_angle_arc(center: Point, angle1_deg: f64, angle2_deg: f64, arc_radius: f64) -> Arc {
    if normalize_degrees(angle2_deg - angle1_deg) > 180.0 {
        Arc::new(center, arc_radius, angle2_deg, angle1_deg)
    } else {
        Arc::new(center, arc_radius, angle1_deg, angle2_deg)
    }
}

/// Filled arrowhead triangle `[tip, left barb, right barb]`.
pub fn arrow_head(tip: Point, dir: Vec2, length: f64, width: f64) -> [Point; 3] {
    let u = unit_vector(dir);
    let back = tip - u * length;
    let w = perpendicular(u) * (width / 2.0);
    [tip, back + w, back - w]
}
