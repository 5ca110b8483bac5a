use super::DirectionPolicy;
use crate::kernel::{
    direction, fallback_up, perpendicular, point_on_circle, unit_vector, Point, Segment, Vec2,
};
use crate::shapes::{Arc, Polygon};

/// What a label is attached to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anchor {
    /// `reference`, when given, is what `Auto` moves away from.
    Point {
        at: Point,
        #[serde(default)]
        reference: Option<Point>,
    },
    /// Label at fraction `position` along the segment. `Auto` uses the normal
    /// facing away from `reference`, or the left-hand normal without one.
    Segment {
        segment: Segment,
        #[serde(default = "half")]
        position: f64,
        #[serde(default)]
        reference: Option<Point>,
    },
    /// Label at the angular midpoint of the arc.
    Arc(Arc),
}

fn half() -> f64 {
    0.5
}

impl Anchor {
    /// The point the offset is measured from.
    pub fn base_point(&self) -> Point {
        match self {
            Anchor::Point { at, .. } => *at,
            Anchor::Segment {
                segment, position, ..
            } => segment.at(*position),
            Anchor::Arc(arc) => point_on_circle(arc.center, arc.radius, arc.mid_angle()),
        }
    }

    /// Unit offset direction under `policy`.
    pub fn direction(&self, policy: DirectionPolicy) -> Vec2 {
        match self {
            Anchor::Point { at, reference } => match (policy, reference) {
                (DirectionPolicy::Auto, Some(r)) => unit_vector(at - r),
                (DirectionPolicy::Auto, None) => fallback_up(),
                (p, _) => p.fixed_vector().unwrap_or_else(fallback_up),
            },
            Anchor::Segment {
                segment,
                position,
                reference,
            } => {
                let n = unit_vector(perpendicular(segment.vector()));
                if let Some(oriented) = policy.orient_normal(n) {
                    return oriented;
                }
                match (policy, reference) {
                    (DirectionPolicy::Auto, Some(r)) => {
                        if n.dot(&(r - segment.at(*position))) > 0.0 {
                            -n
                        } else {
                            n
                        }
                    }
                    (DirectionPolicy::Auto, None) => n,
                    (p, _) => p.fixed_vector().unwrap_or(n),
                }
            }
            Anchor::Arc(arc) => match policy {
                DirectionPolicy::Auto => direction(arc.mid_angle()),
                p => p.fixed_vector().unwrap_or_else(fallback_up),
            },
        }
    }
}

/// `anchor + distance · direction(policy)`.
///
/// A negative distance is treated as zero.
pub fn place(anchor: &Anchor, policy: DirectionPolicy, distance: f64) -> Point {
    anchor.base_point() + anchor.direction(policy) * distance.max(0.0)
}

/// A piece of label text with its placement rule.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Annotation {
    pub anchor: Anchor,
    pub text: String,
    #[serde(default)]
    pub policy: DirectionPolicy,
    pub distance: f64,
}

impl Annotation {
    pub fn position(&self) -> Point {
        place(&self.anchor, self.policy, self.distance)
    }
}

/// Vertex label; `Auto` moves away from the vertex centroid.
pub fn vertex_label(poly: &Polygon, i: usize, policy: DirectionPolicy, distance: f64) -> Point {
    let anchor = Anchor::Point {
        at: poly.vertex(i),
        reference: Some(poly.centroid()),
    };
    place(&anchor, policy, distance)
}

/// Side label at fraction `position` along side `i`; `Auto` uses the outward normal.
pub fn side_label(
    poly: &Polygon,
    i: usize,
    position: f64,
    policy: DirectionPolicy,
    distance: f64,
) -> Point {
    let side = poly.side(i);
    if policy == DirectionPolicy::Auto {
        return side.at(position) + poly.outward_normal(i) * distance.max(0.0);
    }
    let anchor = Anchor::Segment {
        segment: side,
        position,
        reference: None,
    };
    place(&anchor, policy, distance)
}

/// Angle label; `Auto` moves inward along the angle bisector.
pub fn angle_label(poly: &Polygon, i: usize, policy: DirectionPolicy, distance: f64) -> Point {
    let dir = match policy.fixed_vector() {
        Some(v) => v,
        None => poly.angle_bisector(i),
    };
    poly.vertex(i) + dir * distance.max(0.0)
}

/// Arc label: angular midpoint pushed outward along the radius.
pub fn arc_label(arc: &Arc, distance: f64) -> Point {
    place(&Anchor::Arc(*arc), DirectionPolicy::Auto, distance)
}
