//! Vector arrows: tip-to-tail addition, resultants and component resolution.

use nalgebra::Vector2;

use crate::kernel::{angle_of, direction, midpoint, Bounds2, Point, Segment};

/// Resultants shorter than this are reported but not drawn.
pub const RESULTANT_MIN: f64 = 0.01;

/// Magnitude and direction (degrees) of one arrow.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolarVector {
    pub magnitude: f64,
    pub angle: f64,
}

impl PolarVector {
    pub fn new(magnitude: f64, angle: f64) -> Self {
        Self { magnitude, angle }
    }

    pub fn from_components(v: Vector2<f64>) -> Self {
        Self {
            magnitude: v.norm(),
            angle: angle_of(v),
        }
    }

    #[inline]
    pub fn components(&self) -> Vector2<f64> {
        direction(self.angle) * self.magnitude
    }
}

/// `start + magnitude·(cos θ, sin θ)`.
#[inline]
pub fn vector_end(start: Point, magnitude: f64, angle_deg: f64) -> Point {
    start + direction(angle_deg) * magnitude
}

/// Label position: the arrow midpoint pushed `offset` to the left of travel.
pub fn vector_label_anchor(start: Point, end: Point, angle_deg: f64, offset: f64) -> Point {
    midpoint(start, end) + direction(angle_deg + 90.0) * offset
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Resultant {
    pub magnitude: f64,
    pub angle: f64,
    pub components: Vector2<f64>,
}

impl Resultant {
    #[inline]
    pub fn is_drawn(&self) -> bool {
        self.magnitude > RESULTANT_MIN
    }
}

/// Arrows laid tip to tail from a common start.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    pub arrows: Vec<Segment>,
    /// Start followed by each arrow's tip.
    pub end_points: Vec<Point>,
    /// `None` only for an empty chain.
    pub resultant: Option<Resultant>,
}

pub fn tip_to_tail(start: Point, vectors: &[PolarVector]) -> Chain {
    let mut current = start;
    let mut arrows = Vec::with_capacity(vectors.len());
    let mut end_points = vec![start];
    for v in vectors {
        let next = vector_end(current, v.magnitude, v.angle);
        arrows.push(Segment::new(current, next));
        end_points.push(next);
        current = next;
    }
    let resultant = (!vectors.is_empty()).then(|| {
        let r = current - start;
        Resultant {
            magnitude: r.norm(),
            angle: angle_of(r),
            components: r,
        }
    });
    Chain {
        arrows,
        end_points,
        resultant,
    }
}

/// A vector split into horizontal and vertical components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Components {
    pub main: Segment,
    /// Along x from the start.
    pub x: Segment,
    /// Along y from the foot of the x component to the tip.
    pub y: Segment,
    /// Dashed lines completing the rectangle (start→(start.x, tip.y)→tip).
    pub completion: [Segment; 2],
}

pub fn resolve_components(start: Point, magnitude: f64, angle_deg: f64) -> Components {
    let end = vector_end(start, magnitude, angle_deg);
    let foot = Vector2::new(end.x, start.y);
    let corner = Vector2::new(start.x, end.y);
    Components {
        main: Segment::new(start, end),
        x: Segment::new(start, foot),
        y: Segment::new(foot, end),
        completion: [Segment::new(start, corner), Segment::new(corner, end)],
    }
}

/// Square view containing the points and the origin, at least 2 units wide.
pub fn view_bounds(points: &[Point], padding: f64) -> Bounds2 {
    match Bounds2::from_points(points) {
        Ok(mut b) => {
            b.include(Point::zeros());
            b.squared(padding, 2.0)
        }
        Err(_) => Bounds2::new(Vector2::new(-3.0, -3.0), Vector2::new(3.0, 3.0)),
    }
}

/// Arrow colours cycled through by index.
pub const DEFAULT_VECTOR_COLORS: [&str; 5] =
    ["#4C5B64", "#5B9BD5", "#70AD47", "#FFC000", "#7030A0"];

/// A named addition scenario.
#[derive(Clone, Copy, Debug)]
pub struct VectorPreset {
    pub key: &'static str,
    pub title: &'static str,
    pub vectors: &'static [(f64, f64)],
    pub labels: &'static [&'static str],
}

impl VectorPreset {
    pub fn polar(&self) -> Vec<PolarVector> {
        self.vectors
            .iter()
            .map(|&(m, a)| PolarVector::new(m, a))
            .collect()
    }
}

pub const VECTOR_PRESETS: [VectorPreset; 6] = [
    VectorPreset {
        key: "two_acute",
        title: "Two vectors (acute)",
        vectors: &[(2.0, 30.0), (1.5, 80.0)],
        labels: &["A", "B"],
    },
    VectorPreset {
        key: "two_obtuse",
        title: "Two vectors (obtuse)",
        vectors: &[(2.0, 20.0), (1.5, 140.0)],
        labels: &["A", "B"],
    },
    VectorPreset {
        key: "three",
        title: "Three vectors",
        vectors: &[(1.5, 0.0), (1.2, 60.0), (1.0, 150.0)],
        labels: &["A", "B", "C"],
    },
    VectorPreset {
        key: "perpendicular",
        title: "Perpendicular vectors",
        vectors: &[(2.0, 0.0), (1.5, 90.0)],
        labels: &["A", "B"],
    },
    VectorPreset {
        key: "opposite",
        title: "Opposite vectors",
        vectors: &[(2.0, 0.0), (1.5, 180.0)],
        labels: &["A", "B"],
    },
    VectorPreset {
        key: "equilibrium",
        title: "Equilibrium (3 vectors)",
        vectors: &[(2.0, 0.0), (2.0, 120.0), (2.0, 240.0)],
        labels: &["A", "B", "C"],
    },
];

pub fn vector_preset(key: &str) -> Option<&'static VectorPreset> {
    VECTOR_PRESETS.iter().find(|p| p.key == key)
}
