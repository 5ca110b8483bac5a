//! Quadrilateral presets and arbitrary four-point quadrilaterals.
//!
//! Vertices are labelled A, B, C, D in order; diagonals are A–C and B–D.
//! Every preset except the kite is centred on its vertex centroid; the kite
//! is centred on the crossing of its diagonals.

use nalgebra::Vector2;

use super::{place_local, Polygon};
use crate::error::{require_positive, GeomResult, GeometryError};
use crate::kernel::{centroid, Point, Segment};

fn build(
    local: Vec<Point>,
    recentre: bool,
    center: Point,
    rotation_deg: f64,
) -> GeomResult<Polygon> {
    let local = if recentre {
        let c = centroid(&local)?;
        local.into_iter().map(|p| p - c).collect()
    } else {
        local
    };
    Polygon::new(place_local(&local, rotation_deg, center))
}

pub fn square(side: f64, center: Point, rotation_deg: f64) -> GeomResult<Polygon> {
    require_positive("side", side)?;
    rectangle(side, side, center, rotation_deg)
}

pub fn rectangle(width: f64, height: f64, center: Point, rotation_deg: f64) -> GeomResult<Polygon> {
    let hw = require_positive("width", width)? / 2.0;
    let hh = require_positive("height", height)? / 2.0;
    build(
        vec![
            Vector2::new(-hw, -hh),
            Vector2::new(hw, -hh),
            Vector2::new(hw, hh),
            Vector2::new(-hw, hh),
        ],
        false,
        center,
        rotation_deg,
    )
}

/// `angle_deg` is the interior angle at A, between the base A–B and side A–D.
pub fn parallelogram(
    base: f64,
    side: f64,
    angle_deg: f64,
    center: Point,
    rotation_deg: f64,
) -> GeomResult<Polygon> {
    require_positive("base", base)?;
    require_positive("side", side)?;
    if !(angle_deg > 0.0 && angle_deg < 180.0) {
        return Err(GeometryError::invalid(format!(
            "parallelogram angle must lie strictly between 0 and 180 degrees (got {angle_deg})"
        )));
    }
    let t = angle_deg.to_radians();
    let off = Vector2::new(side * t.cos(), side * t.sin());
    build(
        vec![
            Vector2::zeros(),
            Vector2::new(base, 0.0),
            Vector2::new(base, 0.0) + off,
            off,
        ],
        true,
        center,
        rotation_deg,
    )
}

pub fn rhombus(side: f64, angle_deg: f64, center: Point, rotation_deg: f64) -> GeomResult<Polygon> {
    parallelogram(side, side, angle_deg, center, rotation_deg)
}

/// Bottom side A–B has length `bottom`, top side D–C has length `top`;
/// `offset` shifts the top side to the right.
pub fn trapezium(
    top: f64,
    bottom: f64,
    height: f64,
    offset: f64,
    center: Point,
    rotation_deg: f64,
) -> GeomResult<Polygon> {
    let ht = require_positive("top", top)? / 2.0;
    let hb = require_positive("bottom", bottom)? / 2.0;
    require_positive("height", height)?;
    if !offset.is_finite() {
        return Err(GeometryError::invalid("trapezium offset must be finite"));
    }
    build(
        vec![
            Vector2::new(-hb, 0.0),
            Vector2::new(hb, 0.0),
            Vector2::new(offset + ht, height),
            Vector2::new(offset - ht, height),
        ],
        true,
        center,
        rotation_deg,
    )
}

pub fn isosceles_trapezium(
    top: f64,
    bottom: f64,
    height: f64,
    center: Point,
    rotation_deg: f64,
) -> GeomResult<Polygon> {
    trapezium(top, bottom, height, 0.0, center, rotation_deg)
}

/// `d1` is the horizontal diagonal A–C, `d2` the vertical diagonal B–D;
/// `split` is where the diagonals cross, measured from the bottom of B–D.
pub fn kite(d1: f64, d2: f64, split: f64, center: Point, rotation_deg: f64) -> GeomResult<Polygon> {
    let h1 = require_positive("d1", d1)? / 2.0;
    require_positive("d2", d2)?;
    if !(split > 0.0 && split < 1.0) {
        return Err(GeometryError::invalid(format!(
            "kite split must lie strictly between 0 and 1 (got {split})"
        )));
    }
    build(
        vec![
            Vector2::new(-h1, 0.0),
            Vector2::new(0.0, -d2 * split),
            Vector2::new(h1, 0.0),
            Vector2::new(0.0, d2 * (1.0 - split)),
        ],
        false,
        center,
        rotation_deg,
    )
}

pub fn from_coordinates(points: [Point; 4]) -> GeomResult<Polygon> {
    Polygon::new(points.to_vec())
}

/// Diagonal A–C or B–D of a quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Diagonal {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "BD")]
    Bd,
}

pub fn diagonal(quad: &Polygon, which: Diagonal) -> Segment {
    match which {
        Diagonal::Ac => Segment::new(quad.vertex(0), quad.vertex(2)),
        Diagonal::Bd => Segment::new(quad.vertex(1), quad.vertex(3)),
    }
}

/// Named quadrilateral families with their defining dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum QuadPreset {
    Square { side: f64 },
    Rectangle { width: f64, height: f64 },
    Parallelogram { base: f64, side: f64, angle: f64 },
    Rhombus { side: f64, angle: f64 },
    Trapezium { top: f64, bottom: f64, height: f64, #[serde(default)] offset: f64 },
    IsoscelesTrapezium { top: f64, bottom: f64, height: f64 },
    Kite { d1: f64, d2: f64, split: f64 },
}

impl QuadPreset {
    pub const NAMES: [&'static str; 7] = [
        "square",
        "rectangle",
        "parallelogram",
        "rhombus",
        "trapezium",
        "isosceles_trapezium",
        "kite",
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "square" => Self::Square { side: 3.0 },
            "rectangle" => Self::Rectangle {
                width: 4.0,
                height: 2.5,
            },
            "parallelogram" => Self::Parallelogram {
                base: 4.0,
                side: 2.5,
                angle: 60.0,
            },
            "rhombus" => Self::Rhombus {
                side: 3.0,
                angle: 60.0,
            },
            "trapezium" => Self::Trapezium {
                top: 2.0,
                bottom: 4.0,
                height: 2.5,
                offset: 0.5,
            },
            "isosceles_trapezium" => Self::IsoscelesTrapezium {
                top: 2.0,
                bottom: 4.0,
                height: 2.5,
            },
            "kite" => Self::Kite {
                d1: 4.0,
                d2: 5.0,
                split: 0.3,
            },
            _ => return None,
        })
    }

    pub fn build(&self, center: Point, rotation_deg: f64) -> GeomResult<Polygon> {
        match *self {
            Self::Square { side } => square(side, center, rotation_deg),
            Self::Rectangle { width, height } => rectangle(width, height, center, rotation_deg),
            Self::Parallelogram { base, side, angle } => {
                parallelogram(base, side, angle, center, rotation_deg)
            }
            Self::Rhombus { side, angle } => rhombus(side, angle, center, rotation_deg),
            Self::Trapezium {
                top,
                bottom,
                height,
                offset,
            } => trapezium(top, bottom, height, offset, center, rotation_deg),
            Self::IsoscelesTrapezium { top, bottom, height } => {
                isosceles_trapezium(top, bottom, height, center, rotation_deg)
            }
            Self::Kite { d1, d2, split } => kite(d1, d2, split, center, rotation_deg),
        }
    }
}
