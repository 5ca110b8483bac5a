//! Triangles from three side lengths (SSS) or from explicit coordinates.
//!
//! Vertex order is always `[A, B, C]` with side 0 = A–B (the base, length `c`),
//! side 1 = B–C (length `a`) and side 2 = C–A (length `b`). The angle at C is
//! therefore the one opposite the base.

use nalgebra::Vector2;

use super::{place_local, Polygon};
use crate::error::{require_positive, GeomResult, GeometryError};
use crate::kernel::Point;

/// Build `[A, B, C]` from side lengths.
///
/// The base A–B is centred on the origin, C is placed above it, then the
/// whole triangle is rotated by `base_angle_deg` about the origin and moved to
/// `base_center`.
pub fn from_sss(
    a: f64,
    b: f64,
    c: f64,
    base_center: Point,
    base_angle_deg: f64,
) -> GeomResult<Polygon> {
    require_positive("side a", a)?;
    require_positive("side b", b)?;
    require_positive("side c", c)?;
    if !(a + b > c && b + c > a && a + c > b) {
        return Err(GeometryError::invalid(format!(
            "sides {a}, {b}, {c} violate the triangle inequality"
        )));
    }

    let va = Vector2::new(-c / 2.0, 0.0);
    let vb = Vector2::new(c / 2.0, 0.0);
    let cos_a = ((b * b + c * c - a * a) / (2.0 * b * c)).clamp(-1.0, 1.0);
    let sin_a = (1.0 - cos_a * cos_a).sqrt();
    let vc = va + Vector2::new(b * cos_a, b * sin_a);

    Polygon::new(place_local(&[va, vb, vc], base_angle_deg, base_center))
}

/// Triangle from three explicit points (no ordering or winding requirement).
pub fn from_coordinates(points: [Point; 3]) -> GeomResult<Polygon> {
    Polygon::new(points.to_vec())
}

/// Named special triangles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum TrianglePreset {
    Equilateral { side: f64 },
    Isosceles { base: f64, leg: f64 },
    /// Right angle at B.
    Right { base: f64, height: f64 },
    #[serde(rename = "30_60_90")]
    ThirtySixtyNinety { short_leg: f64 },
    #[serde(rename = "45_45_90")]
    FortyFiveNinety { leg: f64 },
}

impl TrianglePreset {
    pub const NAMES: [&'static str; 5] =
        ["equilateral", "isosceles", "right", "30_60_90", "45_45_90"];

    /// Preset with its default dimensions.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "equilateral" => Self::Equilateral { side: 2.0 },
            "isosceles" => Self::Isosceles {
                base: 2.0,
                leg: 2.5,
            },
            "right" => Self::Right {
                base: 3.0,
                height: 4.0,
            },
            "30_60_90" => Self::ThirtySixtyNinety { short_leg: 1.0 },
            "45_45_90" => Self::FortyFiveNinety { leg: 1.0 },
            _ => return None,
        })
    }

    /// `(a, b, c)` fed to `from_sss`.
    pub fn sides(&self) -> (f64, f64, f64) {
        match *self {
            Self::Equilateral { side } => (side, side, side),
            Self::Isosceles { base, leg } => (leg, leg, base),
            Self::Right { base, height } => (height, base.hypot(height), base),
            Self::ThirtySixtyNinety { short_leg } => {
                (short_leg * 3f64.sqrt(), 2.0 * short_leg, short_leg)
            }
            Self::FortyFiveNinety { leg } => (leg, leg * 2f64.sqrt(), leg),
        }
    }

    pub fn build(&self, center: Point) -> GeomResult<Polygon> {
        let (a, b, c) = self.sides();
        from_sss(a, b, c, center, 0.0)
    }
}
