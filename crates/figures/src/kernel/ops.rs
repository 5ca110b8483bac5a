use nalgebra::{Matrix2, Vector2};

use super::{Point, Vec2};
use crate::error::{GeomResult, GeometryError};

/// Magnitude below which a vector is treated as having no direction.
pub const DEGENERATE_EPS: f64 = 1e-10;

/// Direction used whenever a normalisation would divide by ~0.
#[inline]
pub fn fallback_up() -> Vec2 {
    Vector2::new(0.0, 1.0)
}

/// `center + radius·(cos θ, sin θ)` with θ in degrees.
#[inline]
pub fn point_on_circle(center: Point, radius: f64, angle_deg: f64) -> Point {
    center + direction(angle_deg) * radius
}

/// Unit vector at `angle_deg`.
#[inline]
pub fn direction(angle_deg: f64) -> Vec2 {
    let t = angle_deg.to_radians();
    Vector2::new(t.cos(), t.sin())
}

/// Normalised `v`, or `None` when `|v| < DEGENERATE_EPS` (or not finite).
#[inline]
pub fn try_unit(v: Vec2) -> Option<Vec2> {
    let n = v.norm();
    if n.is_finite() && n >= DEGENERATE_EPS {
        Some(v / n)
    } else {
        None
    }
}

/// Normalised `v`, falling back to `(0, 1)` for degenerate input.
#[inline]
pub fn unit_vector(v: Vec2) -> Vec2 {
    match try_unit(v) {
        Some(u) => u,
        None => {
            tracing::trace!(x = v.x, y = v.y, "degenerate direction, using fallback");
            fallback_up()
        }
    }
}

/// `(-v.y, v.x)`: 90° counter-clockwise rotation, not normalised.
#[inline]
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vector2::new(-v.y, v.x)
}

#[inline]
fn rotation(angle_deg: f64) -> Matrix2<f64> {
    let t = angle_deg.to_radians();
    let (s, c) = t.sin_cos();
    Matrix2::new(c, -s, s, c)
}

/// Rotate `p` about `center` by `angle_deg` (counter-clockwise).
#[inline]
pub fn rotate_point(p: Point, angle_deg: f64, center: Point) -> Point {
    rotation(angle_deg) * (p - center) + center
}

/// Rotate every point about `center`; the rotation matrix is built once.
pub fn rotate_points(points: &[Point], angle_deg: f64, center: Point) -> Vec<Point> {
    let m = rotation(angle_deg);
    points.iter().map(|p| m * (p - center) + center).collect()
}

pub fn translate_points(points: &[Point], offset: Vec2) -> Vec<Point> {
    points.iter().map(|p| p + offset).collect()
}

/// Map any finite angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    let a = angle_deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Direction angle of `v` in degrees, in `(-180, 180]`.
#[inline]
pub fn angle_of(v: Vec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

#[inline]
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    a + (b - a) * t
}

/// Arithmetic mean of the points (the vertex centroid).
pub fn centroid(points: &[Point]) -> GeomResult<Point> {
    if points.is_empty() {
        return Err(GeometryError::invalid("centroid of an empty point set"));
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    Ok(sum / points.len() as f64)
}
