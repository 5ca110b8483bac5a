use crate::error::{GeomResult, GeometryError};
use crate::kernel::{centroid, rotate_points, translate_points, Bounds2, Point, Segment, Vec2};

/// Ordered vertex list of a simple polygon.
///
/// Invariants:
/// - At least 3 vertices, all finite.
/// - Winding is whatever the builder produced; nothing downstream assumes CCW.
/// - Simplicity (no self-intersection) is the caller's responsibility.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> GeomResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::invalid(format!(
                "polygon needs at least 3 vertices (got {})",
                vertices.len()
            )));
        }
        if vertices.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(GeometryError::invalid("polygon vertices must be finite"));
        }
        Ok(Self { vertices })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    /// A validated polygon has at least three vertices, so this is false.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i`, indexed circularly.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i % self.len()]
    }
    #[inline]
    pub(crate) fn prev_index(&self, i: usize) -> usize {
        (i % self.len() + self.len() - 1) % self.len()
    }
    #[inline]
    pub(crate) fn next_index(&self, i: usize) -> usize {
        (i + 1) % self.len()
    }

    /// Side `i` runs from vertex `i` to vertex `i + 1`.
    #[inline]
    pub fn side(&self, i: usize) -> Segment {
        Segment::new(self.vertex(i), self.vertex(self.next_index(i)))
    }

    pub fn sides(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.len()).map(move |i| self.side(i))
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point {
        // non-empty by construction
        centroid(&self.vertices).unwrap_or_else(|_| Point::zeros())
    }

    pub fn bounds(&self) -> Bounds2 {
        let mut b = Bounds2::new(self.vertices[0], self.vertices[0]);
        for v in &self.vertices[1..] {
            b.include(*v);
        }
        b
    }

    /// Rotated copy (rotation preserves validity).
    pub fn rotated(&self, angle_deg: f64, center: Point) -> Polygon {
        Polygon {
            vertices: rotate_points(&self.vertices, angle_deg, center),
        }
    }

    pub fn translated(&self, offset: Vec2) -> Polygon {
        Polygon {
            vertices: translate_points(&self.vertices, offset),
        }
    }

    /// Closed outline: vertices followed by the first vertex again.
    pub fn closed_outline(&self) -> Vec<Point> {
        let mut pts = self.vertices.clone();
        pts.push(self.vertices[0]);
        pts
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }
}
