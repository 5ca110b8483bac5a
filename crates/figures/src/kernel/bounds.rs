use nalgebra::Vector2;

use super::Point;
use crate::error::{GeomResult, GeometryError};

/// Axis-aligned bounds; the view box a figure is fitted into.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds2 {
    pub min: Point,
    pub max: Point,
}

impl Bounds2 {
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min: Vector2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vector2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Tight bounds of a non-empty point set.
    pub fn from_points(points: &[Point]) -> GeomResult<Self> {
        let first = points
            .first()
            .ok_or_else(|| GeometryError::invalid("bounds of an empty point set"))?;
        let mut b = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            b.include(*p);
        }
        Ok(b)
    }

    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn union(&self, other: &Bounds2) -> Bounds2 {
        let mut b = *self;
        b.include(other.min);
        b.include(other.max);
        b
    }

    /// Grow every side by `padding`.
    pub fn padded(&self, padding: f64) -> Bounds2 {
        let d = Vector2::new(padding, padding);
        Bounds2 {
            min: self.min - d,
            max: self.max + d,
        }
    }

    /// Equal-aspect square around the centre whose half-size is
    /// `max(width, height, min_extent)/2 + padding`.
    pub fn squared(&self, padding: f64, min_extent: f64) -> Bounds2 {
        let range = self.width().max(self.height()).max(min_extent);
        let half = range / 2.0 + padding;
        let c = self.center();
        let d = Vector2::new(half, half);
        Bounds2 {
            min: c - d,
            max: c + d,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
