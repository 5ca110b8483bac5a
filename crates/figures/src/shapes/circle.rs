//! Circles and the lines, arcs and regions drawn on them.

use nalgebra::Vector2;

use super::Polygon;
use crate::error::{require_positive, GeomResult};
use crate::kernel::{direction, normalize_degrees, point_on_circle, Bounds2, Point, Segment};
use crate::queries::minor_sweep;

/// Points used to approximate an arc when it is turned into a polygon.
pub(crate) const ARC_SAMPLES: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> GeomResult<Self> {
        require_positive("radius", radius)?;
        Ok(Self { center, radius })
    }

    #[inline]
    pub fn point_at(&self, angle_deg: f64) -> Point {
        point_on_circle(self.center, self.radius, angle_deg)
    }

    pub fn radius_segment(&self, angle_deg: f64) -> Segment {
        Segment::new(self.center, self.point_at(angle_deg))
    }

    /// Diameter through the point at `angle_deg` and its antipode.
    pub fn diameter(&self, angle_deg: f64) -> Segment {
        Segment::new(self.point_at(angle_deg + 180.0), self.point_at(angle_deg))
    }

    pub fn chord(&self, angle1_deg: f64, angle2_deg: f64) -> Segment {
        Segment::new(self.point_at(angle1_deg), self.point_at(angle2_deg))
    }

    /// Tangent touching at `angle_deg`, extending `length / 2` either side.
    pub fn tangent(&self, angle_deg: f64, length: f64) -> Segment {
        let touch = self.point_at(angle_deg);
        let d = direction(angle_deg + 90.0) * (length / 2.0);
        Segment::new(touch - d, touch + d)
    }

    /// Counter-clockwise arc from `start_deg` to `end_deg`.
    pub fn arc(&self, start_deg: f64, end_deg: f64) -> Arc {
        Arc::new(self.center, self.radius, start_deg, end_deg)
    }

    /// Arc between the two angles that is at most a semicircle.
    pub fn minor_arc(&self, angle1_deg: f64, angle2_deg: f64) -> Arc {
        if normalize_degrees(angle2_deg - angle1_deg) > 180.0 {
            self.arc(angle2_deg, angle1_deg)
        } else {
            self.arc(angle1_deg, angle2_deg)
        }
    }

    /// Pie slice: the centre followed by the sampled arc.
    pub fn sector(&self, start_deg: f64, end_deg: f64) -> GeomResult<Polygon> {
        let mut pts = vec![self.center];
        pts.extend(self.arc(start_deg, end_deg).sample(ARC_SAMPLES));
        Polygon::new(pts)
    }

    /// Region between the arc and its chord (the polygon closes along the chord).
    pub fn segment_region(&self, start_deg: f64, end_deg: f64) -> GeomResult<Polygon> {
        Polygon::new(self.arc(start_deg, end_deg).sample(ARC_SAMPLES))
    }

    /// Square view around the circle.
    pub fn bounds(&self, padding: f64) -> Bounds2 {
        let half = self.radius + padding;
        let d = Vector2::new(half, half);
        Bounds2::new(self.center - d, self.center + d)
    }

    pub fn circumference(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.radius
    }

    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}

/// Counter-clockwise arc; `end_deg >= start_deg` always holds after construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl Arc {
    /// An `end` below `start` is lifted by 360° so the sweep stays counter-clockwise.
    pub fn new(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> Self {
        let end_deg = if end_deg < start_deg {
            end_deg + 360.0
        } else {
            end_deg
        };
        Self {
            center,
            radius,
            start_deg,
            end_deg,
        }
    }

    #[inline]
    pub fn sweep(&self) -> f64 {
        self.end_deg - self.start_deg
    }

    #[inline]
    pub fn mid_angle(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    pub fn start_point(&self) -> Point {
        point_on_circle(self.center, self.radius, self.start_deg)
    }

    pub fn end_point(&self) -> Point {
        point_on_circle(self.center, self.radius, self.end_deg)
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep().to_radians()
    }

    /// `n` evenly spaced points from start to end inclusive (`n >= 2`).
    pub fn sample(&self, n: usize) -> Vec<Point> {
        let n = n.max(2);
        let step = self.sweep() / (n - 1) as f64;
        (0..n)
            .map(|k| point_on_circle(self.center, self.radius, self.start_deg + step * k as f64))
            .collect()
    }

    /// Minor-arc sweep between the two end angles, in [0, 180].
    pub fn minor_sweep(&self) -> f64 {
        minor_sweep(self.start_deg, self.end_deg)
    }
}
