use crate::kernel::{
    angle_of, normalize_degrees, perpendicular, try_unit, unit_vector, Point, Vec2,
    DEGENERATE_EPS,
};
use crate::shapes::Polygon;

impl Polygon {
    /// Vectors from vertex `i` to its previous and next neighbours.
    #[inline]
    pub fn edge_vectors(&self, i: usize) -> (Vec2, Vec2) {
        let v = self.vertex(i);
        (
            self.vertex(self.prev_index(i)) - v,
            self.vertex(self.next_index(i)) - v,
        )
    }

    /// Interior (non-reflex) angle at vertex `i`, in degrees.
    ///
    /// The cosine is clipped to [-1, 1]; a zero-length neighbouring edge gives 0.
    pub fn vertex_angle(&self, i: usize) -> f64 {
        let (v1, v2) = self.edge_vectors(i);
        let denom = v1.norm() * v2.norm();
        if denom < DEGENERATE_EPS {
            return 0.0;
        }
        (v1.dot(&v2) / denom).clamp(-1.0, 1.0).acos().to_degrees()
    }

    pub fn is_right_angle(&self, i: usize, tol_deg: f64) -> bool {
        (self.vertex_angle(i) - 90.0).abs() <= tol_deg
    }

    #[inline]
    pub fn side_length(&self, i: usize) -> f64 {
        self.side(i).length()
    }

    #[inline]
    pub fn side_midpoint(&self, i: usize) -> Point {
        self.side(i).midpoint()
    }

    /// Direction of side `i` relative to +x, in degrees.
    #[inline]
    pub fn side_angle(&self, i: usize) -> f64 {
        angle_of(self.side(i).vector())
    }

    /// Interior reference used to decide which side of an edge is "outside".
    fn interior_reference(&self, side: usize) -> Point {
        if self.len() == 3 {
            self.vertex(side + 2)
        } else {
            self.centroid()
        }
    }

    /// Unit normal of side `i` pointing away from the polygon interior.
    pub fn outward_normal(&self, i: usize) -> Vec2 {
        let side = self.side(i);
        let mut n = unit_vector(perpendicular(side.vector()));
        let to_inside = self.interior_reference(i) - side.midpoint();
        if n.dot(&to_inside) > 0.0 {
            n = -n;
        }
        n
    }

    /// Unit bisector of the angle at vertex `i`, pointing between the two edges.
    ///
    /// For a straight (180°) vertex the edges cancel; the perpendicular of the
    /// first edge is used instead.
    pub fn angle_bisector(&self, i: usize) -> Vec2 {
        let (v1, v2) = self.edge_vectors(i);
        let u1 = unit_vector(v1);
        let u2 = unit_vector(v2);
        match try_unit(u1 + u2) {
            Some(b) => b,
            None => perpendicular(u1),
        }
    }

    /// Start/end angles (degrees) of the arc marking the interior angle at `i`.
    ///
    /// Sweeping counter-clockwise from start to end covers the non-reflex angle;
    /// `end` may be numerically smaller than `start` when the sweep crosses 0°.
    pub fn interior_arc_angles(&self, i: usize) -> (f64, f64) {
        let (v1, v2) = self.edge_vectors(i);
        let a1 = normalize_degrees(angle_of(v1));
        let a2 = normalize_degrees(angle_of(v2));
        if normalize_degrees(a2 - a1) > 180.0 {
            (a2, a1)
        } else {
            (a1, a2)
        }
    }

    /// Lengths of every side, in side order.
    pub fn side_lengths(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.side_length(i)).collect()
    }

    /// Interior angles at every vertex, in vertex order.
    pub fn vertex_angles(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.vertex_angle(i)).collect()
    }
}
