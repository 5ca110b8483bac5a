use super::*;
use crate::kernel::{point_on_circle, Point};
use crate::shapes::{quad, triangle, Polygon};
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

#[test]
fn three_four_five_has_right_angle_at_c() {
    let t = triangle::from_sss(3.0, 4.0, 5.0, Point::zeros(), 0.0).unwrap();
    assert!((t.vertex_angle(2) - 90.0).abs() < 1e-9);
    assert!(t.is_right_angle(2, 1e-6));
    assert!(!t.is_right_angle(0, 1e-6));
}

#[test]
fn side_queries_follow_side_order() {
    let t = triangle::from_sss(3.0, 4.0, 5.0, Point::zeros(), 0.0).unwrap();
    assert_eq!(t.side_lengths().len(), 3);
    assert!((t.side_length(0) - 5.0).abs() < 1e-12);
    assert!((t.side_midpoint(0) - Point::zeros()).norm() < 1e-12);
    assert!(t.side_angle(0).abs() < 1e-12);
    // outward normal of the base points down, away from C
    let n = t.outward_normal(0);
    assert!((n - vector![0.0, -1.0]).norm() < 1e-12);
}

#[test]
fn bisector_points_inside_and_handles_straight_angles() {
    let t = triangle::from_sss(2.0, 2.0, 2.0, Point::zeros(), 0.0).unwrap();
    for i in 0..3 {
        let b = t.angle_bisector(i);
        assert!((b.norm() - 1.0).abs() < 1e-12);
        assert!(b.dot(&(t.centroid() - t.vertex(i))) > 0.0);
    }
    // collinear middle vertex
    let flat = Polygon::new(vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![1.0, 1.0],
    ])
    .unwrap();
    let b = flat.angle_bisector(1);
    assert!((b.norm() - 1.0).abs() < 1e-12);
    assert!(b.x.abs() < 1e-12);
    assert!((flat.vertex_angle(1) - 180.0).abs() < 1e-9);
}

#[test]
fn zero_length_edge_gives_finite_angle() {
    let p = Polygon::new(vec![vector![0.0, 0.0], vector![0.0, 0.0], vector![1.0, 1.0]]).unwrap();
    assert!(p.vertex_angle(0).is_finite());
    assert!(p.vertex_angle(1).is_finite());
    assert!(p.angle_bisector(1).norm().is_finite());
}

#[test]
fn interior_arc_sweeps_the_interior_angle() {
    let s = quad::square(2.0, Point::zeros(), 0.0).unwrap();
    for i in 0..4 {
        let (a1, a2) = s.interior_arc_angles(i);
        let sweep = crate::kernel::normalize_degrees(a2 - a1);
        assert!((sweep - 90.0).abs() < 1e-9);
    }
    // vertex A of the square sees D straight up and B to the right: 0°..90°
    let (a1, a2) = s.interior_arc_angles(0);
    assert!((a1 - 0.0).abs() < 1e-9 && (a2 - 90.0).abs() < 1e-9);
}

#[test]
fn chord_special_cases() {
    assert!(chord_length(2.0, 40.0, 40.0).abs() < 1e-12);
    assert!((chord_length(2.0, 40.0, 220.0) - 4.0).abs() < 1e-12);
    assert!((segment_area(1.0, 0.0, 180.0) - PI / 2.0).abs() < 1e-12);
    assert!((minor_sweep(350.0, 10.0) - 20.0).abs() < 1e-12);
    assert!((sweep(350.0, 10.0, ArcChoice::Major) - 340.0).abs() < 1e-12);
    assert!((arc_length_with(1.0, 0.0, 90.0, ArcChoice::Major) - 1.5 * PI).abs() < 1e-12);
    assert_eq!(minor_sweep(0.0, 360.0), 0.0);
}

#[test]
fn chord_matches_point_distance_randomized() {
    let mut rng = StdRng::seed_from_u64(0xC0DE);
    for _ in 0..200 {
        let r = rng.gen_range(0.1..10.0);
        let a = rng.gen_range(-720.0..720.0);
        let b = rng.gen_range(-720.0..720.0);
        let c = vector![rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0)];
        let direct = (point_on_circle(c, r, a) - point_on_circle(c, r, b)).norm();
        assert!((chord_length(r, a, b) - direct).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn sss_reproduces_side_lengths(
        a in 0.5f64..10.0,
        b in 0.5f64..10.0,
        t in 0.05f64..0.95,
        angle in -180.0f64..180.0,
        cx in -5.0f64..5.0,
        cy in -5.0f64..5.0,
    ) {
        // c strictly inside (|a-b|, a+b)
        let lo = (a - b).abs();
        let c = lo + t * (a + b - lo);
        prop_assume!(c > 1e-3);
        let tri = triangle::from_sss(a, b, c, vector![cx, cy], angle).unwrap();
        prop_assert!((tri.side_length(0) - c).abs() < 1e-6);
        prop_assert!((tri.side_length(1) - a).abs() < 1e-6);
        prop_assert!((tri.side_length(2) - b).abs() < 1e-6);
        let sum: f64 = tri.vertex_angles().iter().sum();
        prop_assert!((sum - 180.0).abs() < 1e-4);
    }

    #[test]
    fn outward_normals_point_away_from_centroid(
        side in 0.5f64..5.0,
        other in 0.5f64..5.0,
        angle in 20.0f64..160.0,
        rot in -180.0f64..180.0,
    ) {
        let shapes = [
            quad::parallelogram(side, other, angle, Point::zeros(), rot).unwrap(),
            quad::rectangle(side, other, vector![1.0, 2.0], rot).unwrap(),
            quad::kite(side, other, 0.3, Point::zeros(), rot).unwrap(),
        ];
        for p in &shapes {
            for i in 0..p.len() {
                let n = p.outward_normal(i);
                prop_assert!((n.norm() - 1.0).abs() < 1e-9);
                prop_assert!(n.dot(&(p.centroid() - p.side_midpoint(i))) <= 1e-12);
            }
        }
    }

    #[test]
    fn minor_plus_major_sector_is_full_disc(
        r in 0.01f64..50.0,
        a in -720.0f64..720.0,
        b in -720.0f64..720.0,
    ) {
        let total = sector_area_with(r, a, b, ArcChoice::Minor)
            + sector_area_with(r, a, b, ArcChoice::Major);
        prop_assert!((total - PI * r * r).abs() < 1e-9 * r * r.max(1.0));
        prop_assert!(minor_sweep(a, b) <= 180.0);
        prop_assert!(segment_area(r, a, b) <= sector_area(r, a, b) + 1e-12);
    }
}
