use super::*;
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

#[test]
fn point_on_circle_axes() {
    let c = vector![1.0, -2.0];
    let p = point_on_circle(c, 2.0, 90.0);
    assert!((p - vector![1.0, 0.0]).norm() < 1e-12);
    let q = point_on_circle(c, 2.0, 180.0);
    assert!((q - vector![-1.0, -2.0]).norm() < 1e-12);
}

#[test]
fn unit_vector_falls_back_to_up() {
    assert_eq!(unit_vector(vector![0.0, 0.0]), vector![0.0, 1.0]);
    assert_eq!(unit_vector(vector![1e-12, -1e-12]), vector![0.0, 1.0]);
    assert!(try_unit(vector![0.0, 0.0]).is_none());
    let u = unit_vector(vector![3.0, 4.0]);
    assert!((u - vector![0.6, 0.8]).norm() < 1e-12);
}

#[test]
fn perpendicular_is_ccw_and_unscaled() {
    assert_eq!(perpendicular(vector![2.0, 0.0]), vector![0.0, 2.0]);
    assert_eq!(perpendicular(vector![0.0, 1.0]), vector![-1.0, 0.0]);
}

#[test]
fn rotate_about_arbitrary_center() {
    let p = rotate_point(vector![2.0, 1.0], 90.0, vector![1.0, 1.0]);
    assert!((p - vector![1.0, 2.0]).norm() < 1e-12);
    let pts = rotate_points(&[vector![1.0, 0.0], vector![0.0, 1.0]], 180.0, Vector2::zeros());
    assert!((pts[0] - vector![-1.0, 0.0]).norm() < 1e-12);
    assert!((pts[1] - vector![0.0, -1.0]).norm() < 1e-12);
}

#[test]
fn normalize_degrees_wraps() {
    assert_eq!(normalize_degrees(370.0), 10.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(720.0), 0.0);
    let tiny = normalize_degrees(-1e-15);
    assert!((0.0..360.0).contains(&tiny));
}

#[test]
fn centroid_requires_points() {
    assert!(centroid(&[]).is_err());
    let c = centroid(&[vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 3.0]]).unwrap();
    assert!((c - vector![1.0, 1.0]).norm() < 1e-12);
}

#[test]
fn bounds_squared_and_padded() {
    let b = Bounds2::from_points(&[vector![0.0, 0.0], vector![4.0, 1.0]]).unwrap();
    assert_eq!(b.width(), 4.0);
    let s = b.squared(1.0, 0.0);
    assert!((s.width() - 6.0).abs() < 1e-12);
    assert!((s.height() - 6.0).abs() < 1e-12);
    assert!((s.center() - vector![2.0, 0.5]).norm() < 1e-12);
    let p = b.padded(0.5);
    assert_eq!(p.min, vector![-0.5, -0.5]);
    assert!(Bounds2::from_points(&[]).is_err());
}

#[test]
fn segment_helpers() {
    let s = Segment::new(vector![0.0, 0.0], vector![0.0, 2.0]);
    assert_eq!(s.length(), 2.0);
    assert_eq!(s.midpoint(), vector![0.0, 1.0]);
    assert_eq!(s.at(0.25), vector![0.0, 0.5]);
    assert_eq!(s.direction(), vector![0.0, 1.0]);
}

proptest! {
    #[test]
    fn point_on_circle_is_periodic(
        cx in -10.0f64..10.0,
        cy in -10.0f64..10.0,
        r in 0.01f64..20.0,
        theta in -720.0f64..720.0,
    ) {
        let c = vector![cx, cy];
        let p = point_on_circle(c, r, theta);
        let q = point_on_circle(c, r, theta + 360.0);
        prop_assert!((p - q).norm() < 1e-9);
    }

    #[test]
    fn unit_vector_is_unit_or_fallback(x in -1e3f64..1e3, y in -1e3f64..1e3) {
        let u = unit_vector(vector![x, y]);
        prop_assert!((u.norm() - 1.0).abs() < 1e-9);
    }
}
