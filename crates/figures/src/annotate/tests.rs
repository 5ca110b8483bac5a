use super::marks::*;
use super::*;
use crate::kernel::{Point, Segment};
use crate::shapes::{quad, triangle, Circle};
use nalgebra::vector;
use proptest::prelude::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).norm() < 1e-9
}

#[test]
fn point_auto_moves_away_from_reference() {
    let a = Anchor::Point {
        at: vector![2.0, 0.0],
        reference: Some(Point::zeros()),
    };
    assert!(close(place(&a, DirectionPolicy::Auto, 0.5), vector![2.5, 0.0]));
    // coincident reference falls back to up
    let same = Anchor::Point {
        at: vector![1.0, 1.0],
        reference: Some(vector![1.0, 1.0]),
    };
    assert!(close(place(&same, DirectionPolicy::Auto, 1.0), vector![1.0, 2.0]));
    let bare = Anchor::Point {
        at: Point::zeros(),
        reference: None,
    };
    assert!(close(place(&bare, DirectionPolicy::Auto, 1.0), vector![0.0, 1.0]));
    assert!(close(place(&bare, DirectionPolicy::Angle(180.0), 2.0), vector![-2.0, 0.0]));
    let d = place(&bare, DirectionPolicy::BelowRight, 1.0);
    assert!((d.norm() - 1.0).abs() < 1e-12 && d.x > 0.0 && d.y < 0.0);
}

#[test]
fn segment_policies_pick_a_side() {
    // segment running right-to-left: its left normal points down
    let seg = Segment::new(vector![1.0, 0.0], vector![-1.0, 0.0]);
    let no_ref = Anchor::Segment {
        segment: seg,
        position: 0.5,
        reference: None,
    };
    assert!(close(place(&no_ref, DirectionPolicy::Auto, 1.0), vector![0.0, -1.0]));
    assert!(close(place(&no_ref, DirectionPolicy::Above, 1.0), vector![0.0, 1.0]));
    assert!(close(place(&no_ref, DirectionPolicy::Below, 1.0), vector![0.0, -1.0]));
    let with_ref = Anchor::Segment {
        segment: seg,
        position: 0.25,
        reference: Some(vector![0.0, -3.0]),
    };
    assert!(close(place(&with_ref, DirectionPolicy::Auto, 1.0), vector![0.5, 1.0]));

    // vertical segment: left/right pick the horizontal normal
    let vert = Anchor::Segment {
        segment: Segment::new(vector![0.0, 0.0], vector![0.0, 2.0]),
        position: 0.5,
        reference: None,
    };
    assert!(close(place(&vert, DirectionPolicy::Left, 1.0), vector![-1.0, 1.0]));
    assert!(close(place(&vert, DirectionPolicy::Right, 1.0), vector![1.0, 1.0]));
}

#[test]
fn zero_length_segment_uses_fallback() {
    let seg = Anchor::Segment {
        segment: Segment::new(vector![1.0, 1.0], vector![1.0, 1.0]),
        position: 0.5,
        reference: None,
    };
    let p = place(&seg, DirectionPolicy::Auto, 1.0);
    assert!(p.x.is_finite() && p.y.is_finite());
    assert!(close(p, vector![1.0, 2.0]));
}

#[test]
fn arc_label_sits_outside_midpoint() {
    let c = Circle::new(vector![1.0, 1.0], 2.0).unwrap();
    let arc = c.arc(0.0, 90.0);
    let p = arc_label(&arc, 0.5);
    let expected = c.center + vector![1.0, 1.0].normalize() * 2.5;
    assert!(close(p, expected));
    // wraparound arc: midpoint at 0°
    let wrap = c.arc(330.0, 30.0);
    assert!(close(arc_label(&wrap, 0.0), vector![3.0, 1.0]));
}

#[test]
fn polygon_label_helpers() {
    let t = triangle::from_sss(3.0, 4.0, 5.0, Point::zeros(), 0.0).unwrap();
    let v = vertex_label(&t, 0, DirectionPolicy::Auto, 0.4);
    assert!((v - t.vertex(0)).dot(&(t.vertex(0) - t.centroid())) > 0.0);
    let s = side_label(&t, 0, 0.5, DirectionPolicy::Auto, 0.3);
    assert!(close(s, vector![0.0, -0.3]));
    let a = angle_label(&t, 2, DirectionPolicy::Auto, 0.6);
    assert!((a - t.vertex(2)).dot(&(t.centroid() - t.vertex(2))) > 0.0);
    let fixed = angle_label(&t, 2, DirectionPolicy::Above, 0.6);
    assert!(close(fixed, t.vertex(2) + vector![0.0, 0.6]));
    let below = side_label(&t, 1, 0.5, DirectionPolicy::Below, 0.3);
    assert!(below.y < t.side_midpoint(1).y);
}

#[test]
fn ticks_are_centred_and_perpendicular() {
    let sq = quad::square(2.0, Point::zeros(), 0.0).unwrap();
    let ticks = tick_marks(&sq, 0, 3, TickStyle::quad());
    assert_eq!(ticks.len(), 3);
    assert!(close(ticks[1].midpoint(), vector![0.0, -1.0]));
    assert!((ticks[2].midpoint().x - 0.15).abs() < 1e-12);
    for t in &ticks {
        assert!((t.length() - 0.25).abs() < 1e-12);
        assert!(t.vector().x.abs() < 1e-12);
    }
    assert!(tick_marks(&sq, 0, 0, TickStyle::default()).is_empty());
}

#[test]
fn parallel_arrows_point_along_side() {
    let seg = Segment::new(vector![0.0, 0.0], vector![4.0, 0.0]);
    let arrows = parallel_arrows(&seg, 2, ArrowStyle::default());
    assert_eq!(arrows.len(), 2);
    let [w1, tip, w2] = arrows[0];
    assert!(close(tip, vector![1.9, 0.0]));
    assert!(w1.x < tip.x && w2.x < tip.x);
    assert!((w1.y - 0.12).abs() < 1e-12 && (w2.y + 0.12).abs() < 1e-12);
}

#[test]
fn right_angle_marker_corner() {
    let t = triangle::from_sss(3.0, 4.0, 5.0, Point::zeros(), 0.0).unwrap();
    let [p1, corner, p3] = right_angle_marker_at(&t, 2, 0.3);
    assert!(((p1 - t.vertex(2)).norm() - 0.3).abs() < 1e-12);
    assert!(((p3 - t.vertex(2)).norm() - 0.3).abs() < 1e-12);
    assert!(((corner - t.vertex(2)).norm() - 0.3 * 2f64.sqrt()).abs() < 1e-9);
}

#[test]
fn central_angle_arc_takes_shorter_way() {
    let a = central_angle_arc(Point::zeros(), 30.0, 300.0, 0.4);
    assert_eq!(a.start_deg, 300.0);
    assert!((a.sweep() - 90.0).abs() < 1e-12);
    let b = central_angle_arc(Point::zeros(), 30.0, 120.0, 0.4);
    assert_eq!((b.start_deg, b.end_deg), (30.0, 120.0));
}

#[test]
fn arrow_head_is_symmetric() {
    let [tip, l, r] = arrow_head(vector![1.0, 1.0], vector![0.0, 2.0], 0.2, 0.1);
    assert_eq!(tip, vector![1.0, 1.0]);
    assert!(close((l + r) / 2.0, vector![1.0, 0.8]));
    assert!(((l - r).norm() - 0.1).abs() < 1e-12);
}

#[test]
fn direction_policy_serde() {
    let p: DirectionPolicy = serde_json::from_str(r#"{"angle":45.0}"#).unwrap();
    assert_eq!(p, DirectionPolicy::Angle(45.0));
    let q: DirectionPolicy = serde_json::from_str(r#""above_left""#).unwrap();
    assert_eq!(q, DirectionPolicy::AboveLeft);
}

proptest! {
    #[test]
    fn placement_distance_is_exact(
        x in -5.0f64..5.0,
        y in -5.0f64..5.0,
        rx in -5.0f64..5.0,
        ry in -5.0f64..5.0,
        d in 0.0f64..3.0,
        angle in -360.0f64..360.0,
    ) {
        let a = Anchor::Point { at: vector![x, y], reference: Some(vector![rx, ry]) };
        let policies = [
            DirectionPolicy::Auto,
            DirectionPolicy::AboveLeft,
            DirectionPolicy::Angle(angle),
        ];
        for policy in policies {
            let p = place(&a, policy, d);
            prop_assert!(((p - vector![x, y]).norm() - d).abs() < 1e-9);
        }
    }

    #[test]
    fn angle_arc_sweep_equals_vertex_angle(
        a in 0.5f64..5.0,
        b in 0.5f64..5.0,
        t in 0.05f64..0.95,
        rot in -180.0f64..180.0,
    ) {
        let lo = (a - b).abs();
        let c = lo + t * (a + b - lo);
        prop_assume!(c > 1e-3);
        let tri = triangle::from_sss(a, b, c, Point::zeros(), rot).unwrap();
        for i in 0..3 {
            let arc = angle_arc(&tri, i, 0.4);
            prop_assert!((arc.sweep() - tri.vertex_angle(i)).abs() < 1e-6);
        }
    }
}
