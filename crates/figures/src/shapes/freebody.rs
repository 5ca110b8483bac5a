//! Free-body scenes: blocks, particles, inclined planes, supports and force arrows.

use nalgebra::Vector2;

use super::{place_local, Arc, Circle, Polygon};
use crate::error::{require_positive, GeomResult, GeometryError};
use crate::kernel::{direction, lerp, midpoint, Point, Segment, Vec2};

pub const HATCH_SPACING: f64 = 0.25;
/// One hatch stroke, drawn from a point on the ground line.
pub const HATCH_STROKE: (f64, f64) = (-0.1, -0.15);
pub const INCLINE_ARC_RADIUS: f64 = 0.3;
pub const INCLINE_LABEL_RADIUS: f64 = 0.5;
pub const PARTICLE_RADIUS: f64 = 0.15;

/// Block corners `[bl, br, tr, tl]` rotated by `angle_deg` about `center`.
pub fn block(center: Point, width: f64, height: f64, angle_deg: f64) -> GeomResult<Polygon> {
    let hw = require_positive("block width", width)? / 2.0;
    let hh = require_positive("block height", height)? / 2.0;
    let local = [
        Vector2::new(-hw, -hh),
        Vector2::new(hw, -hh),
        Vector2::new(hw, hh),
        Vector2::new(-hw, hh),
    ];
    Polygon::new(place_local(&local, angle_deg, center))
}

/// Short diagonal strokes under a ground line starting at `x0`.
pub fn hatching(x0: f64, length: f64, y: f64) -> Vec<Segment> {
    let count = (length * 4.0).floor().max(0.0) as usize;
    let stroke = Vector2::new(HATCH_STROKE.0, HATCH_STROKE.1);
    (0..count)
        .map(|i| {
            let p = Vector2::new(x0 + i as f64 * HATCH_SPACING, y);
            Segment::new(p, p + stroke)
        })
        .collect()
}

/// Horizontal ground line with hatching.
#[derive(Clone, Debug, PartialEq)]
pub struct Ground {
    pub line: Segment,
    pub hatches: Vec<Segment>,
}

pub fn ground(x0: f64, x1: f64, y: f64) -> Ground {
    Ground {
        line: Segment::new(Vector2::new(x0, y), Vector2::new(x1, y)),
        hatches: hatching(x0, x1 - x0, y),
    }
}

/// Right-angled wedge rising to the right: base from `base_left`, apex above
/// the right end of the base.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Incline {
    pub base_left: Point,
    pub length: f64,
    pub angle_deg: f64,
}

impl Incline {
    pub fn new(base_left: Point, length: f64, angle_deg: f64) -> GeomResult<Self> {
        require_positive("incline length", length)?;
        if !(angle_deg > 0.0 && angle_deg < 90.0) {
            return Err(GeometryError::invalid(format!(
                "incline angle must lie strictly between 0 and 90 degrees (got {angle_deg})"
            )));
        }
        Ok(Self {
            base_left,
            length,
            angle_deg,
        })
    }

    pub fn base_right(&self) -> Point {
        self.base_left + Vector2::new(self.length, 0.0)
    }

    pub fn top(&self) -> Point {
        Vector2::new(
            self.base_left.x + self.length,
            self.base_left.y + self.length * self.angle_deg.to_radians().tan(),
        )
    }

    pub fn outline(&self) -> GeomResult<Polygon> {
        Polygon::new(vec![self.base_left, self.base_right(), self.top()])
    }

    /// Sloped face from the bottom-left corner up to the apex.
    pub fn surface(&self) -> Segment {
        Segment::new(self.base_left, self.top())
    }

    pub fn surface_length(&self) -> f64 {
        self.length / self.angle_deg.to_radians().cos()
    }

    pub fn surface_point(&self, fraction: f64) -> Point {
        lerp(self.base_left, self.top(), fraction)
    }

    /// Unit normal of the sloped face, pointing away from the wedge.
    pub fn normal(&self) -> Vec2 {
        direction(90.0 + self.angle_deg)
    }

    pub fn hatches(&self) -> Vec<Segment> {
        hatching(self.base_left.x, self.length, self.base_left.y)
    }

    /// Arc marking the incline angle where the slope meets the base.
    pub fn angle_arc(&self) -> Arc {
        Arc::new(self.base_left, INCLINE_ARC_RADIUS, 0.0, self.angle_deg)
    }

    /// Label position inside the angle, on its bisector.
    pub fn angle_label_anchor(&self) -> Point {
        self.base_left + direction(self.angle_deg / 2.0) * INCLINE_LABEL_RADIUS
    }
}

/// Direction of a force, either absolute or relative to the incline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceDirection {
    Degrees(f64),
    /// Perpendicular to the surface, away from it.
    Normal,
    UpSlope,
    DownSlope,
}

impl ForceDirection {
    /// Absolute angle in degrees for a surface inclined at `incline_deg`
    /// (0 for flat ground).
    pub fn resolve(&self, incline_deg: f64) -> f64 {
        match *self {
            Self::Degrees(a) => a,
            Self::Normal => 90.0 + incline_deg,
            Self::UpSlope => incline_deg,
            Self::DownSlope => 180.0 + incline_deg,
        }
    }
}

/// Where a force's label sits relative to its arrow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceLabelPosition {
    #[default]
    End,
    Mid,
    Start,
}

pub fn force_label_anchor(
    start: Point,
    end: Point,
    angle_deg: f64,
    position: ForceLabelPosition,
) -> Point {
    let d = direction(angle_deg);
    match position {
        ForceLabelPosition::End => end + d * 0.15,
        ForceLabelPosition::Mid => midpoint(start, end) + direction(angle_deg + 90.0) * 0.2,
        ForceLabelPosition::Start => start - d * 0.15,
    }
}

/// Physical kind of a force; picks its default colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceKind {
    Weight,
    Normal,
    Friction,
    Applied,
    Tension,
}

impl ForceKind {
    /// Palette name.
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Weight => "blue",
            Self::Normal => "green",
            Self::Friction => "orange",
            Self::Applied => "red",
            Self::Tension => "purple",
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Force {
    pub name: String,
    pub direction: ForceDirection,
    pub magnitude: f64,
    pub kind: ForceKind,
    #[serde(default)]
    pub label_position: ForceLabelPosition,
}

impl Force {
    fn new(name: &str, direction: ForceDirection, magnitude: f64, kind: ForceKind) -> Self {
        Self {
            name: name.to_string(),
            direction,
            magnitude,
            kind,
            label_position: ForceLabelPosition::End,
        }
    }
}

/// Setting the object sits in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Setting {
    Flat,
    Incline { angle: f64 },
    Hanging,
    TwoStrings,
    Particle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Block(Polygon),
    Particle(Circle),
}

/// Resolved geometry of a setting: the body, what supports it, and where
/// forces start.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub center: Point,
    pub body: Body,
    pub incline_deg: f64,
    pub incline: Option<Incline>,
    pub ground: Option<Ground>,
    /// Strings and the ceiling bar they hang from.
    pub supports: Vec<Segment>,
}

impl Setting {
    pub fn layout(&self) -> GeomResult<Layout> {
        let origin = Point::zeros();
        Ok(match *self {
            Setting::Flat => Layout {
                center: origin,
                body: Body::Block(block(origin, 1.0, 0.8, 0.0)?),
                incline_deg: 0.0,
                incline: None,
                ground: Some(ground(-2.0, 2.0, -0.4)),
                supports: Vec::new(),
            },
            Setting::Incline { angle } => {
                let incline = Incline::new(Vector2::new(-1.5, -1.5), 3.0, angle)?;
                let (w, h) = (0.8, 0.6);
                let center = incline.surface_point(0.5) + incline.normal() * (h / 2.0);
                Layout {
                    center,
                    body: Body::Block(block(center, w, h, angle)?),
                    incline_deg: angle,
                    incline: Some(incline),
                    ground: None,
                    supports: Vec::new(),
                }
            }
            Setting::Hanging => Layout {
                center: origin,
                body: Body::Block(block(origin, 0.8, 0.6, 0.0)?),
                incline_deg: 0.0,
                incline: None,
                ground: None,
                supports: vec![
                    Segment::new(Vector2::new(0.0, 0.3), Vector2::new(0.0, 1.5)),
                    Segment::new(Vector2::new(-0.3, 1.5), Vector2::new(0.3, 1.5)),
                ],
            },
            Setting::TwoStrings => Layout {
                center: origin,
                body: Body::Particle(Circle::new(origin, PARTICLE_RADIUS)?),
                incline_deg: 0.0,
                incline: None,
                ground: None,
                supports: vec![
                    Segment::new(origin, Vector2::new(-1.2, 1.2)),
                    Segment::new(origin, Vector2::new(1.2, 1.2)),
                ],
            },
            Setting::Particle => Layout {
                center: origin,
                body: Body::Particle(Circle::new(origin, PARTICLE_RADIUS)?),
                incline_deg: 0.0,
                incline: None,
                ground: Some(ground(-1.5, 1.5, -0.15)),
                supports: Vec::new(),
            },
        })
    }
}

/// A named scenario: setting plus its forces.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeBodyPreset {
    pub key: &'static str,
    pub title: &'static str,
    pub setting: Setting,
    pub forces: Vec<Force>,
}

pub const FREEBODY_PRESET_KEYS: [&str; 7] = [
    "flat",
    "pushed",
    "incline",
    "sliding",
    "hanging",
    "two_strings",
    "particle",
];

pub fn freebody_preset(key: &str) -> Option<FreeBodyPreset> {
    use ForceDirection::{Degrees, Normal, UpSlope};
    use ForceKind as K;
    let weight = |m| Force::new("W", Degrees(270.0), m, K::Weight);
    let (title, setting, forces) = match key {
        "flat" => (
            "Block on flat surface",
            Setting::Flat,
            vec![weight(1.2), Force::new("N", Degrees(90.0), 1.2, K::Normal)],
        ),
        "pushed" => (
            "Block being pushed",
            Setting::Flat,
            vec![
                weight(1.0),
                Force::new("N", Degrees(90.0), 1.0, K::Normal),
                Force::new("F", Degrees(0.0), 0.8, K::Applied),
                Force::new("f", Degrees(180.0), 0.5, K::Friction),
            ],
        ),
        "incline" => (
            "Block on inclined plane",
            Setting::Incline { angle: 30.0 },
            vec![
                weight(1.2),
                Force::new("N", Normal, 1.0, K::Normal),
                Force::new("f", UpSlope, 0.6, K::Friction),
            ],
        ),
        "sliding" => (
            "Block sliding down",
            Setting::Incline { angle: 40.0 },
            vec![
                weight(1.2),
                Force::new("N", Normal, 0.9, K::Normal),
                Force::new("f", UpSlope, 0.4, K::Friction),
            ],
        ),
        "hanging" => (
            "Hanging object",
            Setting::Hanging,
            vec![weight(1.2), Force::new("T", Degrees(90.0), 1.2, K::Tension)],
        ),
        "two_strings" => (
            "Object on two strings",
            Setting::TwoStrings,
            vec![
                weight(1.0),
                Force::new("T₁", Degrees(120.0), 0.8, K::Tension),
                Force::new("T₂", Degrees(60.0), 0.8, K::Tension),
            ],
        ),
        "particle" => (
            "Particle (simple)",
            Setting::Particle,
            vec![weight(1.0), Force::new("N", Degrees(90.0), 1.0, K::Normal)],
        ),
        _ => return None,
    };
    let key = FREEBODY_PRESET_KEYS.iter().copied().find(|k| *k == key)?;
    Some(FreeBodyPreset {
        key,
        title,
        setting,
        forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn incline_geometry() {
        let inc = Incline::new(vector![-1.5, -1.5], 3.0, 45.0).unwrap();
        assert!((inc.top() - vector![1.5, 1.5]).norm() < 1e-12);
        assert!((inc.surface_length() - 3.0 * 2f64.sqrt()).abs() < 1e-12);
        assert!((inc.surface().length() - inc.surface_length()).abs() < 1e-9);
        assert!((inc.surface_point(0.5) - vector![0.0, 0.0]).norm() < 1e-12);
        let arc = inc.angle_arc();
        assert!((arc.sweep() - 45.0).abs() < 1e-12);
        assert!((arc.center - inc.base_left).norm() < 1e-12);
        let label = inc.angle_label_anchor() - inc.base_left;
        assert!((label.y.atan2(label.x).to_degrees() - 22.5).abs() < 1e-9);
        assert_eq!(inc.hatches().len(), 12);
        assert!(Incline::new(vector![0.0, 0.0], 3.0, 90.0).is_err());
    }

    #[test]
    fn slope_directions_follow_the_surface() {
        let inc = Incline::new(vector![0.0, 0.0], 2.0, 30.0).unwrap();
        let up = direction(ForceDirection::UpSlope.resolve(30.0));
        assert!((up - inc.surface().direction()).norm() < 1e-12);
        let n = direction(ForceDirection::Normal.resolve(30.0));
        assert!(n.dot(&up).abs() < 1e-12);
        assert!(n.y > 0.0);
        assert_eq!(ForceDirection::Degrees(270.0).resolve(30.0), 270.0);
    }

    #[test]
    fn block_rests_on_incline() {
        let layout = Setting::Incline { angle: 30.0 }.layout().unwrap();
        let inc = layout.incline.unwrap();
        let Body::Block(b) = layout.body else {
            panic!("incline body is a block")
        };
        // bottom edge of the rotated block lies on the surface line
        let s = inc.surface();
        for v in [b.vertex(0), b.vertex(1)] {
            let cross = (s.end - s.start).perp(&(v - s.start));
            assert!(cross.abs() < 1e-9);
        }
    }

    #[test]
    fn force_label_positions() {
        let s = vector![0.0, 0.0];
        let e = vector![1.0, 0.0];
        let at = |pos| force_label_anchor(s, e, 0.0, pos);
        assert!((at(ForceLabelPosition::End) - vector![1.15, 0.0]).norm() < 1e-12);
        assert!((at(ForceLabelPosition::Mid) - vector![0.5, 0.2]).norm() < 1e-12);
        assert!((at(ForceLabelPosition::Start) - vector![-0.15, 0.0]).norm() < 1e-12);
    }

    #[test]
    fn every_preset_key_resolves() {
        for key in FREEBODY_PRESET_KEYS {
            let p = freebody_preset(key).unwrap();
            assert!(p.setting.layout().is_ok());
            assert!(!p.forces.is_empty());
        }
        assert!(freebody_preset("nope").is_none());
    }
}
