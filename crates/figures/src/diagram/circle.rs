//! Circle with radii, chords, tangents, a highlighted arc, filled regions,
//! central-angle marks and labelled points.

use super::{dot, Figure, Pen, ShapeStyle};
use crate::annotate::marks::central_angle_arc;
use crate::annotate::{arc_label, place, Anchor, DirectionPolicy};
use crate::error::DiagramError;
use crate::kernel::{direction, point_on_circle, Point, Segment};
use crate::render::{z, Appearance, Color, Fill, LineStyle, Primitive, Scene, Stroke};
use crate::shapes::Circle;

const LINE_LABEL_DISTANCE: f64 = 0.4;
const ARC_LABEL_DISTANCE: f64 = 0.5;
const POINT_LABEL_DISTANCE: f64 = 0.4;
/// Dot radius for the centre and points on the circle, in data units.
const POINT_RADIUS: f64 = 0.08;
/// Central-angle labels start at this fraction of the marker radius.
const CENTRAL_LABEL_FRACTION: f64 = 0.6;
const ARC_WIDTH_SCALE: f64 = 1.5;

fn default_radius() -> f64 {
    3.0
}

fn tangent_length() -> f64 {
    4.0
}

fn region_opacity() -> f64 {
    0.3
}

fn central_radius() -> f64 {
    0.6
}

fn central_label_distance() -> f64 {
    0.3
}

fn default_padding() -> f64 {
    1.0
}

fn blue() -> Color {
    Color::named("blue")
}

/// A radius or diameter through the point at `angle`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineMark {
    pub angle: f64,
    #[serde(default)]
    pub label: String,
}

/// Chord between the points at two angles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChordMark {
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub label: String,
}

/// Tangent touching at `angle`; the label sits on its counter-clockwise half.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TangentMark {
    pub angle: f64,
    #[serde(default = "tangent_length")]
    pub length: f64,
    #[serde(default)]
    pub label: String,
}

/// Counter-clockwise arc drawn over the outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArcMark {
    pub start: f64,
    pub end: f64,
    /// Defaults to the circle colour.
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub label: String,
}

/// Sector or segment fill between two angles.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionMark {
    pub start: f64,
    pub end: f64,
    #[serde(default = "blue")]
    pub color: Color,
    #[serde(default = "region_opacity")]
    pub opacity: f64,
}

/// Small arc at the centre marking the (minor) angle between two radii.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CentralAngleMark {
    pub start: f64,
    pub end: f64,
    /// Marker radius in data units.
    #[serde(default = "central_radius")]
    pub radius: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default = "central_label_distance")]
    pub label_distance: f64,
}

/// Labelled dot on the circle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CirclePoint {
    pub angle: f64,
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleDiagram {
    #[serde(default = "super::origin")]
    pub center: Point,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub show_center: bool,
    #[serde(default)]
    pub center_label: String,
    #[serde(default)]
    pub radii: Vec<LineMark>,
    #[serde(default)]
    pub diameter: Option<LineMark>,
    #[serde(default)]
    pub chords: Vec<ChordMark>,
    #[serde(default)]
    pub tangents: Vec<TangentMark>,
    #[serde(default)]
    pub arc: Option<ArcMark>,
    #[serde(default)]
    pub sector: Option<RegionMark>,
    #[serde(default)]
    pub segment: Option<RegionMark>,
    #[serde(default)]
    pub central_angles: Vec<CentralAngleMark>,
    #[serde(default)]
    pub points: Vec<CirclePoint>,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl Default for CircleDiagram {
    fn default() -> Self {
        Self {
            center: Point::zeros(),
            radius: default_radius(),
            style: ShapeStyle::default(),
            show_center: false,
            center_label: String::new(),
            radii: Vec::new(),
            diameter: None,
            chords: Vec::new(),
            tangents: Vec::new(),
            arc: None,
            sector: None,
            segment: None,
            central_angles: Vec::new(),
            points: Vec::new(),
            padding: default_padding(),
        }
    }
}

impl CircleDiagram {
    pub fn circle(&self) -> Result<Circle, DiagramError> {
        Ok(Circle::new(self.center, self.radius)?)
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let circle = self.circle()?;
        let pen = Pen::new(appearance);
        let color = &self.style.color;
        let line = pen.stroke(color);
        let label = pen.label(color, 1.0);
        let mut scene = Scene::new();

        let mut regions = Vec::new();
        if let Some(m) = &self.sector {
            regions.push((m, circle.sector(m.start, m.end)?));
        }
        if let Some(m) = &self.segment {
            regions.push((m, circle.segment_region(m.start, m.end)?));
        }
        for (m, poly) in regions {
            scene.push(
                z::FILL + 2,
                Primitive::Polygon {
                    points: poly.into_vertices(),
                    fill: Some(Fill::new(m.color.clone(), m.opacity)),
                    stroke: None,
                },
            );
        }

        scene.push(
            z::SHAPE,
            Primitive::Circle {
                center: circle.center,
                radius: circle.radius,
                stroke: Some(line.clone().styled(self.style.line_style)),
                fill: self.style.fill.clone(),
            },
        );

        if let Some(a) = &self.arc {
            let arc_color = a.color.clone().unwrap_or_else(|| color.clone());
            let arc = circle.arc(a.start, a.end);
            let stroke = Stroke::new(arc_color.clone(), pen.line() * ARC_WIDTH_SCALE)
                .styled(a.line_style);
            scene.arc(z::SHAPE + 2, arc, stroke);
            if !a.label.is_empty() {
                let at = arc_label(&arc, ARC_LABEL_DISTANCE);
                scene.text(z::LABEL, at, a.label.as_str(), pen.label(&arc_color, 1.0));
            }
        }

        let mut lines: Vec<(Segment, Segment, &str)> = Vec::new();
        if let Some(d) = &self.diameter {
            let seg = circle.diameter(d.angle);
            lines.push((seg, seg, d.label.as_str()));
        }
        for r in &self.radii {
            let seg = circle.radius_segment(r.angle);
            lines.push((seg, seg, r.label.as_str()));
        }
        for c in &self.chords {
            let seg = circle.chord(c.from, c.to);
            lines.push((seg, seg, c.label.as_str()));
        }
        for t in &self.tangents {
            let seg = circle.tangent(t.angle, t.length);
            let touch = circle.point_at(t.angle);
            let half = Segment::new(touch, touch + direction(t.angle + 90.0) * (t.length / 2.0));
            lines.push((seg, half, t.label.as_str()));
        }
        for (seg, label_on, text) in lines {
            scene.segment(z::MARKER - 5, seg.start, seg.end, line.clone());
            if !text.is_empty() {
                let anchor = Anchor::Segment {
                    segment: label_on,
                    position: 0.5,
                    reference: None,
                };
                let at = place(&anchor, DirectionPolicy::Auto, LINE_LABEL_DISTANCE);
                scene.text(z::LABEL, at, text, label.clone());
            }
        }

        for ca in &self.central_angles {
            let arc = central_angle_arc(circle.center, ca.start, ca.end, ca.radius);
            scene.arc(z::MARKER - 5, arc, pen.mark_stroke(color));
            if !ca.label.is_empty() {
                let mid = (ca.start + ca.end) / 2.0;
                let base = point_on_circle(
                    circle.center,
                    ca.radius * CENTRAL_LABEL_FRACTION,
                    mid,
                );
                let anchor = Anchor::Point {
                    at: base,
                    reference: Some(circle.center),
                };
                let at = place(&anchor, DirectionPolicy::Auto, ca.label_distance);
                scene.text(z::LABEL, at, ca.label.as_str(), label.clone());
            }
        }

        if self.show_center {
            dot(&mut scene, z::MARKER, circle.center, POINT_RADIUS, color);
            if !self.center_label.is_empty() {
                let anchor = Anchor::Point {
                    at: circle.center,
                    reference: None,
                };
                let at = place(&anchor, DirectionPolicy::Below, POINT_LABEL_DISTANCE);
                scene.text(z::LABEL, at, self.center_label.as_str(), label.clone());
            }
        }

        for p in &self.points {
            let at = circle.point_at(p.angle);
            dot(&mut scene, z::MARKER + 5, at, POINT_RADIUS, color);
            if !p.label.is_empty() {
                let anchor = Anchor::Point {
                    at,
                    reference: Some(circle.center),
                };
                let pos = place(&anchor, DirectionPolicy::Auto, POINT_LABEL_DISTANCE);
                scene.text(z::LABEL, pos, p.label.as_str(), label.clone());
            }
        }

        Ok(Figure {
            scene,
            view: circle.bounds(self.padding),
        })
    }
}
