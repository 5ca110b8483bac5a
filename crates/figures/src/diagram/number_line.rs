//! Number line with ticks, intervals, points and braces.

use nalgebra::Vector2;

use super::{arrow, dot, ring, yes, Figure, Pen};
use crate::annotate::marks::arrow_head;
use crate::error::DiagramError;
use crate::kernel::{Point, Segment};
use crate::render::{
    z, Appearance, Color, Fill, HAlign, LineStyle, Primitive, Scene, Stroke, VAlign,
};
use crate::shapes::number_line::{format_tick_label, EndpointStyle, NumberLine, TickFormat};

/// Height of the shaded band behind an interval.
const FILL_HEIGHT: f64 = 0.4;
const FILL_OPACITY: f64 = 0.2;
/// Gap between the bottom of a major tick and its label.
const TICK_LABEL_GAP: f64 = 0.2;
const MARKER_RADIUS: f64 = 0.1;
const POINT_LABEL_OFFSET: f64 = 0.4;
const INTERVAL_WIDTH_SCALE: f64 = 1.5;
const VIEW_PADDING: f64 = 0.15;
/// Arrowhead length in data units, at the line ends and on interval arrows.
const HEAD: f64 = 0.15;

fn default_min() -> f64 {
    -5.0
}

fn default_max() -> f64 {
    5.0
}

fn default_step() -> f64 {
    1.0
}

fn default_tick_length() -> f64 {
    0.3
}

fn axis_color() -> Color {
    Color::axis()
}

fn blue() -> Color {
    Color::named("blue")
}

fn brace_offset() -> f64 {
    0.4
}

/// Which side of the line a point label sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSide {
    #[default]
    Above,
    Below,
}

/// A highlighted range with styled ends.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IntervalMark {
    pub start: f64,
    pub end: f64,
    #[serde(default = "blue")]
    pub color: Color,
    #[serde(default)]
    pub start_style: EndpointStyle,
    #[serde(default)]
    pub end_style: EndpointStyle,
    /// Shade a band behind the interval.
    #[serde(default = "yes")]
    pub fill: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointMark {
    pub value: f64,
    /// Hollow marker.
    #[serde(default)]
    pub open: bool,
    #[serde(default = "blue")]
    pub color: Color,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_side: LabelSide,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BraceMark {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub label: String,
    /// Distance below the line.
    #[serde(default = "brace_offset")]
    pub offset: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NumberLineDiagram {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
    #[serde(default = "yes")]
    pub show_arrows: bool,
    #[serde(default = "axis_color")]
    pub color: Color,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default = "yes")]
    pub show_ticks: bool,
    #[serde(default = "default_step")]
    pub major_step: f64,
    #[serde(default = "default_tick_length")]
    pub tick_length: f64,
    #[serde(default = "yes")]
    pub show_labels: bool,
    #[serde(default)]
    pub label_format: TickFormat,
    /// Minor ticks per major step; `None` draws no minor ticks.
    #[serde(default)]
    pub minor_divisions: Option<u32>,
    #[serde(default)]
    pub intervals: Vec<IntervalMark>,
    #[serde(default)]
    pub points: Vec<PointMark>,
    #[serde(default)]
    pub braces: Vec<BraceMark>,
}

impl Default for NumberLineDiagram {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            show_arrows: true,
            color: axis_color(),
            line_style: LineStyle::Solid,
            show_ticks: true,
            major_step: default_step(),
            tick_length: default_tick_length(),
            show_labels: true,
            label_format: TickFormat::Auto,
            minor_divisions: None,
            intervals: Vec::new(),
            points: Vec::new(),
            braces: Vec::new(),
        }
    }
}

impl NumberLineDiagram {
    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let nl = NumberLine::new(self.min, self.max)?;
        let pen = Pen::new(appearance);
        let line = pen.stroke(&self.color);
        let mut scene = Scene::new();

        for iv in self.intervals.iter().filter(|iv| iv.fill) {
            let (lo, hi) = (iv.start.min(iv.end), iv.start.max(iv.end));
            let h = FILL_HEIGHT / 2.0;
            scene.push(
                z::FILL + 2,
                Primitive::Polygon {
                    points: vec![
                        Vector2::new(lo, nl.y - h),
                        Vector2::new(hi, nl.y - h),
                        Vector2::new(hi, nl.y + h),
                        Vector2::new(lo, nl.y + h),
                    ],
                    fill: Some(Fill::new(iv.color.clone(), FILL_OPACITY)),
                    stroke: None,
                },
            );
        }

        let axis = nl.axis(self.show_arrows);
        if self.show_arrows {
            let dir = axis.direction();
            let inset = dir * (HEAD / 2.0);
            let shaft = Segment::new(axis.start + inset, axis.end - inset);
            scene.segment(z::SHAPE, shaft.start, shaft.end, line.clone().styled(self.line_style));
            for (tip, d) in [(axis.end, dir), (axis.start, -dir)] {
                scene.push(
                    z::SHAPE,
                    Primitive::Polygon {
                        points: arrow_head(tip, d, HEAD, HEAD * 0.8).to_vec(),
                        fill: Some(Fill::solid(self.color.clone())),
                        stroke: None,
                    },
                );
            }
        } else {
            scene.segment(z::SHAPE, axis.start, axis.end, line.clone().styled(self.line_style));
        }

        if self.show_ticks {
            let majors = nl.major_ticks(self.major_step)?;
            for &v in &majors {
                let t = nl.tick(v, self.tick_length);
                scene.segment(z::MARKER - 5, t.start, t.end, line.clone());
            }
            if let Some(div) = self.minor_divisions {
                let minor = Stroke::new(self.color.clone(), pen.mark());
                for v in nl.minor_ticks(self.major_step, div)? {
                    let t = nl.tick(v, self.tick_length * 0.5);
                    scene.segment(z::MARKER - 6, t.start, t.end, minor.clone());
                }
            }
            if self.show_labels {
                let style = pen
                    .label(&self.color, 1.0)
                    .aligned(HAlign::Center, VAlign::Top);
                for &v in &majors {
                    let at = nl.at(v) - Vector2::new(0.0, self.tick_length + TICK_LABEL_GAP);
                    let text = format_tick_label(v, self.label_format);
                    scene.text(z::LABEL, at, text, style.clone());
                }
            }
        }

        for iv in &self.intervals {
            let stroke = Stroke::new(iv.color.clone(), pen.line() * INTERVAL_WIDTH_SCALE);
            let seg = nl.interval(iv.start, iv.end);
            scene.segment(z::MARKER, seg.start, seg.end, stroke.clone());
            let paper = pen.paper();
            for (value, style, leftwards, at) in [
                (iv.start, iv.start_style, true, seg.start),
                (iv.end, iv.end_style, false, seg.end),
            ] {
                match style {
                    EndpointStyle::Closed => {
                        dot(&mut scene, z::MARKER + 1, at, MARKER_RADIUS, &iv.color);
                    }
                    EndpointStyle::Open => {
                        let edge = Stroke::new(iv.color.clone(), pen.mark());
                        ring(&mut scene, z::MARKER + 1, at, MARKER_RADIUS, edge, &paper);
                    }
                    EndpointStyle::Arrow => {
                        let a = nl.interval_arrow(value, leftwards);
                        arrow(&mut scene, z::MARKER + 1, a.start, a.end, stroke.clone(), HEAD);
                    }
                }
            }
        }

        for b in &self.braces {
            let brace = nl.brace(b.start, b.end, b.offset);
            scene.polyline(z::MARKER, brace.points, false, line.clone());
            if !b.label.is_empty() {
                let style = pen
                    .bare_label(&self.color, 1.0)
                    .aligned(HAlign::Center, VAlign::Top);
                scene.text(z::LABEL, brace.label_anchor, b.label.as_str(), style);
            }
        }

        for p in &self.points {
            let at = nl.at(p.value);
            if p.open {
                let edge = Stroke::new(p.color.clone(), pen.mark());
                ring(&mut scene, z::MARKER + 5, at, MARKER_RADIUS, edge, &pen.paper());
            } else {
                dot(&mut scene, z::MARKER + 5, at, MARKER_RADIUS, &p.color);
            }
            if !p.label.is_empty() {
                let (pos, v) = point_label_position(at, p.label_side);
                let style = pen.label(&p.color, 1.0).aligned(HAlign::Center, v);
                scene.text(z::LABEL, pos, p.label.as_str(), style);
            }
        }

        Ok(Figure {
            scene,
            view: nl.bounds(VIEW_PADDING),
        })
    }
}

/// Label anchor and vertical alignment so the text grows away from the line.
fn point_label_position(at: Point, side: LabelSide) -> (Point, VAlign) {
    match side {
        LabelSide::Above => (at + Vector2::new(0.0, POINT_LABEL_OFFSET), VAlign::Bottom),
        LabelSide::Below => (at - Vector2::new(0.0, POINT_LABEL_OFFSET), VAlign::Top),
    }
}
