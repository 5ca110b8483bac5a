//! Vector diagrams (tip-to-tail addition, component resolution) and
//! free-body diagrams.

use nalgebra::{vector, Vector2};

use super::{arrow, degrees_text, dot, yes, Figure, Pen};
use crate::error::DiagramError;
use crate::kernel::{angle_of, direction, normalize_degrees, point_on_circle, Bounds2, Point};
use crate::render::{
    z, Appearance, Color, Fill, HAlign, LineStyle, Primitive, Scene, Stroke, VAlign,
};
use crate::shapes::freebody::{
    force_label_anchor, freebody_preset, Body, Force, ForceKind, Setting,
};
use crate::shapes::vectors::{
    resolve_components, tip_to_tail, vector_label_anchor, vector_preset, view_bounds,
    PolarVector, DEFAULT_VECTOR_COLORS,
};
use crate::shapes::Arc;

/// Arrowhead length for vectors and forces, in data units.
const HEAD: f64 = 0.2;
const VECTOR_LABEL_OFFSET: f64 = 0.2;
const RESULTANT_WIDTH_SCALE: f64 = 1.2;
const COMPONENT_WIDTH_SCALE: f64 = 0.8;
const COMPONENT_TEXT_SCALE: f64 = 0.9;
const ANGLE_TEXT_SCALE: f64 = 0.8;
/// Angle labels sit this many arc radii from the origin.
const ANGLE_LABEL_FACTOR: f64 = 1.5;
const ADDITION_ARC_RADIUS: f64 = 0.4;
const COMPONENT_ARC_RADIUS: f64 = 0.5;
const AXIS_COLOR: &str = "#888888";
/// Axis arrows are this fraction of the largest coordinate.
const AXIS_FRACTION: f64 = 0.3;
const VECTOR_VIEW_PADDING: f64 = 0.8;
/// Half-width of the fixed free-body view.
const FREEBODY_EXTENT: f64 = 2.5;
const FREEBODY_MARGIN: f64 = 0.3;
/// Width of ground hatching, in points.
const HATCH_WIDTH: f64 = 1.0;

fn red() -> Color {
    Color::named("red")
}

fn one() -> f64 {
    1.0
}

/// What a vector diagram shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VectorMode {
    /// Vectors laid tip to tail from the origin.
    Addition {
        vectors: Vec<PolarVector>,
        #[serde(default)]
        labels: Vec<String>,
    },
    /// A stock addition scenario by key.
    Preset { name: String },
    /// One vector split into x and y components.
    Components {
        magnitude: f64,
        angle: f64,
        #[serde(default)]
        labels: Option<[String; 3]>,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VectorDiagram {
    pub mode: VectorMode,
    #[serde(default)]
    pub color: Color,
    /// Resultant arrow, and the component arrows in component mode.
    #[serde(default = "red")]
    pub resultant_color: Color,
    /// Give each added vector its own colour.
    #[serde(default)]
    pub cycle_colors: bool,
    #[serde(default = "yes")]
    pub show_resultant: bool,
    #[serde(default = "yes")]
    pub show_axes: bool,
    #[serde(default = "yes")]
    pub show_angle: bool,
}

impl VectorDiagram {
    pub fn new(mode: VectorMode) -> Self {
        Self {
            mode,
            color: Color::default(),
            resultant_color: red(),
            cycle_colors: false,
            show_resultant: true,
            show_axes: true,
            show_angle: true,
        }
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let pen = Pen::new(appearance);
        let mut scene = Scene::new();
        let points = match &self.mode {
            VectorMode::Addition { vectors, labels } => {
                self.draw_addition(&mut scene, &pen, vectors, labels)
            }
            VectorMode::Preset { name } => {
                let preset = vector_preset(name)
                    .ok_or_else(|| DiagramError::UnknownPreset(name.clone()))?;
                let labels: Vec<String> = preset.labels.iter().map(|s| s.to_string()).collect();
                self.draw_addition(&mut scene, &pen, &preset.polar(), &labels)
            }
            VectorMode::Components {
                magnitude,
                angle,
                labels,
            } => self.draw_components(&mut scene, &pen, *magnitude, *angle, labels.as_ref()),
        };
        if self.show_axes {
            draw_axes(&mut scene, &pen, &points);
        }
        Ok(Figure {
            scene,
            view: view_bounds(&points, VECTOR_VIEW_PADDING),
        })
    }

    fn vector_color(&self, i: usize) -> Color {
        if self.cycle_colors {
            Color::named(DEFAULT_VECTOR_COLORS[i % DEFAULT_VECTOR_COLORS.len()])
        } else {
            self.color.clone()
        }
    }

    /// Returns every point the view must contain.
    fn draw_addition(
        &self,
        scene: &mut Scene,
        pen: &Pen,
        vectors: &[PolarVector],
        labels: &[String],
    ) -> Vec<Point> {
        let chain = tip_to_tail(Point::zeros(), vectors);
        for (i, (seg, v)) in chain.arrows.iter().zip(vectors).enumerate() {
            let color = self.vector_color(i);
            arrow(scene, z::SHAPE, seg.start, seg.end, pen.stroke(&color), HEAD);
            if let Some(text) = labels.get(i).filter(|t| !t.is_empty()) {
                let at = vector_label_anchor(seg.start, seg.end, v.angle, VECTOR_LABEL_OFFSET);
                scene.text(z::LABEL, at, text.as_str(), pen.bare_label(&color, 1.0).bold());
            }
        }
        if self.show_resultant {
            if let Some(r) = chain.resultant.filter(|r| r.is_drawn()) {
                let start = Point::zeros();
                let end = start + r.components;
                let stroke = Stroke::new(
                    self.resultant_color.clone(),
                    pen.line() * RESULTANT_WIDTH_SCALE,
                );
                arrow(scene, z::MARKER, start, end, stroke, HEAD);
                let at = vector_label_anchor(start, end, r.angle, VECTOR_LABEL_OFFSET);
                let style = pen.bare_label(&self.resultant_color, 1.0).bold();
                scene.text(z::LABEL, at, "R", style);
            }
        }
        if self.show_angle {
            if let Some(first) = vectors.first() {
                let text = degrees_text(first.angle);
                draw_angle(scene, pen, &self.color, ADDITION_ARC_RADIUS, first.angle, text);
            }
        }
        chain.end_points
    }

    fn draw_components(
        &self,
        scene: &mut Scene,
        pen: &Pen,
        magnitude: f64,
        angle: f64,
        labels: Option<&[String; 3]>,
    ) -> Vec<Point> {
        let c = resolve_components(Point::zeros(), magnitude, angle);
        let comp = &self.resultant_color;
        let comp_stroke = Stroke::new(comp.clone(), pen.line() * COMPONENT_WIDTH_SCALE);
        let default_labels = ["F".to_string(), "Fₓ".to_string(), "Fᵧ".to_string()];
        let [main_label, x_label, y_label] = labels.unwrap_or(&default_labels);

        for (seg, text, offset) in [(c.x, x_label, -0.25), (c.y, y_label, 0.25)] {
            arrow(scene, z::SHAPE - 2, seg.start, seg.end, comp_stroke.clone(), HEAD);
            if !text.is_empty() && seg.length() > 0.0 {
                let a = angle_of(seg.vector());
                let at = vector_label_anchor(seg.start, seg.end, a, offset);
                let style = pen.bare_label(comp, COMPONENT_TEXT_SCALE).bold();
                scene.text(z::LABEL, at, text.as_str(), style);
            }
        }
        let dashed = Stroke::new(comp.clone(), 1.0).styled(LineStyle::Dashed);
        for seg in c.completion {
            scene.segment(z::SHAPE - 5, seg.start, seg.end, dashed.clone());
        }

        arrow(scene, z::SHAPE, c.main.start, c.main.end, pen.stroke(&self.color), HEAD);
        if !main_label.is_empty() {
            let at = vector_label_anchor(c.main.start, c.main.end, angle, 0.3);
            let style = pen.bare_label(&self.color, 1.0).bold();
            scene.text(z::LABEL, at, main_label.as_str(), style);
        }

        if self.show_angle {
            let text = format!("θ={}", degrees_text(angle));
            draw_angle(scene, pen, &self.color, COMPONENT_ARC_RADIUS, angle, text);
        }
        let end = c.main.end;
        vec![Point::zeros(), end, vector![end.x, 0.0], vector![0.0, end.y]]
    }
}

/// Arc from the +x axis to `angle` at the origin, with its label outside.
///
/// Angles past 180° are marked clockwise from the axis instead.
fn draw_angle(
    scene: &mut Scene,
    pen: &Pen,
    color: &Color,
    radius: f64,
    angle: f64,
    text: String,
) {
    let a = normalize_degrees(angle);
    if a.abs() < 1e-9 {
        return;
    }
    let arc = if a <= 180.0 {
        Arc::new(Point::zeros(), radius, 0.0, a)
    } else {
        Arc::new(Point::zeros(), radius, a, 360.0)
    };
    scene.arc(z::MARKER - 5, arc, Stroke::new(color.clone(), pen.mark()));
    let at = point_on_circle(Point::zeros(), radius * ANGLE_LABEL_FACTOR, arc.mid_angle());
    scene.text(z::LABEL, at, text, pen.bare_label(color, ANGLE_TEXT_SCALE));
}

/// Short x and y axis arrows from the origin.
fn draw_axes(scene: &mut Scene, pen: &Pen, points: &[Point]) {
    let extent = points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(1.0_f64, f64::max);
    let len = extent * AXIS_FRACTION;
    let color = Color::named(AXIS_COLOR);
    let stroke = Stroke::new(color.clone(), 1.0);
    let head = HEAD * 0.6;
    let o = Point::zeros();
    arrow(scene, z::FILL + 5, o, vector![len, 0.0], stroke.clone(), head);
    arrow(scene, z::FILL + 5, o, vector![0.0, len], stroke, head);
    let style = pen.bare_label(&color, ANGLE_TEXT_SCALE);
    let x_style = style.clone().aligned(HAlign::Left, VAlign::Middle);
    scene.text(z::LABEL, vector![len + 0.1, 0.0], "x", x_style);
    let y_style = style.aligned(HAlign::Center, VAlign::Bottom);
    scene.text(z::LABEL, vector![0.0, len + 0.1], "y", y_style);
}

/// Colours of the five force kinds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ForceColors {
    pub weight: Color,
    pub normal: Color,
    pub friction: Color,
    pub applied: Color,
    pub tension: Color,
}

impl Default for ForceColors {
    fn default() -> Self {
        let c = |k: ForceKind| Color::named(k.default_color());
        Self {
            weight: c(ForceKind::Weight),
            normal: c(ForceKind::Normal),
            friction: c(ForceKind::Friction),
            applied: c(ForceKind::Applied),
            tension: c(ForceKind::Tension),
        }
    }
}

impl ForceColors {
    pub fn of(&self, kind: ForceKind) -> &Color {
        match kind {
            ForceKind::Weight => &self.weight,
            ForceKind::Normal => &self.normal,
            ForceKind::Friction => &self.friction,
            ForceKind::Applied => &self.applied,
            ForceKind::Tension => &self.tension,
        }
    }
}

/// Setting and forces of a free-body diagram.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FreeBodySource {
    /// A stock scenario by key, e.g. `incline`.
    Preset { name: String },
    Custom { setting: Setting, forces: Vec<Force> },
}

impl FreeBodySource {
    fn resolve(&self) -> Result<(Setting, Vec<Force>), DiagramError> {
        match self {
            Self::Preset { name } => freebody_preset(name)
                .map(|p| (p.setting, p.forces))
                .ok_or_else(|| DiagramError::UnknownPreset(name.clone())),
            Self::Custom { setting, forces } => Ok((*setting, forces.clone())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FreeBodyDiagram {
    pub source: FreeBodySource,
    /// Multiplies every force magnitude before drawing.
    #[serde(default = "one")]
    pub arrow_scale: f64,
    #[serde(default = "yes")]
    pub show_object: bool,
    /// Ground, incline and strings.
    #[serde(default = "yes")]
    pub show_ground: bool,
    #[serde(default)]
    pub object_color: Color,
    #[serde(default)]
    pub force_colors: ForceColors,
}

impl FreeBodyDiagram {
    pub fn new(source: FreeBodySource) -> Self {
        Self {
            source,
            arrow_scale: 1.0,
            show_object: true,
            show_ground: true,
            object_color: Color::default(),
            force_colors: ForceColors::default(),
        }
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let (setting, forces) = self.source.resolve()?;
        let layout = setting.layout()?;
        let pen = Pen::new(appearance);
        let color = &self.object_color;
        let line = pen.stroke(color);
        let hatch = Stroke::new(color.clone(), HATCH_WIDTH);
        let mut scene = Scene::new();

        if self.show_ground {
            if let Some(g) = &layout.ground {
                scene.segment(z::SHAPE - 5, g.line.start, g.line.end, line.clone());
                for h in &g.hatches {
                    scene.segment(z::SHAPE - 6, h.start, h.end, hatch.clone());
                }
            }
            if let Some(inc) = &layout.incline {
                let outline = inc.outline()?;
                scene.polyline(z::SHAPE - 5, outline.into_vertices(), true, line.clone());
                for h in inc.hatches() {
                    scene.segment(z::SHAPE - 6, h.start, h.end, hatch.clone());
                }
                scene.arc(z::SHAPE - 5, inc.angle_arc(), pen.mark_stroke(color));
                let style = pen.bare_label(color, ANGLE_TEXT_SCALE);
                let text = degrees_text(inc.angle_deg);
                scene.text(z::LABEL, inc.angle_label_anchor(), text, style);
            }
            let last = layout.supports.len().saturating_sub(1);
            for (i, s) in layout.supports.iter().enumerate() {
                // the ceiling bar of a hanging block is drawn heavier
                let stroke = if matches!(setting, Setting::Hanging) && i == last {
                    Stroke::new(color.clone(), pen.line() * 1.5)
                } else {
                    line.clone()
                };
                scene.segment(z::SHAPE - 5, s.start, s.end, stroke);
            }
        }

        if self.show_object {
            match &layout.body {
                Body::Block(poly) => scene.push(
                    z::SHAPE,
                    Primitive::Polygon {
                        points: poly.vertices().to_vec(),
                        fill: Some(Fill::solid(pen.paper())),
                        stroke: Some(line.clone()),
                    },
                ),
                Body::Particle(c) => dot(&mut scene, z::SHAPE, c.center, c.radius, color),
            }
        }

        for f in &forces {
            let angle = f.direction.resolve(layout.incline_deg);
            let start = layout.center;
            let end = start + direction(angle) * (f.magnitude * self.arrow_scale);
            let fc = self.force_colors.of(f.kind);
            arrow(&mut scene, z::MARKER, start, end, pen.stroke(fc), HEAD);
            if !f.name.is_empty() {
                let at = force_label_anchor(start, end, angle, f.label_position);
                scene.text(z::LABEL, at, f.name.as_str(), pen.bare_label(fc, 1.0).bold());
            }
        }

        let fixed = Bounds2::new(
            Vector2::new(-FREEBODY_EXTENT, -FREEBODY_EXTENT),
            Vector2::new(FREEBODY_EXTENT, FREEBODY_EXTENT),
        );
        let view = match scene.bounds() {
            Some(b) => fixed.union(&b.padded(FREEBODY_MARGIN)),
            None => fixed,
        };
        Ok(Figure { scene, view })
    }
}
