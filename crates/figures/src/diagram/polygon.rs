//! Triangle and quadrilateral figures.
//!
//! Both share one marking record; drawing order is outline, vertex labels,
//! side labels, angle marks with their labels, then equal-length ticks and
//! parallel arrows.

use super::{degrees_text, origin, Figure, Pen, ShapeStyle};
use crate::annotate::marks::{angle_arc, parallel_arrows, right_angle_marker_at, tick_marks};
use crate::annotate::{
    angle_label, place, side_label, vertex_label, Anchor, ArrowStyle, DirectionPolicy, TickStyle,
};
use crate::error::{DiagramError, GeomResult, GeometryError};
use crate::kernel::Point;
use crate::render::{z, Appearance, LineStyle, Primitive, Scene};
use crate::shapes::quad::{self, diagonal, Diagonal};
use crate::shapes::{triangle, Polygon, QuadPreset, TrianglePreset};

/// Vertices within this many degrees of 90° get a square by default.
const RIGHT_ANGLE_TOL: f64 = 0.5;
const ANGLE_LABEL_SCALE: f64 = 0.8;
const DIAGONAL_LABEL_DISTANCE: f64 = 0.3;
/// Most ticks or parallel arrowheads drawn on one side.
pub const MAX_MARKS_PER_SIDE: usize = 6;

fn half() -> f64 {
    0.5
}

fn side_label_distance() -> f64 {
    0.4
}

fn default_padding() -> f64 {
    1.0
}

/// Text next to one side.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SideLabel {
    pub side: usize,
    pub text: String,
    /// Fraction along the side, from its first vertex.
    #[serde(default = "half")]
    pub position: f64,
    #[serde(default)]
    pub direction: DirectionPolicy,
    #[serde(default = "side_label_distance")]
    pub distance: f64,
}

/// How an angle is marked at its vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMarker {
    /// Square for right angles, arc otherwise.
    #[default]
    Auto,
    Arc,
    Square,
    /// Label only.
    None,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AngleMark {
    pub vertex: usize,
    #[serde(default)]
    pub marker: AngleMarker,
    #[serde(default)]
    pub label: Option<String>,
    /// Print the measured angle when no label is given.
    #[serde(default)]
    pub measure: bool,
}

/// Labels and marks drawn on a polygon.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Marking {
    /// `None` names the vertices A, B, C, ...; an empty string skips a vertex.
    pub vertex_labels: Option<Vec<String>>,
    pub vertex_label_distance: f64,
    pub side_labels: Vec<SideLabel>,
    pub angles: Vec<AngleMark>,
    pub angle_radius: f64,
    pub right_angle_size: f64,
    /// Distance of angle labels from their vertex, along the bisector.
    pub angle_label_distance: f64,
    /// Equal-length tick count per side, in side order.
    pub ticks: Vec<usize>,
    /// `None` uses the family default.
    pub tick_style: Option<TickStyle>,
    /// Parallel arrowhead count per side, in side order.
    pub parallel_arrows: Vec<usize>,
    pub arrow_style: ArrowStyle,
}

impl Default for Marking {
    fn default() -> Self {
        Self {
            vertex_labels: None,
            vertex_label_distance: 0.6,
            side_labels: Vec::new(),
            angles: Vec::new(),
            angle_radius: 0.5,
            right_angle_size: 0.4,
            angle_label_distance: 0.8,
            ticks: Vec::new(),
            tick_style: None,
            parallel_arrows: Vec::new(),
            arrow_style: ArrowStyle::default(),
        }
    }
}

fn check_index(what: &str, index: usize, len: usize) -> GeomResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "{what} index {index} is out of range for a {len}-sided shape"
        )))
    }
}

fn default_vertex_names(n: usize) -> Vec<String> {
    (b'A'..=b'Z')
        .take(n)
        .map(|c| char::from(c).to_string())
        .collect()
}

impl Marking {
    /// Reject marks that name a vertex or side the polygon does not have.
    fn validate(&self, n: usize) -> GeomResult<()> {
        for s in &self.side_labels {
            check_index("side label", s.side, n)?;
        }
        for a in &self.angles {
            check_index("angle", a.vertex, n)?;
        }
        for (what, counts) in [("tick", &self.ticks), ("parallel arrow", &self.parallel_arrows)] {
            if counts.len() > n {
                return Err(GeometryError::invalid(format!(
                    "{} {what} counts given for a {n}-sided shape",
                    counts.len()
                )));
            }
            if let Some(&count) = counts.iter().find(|&&c| c > MAX_MARKS_PER_SIDE) {
                return Err(GeometryError::invalid(format!(
                    "{count} {what} marks on one side (at most {MAX_MARKS_PER_SIDE})"
                )));
            }
        }
        Ok(())
    }

    fn draw(
        &self,
        scene: &mut Scene,
        poly: &Polygon,
        style: &ShapeStyle,
        pen: &Pen,
        ticks: TickStyle,
    ) -> GeomResult<()> {
        self.validate(poly.len())?;
        let color = &style.color;
        let label = pen.label(color, 1.0);

        let names = self
            .vertex_labels
            .clone()
            .unwrap_or_else(|| default_vertex_names(poly.len()));
        for (i, name) in names.iter().enumerate().take(poly.len()) {
            if name.is_empty() {
                continue;
            }
            let at = vertex_label(poly, i, DirectionPolicy::Auto, self.vertex_label_distance);
            scene.text(z::LABEL, at, name.as_str(), label.clone());
        }

        for s in &self.side_labels {
            let at = side_label(poly, s.side, s.position, s.direction, s.distance);
            scene.text(z::LABEL, at, s.text.as_str(), label.clone());
        }

        let mark = pen.mark_stroke(color);
        for a in &self.angles {
            let i = a.vertex;
            let square = match a.marker {
                AngleMarker::Auto => Some(poly.is_right_angle(i, RIGHT_ANGLE_TOL)),
                AngleMarker::Square => Some(true),
                AngleMarker::Arc => Some(false),
                AngleMarker::None => None,
            };
            match square {
                Some(true) => {
                    let pts = right_angle_marker_at(poly, i, self.right_angle_size);
                    scene.polyline(z::MARKER - 5, pts.to_vec(), false, mark.clone());
                }
                Some(false) => {
                    scene.arc(z::MARKER - 5, angle_arc(poly, i, self.angle_radius), mark.clone());
                }
                None => {}
            }
            let text = match (&a.label, a.measure) {
                (Some(t), _) if !t.is_empty() => t.clone(),
                (_, true) => degrees_text(poly.vertex_angle(i)),
                _ => continue,
            };
            let at = angle_label(poly, i, DirectionPolicy::Auto, self.angle_label_distance);
            scene.text(z::LABEL, at, text, pen.label(color, ANGLE_LABEL_SCALE));
        }

        let tick_style = self.tick_style.unwrap_or(ticks);
        for (side, &count) in self.ticks.iter().enumerate() {
            for t in tick_marks(poly, side, count, tick_style) {
                scene.segment(z::MARKER, t.start, t.end, mark.clone());
            }
        }
        for (side, &count) in self.parallel_arrows.iter().enumerate() {
            for v in parallel_arrows(&poly.side(side), count, self.arrow_style) {
                scene.polyline(z::MARKER, v.to_vec(), false, mark.clone());
            }
        }
        Ok(())
    }
}

/// Fill and outline of a closed polygon.
fn draw_outline(scene: &mut Scene, poly: &Polygon, style: &ShapeStyle, pen: &Pen) {
    if let Some(fill) = &style.fill {
        scene.push(
            z::FILL,
            Primitive::Polygon {
                points: poly.vertices().to_vec(),
                fill: Some(fill.clone()),
                stroke: None,
            },
        );
    }
    let stroke = pen.stroke(&style.color).styled(style.line_style);
    scene.polyline(z::SHAPE, poly.vertices().to_vec(), true, stroke);
}

/// Where a triangle's vertices come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum TriangleShape {
    /// Side lengths; `c` is the base.
    Sss {
        a: f64,
        b: f64,
        c: f64,
        #[serde(default = "origin")]
        base_center: Point,
        #[serde(default)]
        rotation: f64,
    },
    Coordinates { points: [Point; 3] },
    /// Special triangle, rotated about its vertex centroid.
    Preset {
        shape: TrianglePreset,
        #[serde(default = "origin")]
        center: Point,
        #[serde(default)]
        rotation: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriangleDiagram {
    pub shape: TriangleShape,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub marking: Marking,
    /// Margin around the vertices, in data units.
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl TriangleDiagram {
    pub fn polygon(&self) -> GeomResult<Polygon> {
        match &self.shape {
            TriangleShape::Sss {
                a,
                b,
                c,
                base_center,
                rotation,
            } => triangle::from_sss(*a, *b, *c, *base_center, *rotation),
            TriangleShape::Coordinates { points } => triangle::from_coordinates(*points),
            TriangleShape::Preset {
                shape,
                center,
                rotation,
            } => {
                let poly = shape.build(*center)?;
                Ok(if *rotation != 0.0 {
                    poly.rotated(*rotation, poly.centroid())
                } else {
                    poly
                })
            }
        }
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let poly = self.polygon()?;
        let pen = Pen::new(appearance);
        let mut scene = Scene::new();
        draw_outline(&mut scene, &poly, &self.style, &pen);
        self.marking
            .draw(&mut scene, &poly, &self.style, &pen, TickStyle::default())?;
        Ok(Figure {
            scene,
            view: poly.bounds().padded(self.padding),
        })
    }
}

/// Where a quadrilateral's vertices come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum QuadShape {
    Preset {
        shape: QuadPreset,
        #[serde(default = "origin")]
        center: Point,
        #[serde(default)]
        rotation: f64,
    },
    Coordinates { points: [Point; 4] },
}

/// A dashed diagonal with an optional label.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DiagonalMark {
    pub which: Diagonal,
    #[serde(default)]
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadDiagram {
    pub shape: QuadShape,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub marking: Marking,
    #[serde(default)]
    pub diagonals: Vec<DiagonalMark>,
    #[serde(default = "default_padding")]
    pub padding: f64,
}

impl QuadDiagram {
    pub fn polygon(&self) -> GeomResult<Polygon> {
        match &self.shape {
            QuadShape::Preset {
                shape,
                center,
                rotation,
            } => shape.build(*center, *rotation),
            QuadShape::Coordinates { points } => quad::from_coordinates(*points),
        }
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let poly = self.polygon()?;
        let pen = Pen::new(appearance);
        let mut scene = Scene::new();
        let centroid = poly.centroid();
        for d in &self.diagonals {
            let seg = diagonal(&poly, d.which);
            let stroke = pen.mark_stroke(&self.style.color).styled(LineStyle::Dashed);
            scene.segment(z::SHAPE - 2, seg.start, seg.end, stroke);
            if !d.label.is_empty() {
                let anchor = Anchor::Segment {
                    segment: seg,
                    position: 0.5,
                    reference: Some(centroid),
                };
                let at = place(&anchor, DirectionPolicy::Auto, DIAGONAL_LABEL_DISTANCE);
                scene.text(z::LABEL, at, d.label.as_str(), pen.label(&self.style.color, 1.0));
            }
        }
        draw_outline(&mut scene, &poly, &self.style, &pen);
        self.marking
            .draw(&mut scene, &poly, &self.style, &pen, TickStyle::quad())?;
        Ok(Figure {
            scene,
            view: poly.bounds().squared(self.padding, 0.0),
        })
    }
}
