//! Diagram builders: parameter records in, drawable figures out.
//!
//! Purpose
//! - One serde record per diagram family. `build` runs shapes → queries →
//!   annotate and emits render primitives into a `Scene`, together with the
//!   view rectangle the figure is meant to be shown in.
//!
//! Why this design
//! - `DiagramSpec` is a closed enum tagged by `kind`, so a JSON description
//!   selects its builder without string dispatch in callers.
//! - Construction errors abort the figure (`DiagramError`); label placement
//!   never fails, it falls back (see `annotate`).
//! - Stroke widths and label styles all derive from one `Appearance` through
//!   `Pen`, so every family reacts to the same weight and size controls.
//!
//! Code cross-refs: `render::svg::write_svg`, `crates/cli` (`render` subcommand)

mod chem;
mod circle;
mod formula;
mod number_line;
mod physics;
mod polygon;

pub use chem::{DotCrossDiagram, MoleculeSource, ShellDiagram};
pub use circle::{
    ArcMark, CentralAngleMark, ChordMark, CircleDiagram, CirclePoint, LineMark, RegionMark,
    TangentMark,
};
pub use formula::{FormulaDiagram, FormulaSource};
pub use number_line::{BraceMark, IntervalMark, LabelSide, NumberLineDiagram, PointMark};
pub use physics::{FreeBodyDiagram, FreeBodySource, ForceColors, VectorDiagram, VectorMode};
pub use polygon::{
    AngleMark, AngleMarker, DiagonalMark, Marking, QuadDiagram, QuadShape, SideLabel,
    TriangleDiagram, TriangleShape,
};

use tracing::debug;

use crate::annotate::marks::arrow_head;
use crate::error::DiagramError;
use crate::kernel::{try_unit, Bounds2, Point};
use crate::render::{
    write_svg, Appearance, Color, Fill, LineStyle, Primitive, Scene, Stroke, SvgOptions,
    TextStyle,
};

/// A built diagram: what to draw and the data rectangle to show.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Figure {
    pub scene: Scene,
    pub view: Bounds2,
}

impl Figure {
    pub fn to_svg(&self, appearance: &Appearance, options: &SvgOptions) -> String {
        write_svg(&self.scene, &self.view, appearance, options)
    }
}

/// Any diagram, selected by its `kind` tag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagramSpec {
    Triangle(TriangleDiagram),
    Quadrilateral(QuadDiagram),
    Circle(CircleDiagram),
    NumberLine(NumberLineDiagram),
    DotCross(DotCrossDiagram),
    Shell(ShellDiagram),
    Formula(FormulaDiagram),
    Vector(VectorDiagram),
    FreeBody(FreeBodyDiagram),
}

impl DiagramSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Triangle(_) => "triangle",
            Self::Quadrilateral(_) => "quadrilateral",
            Self::Circle(_) => "circle",
            Self::NumberLine(_) => "number_line",
            Self::DotCross(_) => "dot_cross",
            Self::Shell(_) => "shell",
            Self::Formula(_) => "formula",
            Self::Vector(_) => "vector",
            Self::FreeBody(_) => "free_body",
        }
    }

    /// Build the figure. Molecules and formulae given as SMILES use the
    /// built-in `SmilesLayout`.
    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let result = match self {
            Self::Triangle(d) => d.build(appearance),
            Self::Quadrilateral(d) => d.build(appearance),
            Self::Circle(d) => d.build(appearance),
            Self::NumberLine(d) => d.build(appearance),
            Self::DotCross(d) => d.build(appearance),
            Self::Shell(d) => d.build(appearance),
            Self::Formula(d) => d.build(appearance),
            Self::Vector(d) => d.build(appearance),
            Self::FreeBody(d) => d.build(appearance),
        };
        match &result {
            Ok(fig) => debug!(kind = self.kind(), items = fig.scene.len(), "diagram built"),
            Err(e) => debug!(kind = self.kind(), error = %e, "diagram build failed"),
        }
        result
    }
}

/// Shape outline colour, pattern and optional fill.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub color: Color,
    pub line_style: LineStyle,
    pub fill: Option<Fill>,
}

/// Stroke widths and text styles derived from the figure appearance.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pen {
    appearance: Appearance,
}

impl Pen {
    pub(crate) fn new(appearance: &Appearance) -> Self {
        Self {
            appearance: *appearance,
        }
    }

    /// Outline width in points.
    pub(crate) fn line(&self) -> f64 {
        self.appearance.line_weight * 1.3
    }

    /// Width of small marks (angle arcs, ticks, right-angle squares).
    pub(crate) fn mark(&self) -> f64 {
        self.line() * 0.7
    }

    pub(crate) fn stroke(&self, color: &Color) -> Stroke {
        Stroke::new(color.clone(), self.line())
    }

    pub(crate) fn mark_stroke(&self, color: &Color) -> Stroke {
        Stroke::new(color.clone(), self.mark())
    }

    /// Colour behind labels and inside hollow bodies.
    pub(crate) fn paper(&self) -> Color {
        self.appearance.label_background()
    }

    /// Label text at `scale` × the label size, on a backdrop box.
    pub(crate) fn label(&self, color: &Color, scale: f64) -> TextStyle {
        self.bare_label(color, scale)
            .with_background(Some(self.appearance.label_background()))
    }

    /// Label text without a backdrop.
    pub(crate) fn bare_label(&self, color: &Color, scale: f64) -> TextStyle {
        TextStyle::new(color.clone(), self.appearance.label_size * scale)
    }
}

/// Arrow `start → end` with a filled head of length `head`. The shaft stops
/// inside the head so round caps do not poke through the tip. Zero-length
/// arrows draw nothing.
pub(crate) fn arrow(
    scene: &mut Scene,
    z: i32,
    start: Point,
    end: Point,
    stroke: Stroke,
    head: f64,
) {
    let v = end - start;
    let Some(u) = try_unit(v) else {
        return;
    };
    let head = head.min(v.norm() * 0.5);
    scene.segment(z, start, end - u * (head * 0.5), stroke.clone());
    let tri = arrow_head(end, u, head, head * 0.8);
    scene.push(
        z,
        Primitive::Polygon {
            points: tri.to_vec(),
            fill: Some(Fill::solid(stroke.color)),
            stroke: None,
        },
    );
}

/// Filled disc marker.
pub(crate) fn dot(scene: &mut Scene, z: i32, center: Point, radius: f64, color: &Color) {
    scene.push(
        z,
        Primitive::Circle {
            center,
            radius,
            stroke: None,
            fill: Some(Fill::solid(color.clone())),
        },
    );
}

/// Hollow disc marker: `paper` inside, `stroke` round the edge.
pub(crate) fn ring(
    scene: &mut Scene,
    z: i32,
    center: Point,
    radius: f64,
    stroke: Stroke,
    paper: &Color,
) {
    scene.push(
        z,
        Primitive::Circle {
            center,
            radius,
            stroke: Some(stroke),
            fill: Some(Fill::solid(paper.clone())),
        },
    );
}

/// `30°`, `36.9°`: whole degrees print without decimals.
pub(crate) fn degrees_text(deg: f64) -> String {
    let rounded = (deg * 10.0).round() / 10.0;
    if (rounded - rounded.round()).abs() < 1e-9 {
        format!("{}°", rounded.round() as i64)
    } else {
        format!("{rounded:.1}°")
    }
}

pub(crate) fn origin() -> Point {
    Point::zeros()
}

pub(crate) fn yes() -> bool {
    true
}

#[cfg(test)]
mod tests;
