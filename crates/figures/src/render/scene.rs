//! Backend-neutral drawing primitives with z-order.

use super::style::{Color, Fill, Stroke};
use crate::kernel::{Bounds2, Point};
use crate::shapes::Arc;

/// Canonical layers: fills below outlines below markers below labels.
pub mod z {
    pub const FILL: i32 = 0;
    pub const SHAPE: i32 = 10;
    pub const MARKER: i32 = 20;
    pub const ELECTRON: i32 = 30;
    pub const LABEL: i32 = 100;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text appearance. `size` is in points.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    /// Rounded box drawn behind the text.
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub h_align: HAlign,
    #[serde(default)]
    pub v_align: VAlign,
}

impl TextStyle {
    /// Centred, regular weight, no background.
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            bold: false,
            background: None,
            h_align: HAlign::Center,
            v_align: VAlign::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn aligned(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Segment {
        start: Point,
        end: Point,
        stroke: Stroke,
    },
    /// Open path through `points`, or a closed outline when `closed`.
    Polyline {
        points: Vec<Point>,
        closed: bool,
        stroke: Stroke,
    },
    /// Counter-clockwise arc outline.
    Arc { arc: Arc, stroke: Stroke },
    Circle {
        center: Point,
        radius: f64,
        stroke: Option<Stroke>,
        fill: Option<Fill>,
    },
    Polygon {
        points: Vec<Point>,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Text {
        position: Point,
        text: String,
        style: TextStyle,
    },
}

impl Primitive {
    /// Points that bound the geometry. Text contributes its anchor only.
    fn extent(&self) -> Vec<Point> {
        match self {
            Primitive::Segment { start, end, .. } => vec![*start, *end],
            Primitive::Polyline { points, .. } | Primitive::Polygon { points, .. } => {
                points.clone()
            }
            Primitive::Arc { arc, .. } => arc.sample(33),
            Primitive::Circle { center, radius, .. } => {
                let r = Point::new(*radius, *radius);
                vec![center - r, center + r]
            }
            Primitive::Text { position, .. } => vec![*position],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Item {
    pub z: i32,
    pub primitive: Primitive,
}

/// Ordered drawing list. Items at equal z keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Scene {
    items: Vec<Item>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, z: i32, primitive: Primitive) {
        self.items.push(Item { z, primitive });
    }

    pub fn segment(&mut self, z: i32, start: Point, end: Point, stroke: Stroke) {
        self.push(z, Primitive::Segment { start, end, stroke });
    }

    pub fn polyline(&mut self, z: i32, points: Vec<Point>, closed: bool, stroke: Stroke) {
        self.push(
            z,
            Primitive::Polyline {
                points,
                closed,
                stroke,
            },
        );
    }

    pub fn arc(&mut self, z: i32, arc: Arc, stroke: Stroke) {
        self.push(z, Primitive::Arc { arc, stroke });
    }

    pub fn text(&mut self, z: i32, position: Point, text: impl Into<String>, style: TextStyle) {
        self.push(
            z,
            Primitive::Text {
                position,
                text: text.into(),
                style,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items in drawing order (stable sort by z).
    pub fn ordered(&self) -> Vec<&Item> {
        let mut out: Vec<&Item> = self.items.iter().collect();
        out.sort_by_key(|item| item.z);
        out
    }

    /// Bounding box of all geometry; `None` for an empty scene.
    pub fn bounds(&self) -> Option<Bounds2> {
        let pts: Vec<Point> = self.items.iter().flat_map(|i| i.primitive.extent()).collect();
        Bounds2::from_points(&pts).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn text(scene: &mut Scene, z: i32, s: &str) {
        scene.text(z, vector![0.0, 0.0], s, TextStyle::new(Color::grey(), 12.0));
    }

    #[test]
    fn ordering_is_stable_within_a_layer() {
        let mut scene = Scene::new();
        text(&mut scene, z::LABEL, "first label");
        text(&mut scene, z::FILL, "fill");
        text(&mut scene, z::LABEL, "second label");
        text(&mut scene, z::SHAPE, "shape");
        let order: Vec<&str> = scene
            .ordered()
            .iter()
            .map(|i| match &i.primitive {
                Primitive::Text { text, .. } => text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(order, ["fill", "shape", "first label", "second label"]);
        assert_eq!(scene.len(), 4);
    }

    #[test]
    fn bounds_cover_circles_and_arcs() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.push(
            z::SHAPE,
            Primitive::Circle {
                center: vector![1.0, 1.0],
                radius: 2.0,
                stroke: Some(Stroke::new(Color::grey(), 1.0)),
                fill: None,
            },
        );
        scene.arc(
            z::MARKER,
            Arc::new(vector![0.0, 0.0], 5.0, 0.0, 90.0),
            Stroke::new(Color::grey(), 1.0),
        );
        let b = scene.bounds().unwrap();
        assert!((b.min.x + 1.0).abs() < 1e-12);
        assert!((b.max.y - 5.0).abs() < 1e-12);
        assert!((b.max.x - 5.0).abs() < 1e-12);
    }

    #[test]
    fn z_layers_are_increasing() {
        let layers = [z::FILL, z::SHAPE, z::MARKER, z::ELECTRON, z::LABEL];
        assert!(layers.windows(2).all(|w| w[0] < w[1]));
    }
}
