//! SVG serialization of a `Scene`.
//!
//! World coordinates are y-up; the view box is mapped onto the canvas with
//! equal aspect (centred, letterboxed) and y flipped. Stroke widths and font
//! sizes are points, converted with `px_per_inch / 72`.

use std::fmt::Write as _;

use super::scene::{HAlign, Item, Primitive, Scene, TextStyle, VAlign};
use super::style::{Appearance, Fill, Stroke};
use crate::kernel::{Bounds2, Point};
use crate::shapes::Arc;

/// Output settings that are not part of the figure's appearance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    pub px_per_inch: f64,
    /// Decimal places written for coordinates.
    pub precision: usize,
    pub font_family: String,
    pub title: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            px_per_inch: 72.0,
            precision: 2,
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            title: None,
        }
    }
}

/// Average glyph width as a fraction of the font size (text boxes only).
const GLYPH_WIDTH: f64 = 0.6;
/// Padding around a text background, as a fraction of the font size.
const TEXT_PAD: f64 = 0.15;

#[derive(Clone, Copy, Debug)]
struct Transform {
    scale: f64,
    min_x: f64,
    max_y: f64,
    offset_x: f64,
    offset_y: f64,
    pt: f64,
}

impl Transform {
    fn new(view: &Bounds2, width_px: f64, height_px: f64, px_per_inch: f64) -> Self {
        let vw = view.width().max(1e-9);
        let vh = view.height().max(1e-9);
        let scale = (width_px / vw).min(height_px / vh);
        Self {
            scale,
            min_x: view.min.x,
            max_y: view.max.y,
            offset_x: (width_px - vw * scale) / 2.0,
            offset_y: (height_px - vh * scale) / 2.0,
            pt: px_per_inch / 72.0,
        }
    }

    fn to_screen(&self, p: Point) -> (f64, f64) {
        (
            self.offset_x + (p.x - self.min_x) * self.scale,
            self.offset_y + (self.max_y - p.y) * self.scale,
        )
    }

    fn length(&self, len: f64) -> f64 {
        len * self.scale
    }

    fn points(&self, pts: f64) -> f64 {
        pts * self.pt
    }
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

struct Writer<'a> {
    out: String,
    t: Transform,
    precision: usize,
    options: &'a SvgOptions,
}

impl Writer<'_> {
    /// Fixed-precision number with trailing zeros trimmed.
    fn num(&self, v: f64) -> String {
        let s = format!("{:.*}", self.precision, v);
        let s = if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        };
        if s == "-0" {
            "0".to_string()
        } else {
            s
        }
    }

    fn xy(&self, p: Point) -> (String, String) {
        let (x, y) = self.t.to_screen(p);
        (self.num(x), self.num(y))
    }

    fn stroke_attrs(&self, stroke: &Stroke) -> String {
        let width = self.t.points(stroke.width);
        let mut s = format!(
            " stroke='{}' stroke-width='{}' stroke-linecap='round' stroke-linejoin='round'",
            stroke.color,
            self.num(width)
        );
        if let Some([dash, gap]) = stroke.style.dash_pattern() {
            let _ = write!(
                s,
                " stroke-dasharray='{} {}'",
                self.num(dash * width),
                self.num(gap * width)
            );
        }
        s
    }

    fn fill_attrs(&self, fill: Option<&Fill>) -> String {
        match fill {
            Some(f) if f.opacity < 1.0 => {
                format!(" fill='{}' fill-opacity='{}'", f.color, self.num(f.opacity))
            }
            Some(f) => format!(" fill='{}'", f.color),
            None => " fill='none'".to_string(),
        }
    }

    fn point_list(&self, points: &[Point]) -> String {
        points
            .iter()
            .map(|&p| {
                let (x, y) = self.xy(p);
                format!("{x},{y}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Path data for a counter-clockwise arc. Full turns are split in two
    /// because a single SVG arc command cannot close on itself.
    fn arc_path(&self, arc: &Arc) -> String {
        let r = self.num(self.t.length(arc.radius));
        let sweep = arc.sweep().min(360.0);
        let (sx, sy) = self.xy(arc.start_point());
        let mut d = format!("M {sx} {sy}");
        let pieces = if sweep > 359.999 { 2 } else { 1 };
        let step = sweep / pieces as f64;
        for k in 1..=pieces {
            let end = crate::kernel::point_on_circle(
                arc.center,
                arc.radius,
                arc.start_deg + step * k as f64,
            );
            let (ex, ey) = self.xy(end);
            let large = u8::from(step > 180.0);
            // counter-clockwise in y-up is sweep-flag 0 once y is flipped
            let _ = write!(d, " A {r} {r} 0 {large} 0 {ex} {ey}");
        }
        d
    }

    fn item(&mut self, item: &Item) {
        match &item.primitive {
            Primitive::Segment { start, end, stroke } => {
                let (x1, y1) = self.xy(*start);
                let (x2, y2) = self.xy(*end);
                let attrs = self.stroke_attrs(stroke);
                let _ = write!(
                    self.out,
                    "<line x1='{x1}' y1='{y1}' x2='{x2}' y2='{y2}'{attrs}/>"
                );
            }
            Primitive::Polyline {
                points,
                closed,
                stroke,
            } => {
                let tag = if *closed { "polygon" } else { "polyline" };
                let pts = self.point_list(points);
                let attrs = self.stroke_attrs(stroke);
                let _ = write!(self.out, "<{tag} points='{pts}' fill='none'{attrs}/>");
            }
            Primitive::Arc { arc, stroke } => {
                let d = self.arc_path(arc);
                let attrs = self.stroke_attrs(stroke);
                let _ = write!(self.out, "<path d='{d}' fill='none'{attrs}/>");
            }
            Primitive::Circle {
                center,
                radius,
                stroke,
                fill,
            } => {
                let (cx, cy) = self.xy(*center);
                let r = self.num(self.t.length(*radius));
                let fill = self.fill_attrs(fill.as_ref());
                let stroke = stroke.as_ref().map(|s| self.stroke_attrs(s)).unwrap_or_default();
                let _ = write!(self.out, "<circle cx='{cx}' cy='{cy}' r='{r}'{fill}{stroke}/>");
            }
            Primitive::Polygon {
                points,
                fill,
                stroke,
            } => {
                let pts = self.point_list(points);
                let fill = self.fill_attrs(fill.as_ref());
                let stroke = stroke.as_ref().map(|s| self.stroke_attrs(s)).unwrap_or_default();
                let _ = write!(self.out, "<polygon points='{pts}'{fill}{stroke}/>");
            }
            Primitive::Text {
                position,
                text,
                style,
            } => self.text(*position, text, style),
        }
    }

    fn text(&mut self, position: Point, text: &str, style: &TextStyle) {
        let (x, y) = self.t.to_screen(position);
        let size = self.t.points(style.size);
        if let Some(bg) = &style.background {
            let chars = text.chars().count().max(1) as f64;
            let w = chars * GLYPH_WIDTH * size;
            let h = 1.2 * size;
            let left = match style.h_align {
                HAlign::Left => x,
                HAlign::Center => x - w / 2.0,
                HAlign::Right => x - w,
            };
            let top = match style.v_align {
                VAlign::Top => y,
                VAlign::Middle => y - h / 2.0,
                VAlign::Bottom => y - h,
            };
            let pad = TEXT_PAD * size;
            let (rx, ry) = (self.num(left - pad), self.num(top - pad));
            let (rw, rh) = (self.num(w + 2.0 * pad), self.num(h + 2.0 * pad));
            let corner = self.num(pad);
            let _ = write!(
                self.out,
                "<rect x='{rx}' y='{ry}' width='{rw}' height='{rh}' rx='{corner}' fill='{bg}' \
                 fill-opacity='0.9'/>"
            );
        }
        let anchor = match style.h_align {
            HAlign::Left => "start",
            HAlign::Center => "middle",
            HAlign::Right => "end",
        };
        let baseline = match style.v_align {
            VAlign::Top => "hanging",
            VAlign::Middle => "central",
            VAlign::Bottom => "alphabetic",
        };
        let weight = if style.bold { " font-weight='bold'" } else { "" };
        let (tx, ty, fs) = (self.num(x), self.num(y), self.num(size));
        let family = escape_xml(&self.options.font_family);
        let _ = write!(
            self.out,
            "<text x='{tx}' y='{ty}' font-family='{family}' font-size='{fs}' fill='{}' \
             text-anchor='{anchor}' dominant-baseline='{baseline}'{weight}>{}</text>",
            style.color,
            escape_xml(text)
        );
    }
}

/// Serialize `scene` as a standalone SVG document showing the world
/// rectangle `view` on a canvas of `appearance.width × appearance.height`
/// inches.
pub fn write_svg(
    scene: &Scene,
    view: &Bounds2,
    appearance: &Appearance,
    options: &SvgOptions,
) -> String {
    let width = appearance.width.max(0.1) * options.px_per_inch;
    let height = appearance.height.max(0.1) * options.px_per_inch;
    let mut w = Writer {
        out: String::new(),
        t: Transform::new(view, width, height, options.px_per_inch),
        precision: options.precision,
        options,
    };
    let (wn, hn) = (w.num(width), w.num(height));
    let _ = write!(
        w.out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{wn}' height='{hn}' \
         viewBox='0 0 {wn} {hn}'>"
    );
    if let Some(title) = &options.title {
        let _ = write!(w.out, "<title>{}</title>", escape_xml(title));
    }
    if appearance.white_background {
        w.out.push_str("<rect width='100%' height='100%' fill='#FFFFFF'/>");
    }
    for item in scene.ordered() {
        w.item(item);
    }
    w.out.push_str("</svg>\n");
    tracing::debug!(items = scene.len(), bytes = w.out.len(), "wrote svg");
    w.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::scene::z;
    use crate::render::style::{Color, LineStyle};
    use nalgebra::vector;

    fn unit_view() -> Bounds2 {
        Bounds2::new(vector![0.0, 0.0], vector![10.0, 10.0])
    }

    fn small() -> Appearance {
        Appearance {
            width: 1.0,
            height: 1.0,
            ..Appearance::default()
        }
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut scene = Scene::new();
        scene.segment(
            z::SHAPE,
            vector![0.0, 0.0],
            vector![10.0, 10.0],
            Stroke::new(Color::grey(), 1.0),
        );
        let svg = write_svg(&scene, &unit_view(), &small(), &SvgOptions::default());
        assert!(svg.contains("x1='0' y1='72' x2='72' y2='0'"), "{svg}");
        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='72'"));
        assert!(svg.contains("fill='#FFFFFF'"));
    }

    #[test]
    fn non_square_views_are_letterboxed() {
        let view = Bounds2::new(vector![0.0, 0.0], vector![20.0, 10.0]);
        let t = Transform::new(&view, 72.0, 72.0, 72.0);
        let (x, y) = t.to_screen(vector![0.0, 10.0]);
        assert!((x - 0.0).abs() < 1e-12);
        assert!((y - 18.0).abs() < 1e-12);
    }

    #[test]
    fn text_is_escaped_and_boxed() {
        let mut scene = Scene::new();
        let style = TextStyle::new(Color::grey(), 10.0).with_background(Some(Color::white()));
        scene.text(z::LABEL, vector![5.0, 5.0], "a<b & 'c'", style);
        let svg = write_svg(&scene, &unit_view(), &small(), &SvgOptions::default());
        assert!(svg.contains("a&lt;b &amp; &apos;c&apos;"));
        assert!(svg.contains("<rect x="));
        assert!(svg.contains("text-anchor='middle'"));
    }

    #[test]
    fn dashed_strokes_and_transparent_background() {
        let mut scene = Scene::new();
        scene.segment(
            z::SHAPE,
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            Stroke::new(Color::grey(), 2.0).styled(LineStyle::Dashed),
        );
        let clear = Appearance {
            white_background: false,
            ..small()
        };
        let svg = write_svg(&scene, &unit_view(), &clear, &SvgOptions::default());
        assert!(svg.contains("stroke-dasharray='7.4 3.2'"));
        assert!(!svg.contains("fill='#FFFFFF'"));
    }

    #[test]
    fn layers_are_written_bottom_up() {
        let mut scene = Scene::new();
        scene.text(z::LABEL, vector![1.0, 1.0], "label", TextStyle::new(Color::grey(), 10.0));
        scene.push(
            z::FILL,
            Primitive::Polygon {
                points: vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![0.0, 1.0]],
                fill: Some(Fill::new(Color::grey(), 0.3)),
                stroke: None,
            },
        );
        let svg = write_svg(&scene, &unit_view(), &small(), &SvgOptions::default());
        let poly = svg.find("<polygon").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(poly < text);
        assert!(svg.contains("fill-opacity='0.3'"));
    }

    #[test]
    fn full_circle_arcs_are_split() {
        let w = Writer {
            out: String::new(),
            t: Transform::new(&unit_view(), 72.0, 72.0, 72.0),
            precision: 2,
            options: &SvgOptions::default(),
        };
        let full = w.arc_path(&Arc::new(vector![5.0, 5.0], 1.0, 0.0, 360.0));
        assert_eq!(full.matches(" A ").count(), 2);
        let quarter = w.arc_path(&Arc::new(vector![5.0, 5.0], 1.0, 0.0, 90.0));
        assert_eq!(quarter.matches(" A ").count(), 1);
        assert!(quarter.contains(" 0 0 0 "));
    }

    #[test]
    fn numbers_are_trimmed() {
        let w = Writer {
            out: String::new(),
            t: Transform::new(&unit_view(), 72.0, 72.0, 72.0),
            precision: 2,
            options: &SvgOptions::default(),
        };
        assert_eq!(w.num(1.5), "1.5");
        assert_eq!(w.num(2.0), "2");
        assert_eq!(w.num(-0.001), "0");
    }
}
