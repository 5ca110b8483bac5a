//! Rendering sink: backend-neutral primitives and an SVG writer.
//!
//! Purpose
//! - Diagram builders emit `Primitive`s into a `Scene` with an explicit
//!   z-order; `svg::write_svg` serializes the scene for a given view rectangle.
//!
//! Why this design
//! - The geometry layers never see a drawing backend. Everything a backend
//!   needs (colours, widths in points, text alignment) travels in the
//!   primitive itself, so the SVG writer is a plain fold over the scene.
//!
//! Code cross-refs: `diagram::Figure`, `crates/cli` (`render` subcommand)

pub mod scene;
pub mod style;
pub mod svg;

pub use scene::{z, HAlign, Item, Primitive, Scene, TextStyle, VAlign};
pub use style::{
    Appearance, Color, Fill, LineStyle, Stroke, UnknownColor, AXIS_COLOR, DARK_BACKGROUND,
    PALETTE,
};
pub use svg::{write_svg, SvgOptions};
