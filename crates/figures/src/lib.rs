//! Geometric layout and labelling for educational diagrams.
//!
//! Layers, bottom up:
//! - `kernel`: points, angles, bounds.
//! - `shapes`: builders from semantic parameters (side lengths, presets,
//!   incline angles) to vertex sets.
//! - `queries`: derived facts (angles, lengths, normals, arc measures).
//! - `annotate`: where labels and marks go.
//! - `chem`: molecules, lone pairs, electron shells, formulae and SMILES layout.
//! - `render`: z-ordered primitives and the SVG writer.
//! - `diagram`: one serde record per figure family, tying the rest together.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; breaking
//!   changes are fine when they improve the design.

pub mod annotate;
pub mod chem;
pub mod diagram;
pub mod error;
pub mod kernel;
pub mod queries;
pub mod render;
pub mod shapes;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use diagram::{DiagramSpec, Figure};
pub use error::{DiagramError, GeometryError, LayoutError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::annotate::{place, Anchor, DirectionPolicy};
    pub use crate::diagram::{
        CircleDiagram, DiagramSpec, DotCrossDiagram, Figure, FormulaDiagram, FormulaSource,
        FreeBodyDiagram, MoleculeSource, NumberLineDiagram, QuadDiagram, ShellDiagram,
        TriangleDiagram, VectorDiagram,
    };
    pub use crate::error::{DiagramError, GeometryError, LayoutError};
    pub use crate::kernel::{Bounds2, Point, Segment, Vec2};
    pub use crate::render::{Appearance, Color, Scene, SvgOptions};
    pub use crate::shapes::{Arc, Circle, Polygon};
}
