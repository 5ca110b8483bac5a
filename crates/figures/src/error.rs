//! Error types surfaced by shape construction, molecule layout and diagram builds.
//!
//! - `GeometryError`: mathematically impossible construction input. Always
//!   surfaced, never corrected.
//! - `LayoutError`: the molecule-layout collaborator could not produce
//!   coordinates. Reported as data; the message is shown to the user as-is.
//! - `DiagramError`: what a diagram build returns (either of the above, or an
//!   unknown preset/element name).
//!
//! Near-zero direction vectors are not errors; see `kernel::unit_vector`.

use thiserror::Error;

/// Construction-time geometric impossibility.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

impl GeometryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Failure of the SMILES-to-2D layout step.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum LayoutError {
    #[error("Please enter a SMILES string")]
    Empty,
    #[error("Could not parse SMILES at position {position}: {message}")]
    Parse { position: usize, message: String },
    #[error("Unsupported SMILES feature: {0}")]
    Unsupported(String),
    #[error("Unknown element '{symbol}' at position {position}")]
    UnknownElement { position: usize, symbol: String },
    #[error("No atoms found in molecule")]
    NoAtoms,
    #[error("Layout produced an invalid molecule: {0}")]
    Invalid(String),
}

impl LayoutError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Errors returned by `diagram` builders.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DiagramError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("unknown element: {0}")]
    UnknownElement(String),
}

/// Shorthand used across the geometry modules.
pub type GeomResult<T> = Result<T, GeometryError>;

/// Check that a length-like parameter is finite and strictly positive.
pub(crate) fn require_positive(name: &str, value: f64) -> GeomResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::invalid(format!(
            "{name} must be a positive finite number (got {value})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_positive_rejects_zero_negative_and_nan() {
        assert!(require_positive("side", 1.5).is_ok());
        assert!(require_positive("side", 0.0).is_err());
        assert!(require_positive("side", -2.0).is_err());
        assert!(require_positive("side", f64::NAN).is_err());
        assert!(require_positive("side", f64::INFINITY).is_err());
    }

    #[test]
    fn diagram_error_wraps_sources_transparently() {
        let e: DiagramError = GeometryError::invalid("radius must be > 0").into();
        assert_eq!(e.to_string(), "invalid geometry: radius must be > 0");
        let l: DiagramError = LayoutError::Empty.into();
        assert_eq!(l.to_string(), "Please enter a SMILES string");
    }
}
