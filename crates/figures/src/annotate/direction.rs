use nalgebra::Vector2;

use crate::kernel::{direction, Vec2};

const DIAG: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// How a label chooses its offset direction.
///
/// `Auto` is context dependent (away from a reference point, along an outward
/// normal, or along a bisector); every other variant is a fixed unit vector,
/// except that `Above/Below/Left/Right` on a segment pick a side of the
/// segment rather than a screen direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    #[default]
    Auto,
    Above,
    Below,
    Left,
    Right,
    AboveLeft,
    AboveRight,
    BelowLeft,
    BelowRight,
    /// Explicit direction in degrees.
    Angle(f64),
}

impl DirectionPolicy {
    /// Unit vector for every non-`Auto` policy.
    pub fn fixed_vector(&self) -> Option<Vec2> {
        Some(match *self {
            Self::Auto => return None,
            Self::Above => Vector2::new(0.0, 1.0),
            Self::Below => Vector2::new(0.0, -1.0),
            Self::Left => Vector2::new(-1.0, 0.0),
            Self::Right => Vector2::new(1.0, 0.0),
            Self::AboveLeft => Vector2::new(-DIAG, DIAG),
            Self::AboveRight => Vector2::new(DIAG, DIAG),
            Self::BelowLeft => Vector2::new(-DIAG, -DIAG),
            Self::BelowRight => Vector2::new(DIAG, -DIAG),
            Self::Angle(deg) => direction(deg),
        })
    }

    /// Orient a segment normal `n` to the side this policy asks for.
    ///
    /// `Below`/`Left` want the dominant component of the normal negative,
    /// `Above`/`Right` want it positive. Returns `None` for policies that do
    /// not pick a side (`Auto`, diagonals, explicit angles).
    pub(crate) fn orient_normal(&self, n: Vec2) -> Option<Vec2> {
        let want_positive = match self {
            Self::Above | Self::Right => true,
            Self::Below | Self::Left => false,
            _ => return None,
        };
        let dominant = if n.y.abs() >= n.x.abs() { n.y } else { n.x };
        let flip = if want_positive {
            dominant < 0.0
        } else {
            dominant > 0.0
        };
        Some(if flip { -n } else { n })
    }
}
