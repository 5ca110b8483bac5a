//! Bohr-style electron shell diagrams for atoms and simple ions.

use super::elements::{element, Element};
use super::molecule::charge_label;
use crate::error::DiagramError;
use crate::kernel::{point_on_circle, Bounds2, Point};
use nalgebra::vector;

/// Distance between the config text and the outermost shell.
const CONFIG_GAP: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShellStyle {
    pub nucleus_radius: f64,
    pub shell_spacing: f64,
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            nucleus_radius: 0.4,
            shell_spacing: 0.5,
        }
    }
}

impl ShellStyle {
    /// Radius of shell `k` (0 = innermost).
    pub fn shell_radius(&self, k: usize) -> f64 {
        self.nucleus_radius + (k + 1) as f64 * self.shell_spacing
    }
}

/// Shell occupancy of an ion with the given charge.
///
/// A positive charge removes electrons from the outermost shell inwards and
/// drops shells left empty; a negative charge adds to the outermost shell.
pub fn ion_shells(shells: &[u32], charge: i32) -> Vec<u32> {
    let mut out = shells.to_vec();
    let mut change = charge.unsigned_abs();
    if charge > 0 {
        for n in out.iter_mut().rev() {
            if change == 0 {
                break;
            }
            let removed = (*n).min(change);
            *n -= removed;
            change -= removed;
        }
        while out.last() == Some(&0) {
            out.pop();
        }
    } else if charge < 0 {
        match out.last_mut() {
            Some(last) => *last += change,
            None => out.push(change),
        }
    }
    out
}

/// `2.8.1` style configuration, or `0` when no electrons remain.
pub fn configuration_string(shells: &[u32]) -> String {
    if shells.is_empty() {
        return "0".to_string();
    }
    shells
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// `count` electrons evenly spaced on a circle, starting at the top and going
/// clockwise.
pub fn shell_electron_positions(center: Point, radius: f64, count: u32) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let step = 360.0 / count as f64;
    (0..count)
        .map(|j| point_on_circle(center, radius, 90.0 - j as f64 * step))
        .collect()
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Shell {
    pub radius: f64,
    pub electrons: Vec<Point>,
}

/// Geometry of one shell diagram.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShellLayout {
    pub element: &'static Element,
    pub charge: i32,
    pub center: Point,
    pub nucleus_radius: f64,
    /// Symbol with the charge suffix, e.g. `Na+`.
    pub label: String,
    pub shells: Vec<Shell>,
    pub configuration: String,
    /// Top centre of the configuration text.
    pub configuration_anchor: Point,
}

/// Lay out the shells of `symbol` with the given `charge` (0 for a neutral atom).
pub fn shell_layout(
    symbol: &str,
    charge: i32,
    center: Point,
    style: &ShellStyle,
) -> Result<ShellLayout, DiagramError> {
    let el = element(symbol)
        .filter(|e| e.has_shells())
        .ok_or_else(|| DiagramError::UnknownElement(symbol.to_string()))?;
    let occupancy = ion_shells(el.shells, charge);
    let shells: Vec<Shell> = occupancy
        .iter()
        .enumerate()
        .map(|(k, &n)| {
            let radius = style.shell_radius(k);
            Shell {
                radius,
                electrons: shell_electron_positions(center, radius, n),
            }
        })
        .collect();
    let total_radius = style.nucleus_radius + occupancy.len().max(1) as f64 * style.shell_spacing;
    let label = match charge_label(charge) {
        Some(c) => format!("{}{c}", el.symbol),
        None => el.symbol.to_string(),
    };
    Ok(ShellLayout {
        element: el,
        charge,
        center,
        nucleus_radius: style.nucleus_radius,
        label,
        shells,
        configuration: configuration_string(&occupancy),
        configuration_anchor: center - vector![0.0, total_radius + CONFIG_GAP],
    })
}

/// Symmetric view around the centre sized by the neutral atom's shell count,
/// with `padding` all round and another 0.5 below for the configuration text.
pub fn view_bounds(layout: &ShellLayout, style: &ShellStyle, padding: f64) -> Bounds2 {
    let shells = layout.element.shells.len().max(layout.shells.len());
    let r = style.nucleus_radius + shells as f64 * style.shell_spacing + padding;
    let c = layout.center;
    Bounds2::new(c - vector![r, r + 0.5], c + vector![r, r])
}
