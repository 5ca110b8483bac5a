//! Electron placement for dot-and-cross diagrams.
//!
//! Covalent: atom circles overlap where a bond forms; shared electrons sit in
//! the overlap, lone pairs on the atom's perimeter. Ionic: each ion carries up
//! to four pairs just outside its circle, inside square brackets.

use std::collections::BTreeMap;

use super::molecule::{Atom, Bond, BondOrder, Molecule, MoleculeKind};
use crate::kernel::{
    direction, fallback_up, midpoint, perpendicular, point_on_circle, try_unit, Bounds2, Point,
    Vec2,
};
use nalgebra::vector;

/// Sizes used by dot-and-cross layouts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DotCrossStyle {
    pub atom_radius: f64,
    /// Gap between the two electrons of a pair.
    pub pair_spacing: f64,
    /// Overlap of bonded circles as a fraction of the radius (SMILES scaling).
    pub target_overlap: f64,
    /// How far outside the circle ionic electron pairs sit.
    pub ionic_offset: f64,
    /// Clearance between an ion's circle and its brackets.
    pub bracket_margin: f64,
    pub bracket_hook: f64,
}

impl Default for DotCrossStyle {
    fn default() -> Self {
        Self {
            atom_radius: 0.6,
            pair_spacing: 0.12,
            target_overlap: 0.25,
            ionic_offset: 0.2,
            bracket_margin: 0.2,
            bracket_hook: 0.12,
        }
    }
}

const DOUBLE_SPACING: f64 = 0.11;
const TRIPLE_SPACING: f64 = 0.09;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Dot,
    Cross,
}

impl Marker {
    pub fn other(self) -> Marker {
        match self {
            Marker::Dot => Marker::Cross,
            Marker::Cross => Marker::Dot,
        }
    }
}

/// One drawn electron. `scale` shrinks the marks inside crowded multiple bonds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Electron {
    pub position: Point,
    pub marker: Marker,
    pub scale: f64,
}

impl Electron {
    fn new(position: Point, marker: Marker) -> Self {
        Self {
            position,
            marker,
            scale: 1.0,
        }
    }
}

/// The first element seen draws dots, every other element crosses.
pub fn element_markers(atoms: &[Atom]) -> BTreeMap<String, Marker> {
    let mut markers = BTreeMap::new();
    for atom in atoms {
        let next = if markers.is_empty() {
            Marker::Dot
        } else {
            Marker::Cross
        };
        markers.entry(atom.element.clone()).or_insert(next);
    }
    markers
}

/// Unit normal of the bond axis `from → to` (`(0, 1)` for coincident atoms).
fn bond_normal(from: Point, to: Point) -> Vec2 {
    try_unit(to - from).map(perpendicular).unwrap_or_else(fallback_up)
}

/// Shared electrons of one bond, centred on the midpoint and spread across the
/// bond axis. `first` is the marker of atom `a`; markers alternate from there.
pub fn bond_electrons(
    a: Point,
    b: Point,
    order: BondOrder,
    first: Marker,
    pair_spacing: f64,
) -> Vec<Electron> {
    let mid = midpoint(a, b);
    let perp = bond_normal(a, b);
    let (offsets, scale): (&[f64], f64) = match order {
        BondOrder::Single | BondOrder::Aromatic => {
            let h = pair_spacing / 2.0;
            return vec![
                Electron::new(mid + perp * h, first),
                Electron::new(mid - perp * h, first.other()),
            ];
        }
        BondOrder::Double => (&[-1.5, -0.5, 0.5, 1.5], 0.9),
        BondOrder::Triple => (&[-2.5, -1.5, -0.5, 0.5, 1.5, 2.5], 0.8),
    };
    let spacing = if order == BondOrder::Double {
        DOUBLE_SPACING
    } else {
        TRIPLE_SPACING
    };
    offsets
        .iter()
        .enumerate()
        .map(|(k, &m)| Electron {
            position: mid + perp * (spacing * m),
            marker: if k % 2 == 0 { first } else { first.other() },
            scale,
        })
        .collect()
}

/// The two electrons of a lone pair at `angle_deg` on a circle of `radius`,
/// spaced across the radial direction.
pub fn lone_pair_electrons(
    center: Point,
    angle_deg: f64,
    radius: f64,
    marker: Marker,
    pair_spacing: f64,
) -> [Electron; 2] {
    let base = point_on_circle(center, radius, angle_deg);
    let offset = direction(angle_deg + 90.0) * (pair_spacing / 2.0);
    [
        Electron::new(base - offset, marker),
        Electron::new(base + offset, marker),
    ]
}

/// Pairs around an ion at 90°, 0°, 270°, 180° (up to eight electrons), just
/// outside the circle. The last `transferred` electrons are crosses.
pub fn ionic_electrons(atom: &Atom, style: &DotCrossStyle) -> Vec<Electron> {
    const PAIR_ANGLES: [f64; 4] = [90.0, 0.0, 270.0, 180.0];
    let n = atom.electrons.min(8) as usize;
    let own = atom.electrons.saturating_sub(atom.transferred) as usize;
    let radius = style.atom_radius + style.ionic_offset;
    PAIR_ANGLES
        .iter()
        .flat_map(|&angle| {
            lone_pair_electrons(atom.position, angle, radius, Marker::Dot, style.pair_spacing)
        })
        .take(n)
        .enumerate()
        .map(|(k, e)| Electron {
            marker: if k < own { Marker::Dot } else { Marker::Cross },
            ..e
        })
        .collect()
}

/// Every electron of the molecule, bonds first then lone pairs (covalent) or
/// ion by ion (ionic).
pub fn electrons(molecule: &Molecule, style: &DotCrossStyle) -> Vec<Electron> {
    let atoms = molecule.atoms();
    match molecule.kind() {
        MoleculeKind::Ionic => atoms.iter().flat_map(|a| ionic_electrons(a, style)).collect(),
        MoleculeKind::Covalent => {
            let markers = element_markers(atoms);
            let marker_of =
                |atom: &Atom| markers.get(&atom.element).copied().unwrap_or(Marker::Dot);
            let mut out = Vec::new();
            for &Bond { a, b, order } in molecule.bonds() {
                let first = marker_of(&atoms[a]);
                out.extend(bond_electrons(
                    atoms[a].position,
                    atoms[b].position,
                    order,
                    first,
                    style.pair_spacing,
                ));
            }
            for (&i, angles) in molecule.lone_pairs() {
                let atom = &atoms[i];
                for &angle in angles {
                    out.extend(lone_pair_electrons(
                        atom.position,
                        angle,
                        style.atom_radius,
                        marker_of(atom),
                        style.pair_spacing,
                    ));
                }
            }
            out
        }
    }
}

/// Square brackets around an ion and where its charge is written.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct IonBrackets {
    /// `[hook top, top, bottom, hook bottom]` of the left bracket.
    pub left: [Point; 4],
    pub right: [Point; 4],
    /// Bottom-left corner of the charge text, just past the top right corner.
    pub charge_anchor: Point,
}

pub fn ion_brackets(center: Point, style: &DotCrossStyle) -> IonBrackets {
    let b = style.atom_radius + style.bracket_margin;
    let hook = style.bracket_hook;
    let (x, y) = (center.x, center.y);
    IonBrackets {
        left: [
            vector![x - b + hook, y + b],
            vector![x - b, y + b],
            vector![x - b, y - b],
            vector![x - b + hook, y - b],
        ],
        right: [
            vector![x + b - hook, y + b],
            vector![x + b, y + b],
            vector![x + b, y - b],
            vector![x + b - hook, y - b],
        ],
        charge_anchor: vector![x + b + hook, y + b],
    }
}

/// Square view around the atom centres: at least 1.5 across plus `padding`
/// (1.2 in the stock diagrams) on every side; ±2 around the origin when empty.
pub fn view_bounds(molecule: &Molecule, padding: f64) -> Bounds2 {
    match Bounds2::from_points(&molecule.positions()) {
        Ok(b) => b.squared(padding, 1.5),
        Err(_) => Bounds2::new(vector![-2.0, -2.0], vector![2.0, 2.0]),
    }
}
