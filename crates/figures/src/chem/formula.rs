//! Displayed and skeletal formulae.
//!
//! A displayed formula shows every atom, hydrogens included, with bonds
//! trimmed back from both ends. A skeletal formula draws the heavy-atom
//! backbone: carbons sit at line vertices, only heteroatoms get a symbol, and
//! bonds are trimmed only where a symbol is printed.
//!
//! Lengths are in layout units after `formula_layout` rescales the structure
//! to a mean bond length of `FORMULA_BOND_LENGTH`.

use nalgebra::vector;

use super::molecule::BondOrder;
use super::smiles::{MoleculeLayout, RawLayout};
use crate::error::LayoutError;
use crate::kernel::{perpendicular, try_unit, Bounds2, Point, Segment};

/// Mean bond length of a formula layout.
pub const FORMULA_BOND_LENGTH: f64 = 1.5;
/// Distance of each outer line of a double or aromatic bond from the bond axis.
pub const BOND_OFFSET: f64 = 0.08;
/// Triple bonds spread their outer lines a little wider.
const TRIPLE_SPREAD: f64 = 1.2;
const TRIPLE_OUTER_WIDTH: f64 = 0.8;
const AROMATIC_INNER_WIDTH: f64 = 0.6;
/// Trim at both ends of every displayed bond.
pub const DISPLAYED_TRIM: f64 = 0.25;
/// Trim at the labelled (non-carbon) ends of a skeletal bond.
pub const SKELETAL_TRIM: f64 = 0.2;
const MIN_VIEW_EXTENT: f64 = 1.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaStyle {
    /// All atoms and bonds.
    #[default]
    Displayed,
    /// Carbon backbone with heteroatoms labelled.
    Skeletal,
}

/// Which symbols a displayed formula prints. Skeletal formulae ignore this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AtomLabels {
    /// `false` gives a semi-skeletal look with bare carbon vertices.
    pub carbons: bool,
    pub hydrogens: bool,
}

impl Default for AtomLabels {
    fn default() -> Self {
        Self {
            carbons: true,
            hydrogens: true,
        }
    }
}

/// One stroke of a bond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondLine {
    pub segment: Segment,
    /// Multiple of the bond stroke width.
    pub width: f64,
    pub dashed: bool,
}

impl BondLine {
    fn solid(start: Point, end: Point, width: f64) -> Self {
        Self {
            segment: Segment::new(start, end),
            width,
            dashed: false,
        }
    }
}

/// Lines for one bond from `start` to `end`, trimmed by `trim_start` and
/// `trim_end` along the bond.
///
/// - single: one line.
/// - double: two lines at ±`BOND_OFFSET`.
/// - triple: the axis plus two thinner lines at ±`BOND_OFFSET`·1.2.
/// - aromatic: the axis plus a thin dashed line at +`BOND_OFFSET`, on the
///   counter-clockwise side.
///
/// Coincident ends, or trims that use up the whole bond, give no lines.
pub fn bond_lines(
    start: Point,
    end: Point,
    order: BondOrder,
    trim_start: f64,
    trim_end: f64,
) -> Vec<BondLine> {
    let v = end - start;
    let Some(u) = try_unit(v) else {
        return Vec::new();
    };
    if trim_start + trim_end >= v.norm() {
        return Vec::new();
    }
    let a = start + u * trim_start;
    let b = end - u * trim_end;
    let side = perpendicular(u) * BOND_OFFSET;
    match order {
        BondOrder::Single => vec![BondLine::solid(a, b, 1.0)],
        BondOrder::Double => vec![
            BondLine::solid(a + side, b + side, 1.0),
            BondLine::solid(a - side, b - side, 1.0),
        ],
        BondOrder::Triple => {
            let wide = side * TRIPLE_SPREAD;
            vec![
                BondLine::solid(a, b, 1.0),
                BondLine::solid(a + wide, b + wide, TRIPLE_OUTER_WIDTH),
                BondLine::solid(a - wide, b - wide, TRIPLE_OUTER_WIDTH),
            ]
        }
        BondOrder::Aromatic => vec![
            BondLine::solid(a, b, 1.0),
            BondLine {
                dashed: true,
                ..BondLine::solid(a + side, b + side, AROMATIC_INNER_WIDTH)
            },
        ],
    }
}

/// Bond lines of a whole formula. Bonds naming a missing atom are skipped.
pub fn formula_bonds(raw: &RawLayout, style: FormulaStyle) -> Vec<BondLine> {
    let trim = |element: &str| match style {
        FormulaStyle::Displayed => DISPLAYED_TRIM,
        FormulaStyle::Skeletal if element == "C" => 0.0,
        FormulaStyle::Skeletal => SKELETAL_TRIM,
    };
    raw.bonds
        .iter()
        .filter_map(|bond| Some((raw.atoms.get(bond.a)?, raw.atoms.get(bond.b)?, bond.order)))
        .flat_map(|(a, b, order)| {
            bond_lines(
                a.position,
                b.position,
                order,
                trim(a.element.as_str()),
                trim(b.element.as_str()),
            )
        })
        .collect()
}

/// Indices of the atoms whose symbol is printed.
pub fn labelled_atoms(raw: &RawLayout, style: FormulaStyle, labels: AtomLabels) -> Vec<usize> {
    raw.atoms
        .iter()
        .enumerate()
        .filter(|(_, atom)| match (style, atom.element.as_str()) {
            (FormulaStyle::Skeletal, element) => element != "C",
            (FormulaStyle::Displayed, "C") => labels.carbons,
            (FormulaStyle::Displayed, "H") => labels.hydrogens,
            (FormulaStyle::Displayed, _) => true,
        })
        .map(|(i, _)| i)
        .collect()
}

/// Lay out `smiles` for a formula: hydrogens included for displayed formulae,
/// heavy atoms only for skeletal ones, rescaled to `FORMULA_BOND_LENGTH`.
pub fn formula_layout<L>(
    layout: &L,
    smiles: &str,
    style: FormulaStyle,
) -> Result<RawLayout, LayoutError>
where
    L: MoleculeLayout + ?Sized,
{
    let smiles = smiles.trim();
    if smiles.is_empty() {
        return Err(LayoutError::Empty);
    }
    let raw = match style {
        FormulaStyle::Displayed => layout.layout(smiles)?,
        FormulaStyle::Skeletal => layout.skeleton(smiles)?,
    };
    if raw.atoms.is_empty() {
        return Err(LayoutError::NoAtoms);
    }
    Ok(raw.with_bond_length(FORMULA_BOND_LENGTH))
}

/// Square view around the atoms, at least `MIN_VIEW_EXTENT` across before
/// `padding`; `[-2, 2]²` when there is nothing to frame.
pub fn formula_view(raw: &RawLayout, padding: f64) -> Bounds2 {
    let points: Vec<Point> = raw.atoms.iter().map(|a| a.position).collect();
    match Bounds2::from_points(&points) {
        Ok(b) => b.squared(padding, MIN_VIEW_EXTENT),
        Err(_) => Bounds2::new(vector![-2.0, -2.0], vector![2.0, 2.0]),
    }
}

/// A stock organic molecule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormulaPreset {
    /// ASCII lookup key, e.g. `"propan_2_ol"`.
    pub key: &'static str,
    pub name: &'static str,
    /// Homologous series or grouping, for listings.
    pub group: &'static str,
    pub smiles: &'static str,
}

const fn fp(
    key: &'static str,
    name: &'static str,
    group: &'static str,
    smiles: &'static str,
) -> FormulaPreset {
    FormulaPreset {
        key,
        name,
        group,
        smiles,
    }
}

pub const FORMULA_PRESETS: &[FormulaPreset] = &[
    fp("methane", "Methane", "Alkanes", "C"),
    fp("ethane", "Ethane", "Alkanes", "CC"),
    fp("propane", "Propane", "Alkanes", "CCC"),
    fp("butane", "Butane", "Alkanes", "CCCC"),
    fp("ethene", "Ethene", "Alkenes", "C=C"),
    fp("propene", "Propene", "Alkenes", "CC=C"),
    fp("ethyne", "Ethyne", "Alkynes", "C#C"),
    fp("methanol", "Methanol", "Alcohols", "CO"),
    fp("ethanol", "Ethanol", "Alcohols", "CCO"),
    fp("propan_1_ol", "Propan-1-ol", "Alcohols", "CCCO"),
    fp("propan_2_ol", "Propan-2-ol", "Alcohols", "CC(O)C"),
    fp("methanoic_acid", "Methanoic acid", "Carboxylic acids", "C(=O)O"),
    fp("ethanoic_acid", "Ethanoic acid", "Carboxylic acids", "CC(=O)O"),
    fp("methanal", "Methanal", "Aldehydes and ketones", "C=O"),
    fp("ethanal", "Ethanal", "Aldehydes and ketones", "CC=O"),
    fp("propanone", "Propanone", "Aldehydes and ketones", "CC(=O)C"),
    fp("water", "Water", "Others", "O"),
    fp("carbon_dioxide", "Carbon dioxide", "Others", "O=C=O"),
    fp("ammonia", "Ammonia", "Others", "N"),
    fp("benzene", "Benzene", "Aromatics", "c1ccccc1"),
];

/// Look up a preset by key or display name (`"propan_2_ol"` or `"Propan-2-ol"`).
pub fn formula_preset(name: &str) -> Option<&'static FormulaPreset> {
    FORMULA_PRESETS
        .iter()
        .find(|p| p.key == name || p.name.eq_ignore_ascii_case(name))
}
