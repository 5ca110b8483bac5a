use std::collections::BTreeMap;

use crate::error::{GeomResult, GeometryError};
use crate::kernel::Point;
use nalgebra::vector;
use BondOrder::{Double, Single, Triple};
use MoleculeKind::{Covalent, Ionic};

/// Bond multiplicity. Aromatic bonds count 1.5 electrons per atom and are
/// drawn like single bonds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Electrons each bonded atom contributes to the bond.
    pub fn electrons(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoleculeKind {
    Covalent,
    Ionic,
}

/// An atom (or ion) in a dot-and-cross diagram.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Atom {
    pub element: String,
    pub position: Point,
    /// Formal charge; 0 means neutral.
    #[serde(default)]
    pub charge: i32,
    /// Outer electrons drawn around an ion.
    #[serde(default)]
    pub electrons: u32,
    /// How many of `electrons` were gained from another atom (drawn as crosses).
    #[serde(default)]
    pub transferred: u32,
}

impl Atom {
    pub fn new(element: impl Into<String>, position: Point) -> Self {
        Self {
            element: element.into(),
            position,
            charge: 0,
            electrons: 0,
            transferred: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    #[serde(default)]
    pub order: BondOrder,
}

impl Bond {
    pub fn new(a: usize, b: usize, order: BondOrder) -> Self {
        Self { a, b, order }
    }

    /// The other end of the bond, if `atom` is one of its ends.
    pub fn partner(&self, atom: usize) -> Option<usize> {
        if self.a == atom {
            Some(self.b)
        } else if self.b == atom {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Serialized shape of a molecule; deserialization goes through `Molecule::new`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
struct MoleculeRecord {
    kind: MoleculeKind,
    atoms: Vec<Atom>,
    #[serde(default)]
    bonds: Vec<Bond>,
    #[serde(default)]
    lone_pairs: BTreeMap<usize, Vec<f64>>,
}

/// Atoms, bonds and lone-pair angles (degrees) keyed by atom index.
///
/// Immutable once built; every bond and lone-pair key refers to an existing atom.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MoleculeRecord")]
pub struct Molecule {
    kind: MoleculeKind,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    lone_pairs: BTreeMap<usize, Vec<f64>>,
}

impl TryFrom<MoleculeRecord> for Molecule {
    type Error = GeometryError;
    fn try_from(r: MoleculeRecord) -> GeomResult<Self> {
        Molecule::new(r.kind, r.atoms, r.bonds, r.lone_pairs)
    }
}

impl Molecule {
    pub fn new(
        kind: MoleculeKind,
        atoms: Vec<Atom>,
        bonds: Vec<Bond>,
        lone_pairs: BTreeMap<usize, Vec<f64>>,
    ) -> GeomResult<Self> {
        let n = atoms.len();
        for (i, atom) in atoms.iter().enumerate() {
            if !(atom.position.x.is_finite() && atom.position.y.is_finite()) {
                return Err(GeometryError::invalid(format!(
                    "atom {i} ({}) has a non-finite position",
                    atom.element
                )));
            }
            if atom.transferred > atom.electrons {
                return Err(GeometryError::invalid(format!(
                    "atom {i} transfers {} of only {} shown electrons",
                    atom.transferred, atom.electrons
                )));
            }
        }
        for bond in &bonds {
            if bond.a >= n || bond.b >= n {
                return Err(GeometryError::invalid(format!(
                    "bond ({}, {}) refers to a missing atom; molecule has {n} atoms",
                    bond.a, bond.b
                )));
            }
            if bond.a == bond.b {
                return Err(GeometryError::invalid(format!("atom {} is bonded to itself", bond.a)));
            }
        }
        if let Some(&bad) = lone_pairs.keys().find(|&&k| k >= n) {
            return Err(GeometryError::invalid(format!(
                "lone pairs given for missing atom {bad}; molecule has {n} atoms"
            )));
        }
        Ok(Self {
            kind,
            atoms,
            bonds,
            lone_pairs,
        })
    }

    pub fn kind(&self) -> MoleculeKind {
        self.kind
    }
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }
    pub fn lone_pairs(&self) -> &BTreeMap<usize, Vec<f64>> {
        &self.lone_pairs
    }

    /// Positions of every atom, in atom order.
    pub fn positions(&self) -> Vec<Point> {
        self.atoms.iter().map(|a| a.position).collect()
    }
}

/// Charge suffix as printed next to an ion: `+`, `2+`, `−`, `2−`; `None` when neutral.
pub fn charge_label(charge: i32) -> Option<String> {
    match charge {
        0 => None,
        1 => Some("+".to_string()),
        -1 => Some("\u{2212}".to_string()),
        c if c > 0 => Some(format!("{c}+")),
        c => Some(format!("{}\u{2212}", c.unsigned_abs())),
    }
}

struct PresetAtom {
    element: &'static str,
    x: f64,
    y: f64,
    charge: i32,
    electrons: u32,
    transferred: u32,
}

const fn at(element: &'static str, x: f64, y: f64) -> PresetAtom {
    PresetAtom {
        element,
        x,
        y,
        charge: 0,
        electrons: 0,
        transferred: 0,
    }
}

const fn cation(element: &'static str, x: f64, y: f64, charge: i32) -> PresetAtom {
    PresetAtom {
        element,
        x,
        y,
        charge,
        electrons: 0,
        transferred: 0,
    }
}

const fn anion(element: &'static str, x: f64, y: f64, charge: i32) -> PresetAtom {
    PresetAtom {
        element,
        x,
        y,
        charge,
        electrons: 8,
        transferred: charge.unsigned_abs(),
    }
}

/// A named textbook molecule.
pub struct MoleculePreset {
    /// ASCII lookup key, e.g. `"H2O"`.
    pub key: &'static str,
    /// Display name with subscripts, e.g. `"H₂O"`.
    pub title: &'static str,
    pub description: &'static str,
    pub kind: MoleculeKind,
    atoms: &'static [PresetAtom],
    bonds: &'static [(usize, usize, BondOrder)],
    lone_pairs: &'static [(usize, &'static [f64])],
}

impl MoleculePreset {
    /// Build the molecule. Preset tables are consistent, so this skips validation.
    pub fn molecule(&self) -> Molecule {
        Molecule {
            kind: self.kind,
            atoms: self
                .atoms
                .iter()
                .map(|a| Atom {
                    element: a.element.to_string(),
                    position: vector![a.x, a.y],
                    charge: a.charge,
                    electrons: a.electrons,
                    transferred: a.transferred,
                })
                .collect(),
            bonds: self
                .bonds
                .iter()
                .map(|&(a, b, order)| Bond::new(a, b, order))
                .collect(),
            lone_pairs: self
                .lone_pairs
                .iter()
                .map(|&(i, angles)| (i, angles.to_vec()))
                .collect(),
        }
    }
}

const fn covalent(
    key: &'static str,
    title: &'static str,
    description: &'static str,
    atoms: &'static [PresetAtom],
    bonds: &'static [(usize, usize, BondOrder)],
    lone_pairs: &'static [(usize, &'static [f64])],
) -> MoleculePreset {
    MoleculePreset {
        key,
        title,
        description,
        kind: Covalent,
        atoms,
        bonds,
        lone_pairs,
    }
}

const fn ionic(
    key: &'static str,
    title: &'static str,
    description: &'static str,
    atoms: &'static [PresetAtom],
) -> MoleculePreset {
    MoleculePreset {
        key,
        title,
        description,
        kind: Ionic,
        atoms,
        bonds: &[],
        lone_pairs: &[],
    }
}

/// Built-in molecules. Covalent atoms sit about one bond apart so their
/// circles (radius 0.6) overlap where the bond forms.
pub const MOLECULE_PRESETS: [MoleculePreset; 18] = [
    covalent(
        "H2",
        "H₂",
        "Hydrogen molecule - single covalent bond",
        &[at("H", -0.5, 0.0), at("H", 0.5, 0.0)],
        &[(0, 1, Single)],
        &[],
    ),
    covalent(
        "Cl2",
        "Cl₂",
        "Chlorine molecule - single covalent bond, 6 lone pairs total",
        &[at("Cl", -0.5, 0.0), at("Cl", 0.5, 0.0)],
        &[(0, 1, Single)],
        &[(0, &[90.0, 180.0, 270.0]), (1, &[90.0, 0.0, 270.0])],
    ),
    covalent(
        "O2",
        "O₂",
        "Oxygen molecule - double covalent bond",
        &[at("O", -0.5, 0.0), at("O", 0.5, 0.0)],
        &[(0, 1, Double)],
        &[(0, &[90.0, 270.0]), (1, &[90.0, 270.0])],
    ),
    covalent(
        "N2",
        "N₂",
        "Nitrogen molecule - triple covalent bond",
        &[at("N", -0.5, 0.0), at("N", 0.5, 0.0)],
        &[(0, 1, Triple)],
        &[(0, &[180.0]), (1, &[0.0])],
    ),
    covalent(
        "HCl",
        "HCl",
        "Hydrogen chloride - single covalent bond",
        &[at("H", -0.5, 0.0), at("Cl", 0.5, 0.0)],
        &[(0, 1, Single)],
        &[(1, &[90.0, 0.0, 270.0])],
    ),
    covalent(
        "HF",
        "HF",
        "Hydrogen fluoride - single covalent bond",
        &[at("H", -0.5, 0.0), at("F", 0.5, 0.0)],
        &[(0, 1, Single)],
        &[(1, &[90.0, 0.0, 270.0])],
    ),
    covalent(
        "H2O",
        "H₂O",
        "Water - bent molecule with 2 lone pairs on oxygen",
        &[at("O", 0.0, 0.0), at("H", -0.75, -0.6), at("H", 0.75, -0.6)],
        &[(0, 1, Single), (0, 2, Single)],
        &[(0, &[110.0, 70.0])],
    ),
    covalent(
        "H2S",
        "H₂S",
        "Hydrogen sulphide - similar to water",
        &[at("S", 0.0, 0.0), at("H", -0.75, -0.6), at("H", 0.75, -0.6)],
        &[(0, 1, Single), (0, 2, Single)],
        &[(0, &[110.0, 70.0])],
    ),
    covalent(
        "NH3",
        "NH₃",
        "Ammonia - pyramidal with 1 lone pair on nitrogen",
        &[
            at("N", 0.0, 0.0),
            at("H", -0.8, -0.55),
            at("H", 0.0, -0.9),
            at("H", 0.8, -0.55),
        ],
        &[(0, 1, Single), (0, 2, Single), (0, 3, Single)],
        &[(0, &[90.0])],
    ),
    covalent(
        "CH4",
        "CH₄",
        "Methane - tetrahedral arrangement",
        &[
            at("C", 0.0, 0.0),
            at("H", 0.0, 0.9),
            at("H", -0.8, -0.55),
            at("H", 0.8, -0.55),
            at("H", 0.0, -0.9),
        ],
        &[(0, 1, Single), (0, 2, Single), (0, 3, Single), (0, 4, Single)],
        &[],
    ),
    covalent(
        "CO2",
        "CO₂",
        "Carbon dioxide - linear with double bonds",
        &[at("C", 0.0, 0.0), at("O", -0.9, 0.0), at("O", 0.9, 0.0)],
        &[(0, 1, Double), (0, 2, Double)],
        &[(1, &[90.0, 270.0]), (2, &[90.0, 270.0])],
    ),
    ionic(
        "NaCl",
        "NaCl",
        "Sodium chloride - Na⁺ and Cl⁻ ions",
        &[cation("Na", -1.5, 0.0, 1), anion("Cl", 1.5, 0.0, -1)],
    ),
    ionic(
        "MgO",
        "MgO",
        "Magnesium oxide - Mg²⁺ and O²⁻ ions",
        &[cation("Mg", -1.5, 0.0, 2), anion("O", 1.5, 0.0, -2)],
    ),
    ionic(
        "MgCl2",
        "MgCl₂",
        "Magnesium chloride - Mg²⁺ and 2×Cl⁻",
        &[
            cation("Mg", 0.0, 0.0, 2),
            anion("Cl", -1.8, 0.0, -1),
            anion("Cl", 1.8, 0.0, -1),
        ],
    ),
    ionic(
        "CaCl2",
        "CaCl₂",
        "Calcium chloride - Ca²⁺ and 2×Cl⁻",
        &[
            cation("Ca", 0.0, 0.0, 2),
            anion("Cl", -1.8, 0.0, -1),
            anion("Cl", 1.8, 0.0, -1),
        ],
    ),
    ionic(
        "Na2O",
        "Na₂O",
        "Sodium oxide - 2×Na⁺ and O²⁻",
        &[
            cation("Na", -1.8, 0.0, 1),
            anion("O", 0.0, 0.0, -2),
            cation("Na", 1.8, 0.0, 1),
        ],
    ),
    ionic(
        "KBr",
        "KBr",
        "Potassium bromide - K⁺ and Br⁻",
        &[cation("K", -1.5, 0.0, 1), anion("Br", 1.5, 0.0, -1)],
    ),
    ionic(
        "LiF",
        "LiF",
        "Lithium fluoride - Li⁺ and F⁻",
        &[cation("Li", -1.5, 0.0, 1), anion("F", 1.5, 0.0, -1)],
    ),
];

/// Find a preset by key (`"H2O"`) or display title (`"H₂O"`).
pub fn molecule_preset(name: &str) -> Option<&'static MoleculePreset> {
    MOLECULE_PRESETS
        .iter()
        .find(|p| p.key == name || p.title == name)
}
