//! Chemistry diagrams: dot-and-cross molecules, electron shells, displayed and
//! skeletal formulae.
//!
//! Purpose
//! - Element data, molecule presets, lone-pair placement, a SMILES layout
//!   collaborator, the electron geometry and the formula bond lines the
//!   diagram builders draw.
//!
//! Why this design
//! - `Molecule` is validated once at construction and read-only afterwards;
//!   electron positions are recomputed from it on demand, never stored.
//! - Lone pairs are chosen from bond directions alone (largest free gaps), so
//!   the same rule serves hand-written molecules and SMILES input.
//!
//! Code cross-refs: `diagram::DotCrossDiagram`, `diagram::ShellDiagram`,
//! `diagram::FormulaDiagram`

pub mod dotcross;
pub mod elements;
pub mod formula;
mod lone_pairs;
mod molecule;
pub mod shells;
mod smiles;

pub use dotcross::{DotCrossStyle, Electron, Marker};
pub use elements::{element, Element, ELEMENTS};
pub use formula::{formula_preset, AtomLabels, FormulaPreset, FormulaStyle, FORMULA_PRESETS};
pub use lone_pairs::{assign_lone_pairs, lone_pair_angles};
pub use molecule::{
    charge_label, molecule_preset, Atom, Bond, BondOrder, Molecule, MoleculeKind, MoleculePreset,
    MOLECULE_PRESETS,
};
pub use shells::{ShellLayout, ShellStyle};
pub use smiles::{
    molecule_from_smiles, MoleculeLayout, RawAtom, RawBond, RawLayout, SmilesLayout,
    SINGLE_ATOM_SCALE,
};
