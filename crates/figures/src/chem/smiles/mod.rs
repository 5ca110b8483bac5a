//! SMILES to 2D structure: the molecule-layout collaborator.
//!
//! Purpose
//! - Turn a SMILES string into atoms with 2D coordinates and typed bonds, with
//!   every hydrogen present as its own atom (dot-and-cross diagrams and
//!   displayed formulae draw them), or as a heavy-atom skeleton.
//!
//! Why this design
//! - `MoleculeLayout` is the seam: diagram code only needs `RawLayout`, so an
//!   external toolkit can be plugged in without touching the drawing side.
//! - The built-in `SmilesLayout` reads a practical subset (organic subset and
//!   bracket atoms, all bond symbols, branches, ring closures, `.` fragments).
//!   Stereo marks are accepted and ignored. Anything else is a `LayoutError`;
//!   no partial geometry is ever returned.
//!
//! Code cross-refs: `chem::assign_lone_pairs`, `chem::formula`, `diagram::DotCrossDiagram`

mod coords;
mod parse;

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use super::dotcross::DotCrossStyle;
use super::lone_pairs::assign_lone_pairs;
use super::molecule::{Atom, Bond, BondOrder, Molecule, MoleculeKind};
use crate::error::LayoutError;
use crate::kernel::Point;
use parse::{ParsedBond, ParsedSmiles};

/// Scale used when a structure has no bonds to measure.
pub const SINGLE_ATOM_SCALE: f64 = 0.6;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawAtom {
    pub element: String,
    pub position: Point,
    #[serde(default)]
    pub charge: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawBond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

/// Atoms with layout coordinates (arbitrary units) and the bonds between them.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawLayout {
    pub atoms: Vec<RawAtom>,
    pub bonds: Vec<RawBond>,
}

impl RawLayout {
    /// Mean bond length, `None` without bonds.
    pub fn mean_bond_length(&self) -> Option<f64> {
        let lengths: Vec<f64> = self
            .bonds
            .iter()
            .filter_map(|b| {
                let pa = self.atoms.get(b.a)?.position;
                let pb = self.atoms.get(b.b)?.position;
                Some((pb - pa).norm())
            })
            .collect();
        if lengths.is_empty() {
            None
        } else {
            Some(lengths.iter().sum::<f64>() / lengths.len() as f64)
        }
    }

    /// Drop hydrogens bonded to a heavier atom, keeping bond indices valid.
    /// Hydrogens bonded only to hydrogen (H₂) or to nothing stay.
    pub fn without_hydrogens(self) -> RawLayout {
        let is_h = |i: usize| self.atoms.get(i).is_some_and(|a| a.element == "H");
        let mut drop = vec![false; self.atoms.len()];
        for b in &self.bonds {
            if is_h(b.a) && !is_h(b.b) {
                drop[b.a] = true;
            }
            if is_h(b.b) && !is_h(b.a) {
                drop[b.b] = true;
            }
        }
        let mut index = vec![None; self.atoms.len()];
        let mut atoms = Vec::new();
        for (i, atom) in self.atoms.into_iter().enumerate() {
            if !drop[i] {
                index[i] = Some(atoms.len());
                atoms.push(atom);
            }
        }
        let bonds = self
            .bonds
            .into_iter()
            .filter_map(|b| {
                Some(RawBond {
                    a: (*index.get(b.a)?)?,
                    b: (*index.get(b.b)?)?,
                    order: b.order,
                })
            })
            .collect();
        RawLayout { atoms, bonds }
    }

    /// Scale coordinates about the origin so the mean bond length is `length`.
    /// Layouts without bonds are returned unchanged.
    pub fn with_bond_length(mut self, length: f64) -> RawLayout {
        if let Some(mean) = self.mean_bond_length().filter(|&m| m > 1e-9) {
            let k = length / mean;
            for atom in &mut self.atoms {
                atom.position *= k;
            }
        }
        self
    }
}

/// Produces 2D coordinates for a SMILES string. One synchronous call.
pub trait MoleculeLayout {
    /// Every atom, hydrogens included.
    fn layout(&self, smiles: &str) -> Result<RawLayout, LayoutError>;

    /// Heavy-atom skeleton for skeletal formulae.
    fn skeleton(&self, smiles: &str) -> Result<RawLayout, LayoutError> {
        Ok(self.layout(smiles)?.without_hydrogens())
    }
}

/// Built-in SMILES reader and depicter (unit bond length).
#[derive(Clone, Copy, Debug, Default)]
pub struct SmilesLayout;

impl MoleculeLayout for SmilesLayout {
    fn layout(&self, smiles: &str) -> Result<RawLayout, LayoutError> {
        depict(smiles, true)
    }

    /// Laid out without hydrogens, so the skeleton keeps its own zig-zag.
    /// Bracket atoms written as `[H]` remain.
    fn skeleton(&self, smiles: &str) -> Result<RawLayout, LayoutError> {
        depict(smiles, false)
    }
}

fn depict(smiles: &str, hydrogens: bool) -> Result<RawLayout, LayoutError> {
    let smiles = smiles.trim();
    if smiles.is_empty() {
        return Err(LayoutError::Empty);
    }
    let mut parsed = parse::parse(smiles)?;
    let rings = perceive_rings(parsed.atoms.len(), &parsed.bonds);
    settle_aromaticity(&mut parsed, &rings)?;
    if hydrogens {
        add_hydrogens(&mut parsed);
    }

    let bonds: Vec<(usize, usize, BondOrder)> =
        parsed.bonds.iter().map(|b| (b.a, b.b, b.order)).collect();
    let positions = coords::layout(parsed.atoms.len(), &bonds, &rings);
    debug!(
        atoms = parsed.atoms.len(),
        bonds = bonds.len(),
        rings = rings.len(),
        "laid out SMILES"
    );
    Ok(RawLayout {
        atoms: parsed
            .atoms
            .into_iter()
            .zip(positions)
            .map(|(a, position)| RawAtom {
                element: a.element,
                position,
                charge: a.charge,
            })
            .collect(),
        bonds: bonds
            .into_iter()
            .map(|(a, b, order)| RawBond { a, b, order })
            .collect(),
    })
}

/// One cycle per ring-closure bond: the closure plus the shortest path
/// joining its ends without it. Duplicate cycles are dropped.
fn perceive_rings(n: usize, bonds: &[ParsedBond]) -> Vec<Vec<usize>> {
    let mut adj: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (k, b) in bonds.iter().enumerate() {
        adj[b.a].push((b.b, k));
        adj[b.b].push((b.a, k));
    }
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut rings = Vec::new();
    for (k, closure) in bonds.iter().enumerate() {
        if !closure.ring_closure {
            continue;
        }
        let Some(path) = shortest_path(&adj, closure.b, closure.a, k) else {
            continue;
        };
        let mut key = path.clone();
        key.sort_unstable();
        if seen.insert(key) {
            rings.push(path);
        }
    }
    rings
}

/// BFS path `from → to` that never uses bond `skip`.
fn shortest_path(
    adj: &[Vec<(usize, usize)>],
    from: usize,
    to: usize,
    skip: usize,
) -> Option<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; adj.len()];
    let mut visited = vec![false; adj.len()];
    let mut queue = VecDeque::from([from]);
    visited[from] = true;
    while let Some(u) = queue.pop_front() {
        if u == to {
            let mut path = vec![to];
            let mut cur = to;
            while let Some(p) = parent[cur] {
                path.push(p);
                cur = p;
            }
            path.reverse();
            return Some(path);
        }
        for &(v, k) in &adj[u] {
            if k != skip && !visited[v] {
                visited[v] = true;
                parent[v] = Some(u);
                queue.push_back(v);
            }
        }
    }
    None
}

/// Aromatic atoms must sit in a ring; implied bonds between aromatic atoms
/// that are not ring bonds (e.g. the biphenyl link) are single.
fn settle_aromaticity(parsed: &mut ParsedSmiles, rings: &[Vec<usize>]) -> Result<(), LayoutError> {
    let mut ring_bonds: BTreeSet<(usize, usize)> = BTreeSet::new();
    let mut in_ring = vec![false; parsed.atoms.len()];
    for ring in rings {
        for (k, &a) in ring.iter().enumerate() {
            let b = ring[(k + 1) % ring.len()];
            ring_bonds.insert((a.min(b), a.max(b)));
            in_ring[a] = true;
        }
    }
    if let Some(atom) = parsed
        .atoms
        .iter()
        .enumerate()
        .find(|(i, a)| a.aromatic && !in_ring[*i])
        .map(|(_, a)| a)
    {
        return Err(LayoutError::parse(
            atom.offset,
            format!("aromatic atom '{}' is not in a ring", atom.element.to_lowercase()),
        ));
    }
    for bond in &mut parsed.bonds {
        let key = (bond.a.min(bond.b), bond.a.max(bond.b));
        if bond.order == BondOrder::Aromatic && !bond.explicit && !ring_bonds.contains(&key) {
            bond.order = BondOrder::Single;
        }
    }
    Ok(())
}

/// Normal valences of the organic subset, lowest first.
fn default_valences(element: &str) -> &'static [u32] {
    match element {
        "B" => &[3],
        "C" => &[4],
        "N" => &[3, 5],
        "O" => &[2],
        "P" => &[3, 5],
        "S" => &[2, 4, 6],
        "F" | "Cl" | "Br" | "I" => &[1],
        _ => &[],
    }
}

/// Implicit hydrogens of an organic-subset atom with the given bond-order sum.
///
/// Aromatic atoms count each aromatic bond once plus one for the ring system
/// and only ever fill up to their lowest valence.
fn implicit_hydrogens(element: &str, aromatic: bool, bond_sum: u32) -> u32 {
    let valences = default_valences(element);
    if aromatic {
        let used = bond_sum + 1;
        return match valences.first() {
            Some(&v) if used <= v => v - used,
            _ => 0,
        };
    }
    valences
        .iter()
        .find(|&&v| v >= bond_sum)
        .map_or(0, |&v| v - bond_sum)
}

/// Append every explicit and implicit hydrogen as an atom bonded to its parent.
fn add_hydrogens(parsed: &mut ParsedSmiles) {
    let heavy = parsed.atoms.len();
    let mut bond_sum = vec![0u32; heavy];
    for b in &parsed.bonds {
        let w = match b.order {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        };
        bond_sum[b.a] += w;
        bond_sum[b.b] += w;
    }
    for i in 0..heavy {
        let atom = &parsed.atoms[i];
        let count = match atom.hydrogens {
            Some(h) => h,
            None => implicit_hydrogens(&atom.element, atom.aromatic, bond_sum[i]),
        };
        let offset = atom.offset;
        for _ in 0..count {
            let h = parsed.atoms.len();
            parsed.atoms.push(parse::ParsedAtom {
                element: "H".to_string(),
                aromatic: false,
                charge: 0,
                hydrogens: Some(0),
                offset,
            });
            parsed.bonds.push(ParsedBond {
                a: i,
                b: h,
                order: BondOrder::Single,
                explicit: false,
                ring_closure: false,
            });
        }
    }
}

/// Lay out `smiles` and build a covalent molecule sized for dot-and-cross drawing.
///
/// Coordinates are rescaled so the mean bond length becomes
/// `atom_radius·(2 − target_overlap)`, making bonded circles overlap by
/// `target_overlap` radii; without bonds the scale is `SINGLE_ATOM_SCALE`.
/// Lone pairs come from `assign_lone_pairs`.
pub fn molecule_from_smiles<L>(
    layout: &L,
    smiles: &str,
    style: &DotCrossStyle,
) -> Result<Molecule, LayoutError>
where
    L: MoleculeLayout + ?Sized,
{
    let trimmed = smiles.trim();
    if trimmed.is_empty() {
        return Err(LayoutError::Empty);
    }
    let raw = layout.layout(trimmed).map_err(|e| {
        debug!(smiles = trimmed, error = %e, "molecule layout failed");
        e
    })?;
    if raw.atoms.is_empty() {
        return Err(LayoutError::NoAtoms);
    }
    let target = style.atom_radius * (2.0 - style.target_overlap);
    let scale = match raw.mean_bond_length() {
        Some(mean) if mean > 1e-9 => target / mean,
        _ => SINGLE_ATOM_SCALE,
    };

    let atoms: Vec<Atom> = raw
        .atoms
        .into_iter()
        .map(|a| Atom {
            charge: a.charge,
            ..Atom::new(a.element, a.position * scale)
        })
        .collect();
    let bonds: Vec<Bond> = raw
        .bonds
        .iter()
        .map(|b| Bond::new(b.a, b.b, b.order))
        .collect();
    let lone_pairs = assign_lone_pairs(&atoms, &bonds);
    Molecule::new(MoleculeKind::Covalent, atoms, bonds, lone_pairs)
        .map_err(|e| LayoutError::Invalid(e.to_string()))
}
