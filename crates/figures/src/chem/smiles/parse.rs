//! Byte-level SMILES reader producing an atom/bond graph (no hydrogens added).

use std::collections::BTreeMap;

use crate::chem::molecule::BondOrder;
use crate::error::LayoutError;

#[rustfmt::skip]
const PERIODIC: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga",
    "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd",
    "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os",
    "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa",
    "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg",
    "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Largest hydrogen count accepted inside brackets.
const MAX_BRACKET_HYDROGENS: u32 = 8;
/// Largest formal charge magnitude accepted inside brackets.
const MAX_CHARGE: u32 = 15;

fn is_element(symbol: &str) -> bool {
    PERIODIC.contains(&symbol)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParsedAtom {
    /// Capitalised element symbol (`"C"` for both `C` and `c`).
    pub element: String,
    pub aromatic: bool,
    pub charge: i32,
    /// Hydrogen count written inside brackets; `None` for organic-subset atoms,
    /// whose hydrogens are implicit.
    pub hydrogens: Option<u32>,
    /// Byte offset of the atom in the input.
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ParsedBond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
    /// Written with a bond symbol rather than implied.
    pub explicit: bool,
    pub ring_closure: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ParsedSmiles {
    pub atoms: Vec<ParsedAtom>,
    pub bonds: Vec<ParsedBond>,
}

struct OpenRing {
    atom: usize,
    bond: Option<BondOrder>,
    offset: usize,
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    out: ParsedSmiles,
    prev: Option<usize>,
    /// Explicit bond symbol waiting for its second atom, with its offset.
    pending: Option<(BondOrder, usize)>,
    /// `(atom, offset of '(')` for every open branch.
    branches: Vec<(usize, usize)>,
    rings: BTreeMap<u32, OpenRing>,
}

/// Parse a trimmed, non-empty SMILES string.
pub(crate) fn parse(input: &str) -> Result<ParsedSmiles, LayoutError> {
    let mut p = Parser {
        bytes: input.as_bytes(),
        pos: 0,
        out: ParsedSmiles::default(),
        prev: None,
        pending: None,
        branches: Vec::new(),
        rings: BTreeMap::new(),
    };
    p.run()?;
    Ok(p.out)
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    fn digits(&mut self) -> Option<u32> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
    }

    fn run(&mut self) -> Result<(), LayoutError> {
        while let Some(c) = self.peek() {
            match c {
                b'(' => {
                    let Some(prev) = self.prev else {
                        return Err(LayoutError::parse(self.pos, "branch before any atom"));
                    };
                    if self.pending.is_some() {
                        return Err(LayoutError::parse(self.pos, "bond symbol before '('"));
                    }
                    self.branches.push((prev, self.pos));
                    self.pos += 1;
                }
                b')' => {
                    let Some((atom, _)) = self.branches.pop() else {
                        return Err(LayoutError::parse(self.pos, "unmatched ')'"));
                    };
                    if self.pending.is_some() {
                        return Err(LayoutError::parse(self.pos, "bond symbol before ')'"));
                    }
                    self.prev = Some(atom);
                    self.pos += 1;
                }
                b'-' | b'=' | b'#' | b':' | b'/' | b'\\' => {
                    if self.prev.is_none() {
                        return Err(LayoutError::parse(self.pos, "bond before any atom"));
                    }
                    if self.pending.is_some() {
                        return Err(LayoutError::parse(self.pos, "two bond symbols in a row"));
                    }
                    let order = match c {
                        b'=' => BondOrder::Double,
                        b'#' => BondOrder::Triple,
                        b':' => BondOrder::Aromatic,
                        _ => BondOrder::Single,
                    };
                    self.pending = Some((order, self.pos));
                    self.pos += 1;
                }
                b'.' => {
                    if self.pending.is_some() {
                        return Err(LayoutError::parse(self.pos, "bond symbol before '.'"));
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                b'0'..=b'9' | b'%' => self.ring_bond()?,
                b'[' => self.bracket_atom()?,
                b'$' => return Err(LayoutError::Unsupported("quadruple bonds ($)".into())),
                b'*' => return Err(LayoutError::Unsupported("wildcard atoms (*)".into())),
                c if c.is_ascii_alphabetic() => self.organic_atom()?,
                other => {
                    return Err(LayoutError::parse(
                        self.pos,
                        format!("unexpected character '{}'", other as char),
                    ))
                }
            }
        }
        if let Some((_, offset)) = self.pending {
            return Err(LayoutError::parse(offset, "bond symbol at end of input"));
        }
        if let Some(&(_, offset)) = self.branches.last() {
            return Err(LayoutError::parse(offset, "unclosed branch"));
        }
        if let Some((label, open)) = self.rings.iter().next() {
            return Err(LayoutError::parse(open.offset, format!("unclosed ring {label}")));
        }
        if self.out.atoms.is_empty() {
            return Err(LayoutError::NoAtoms);
        }
        Ok(())
    }

    fn push_atom(&mut self, atom: ParsedAtom) {
        let idx = self.out.atoms.len();
        self.out.atoms.push(atom);
        if let Some(prev) = self.prev {
            let pending = self.pending.take().map(|(o, _)| o);
            self.push_bond(prev, idx, pending, false);
        }
        self.prev = Some(idx);
    }

    fn push_bond(&mut self, a: usize, b: usize, explicit: Option<BondOrder>, ring_closure: bool) {
        let order = explicit.unwrap_or_else(|| {
            if self.out.atoms[a].aromatic && self.out.atoms[b].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        });
        self.out.bonds.push(ParsedBond {
            a,
            b,
            order,
            explicit: explicit.is_some(),
            ring_closure,
        });
    }

    fn ring_bond(&mut self) -> Result<(), LayoutError> {
        let start = self.pos;
        let label = if self.peek() == Some(b'%') {
            self.pos += 1;
            match (self.peek(), self.peek_at(1)) {
                (Some(d1 @ b'0'..=b'9'), Some(d2 @ b'0'..=b'9')) => {
                    self.pos += 2;
                    u32::from(d1 - b'0') * 10 + u32::from(d2 - b'0')
                }
                _ => return Err(LayoutError::parse(start, "expected two digits after '%'")),
            }
        } else {
            let d = self.peek().unwrap_or(b'0');
            self.pos += 1;
            u32::from(d - b'0')
        };
        let Some(prev) = self.prev else {
            return Err(LayoutError::parse(start, "ring bond before any atom"));
        };
        let bond = self.pending.take().map(|(o, _)| o);
        match self.rings.remove(&label) {
            None => {
                self.rings.insert(
                    label,
                    OpenRing {
                        atom: prev,
                        bond,
                        offset: start,
                    },
                );
            }
            Some(open) => {
                if open.atom == prev {
                    return Err(LayoutError::parse(start, format!("ring {label} closes on itself")));
                }
                let order = match (open.bond, bond) {
                    (Some(x), Some(y)) if x != y => {
                        return Err(LayoutError::parse(
                            start,
                            format!("conflicting bond orders on ring {label}"),
                        ))
                    }
                    (x, y) => x.or(y),
                };
                let duplicate = self.out.bonds.iter().any(|b| {
                    (b.a == open.atom && b.b == prev) || (b.a == prev && b.b == open.atom)
                });
                if duplicate {
                    return Err(LayoutError::parse(
                        start,
                        format!("ring {label} duplicates a bond"),
                    ));
                }
                self.push_bond(open.atom, prev, order, true);
            }
        }
        Ok(())
    }

    fn organic_atom(&mut self) -> Result<(), LayoutError> {
        let offset = self.pos;
        let rest = &self.bytes[self.pos..];
        let (element, aromatic, len) = if rest.starts_with(b"Cl") {
            ("Cl", false, 2)
        } else if rest.starts_with(b"Br") {
            ("Br", false, 2)
        } else {
            match rest[0] {
                b'B' => ("B", false, 1),
                b'C' => ("C", false, 1),
                b'N' => ("N", false, 1),
                b'O' => ("O", false, 1),
                b'P' => ("P", false, 1),
                b'S' => ("S", false, 1),
                b'F' => ("F", false, 1),
                b'I' => ("I", false, 1),
                b'b' => ("B", true, 1),
                b'c' => ("C", true, 1),
                b'n' => ("N", true, 1),
                b'o' => ("O", true, 1),
                b'p' => ("P", true, 1),
                b's' => ("S", true, 1),
                other => {
                    return Err(LayoutError::parse(
                        offset,
                        format!("'{}' must be written inside brackets", other as char),
                    ))
                }
            }
        };
        self.pos += len;
        self.push_atom(ParsedAtom {
            element: element.to_string(),
            aromatic,
            charge: 0,
            hydrogens: None,
            offset,
        });
        Ok(())
    }

    /// `[` isotope? symbol chirality? hcount? charge? class? `]`
    fn bracket_atom(&mut self) -> Result<(), LayoutError> {
        let offset = self.pos;
        self.pos += 1;
        // isotope is irrelevant for drawing
        self.digits();

        let (element, aromatic) = self.bracket_symbol()?;

        // chirality is ignored: @, @@, @TH1, @SP2, @OH12, ...
        if self.peek() == Some(b'@') {
            while self.peek() == Some(b'@') {
                self.pos += 1;
            }
            if let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) {
                if matches!(&[a, b], b"TH" | b"AL" | b"SP" | b"TB" | b"OH") {
                    self.pos += 2;
                    self.digits();
                }
            }
        }

        let mut hydrogens = 0;
        if self.peek() == Some(b'H') {
            self.pos += 1;
            let at = self.pos;
            hydrogens = match self.digits() {
                Some(n) if n <= MAX_BRACKET_HYDROGENS => n,
                None if self.pos == at => 1,
                _ => return Err(LayoutError::parse(at, "hydrogen count too large")),
            };
        }

        let mut charge = 0i32;
        if let Some(sign @ (b'+' | b'-')) = self.peek() {
            let unit = if sign == b'+' { 1 } else { -1 };
            self.pos += 1;
            let at = self.pos;
            let magnitude = match self.digits() {
                Some(n) => n,
                None if self.pos == at => {
                    let mut n = 1;
                    while self.peek() == Some(sign) {
                        n += 1;
                        self.pos += 1;
                    }
                    n
                }
                None => u32::MAX,
            };
            if magnitude > MAX_CHARGE {
                return Err(LayoutError::parse(at, "charge too large"));
            }
            charge = unit * magnitude as i32;
        }

        if self.peek() == Some(b':') {
            self.pos += 1;
            if self.digits().is_none() {
                return Err(LayoutError::parse(self.pos, "expected atom class after ':'"));
            }
        }

        if self.peek() != Some(b']') {
            return Err(LayoutError::parse(self.pos, "expected ']'"));
        }
        self.pos += 1;
        self.push_atom(ParsedAtom {
            element,
            aromatic,
            charge,
            hydrogens: Some(hydrogens),
            offset,
        });
        Ok(())
    }

    fn bracket_symbol(&mut self) -> Result<(String, bool), LayoutError> {
        let start = self.pos;
        let Some(first) = self.peek() else {
            return Err(LayoutError::parse(start, "unterminated bracket atom"));
        };
        if first.is_ascii_lowercase() {
            for (text, element) in [("se", "Se"), ("as", "As")] {
                if self.bytes[start..].starts_with(text.as_bytes()) {
                    self.pos += 2;
                    return Ok((element.to_string(), true));
                }
            }
            let element = match first {
                b'b' => "B",
                b'c' => "C",
                b'n' => "N",
                b'o' => "O",
                b'p' => "P",
                b's' => "S",
                _ => {
                    return Err(LayoutError::parse(
                        start,
                        format!("'{}' is not an aromatic element", first as char),
                    ))
                }
            };
            self.pos += 1;
            return Ok((element.to_string(), true));
        }
        if !first.is_ascii_uppercase() {
            return Err(LayoutError::parse(start, "expected an element symbol"));
        }
        if let Some(second) = self.peek_at(1).filter(u8::is_ascii_lowercase) {
            let two: String = [first as char, second as char].iter().collect();
            if is_element(&two) {
                self.pos += 2;
                return Ok((two, false));
            }
        }
        let one = (first as char).to_string();
        if is_element(&one) {
            self.pos += 1;
            return Ok((one, false));
        }
        Err(LayoutError::UnknownElement {
            position: start,
            symbol: one,
        })
    }
}
