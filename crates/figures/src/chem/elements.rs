//! Element table for H through Ca, plus Br and I.
//!
//! Br and I only carry their outer-electron count; their shells are not
//! tabulated, so they can appear in dot-and-cross diagrams but not in shell
//! diagrams.

/// One row of the element table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub protons: u32,
    pub outer_electrons: u32,
    /// Electrons per shell, innermost first. Empty when not tabulated.
    pub shells: &'static [u32],
}

impl Element {
    /// Whether a shell diagram can be drawn for this element.
    pub fn has_shells(&self) -> bool {
        !self.shells.is_empty()
    }
}

const fn row(
    symbol: &'static str,
    name: &'static str,
    protons: u32,
    outer_electrons: u32,
    shells: &'static [u32],
) -> Element {
    Element {
        symbol,
        name,
        protons,
        outer_electrons,
        shells,
    }
}

/// All known elements, in proton order.
pub const ELEMENTS: [Element; 22] = [
    row("H", "Hydrogen", 1, 1, &[1]),
    row("He", "Helium", 2, 2, &[2]),
    row("Li", "Lithium", 3, 1, &[2, 1]),
    row("Be", "Beryllium", 4, 2, &[2, 2]),
    row("B", "Boron", 5, 3, &[2, 3]),
    row("C", "Carbon", 6, 4, &[2, 4]),
    row("N", "Nitrogen", 7, 5, &[2, 5]),
    row("O", "Oxygen", 8, 6, &[2, 6]),
    row("F", "Fluorine", 9, 7, &[2, 7]),
    row("Ne", "Neon", 10, 8, &[2, 8]),
    row("Na", "Sodium", 11, 1, &[2, 8, 1]),
    row("Mg", "Magnesium", 12, 2, &[2, 8, 2]),
    row("Al", "Aluminium", 13, 3, &[2, 8, 3]),
    row("Si", "Silicon", 14, 4, &[2, 8, 4]),
    row("P", "Phosphorus", 15, 5, &[2, 8, 5]),
    row("S", "Sulphur", 16, 6, &[2, 8, 6]),
    row("Cl", "Chlorine", 17, 7, &[2, 8, 7]),
    row("Ar", "Argon", 18, 8, &[2, 8, 8]),
    row("K", "Potassium", 19, 1, &[2, 8, 8, 1]),
    row("Ca", "Calcium", 20, 2, &[2, 8, 8, 2]),
    row("Br", "Bromine", 35, 7, &[]),
    row("I", "Iodine", 53, 7, &[]),
];

/// Look up an element by its symbol (case-sensitive, e.g. `"Cl"`).
pub fn element(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Outer-shell electron count, 0 for unknown symbols.
pub fn outer_electrons(symbol: &str) -> u32 {
    element(symbol).map_or(0, |e| e.outer_electrons)
}

/// Symbols of the elements that have a tabulated shell configuration.
pub fn shell_symbols() -> impl Iterator<Item = &'static str> {
    ELEMENTS.iter().filter(|e| e.has_shells()).map(|e| e.symbol)
}
