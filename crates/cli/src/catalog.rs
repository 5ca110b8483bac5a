//! Preset listings for the `presets` subcommand.

use clap::ValueEnum;
use figures::chem::{ELEMENTS, FORMULA_PRESETS, MOLECULE_PRESETS};
use figures::shapes::freebody::{freebody_preset, FREEBODY_PRESET_KEYS};
use figures::shapes::vectors::VECTOR_PRESETS;
use figures::shapes::{QuadPreset, TrianglePreset};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Family {
    Triangles,
    Quadrilaterals,
    Molecules,
    Formulae,
    Vectors,
    Freebody,
    Elements,
}

/// One listed preset. `defaults` carries the parameters the key expands to.
#[derive(Debug, Serialize)]
pub struct Entry {
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<Value>,
}

impl Entry {
    fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            description: None,
            defaults: None,
        }
    }
}

pub fn entries(family: Family) -> Vec<Entry> {
    match family {
        Family::Triangles => TrianglePreset::NAMES
            .iter()
            .map(|&name| Entry {
                defaults: TrianglePreset::from_name(name)
                    .and_then(|p| serde_json::to_value(p).ok()),
                ..Entry::new(name, &title_case(name))
            })
            .collect(),
        Family::Quadrilaterals => QuadPreset::NAMES
            .iter()
            .map(|&name| Entry {
                defaults: QuadPreset::from_name(name).and_then(|p| serde_json::to_value(p).ok()),
                ..Entry::new(name, &title_case(name))
            })
            .collect(),
        Family::Molecules => MOLECULE_PRESETS
            .iter()
            .map(|p| Entry {
                description: Some(p.description.to_string()),
                ..Entry::new(p.key, p.title)
            })
            .collect(),
        Family::Formulae => FORMULA_PRESETS
            .iter()
            .map(|p| Entry {
                description: Some(p.group.to_string()),
                defaults: Some(json!({ "smiles": p.smiles })),
                ..Entry::new(p.key, p.name)
            })
            .collect(),
        Family::Vectors => VECTOR_PRESETS
            .iter()
            .map(|p| Entry::new(p.key, p.title))
            .collect(),
        Family::Freebody => FREEBODY_PRESET_KEYS
            .iter()
            .filter_map(|&key| freebody_preset(key))
            .map(|p| Entry::new(p.key, p.title))
            .collect(),
        Family::Elements => ELEMENTS
            .iter()
            .filter(|e| e.has_shells())
            .map(|e| Entry {
                description: Some(
                    e.shells
                        .iter()
                        .map(u32::to_string)
                        .collect::<Vec<_>>()
                        .join("."),
                ),
                ..Entry::new(e.symbol, e.name)
            })
            .collect(),
    }
}

/// `isosceles_trapezium` → `Isosceles trapezium`.
fn title_case(key: &str) -> String {
    let words = key.replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_lists_something() {
        for f in Family::value_variants() {
            assert!(!entries(*f).is_empty());
        }
    }

    #[test]
    fn molecule_keys_are_ascii() {
        let list = entries(Family::Molecules);
        assert!(list.iter().all(|e| e.key.is_ascii()));
        assert!(list.iter().any(|e| e.key == "H2O" && e.title == "H₂O"));
    }

    #[test]
    fn triangle_entries_carry_default_parameters() {
        let list = entries(Family::Triangles);
        let right = list.iter().find(|e| e.key == "right").unwrap();
        let defaults = right.defaults.as_ref().unwrap();
        assert_eq!(defaults["preset"], "right");
        assert_eq!(defaults["base"], 3.0);
    }

    #[test]
    fn formula_entries_carry_their_smiles() {
        let list = entries(Family::Formulae);
        let acid = list.iter().find(|e| e.key == "ethanoic_acid").unwrap();
        assert_eq!(acid.title, "Ethanoic acid");
        assert_eq!(acid.description.as_deref(), Some("Carboxylic acids"));
        assert_eq!(acid.defaults.as_ref().unwrap()["smiles"], "CC(=O)O");
    }

    #[test]
    fn title_case_replaces_underscores() {
        assert_eq!(title_case("isosceles_trapezium"), "Isosceles trapezium");
        assert_eq!(title_case("30_60_90"), "30 60 90");
    }
}
