//! Dot-and-cross molecules and electron shell diagrams.

use std::collections::BTreeMap;

use nalgebra::vector;
use tracing::debug;

use super::{dot, yes, Figure, Pen};
use crate::chem::dotcross::{self, ion_brackets};
use crate::chem::shells::{self, shell_layout};
use crate::chem::{
    charge_label, molecule_from_smiles, molecule_preset, DotCrossStyle, Marker, Molecule,
    MoleculeKind, MoleculeLayout, ShellStyle, SmilesLayout,
};
use crate::error::DiagramError;
use crate::render::{z, Appearance, Color, Fill, HAlign, Primitive, Scene, VAlign};

/// Full width of a drawn cross before per-electron scaling.
const CROSS_SIZE: f64 = 0.12;
const ELECTRON_RADIUS: f64 = 0.06;
const CHARGE_TEXT_SCALE: f64 = 0.75;
const NUCLEUS_TEXT_SCALE: f64 = 1.2;
const ION_NUCLEUS_TEXT_SCALE: f64 = 1.1;
const CONFIG_TEXT_SCALE: f64 = 0.9;

fn grey() -> Color {
    Color::grey()
}

fn red() -> Color {
    Color::named("red")
}

fn dotcross_padding() -> f64 {
    1.2
}

fn shell_padding() -> f64 {
    0.5
}

/// Where the molecule comes from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum MoleculeSource {
    /// A stock molecule by ASCII key, e.g. `H2O` or `NaCl`.
    Preset { name: String },
    /// Covalent molecule laid out from SMILES.
    Smiles { smiles: String },
    Custom { molecule: Molecule },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DotCrossDiagram {
    pub molecule: MoleculeSource,
    #[serde(default)]
    pub style: DotCrossStyle,
    /// Atom circles and symbols.
    #[serde(default = "grey")]
    pub line_color: Color,
    #[serde(default = "grey")]
    pub dot_color: Color,
    #[serde(default = "red")]
    pub cross_color: Color,
    /// Covalent only: draw non-bonding pairs.
    #[serde(default = "yes")]
    pub show_lone_pairs: bool,
    /// Ionic only: bracket charged ions.
    #[serde(default = "yes")]
    pub show_brackets: bool,
    #[serde(default = "dotcross_padding")]
    pub padding: f64,
}

impl DotCrossDiagram {
    pub fn new(molecule: MoleculeSource) -> Self {
        Self {
            molecule,
            style: DotCrossStyle::default(),
            line_color: grey(),
            dot_color: grey(),
            cross_color: red(),
            show_lone_pairs: true,
            show_brackets: true,
            padding: dotcross_padding(),
        }
    }

    /// Resolve the molecule, laying out SMILES with `layout`.
    pub fn molecule_with<L>(&self, layout: &L) -> Result<Molecule, DiagramError>
    where
        L: MoleculeLayout + ?Sized,
    {
        let molecule = match &self.molecule {
            MoleculeSource::Preset { name } => molecule_preset(name)
                .ok_or_else(|| DiagramError::UnknownPreset(name.clone()))?
                .molecule(),
            MoleculeSource::Smiles { smiles } => molecule_from_smiles(layout, smiles, &self.style)?,
            MoleculeSource::Custom { molecule } => molecule.clone(),
        };
        if self.show_lone_pairs || molecule.kind() == MoleculeKind::Ionic {
            return Ok(molecule);
        }
        Ok(Molecule::new(
            molecule.kind(),
            molecule.atoms().to_vec(),
            molecule.bonds().to_vec(),
            BTreeMap::new(),
        )?)
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        self.build_with_layout(appearance, &SmilesLayout)
    }

    /// Build with a caller-supplied SMILES layout collaborator.
    pub fn build_with_layout<L>(
        &self,
        appearance: &Appearance,
        layout: &L,
    ) -> Result<Figure, DiagramError>
    where
        L: MoleculeLayout + ?Sized,
    {
        let molecule = self.molecule_with(layout)?;
        let pen = Pen::new(appearance);
        let outline = pen.stroke(&self.line_color);
        let mut scene = Scene::new();

        for atom in molecule.atoms() {
            scene.push(
                z::SHAPE,
                Primitive::Circle {
                    center: atom.position,
                    radius: self.style.atom_radius,
                    stroke: Some(outline.clone()),
                    fill: None,
                },
            );
            let symbol = pen.label(&self.line_color, 1.0).bold();
            scene.text(z::LABEL, atom.position, atom.element.as_str(), symbol);
        }

        let electrons = dotcross::electrons(&molecule, &self.style);
        debug!(
            atoms = molecule.atoms().len(),
            electrons = electrons.len(),
            "dot-and-cross electrons placed"
        );
        let cross = pen.mark_stroke(&self.cross_color);
        for e in &electrons {
            match e.marker {
                Marker::Dot => dot(
                    &mut scene,
                    z::ELECTRON,
                    e.position,
                    ELECTRON_RADIUS * e.scale,
                    &self.dot_color,
                ),
                Marker::Cross => {
                    let h = CROSS_SIZE * e.scale / 2.0;
                    let p = e.position;
                    let arms = [(vector![-h, -h], vector![h, h]), (vector![-h, h], vector![h, -h])];
                    for (a, b) in arms {
                        scene.segment(z::ELECTRON, p + a, p + b, cross.clone());
                    }
                }
            }
        }

        if molecule.kind() == MoleculeKind::Ionic && self.show_brackets {
            for atom in molecule.atoms() {
                let Some(charge) = charge_label(atom.charge) else {
                    continue;
                };
                let br = ion_brackets(atom.position, &self.style);
                scene.polyline(z::SHAPE - 5, br.left.to_vec(), false, outline.clone());
                scene.polyline(z::SHAPE - 5, br.right.to_vec(), false, outline.clone());
                let style = pen
                    .bare_label(&self.line_color, CHARGE_TEXT_SCALE)
                    .bold()
                    .aligned(HAlign::Left, VAlign::Bottom);
                scene.text(z::SHAPE - 5, br.charge_anchor, charge, style);
            }
        }

        Ok(Figure {
            scene,
            view: dotcross::view_bounds(&molecule, self.padding),
        })
    }
}

/// Bohr diagram of one atom or simple ion.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShellDiagram {
    pub element: String,
    #[serde(default)]
    pub charge: i32,
    #[serde(default)]
    pub style: ShellStyle,
    #[serde(default = "grey")]
    pub color: Color,
    /// Print the `2.8.1` configuration under the shells.
    #[serde(default = "yes")]
    pub show_configuration: bool,
    #[serde(default = "yes")]
    pub show_symbol: bool,
    #[serde(default = "shell_padding")]
    pub padding: f64,
}

impl ShellDiagram {
    pub fn new(element: impl Into<String>, charge: i32) -> Self {
        Self {
            element: element.into(),
            charge,
            style: ShellStyle::default(),
            color: grey(),
            show_configuration: true,
            show_symbol: true,
            padding: shell_padding(),
        }
    }

    pub fn build(&self, appearance: &Appearance) -> Result<Figure, DiagramError> {
        let layout = shell_layout(&self.element, self.charge, vector![0.0, 0.0], &self.style)?;
        let pen = Pen::new(appearance);
        let stroke = pen.stroke(&self.color);
        let mut scene = Scene::new();

        scene.push(
            z::SHAPE,
            Primitive::Circle {
                center: layout.center,
                radius: layout.nucleus_radius,
                stroke: Some(stroke.clone()),
                fill: Some(Fill::solid(pen.paper())),
            },
        );
        if self.show_symbol {
            let scale = if layout.charge == 0 {
                NUCLEUS_TEXT_SCALE
            } else {
                ION_NUCLEUS_TEXT_SCALE
            };
            let style = pen.bare_label(&self.color, scale).bold();
            scene.text(z::SHAPE + 1, layout.center, layout.label.as_str(), style);
        }

        for shell in &layout.shells {
            scene.push(
                z::SHAPE - 5,
                Primitive::Circle {
                    center: layout.center,
                    radius: shell.radius,
                    stroke: Some(stroke.clone()),
                    fill: None,
                },
            );
            for &e in &shell.electrons {
                dot(&mut scene, z::ELECTRON, e, ELECTRON_RADIUS, &self.color);
            }
        }

        if self.show_configuration {
            let style = pen
                .label(&self.color, CONFIG_TEXT_SCALE)
                .aligned(HAlign::Center, VAlign::Top);
            scene.text(
                z::LABEL,
                layout.configuration_anchor,
                layout.configuration.as_str(),
                style,
            );
        }

        Ok(Figure {
            scene,
            view: shells::view_bounds(&layout, &self.style, self.padding),
        })
    }
}
