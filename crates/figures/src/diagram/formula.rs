//! Displayed and skeletal formula figures.

use tracing::debug;

use super::{yes, Figure, Pen};
use crate::chem::formula::{
    formula_bonds, formula_layout, formula_preset, formula_view, labelled_atoms, AtomLabels,
    FormulaStyle,
};
use crate::chem::{MoleculeLayout, SmilesLayout};
use crate::error::DiagramError;
use crate::render::{z, Appearance, Color, LineStyle, Scene, Stroke};

fn formula_padding() -> f64 {
    0.8
}

/// Where the structure comes from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FormulaSource {
    /// A stock molecule by key or name, e.g. `ethanol` or `Propan-2-ol`.
    Preset { name: String },
    Smiles { smiles: String },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FormulaDiagram {
    pub molecule: FormulaSource,
    #[serde(default)]
    pub style: FormulaStyle,
    /// Displayed formulae only.
    #[serde(default)]
    pub labels: AtomLabels,
    /// Bonds and atom symbols.
    #[serde(default)]
    pub color: Color,
    /// Draw a backdrop behind atom symbols.
    #[serde(default = "yes")]
    pub label_background: bool,
    #[serde(default = "formula_padding")]
    pub padding: f64,
}

impl FormulaDiagram {
    pub fn new(molecule: FormulaSource, style: FormulaStyle) -> Self {
        Self {
            molecule,
            style,
            labels: AtomLabels::default(),
            color: Color::default(),
            label_background: true,
            padding: formula_padding(),
        }
    }

    fn smiles(&self) -> Result<&str, DiagramError> {
        match &self.molecule {
            FormulaSource::Preset { name } => formula_preset(name)
                .map(|p| p.smiles)
                .ok_or_else(|| DiagramError::UnknownPreset(name.clone())),
            FormulaSource::Smiles { smiles } => Ok(smiles),
        }
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
        let raw = formula_layout(layout, self.smiles()?, self.style)?;
        let pen = Pen::new(appearance);
        let mut scene = Scene::new();

        let lines = formula_bonds(&raw, self.style);
        for line in &lines {
            let mut stroke = Stroke::new(self.color.clone(), pen.line() * line.width);
            if line.dashed {
                stroke = stroke.styled(LineStyle::Dashed);
            }
            scene.segment(z::SHAPE, line.segment.start, line.segment.end, stroke);
        }

        let backdrop = self.label_background.then(|| pen.paper());
        let symbol = pen
            .bare_label(&self.color, 1.0)
            .with_background(backdrop)
            .bold();
        let shown = labelled_atoms(&raw, self.style, self.labels);
        for &i in &shown {
            let atom = &raw.atoms[i];
            scene.text(z::LABEL, atom.position, atom.element.as_str(), symbol.clone());
        }
        debug!(
            style = ?self.style,
            atoms = raw.atoms.len(),
            lines = lines.len(),
            labels = shown.len(),
            "formula drawn"
        );

        Ok(Figure {
            scene,
            view: formula_view(&raw, self.padding),
        })
    }
}
