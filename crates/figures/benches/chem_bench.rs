//! Criterion benchmarks for SMILES layout, dot-and-cross electron placement and
//! formula bond lines.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use figures::chem::dotcross::electrons;
use figures::chem::formula::{formula_bonds, formula_layout};
use figures::chem::{
    molecule_from_smiles, DotCrossStyle, FormulaStyle, MoleculeLayout, SmilesLayout,
};

const SMILES: [(&str, &str); 5] = [
    ("water", "O"),
    ("ethanol", "CCO"),
    ("acetic_acid", "CC(=O)O"),
    ("benzene", "c1ccccc1"),
    ("cyclohexane", "C1CCCCC1"),
];

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("smiles_layout");
    for (name, smiles) in SMILES {
        group.bench_with_input(BenchmarkId::new("layout", name), &smiles, |b, s| {
            b.iter(|| {
                let _raw = SmilesLayout.layout(s);
            })
        });
    }
    group.finish();
}

fn bench_electrons(c: &mut Criterion) {
    let style = DotCrossStyle::default();
    let mut group = c.benchmark_group("dot_cross");
    for (name, smiles) in SMILES {
        let Ok(molecule) = molecule_from_smiles(&SmilesLayout, smiles, &style) else {
            continue;
        };
        group.bench_function(BenchmarkId::new("electrons", name), |b| {
            b.iter(|| electrons(&molecule, &style))
        });
    }
    group.finish();
}

fn bench_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("formula");
    for style in [FormulaStyle::Displayed, FormulaStyle::Skeletal] {
        for (name, smiles) in SMILES {
            let Ok(raw) = formula_layout(&SmilesLayout, smiles, style) else {
                continue;
            };
            let id = BenchmarkId::new(format!("{style:?}").to_lowercase(), name);
            group.bench_function(id, |b| b.iter(|| formula_bonds(&raw, style)));
        }
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_electrons, bench_formula);
criterion_main!(benches);
