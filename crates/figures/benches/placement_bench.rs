//! Criterion benchmarks for label placement and whole-figure builds.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use figures::annotate::{side_label, vertex_label, DirectionPolicy};
use figures::diagram::{CircleDiagram, DiagramSpec, NumberLineDiagram};
use figures::render::{Appearance, SvgOptions};
use figures::shapes::triangle::from_coordinates;
use figures::shapes::Polygon;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_triangles(n: usize, seed: u64) -> Vec<Polygon> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut point = || Vector2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
    (0..n)
        .filter_map(|_| from_coordinates([point(), point(), point()]).ok())
        .collect()
}

fn bench_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("labels");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("triangle_labels", n), &n, |b, &n| {
            b.iter_batched(
                || random_triangles(n, 7),
                |tris| {
                    for t in &tris {
                        for i in 0..3 {
                            let _v = vertex_label(t, i, DirectionPolicy::Auto, 0.6);
                            let _s = side_label(t, i, 0.5, DirectionPolicy::Auto, 0.4);
                        }
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_figures(c: &mut Criterion) {
    let appearance = Appearance::default();
    let options = SvgOptions::default();
    let specs = [
        ("circle", DiagramSpec::Circle(CircleDiagram::default())),
        (
            "number_line",
            DiagramSpec::NumberLine(NumberLineDiagram {
                minor_divisions: Some(4),
                ..NumberLineDiagram::default()
            }),
        ),
    ];
    let mut group = c.benchmark_group("figures");
    for (name, spec) in &specs {
        group.bench_function(BenchmarkId::new("build_and_svg", name), |b| {
            b.iter(|| {
                if let Ok(fig) = spec.build(&appearance) {
                    let _svg = fig.to_svg(&appearance, &options);
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_labels, bench_figures);
criterion_main!(benches);
