use super::*;
use crate::chem::{AtomLabels, FormulaStyle, MoleculeLayout, RawLayout};
use crate::error::{GeometryError, LayoutError};
use crate::kernel::{point_on_circle, Point};
use crate::render::{z, Item, Primitive, SvgOptions};
use crate::shapes::number_line::EndpointStyle;
use crate::shapes::quad::Diagonal;
use crate::shapes::{QuadPreset, TrianglePreset};
use nalgebra::vector;

fn close(a: Point, b: Point) -> bool {
    (a - b).norm() < 1e-9
}

fn texts(fig: &Figure) -> Vec<(&str, Point)> {
    fig.scene
        .items()
        .iter()
        .filter_map(|i| match &i.primitive {
            Primitive::Text { text, position, .. } => Some((text.as_str(), *position)),
            _ => None,
        })
        .collect()
}

fn has_text(fig: &Figure, want: &str) -> bool {
    texts(fig).iter().any(|(t, _)| *t == want)
}

fn text_at(fig: &Figure, want: &str) -> Point {
    texts(fig)
        .into_iter()
        .find(|(t, _)| *t == want)
        .map(|(_, p)| p)
        .unwrap_or_else(|| panic!("no text {want:?}"))
}

fn count(fig: &Figure, pred: impl Fn(&Item) -> bool) -> usize {
    fig.scene.items().iter().filter(|i| pred(i)).count()
}

fn appearance() -> Appearance {
    Appearance::default()
}

fn sss(a: f64, b: f64, c: f64) -> TriangleDiagram {
    TriangleDiagram {
        shape: TriangleShape::Sss {
            a,
            b,
            c,
            base_center: Point::zeros(),
            rotation: 0.0,
        },
        style: ShapeStyle::default(),
        marking: Marking::default(),
        padding: 1.0,
    }
}

#[test]
fn degrees_text_drops_trailing_zero() {
    assert_eq!(degrees_text(30.0), "30°");
    assert_eq!(degrees_text(36.869_9), "36.9°");
    assert_eq!(degrees_text(89.999_99), "90°");
}

#[test]
fn triangle_gets_default_vertex_names_outside() {
    let d = sss(3.0, 4.0, 5.0);
    let fig = d.build(&appearance()).unwrap();
    let poly = d.polygon().unwrap();
    let c = poly.centroid();
    for (i, name) in ["A", "B", "C"].iter().enumerate() {
        let at = text_at(&fig, name);
        let v = poly.vertex(i);
        assert!(((at - v).norm() - 0.6).abs() < 1e-9);
        assert!((at - c).norm() > (v - c).norm());
    }
    // outline is one closed polyline on the shape layer
    assert_eq!(
        count(&fig, |i| matches!(
            i.primitive,
            Primitive::Polyline { closed: true, .. }
        ) && i.z == z::SHAPE),
        1
    );
    assert!(fig.view.contains(poly.vertex(2)));
}

#[test]
fn empty_vertex_names_are_skipped() {
    let mut d = sss(3.0, 3.0, 3.0);
    d.marking.vertex_labels = Some(vec!["P".into(), String::new(), "R".into()]);
    let fig = d.build(&appearance()).unwrap();
    let names: Vec<&str> = texts(&fig).into_iter().map(|(t, _)| t).collect();
    assert_eq!(names, ["P", "R"]);
}

#[test]
fn auto_angle_marker_squares_right_angles() {
    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.vertex_labels = Some(Vec::new());
    d.marking.angles = vec![
        AngleMark {
            vertex: 2,
            marker: AngleMarker::Auto,
            label: None,
            measure: true,
        },
        AngleMark {
            vertex: 0,
            marker: AngleMarker::Auto,
            label: Some("θ".into()),
            measure: true,
        },
    ];
    let fig = d.build(&appearance()).unwrap();
    // vertex C gets the square, vertex A an arc
    assert_eq!(
        count(&fig, |i| matches!(
            i.primitive,
            Primitive::Polyline { closed: false, .. }
        )),
        1
    );
    assert_eq!(count(&fig, |i| matches!(i.primitive, Primitive::Arc { .. })), 1);
    assert!(has_text(&fig, "90°"));
    // explicit label wins over the measured value
    assert!(has_text(&fig, "θ"));
    assert!(!has_text(&fig, "36.9°"));
}

#[test]
fn out_of_range_marks_are_rejected() {
    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.side_labels = vec![SideLabel {
        side: 3,
        text: "x".into(),
        position: 0.5,
        direction: Default::default(),
        distance: 0.4,
    }];
    assert!(matches!(
        d.build(&appearance()),
        Err(DiagramError::Geometry(GeometryError::InvalidGeometry { .. }))
    ));

    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.ticks = vec![1, 1, 1, 1];
    assert!(d.build(&appearance()).is_err());
}

#[test]
fn oversized_mark_counts_are_rejected() {
    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.ticks = vec![usize::MAX];
    assert!(matches!(
        d.build(&appearance()),
        Err(DiagramError::Geometry(GeometryError::InvalidGeometry { .. }))
    ));

    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.parallel_arrows = vec![0, 7];
    assert!(d.build(&appearance()).is_err());

    let mut d = sss(3.0, 4.0, 5.0);
    d.marking.ticks = vec![6, 0, 2];
    assert!(d.build(&appearance()).is_ok());
}

#[test]
fn impossible_triangle_is_an_error() {
    assert!(sss(1.0, 1.0, 5.0).build(&appearance()).is_err());
}

#[test]
fn preset_triangle_rotates_about_its_centroid() {
    let base = TriangleDiagram {
        shape: TriangleShape::Preset {
            shape: TrianglePreset::from_name("equilateral").unwrap(),
            center: Point::zeros(),
            rotation: 0.0,
        },
        ..sss(1.0, 1.0, 1.0)
    };
    let mut turned = base.clone();
    if let TriangleShape::Preset { rotation, .. } = &mut turned.shape {
        *rotation = 60.0;
    }
    let a = base.polygon().unwrap();
    let b = turned.polygon().unwrap();
    assert!(close(a.centroid(), b.centroid()));
}

#[test]
fn ticks_and_parallel_arrows_are_drawn_per_side() {
    let d = QuadDiagram {
        shape: QuadShape::Preset {
            shape: QuadPreset::from_name("parallelogram").unwrap(),
            center: Point::zeros(),
            rotation: 0.0,
        },
        style: ShapeStyle::default(),
        marking: Marking {
            vertex_labels: Some(Vec::new()),
            ticks: vec![1, 2, 1, 2],
            parallel_arrows: vec![1, 0, 1],
            ..Marking::default()
        },
        diagonals: Vec::new(),
        padding: 1.0,
    };
    let fig = d.build(&appearance()).unwrap();
    assert_eq!(count(&fig, |i| matches!(i.primitive, Primitive::Segment { .. })), 6);
    assert_eq!(
        count(&fig, |i| matches!(
            i.primitive,
            Primitive::Polyline { closed: false, .. }
        )),
        2
    );
}

#[test]
fn quad_diagonals_are_dashed_and_view_is_square() {
    let d = QuadDiagram {
        shape: QuadShape::Preset {
            shape: QuadPreset::from_name("rectangle").unwrap(),
            center: Point::zeros(),
            rotation: 0.0,
        },
        style: ShapeStyle::default(),
        marking: Marking::default(),
        diagonals: vec![
            DiagonalMark {
                which: Diagonal::Ac,
                label: "d".into(),
            },
            DiagonalMark {
                which: Diagonal::Bd,
                label: String::new(),
            },
        ],
        padding: 1.0,
    };
    let fig = d.build(&appearance()).unwrap();
    let dashed = count(&fig, |i| match &i.primitive {
        Primitive::Segment { stroke, .. } => stroke.style == LineStyle::Dashed,
        _ => false,
    });
    assert_eq!(dashed, 2);
    assert!(has_text(&fig, "d"));
    assert!((fig.view.width() - fig.view.height()).abs() < 1e-9);
}

#[test]
fn circle_line_labels_sit_beside_their_segment() {
    let d = CircleDiagram {
        radius: 2.0,
        radii: vec![LineMark {
            angle: 0.0,
            label: "r".into(),
        }],
        tangents: vec![TangentMark {
            angle: 0.0,
            length: 4.0,
            label: "t".into(),
        }],
        ..CircleDiagram::default()
    };
    let fig = d.build(&appearance()).unwrap();
    // radius along +x: left normal points up
    assert!(close(text_at(&fig, "r"), vector![1.0, 0.4]));
    // tangent label on the half from the touch point towards +y
    assert!(close(text_at(&fig, "t"), vector![1.6, 1.0]));
}

#[test]
fn circle_regions_sit_below_the_outline() {
    let d = CircleDiagram {
        sector: Some(RegionMark {
            start: 0.0,
            end: 90.0,
            color: Color::named("blue"),
            opacity: 0.3,
        }),
        arc: Some(ArcMark {
            start: 0.0,
            end: 90.0,
            color: None,
            line_style: LineStyle::Solid,
            label: "s".into(),
        }),
        ..CircleDiagram::default()
    };
    let fig = d.build(&appearance()).unwrap();
    let ordered = fig.scene.ordered();
    assert!(matches!(ordered[0].primitive, Primitive::Polygon { .. }));
    assert!(matches!(ordered[1].primitive, Primitive::Circle { .. }));
    // arc label 0.5 outside the arc midpoint
    let expected = point_on_circle(Point::zeros(), 3.5, 45.0);
    assert!(close(text_at(&fig, "s"), expected));
}

#[test]
fn central_angle_label_moves_away_from_centre() {
    let d = CircleDiagram {
        central_angles: vec![CentralAngleMark {
            start: 0.0,
            end: 90.0,
            radius: 1.0,
            label: "x".into(),
            label_distance: 0.3,
        }],
        ..CircleDiagram::default()
    };
    let fig = d.build(&appearance()).unwrap();
    let at = text_at(&fig, "x");
    assert!((at.norm() - 0.9).abs() < 1e-9);
    assert!((at.x - at.y).abs() < 1e-9);
}

#[test]
fn zero_radius_circle_is_an_error() {
    let d = CircleDiagram {
        radius: 0.0,
        ..CircleDiagram::default()
    };
    assert!(d.build(&appearance()).is_err());
}

#[test]
fn number_line_labels_every_major_tick() {
    let d = NumberLineDiagram::default();
    let fig = d.build(&appearance()).unwrap();
    let labels: Vec<&str> = texts(&fig).into_iter().map(|(t, _)| t).collect();
    assert_eq!(labels.len(), 11);
    assert!(labels.contains(&"-5") && labels.contains(&"0") && labels.contains(&"5"));
    assert!(close(text_at(&fig, "0"), vector![0.0, -0.5]));
    assert!(fig.view.min.x < -5.0 && fig.view.max.x > 5.0);
}

#[test]
fn number_line_intervals_and_points() {
    let d = NumberLineDiagram {
        show_ticks: false,
        intervals: vec![IntervalMark {
            start: -2.0,
            end: 3.0,
            color: Color::named("blue"),
            start_style: EndpointStyle::Open,
            end_style: EndpointStyle::Arrow,
            fill: true,
        }],
        points: vec![PointMark {
            value: 1.0,
            open: false,
            color: Color::named("red"),
            label: "p".into(),
            label_side: LabelSide::Below,
        }],
        braces: vec![BraceMark {
            start: -2.0,
            end: 3.0,
            label: "5".into(),
            offset: 0.4,
        }],
        ..NumberLineDiagram::default()
    };
    let fig = d.build(&appearance()).unwrap();
    // shaded band is the lowest item
    assert!(matches!(fig.scene.ordered()[0].primitive, Primitive::Polygon { .. }));
    // open start: a ring with a stroke; closed point: a plain disc
    let rings = count(&fig, |i| {
        matches!(i.primitive, Primitive::Circle { stroke: Some(_), .. })
    });
    let discs = count(&fig, |i| {
        matches!(i.primitive, Primitive::Circle { stroke: None, .. })
    });
    assert_eq!((rings, discs), (1, 1));
    assert!(close(text_at(&fig, "p"), vector![1.0, -0.4]));
    assert!(has_text(&fig, "5"));
}

#[test]
fn number_line_rejects_bad_ranges_and_steps() {
    let flipped = NumberLineDiagram {
        min: 3.0,
        max: 1.0,
        ..NumberLineDiagram::default()
    };
    assert!(flipped.build(&appearance()).is_err());
    let zero_step = NumberLineDiagram {
        major_step: 0.0,
        ..NumberLineDiagram::default()
    };
    assert!(zero_step.build(&appearance()).is_err());
}

fn electron_count(fig: &Figure) -> usize {
    let dots = count(fig, |i| {
        i.z == z::ELECTRON && matches!(i.primitive, Primitive::Circle { .. })
    });
    let cross_arms = count(fig, |i| {
        i.z == z::ELECTRON && matches!(i.primitive, Primitive::Segment { .. })
    });
    dots + cross_arms / 2
}

#[test]
fn water_has_eight_outer_electrons_around_oxygen() {
    let d = DotCrossDiagram::new(MoleculeSource::Preset { name: "H2O".into() });
    let fig = d.build(&appearance()).unwrap();
    assert_eq!(electron_count(&fig), 8);
    assert!(has_text(&fig, "O"));

    let bare = DotCrossDiagram {
        show_lone_pairs: false,
        ..d
    };
    assert_eq!(electron_count(&bare.build(&appearance()).unwrap()), 4);
}

#[test]
fn ionic_compounds_get_brackets_and_charges() {
    let d = DotCrossDiagram::new(MoleculeSource::Preset { name: "NaCl".into() });
    let fig = d.build(&appearance()).unwrap();
    let brackets = count(&fig, |i| matches!(i.primitive, Primitive::Polyline { .. }));
    assert_eq!(brackets, 4);
    assert!(has_text(&fig, "+"));
    assert!(has_text(&fig, "−"));

    let plain = DotCrossDiagram {
        show_brackets: false,
        ..d
    };
    let fig = plain.build(&appearance()).unwrap();
    assert_eq!(count(&fig, |i| matches!(i.primitive, Primitive::Polyline { .. })), 0);
}

#[test]
fn unknown_molecule_preset_is_reported() {
    let d = DotCrossDiagram::new(MoleculeSource::Preset { name: "XeF9".into() });
    assert_eq!(
        d.build(&appearance()),
        Err(DiagramError::UnknownPreset("XeF9".into()))
    );
}

#[test]
fn smiles_molecules_use_the_builtin_layout() {
    let d = DotCrossDiagram::new(MoleculeSource::Smiles { smiles: "O".into() });
    let fig = d.build(&appearance()).unwrap();
    let atoms = count(&fig, |i| {
        i.z == z::SHAPE && matches!(i.primitive, Primitive::Circle { .. })
    });
    assert_eq!(atoms, 3);
    assert_eq!(electron_count(&fig), 8);
}

struct Refuses;

impl MoleculeLayout for Refuses {
    fn layout(&self, _smiles: &str) -> Result<RawLayout, LayoutError> {
        Err(LayoutError::Unsupported("stereo".into()))
    }
}

#[test]
fn layout_failures_surface_as_layout_errors() {
    let d = DotCrossDiagram::new(MoleculeSource::Smiles { smiles: "C".into() });
    assert_eq!(
        d.build_with_layout(&appearance(), &Refuses),
        Err(DiagramError::Layout(LayoutError::Unsupported("stereo".into())))
    );
    let empty = DotCrossDiagram::new(MoleculeSource::Smiles { smiles: "  ".into() });
    assert_eq!(
        empty.build(&appearance()),
        Err(DiagramError::Layout(LayoutError::Empty))
    );
}

#[test]
fn sodium_shell_diagram() {
    let fig = ShellDiagram::new("Na", 0).build(&appearance()).unwrap();
    let shells = count(&fig, |i| {
        i.z == z::SHAPE - 5 && matches!(i.primitive, Primitive::Circle { .. })
    });
    assert_eq!(shells, 3);
    let electrons = count(&fig, |i| i.z == z::ELECTRON);
    assert_eq!(electrons, 11);
    assert!(has_text(&fig, "Na"));
    assert!(has_text(&fig, "2.8.1"));

    let ion = ShellDiagram::new("Na", 1).build(&appearance()).unwrap();
    assert!(has_text(&ion, "Na+"));
    assert!(has_text(&ion, "2.8"));
    assert_eq!(count(&ion, |i| i.z == z::ELECTRON), 10);
}

#[test]
fn unknown_shell_element_is_reported() {
    assert_eq!(
        ShellDiagram::new("Xx", 0).build(&appearance()),
        Err(DiagramError::UnknownElement("Xx".into()))
    );
}

#[test]
fn balanced_vectors_draw_no_resultant() {
    let d = VectorDiagram::new(VectorMode::Preset {
        name: "equilibrium".into(),
    });
    let fig = d.build(&appearance()).unwrap();
    assert!(!has_text(&fig, "R"));
    assert!(has_text(&fig, "A") && has_text(&fig, "C"));

    let d = VectorDiagram::new(VectorMode::Preset {
        name: "perpendicular".into(),
    });
    let fig = d.build(&appearance()).unwrap();
    assert!(has_text(&fig, "R"));
    // first vector lies on the x axis: no angle arc
    assert!(!has_text(&fig, "0°"));
    assert_eq!(count(&fig, |i| matches!(i.primitive, Primitive::Arc { .. })), 0);
    assert!(fig.view.contains(vector![2.0, 1.5]));
}

#[test]
fn vector_components_are_labelled() {
    let d = VectorDiagram::new(VectorMode::Components {
        magnitude: 2.0,
        angle: 40.0,
        labels: None,
    });
    let fig = d.build(&appearance()).unwrap();
    for t in ["F", "Fₓ", "Fᵧ", "θ=40°", "x", "y"] {
        assert!(has_text(&fig, t), "missing {t}");
    }
    // the x component label sits below the x arrow
    assert!(text_at(&fig, "Fₓ").y < 0.0);
}

#[test]
fn unknown_vector_preset_is_reported() {
    let d = VectorDiagram::new(VectorMode::Preset { name: "nope".into() });
    assert_eq!(
        d.build(&appearance()),
        Err(DiagramError::UnknownPreset("nope".into()))
    );
}

#[test]
fn incline_forces_follow_the_slope() {
    let d = FreeBodyDiagram::new(FreeBodySource::Preset {
        name: "incline".into(),
    });
    let fig = d.build(&appearance()).unwrap();
    for t in ["W", "N", "f", "30°"] {
        assert!(has_text(&fig, t), "missing {t}");
    }
    let layout = crate::shapes::freebody::Setting::Incline { angle: 30.0 }
        .layout()
        .unwrap();
    let n = text_at(&fig, "N") - layout.center;
    assert!((n.y.atan2(n.x).to_degrees() - 120.0).abs() < 1e-6);
    let w = text_at(&fig, "W") - layout.center;
    assert!(w.x.abs() < 1e-9 && w.y < 0.0);
}

#[test]
fn free_body_view_grows_for_long_forces() {
    let d = FreeBodyDiagram {
        arrow_scale: 4.0,
        ..FreeBodyDiagram::new(FreeBodySource::Preset { name: "flat".into() })
    };
    let fig = d.build(&appearance()).unwrap();
    assert!(fig.view.max.y > 4.8);
    assert!(fig.view.min.x <= -2.5);
}

#[test]
fn hidden_object_and_ground_leave_only_forces() {
    let d = FreeBodyDiagram {
        show_object: false,
        show_ground: false,
        ..FreeBodyDiagram::new(FreeBodySource::Preset {
            name: "hanging".into(),
        })
    };
    let fig = d.build(&appearance()).unwrap();
    // two forces: shaft plus head each, and two labels
    assert_eq!(fig.scene.len(), 6);
}

#[test]
fn diagram_specs_parse_from_json_and_render() {
    let specs = [
        r#"{"kind": "triangle", "shape": {"method": "sss", "a": 3, "b": 4, "c": 5}}"#,
        r#"{"kind": "quadrilateral",
            "shape": {"method": "preset",
                      "shape": {"preset": "kite", "d1": 4, "d2": 6, "split": 0.5}},
            "diagonals": [{"which": "AC"}]}"#,
        r#"{"kind": "circle", "radius": 2, "chords": [{"from": 30, "to": 150, "label": "c"}]}"#,
        r#"{"kind": "number_line", "min": 0, "max": 1, "major_step": 0.25,
            "label_format": "fraction"}"#,
        r#"{"kind": "dot_cross", "molecule": {"source": "preset", "name": "CO2"}}"#,
        r#"{"kind": "shell", "element": "Cl", "charge": -1}"#,
        r#"{"kind": "formula", "molecule": {"source": "preset", "name": "ethanol"},
            "style": "skeletal"}"#,
        r#"{"kind": "vector", "mode": {"mode": "addition",
            "vectors": [{"magnitude": 2, "angle": 30}], "labels": ["A"]}}"#,
        r#"{"kind": "free_body", "source": {"source": "custom",
            "setting": {"type": "incline", "angle": 25},
            "forces": [{"name": "W", "direction": {"degrees": 270}, "magnitude": 1,
                        "kind": "weight"},
                       {"name": "N", "direction": "normal", "magnitude": 1,
                        "kind": "normal"}]}}"#,
    ];
    let kinds = [
        "triangle",
        "quadrilateral",
        "circle",
        "number_line",
        "dot_cross",
        "shell",
        "formula",
        "vector",
        "free_body",
    ];
    for (json, kind) in specs.iter().zip(kinds) {
        let spec: DiagramSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.kind(), kind);
        let fig = spec.build(&appearance()).unwrap();
        assert!(!fig.scene.is_empty(), "{kind} drew nothing");
        let svg = fig.to_svg(&appearance(), &SvgOptions::default());
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
    }
}

fn segments(fig: &Figure, dashed: bool) -> usize {
    count(fig, |i| match &i.primitive {
        Primitive::Segment { stroke, .. } => (stroke.style == LineStyle::Dashed) == dashed,
        _ => false,
    })
}

#[test]
fn displayed_benzene_shows_every_atom() {
    let d = FormulaDiagram::new(
        FormulaSource::Preset {
            name: "Benzene".into(),
        },
        FormulaStyle::Displayed,
    );
    let fig = d.build(&appearance()).unwrap();
    // six aromatic ring bonds (solid + dashed) and six C-H bonds
    assert_eq!(segments(&fig, false), 12);
    assert_eq!(segments(&fig, true), 6);
    assert_eq!(texts(&fig).iter().filter(|(t, _)| *t == "C").count(), 6);
    assert_eq!(texts(&fig).iter().filter(|(t, _)| *t == "H").count(), 6);

    let semi = FormulaDiagram {
        labels: AtomLabels {
            carbons: false,
            hydrogens: true,
        },
        ..d
    };
    let fig = semi.build(&appearance()).unwrap();
    assert!(!has_text(&fig, "C"));
    assert_eq!(texts(&fig).len(), 6);
}

#[test]
fn skeletal_formula_labels_heteroatoms_only() {
    let d = FormulaDiagram::new(
        FormulaSource::Smiles {
            smiles: "CC(=O)O".into(),
        },
        FormulaStyle::Skeletal,
    );
    let fig = d.build(&appearance()).unwrap();
    let labels: Vec<&str> = texts(&fig).into_iter().map(|(t, _)| t).collect();
    assert_eq!(labels, vec!["O", "O"]);
    // C-C, two lines for C=O, C-O
    assert_eq!(segments(&fig, false), 4);
    assert!(fig.scene.items().iter().all(|i| i.z == z::SHAPE || i.z == z::LABEL));
    assert!(texts(&fig).iter().all(|(_, p)| fig.view.contains(*p)));
    assert!((fig.view.width() - fig.view.height()).abs() < 1e-9);
}

#[test]
fn formula_failures_are_reported() {
    let unknown = FormulaDiagram::new(
        FormulaSource::Preset {
            name: "cubane".into(),
        },
        FormulaStyle::Displayed,
    );
    assert_eq!(
        unknown.build(&appearance()),
        Err(DiagramError::UnknownPreset("cubane".into()))
    );

    let skeletal = FormulaDiagram::new(
        FormulaSource::Smiles {
            smiles: "CCO".into(),
        },
        FormulaStyle::Skeletal,
    );
    assert_eq!(
        skeletal.build_with_layout(&appearance(), &Refuses),
        Err(DiagramError::Layout(LayoutError::Unsupported("stereo".into())))
    );

    let bad = FormulaDiagram::new(
        FormulaSource::Smiles {
            smiles: "[CH400000000]".into(),
        },
        FormulaStyle::Displayed,
    );
    assert!(matches!(
        bad.build(&appearance()),
        Err(DiagramError::Layout(LayoutError::Parse { position: 3, .. }))
    ));
}

#[test]
fn number_line_fraction_labels() {
    let spec: DiagramSpec = serde_json::from_str(
        r#"{"kind": "number_line", "min": 0, "max": 1, "major_step": 0.25,
            "label_format": "fraction"}"#,
    )
    .unwrap();
    let fig = spec.build(&appearance()).unwrap();
    for t in ["0", "1/4", "1/2", "3/4", "1"] {
        assert!(has_text(&fig, t), "missing {t}");
    }
}

#[test]
fn unknown_colour_names_fail_to_parse() {
    let bad = r#"{"kind": "triangle", "shape": {"method": "sss", "a": 3, "b": 4, "c": 5},
                  "style": {"color": "mauve"}}"#;
    assert!(serde_json::from_str::<DiagramSpec>(bad).is_err());
}
