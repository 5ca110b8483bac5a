//! Chord, arc, sector and segment measures between two angles on a circle.

/// Which of the two arcs between two angles a measure refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcChoice {
    #[default]
    Minor,
    Major,
}

/// Smaller angular distance between two angles, in degrees, in [0, 180].
#[inline]
pub fn minor_sweep(angle1_deg: f64, angle2_deg: f64) -> f64 {
    let d = (angle2_deg - angle1_deg).abs() % 360.0;
    d.min(360.0 - d)
}

/// Sweep of the chosen arc, in degrees.
#[inline]
pub fn sweep(angle1_deg: f64, angle2_deg: f64, choice: ArcChoice) -> f64 {
    let minor = minor_sweep(angle1_deg, angle2_deg);
    match choice {
        ArcChoice::Minor => minor,
        ArcChoice::Major => 360.0 - minor,
    }
}

/// `2r·sin(Δθ/2)`; identical for both arcs.
pub fn chord_length(radius: f64, angle1_deg: f64, angle2_deg: f64) -> f64 {
    2.0 * radius * (minor_sweep(angle1_deg, angle2_deg).to_radians() / 2.0).sin()
}

pub fn arc_length(radius: f64, angle1_deg: f64, angle2_deg: f64) -> f64 {
    arc_length_with(radius, angle1_deg, angle2_deg, ArcChoice::Minor)
}

/// `r·Δθ` for the chosen arc.
pub fn arc_length_with(radius: f64, angle1_deg: f64, angle2_deg: f64, choice: ArcChoice) -> f64 {
    radius * sweep(angle1_deg, angle2_deg, choice).to_radians()
}

pub fn sector_area(radius: f64, angle1_deg: f64, angle2_deg: f64) -> f64 {
    sector_area_with(radius, angle1_deg, angle2_deg, ArcChoice::Minor)
}

/// `½r²Δθ` for the chosen arc.
pub fn sector_area_with(radius: f64, angle1_deg: f64, angle2_deg: f64, choice: ArcChoice) -> f64 {
    0.5 * radius * radius * sweep(angle1_deg, angle2_deg, choice).to_radians()
}

pub fn segment_area(radius: f64, angle1_deg: f64, angle2_deg: f64) -> f64 {
    segment_area_with(radius, angle1_deg, angle2_deg, ArcChoice::Minor)
}

/// `½r²(Δθ − sin Δθ)` for the chosen arc.
pub fn segment_area_with(radius: f64, angle1_deg: f64, angle2_deg: f64, choice: ArcChoice) -> f64 {
    let theta = sweep(angle1_deg, angle2_deg, choice).to_radians();
    0.5 * radius * radius * (theta - theta.sin())
}
