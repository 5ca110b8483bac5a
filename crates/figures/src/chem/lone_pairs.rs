use std::collections::BTreeMap;

use tracing::debug;

use super::elements::outer_electrons;
use super::molecule::{Atom, Bond};
use crate::kernel::{angle_of, normalize_degrees};

/// Angles (degrees, in [0, 360)) for `count` lone pairs on an atom whose bonds
/// leave in the directions `bonded_dirs`.
///
/// - no bonds: evenly spaced from 0°.
/// - one bond: clustered opposite the bond (±30° for two pairs, ±45° and the
///   middle for three); four or more are spread evenly around the free side.
/// - several bonds: midpoints of the largest gaps between neighbouring bond
///   directions; with more pairs than gaps, the widest gaps hold several.
pub fn lone_pair_angles(bonded_dirs: &[f64], count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let raw: Vec<f64> = match bonded_dirs {
        [] => (0..count)
            .map(|j| j as f64 * 360.0 / count as f64)
            .collect(),
        [dir] => {
            let base = dir + 180.0;
            match count {
                1 => vec![base],
                2 => vec![base - 30.0, base + 30.0],
                3 => vec![base - 45.0, base, base + 45.0],
                n => (1..=n)
                    .map(|j| dir + j as f64 * 360.0 / (n + 1) as f64)
                    .collect(),
            }
        }
        dirs => spread_over_gaps(dirs, count),
    };
    raw.into_iter().map(normalize_degrees).collect()
}

/// Gaps between consecutive sorted directions, largest first (ties broken by
/// the larger midpoint). Each gap takes one pair at its midpoint until every
/// gap is used; further pairs go to the gap whose pairs would then sit furthest
/// apart, and a gap holding `k` pairs spaces them evenly.
fn spread_over_gaps(dirs: &[f64], count: usize) -> Vec<f64> {
    let mut sorted = dirs.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    // (size, start, midpoint)
    let mut gaps: Vec<(f64, f64, f64)> = (0..n)
        .map(|j| {
            let start = sorted[j];
            let mut end = sorted[(j + 1) % n];
            if end < start {
                end += 360.0;
            }
            (end - start, start, ((start + end) / 2.0).rem_euclid(360.0))
        })
        .collect();
    gaps.sort_by(|x, y| y.0.total_cmp(&x.0).then(y.2.total_cmp(&x.2)));

    let mut shares: Vec<usize> = (0..n).map(|j| usize::from(j < count)).collect();
    for _ in n..count {
        let spacing = |j: usize| gaps[j].0 / (shares[j] + 1) as f64;
        let widest = (0..n).max_by(|&i, &j| {
            spacing(i)
                .total_cmp(&spacing(j))
                .then(j.cmp(&i))
        });
        let Some(widest) = widest else {
            break;
        };
        shares[widest] += 1;
    }
    if count > n {
        debug!(pairs = count, gaps = n, "splitting gaps between lone pairs");
    }

    gaps.iter()
        .zip(&shares)
        .flat_map(|(&(size, start, mid), &k)| {
            (1..=k).map(move |j| {
                if k == 1 {
                    mid
                } else {
                    start + size * j as f64 / (k + 1) as f64
                }
            })
        })
        .collect()
}

/// Lone-pair angles for every atom of a bonded structure.
///
/// Each atom keeps `(outer electrons − charge − bonding electrons) / 2` pairs,
/// rounded down, where a bond of order k uses k electrons from each end
/// (1.5 for aromatic). Hydrogen and helium never get lone pairs.
pub fn assign_lone_pairs(atoms: &[Atom], bonds: &[Bond]) -> BTreeMap<usize, Vec<f64>> {
    let mut out = BTreeMap::new();
    for (i, atom) in atoms.iter().enumerate() {
        if matches!(atom.element.as_str(), "H" | "He") {
            continue;
        }
        let mut bonding = 0.0;
        let mut dirs = Vec::new();
        for bond in bonds {
            let Some(other) = bond.partner(i) else {
                continue;
            };
            let Some(partner) = atoms.get(other) else {
                continue;
            };
            bonding += bond.order.electrons();
            dirs.push(angle_of(partner.position - atom.position));
        }
        let free = outer_electrons(&atom.element) as f64 - atom.charge as f64 - bonding;
        let pairs = (free / 2.0).floor();
        if pairs < 1.0 {
            continue;
        }
        let angles = lone_pair_angles(&dirs, pairs as usize);
        if !angles.is_empty() {
            out.insert(i, angles);
        }
    }
    out
}
