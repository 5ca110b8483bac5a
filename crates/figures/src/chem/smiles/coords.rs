//! 2D depiction with unit bond length.
//!
//! Rings become regular polygons; a ring fused onto an already placed ring is
//! built on the far side of the shared edge. Chain atoms fan out from their
//! parent: 120° zig-zag for two neighbours, even spacing for more (the first
//! heavy neighbour taking the straightest way on), and straight through for
//! sp centres (a triple bond or two double bonds).
//! Disconnected fragments are laid side by side.

use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::chem::molecule::BondOrder;
use crate::kernel::{
    angle_of, direction, normalize_degrees, perpendicular, try_unit, Bounds2, Point,
};
use nalgebra::vector;

/// Horizontal gap between the bounding boxes of separate fragments.
const FRAGMENT_GAP: f64 = 1.5;

struct Placer<'a> {
    adj: Vec<Vec<(usize, BondOrder)>>,
    rings: &'a [Vec<usize>],
    pos: Vec<Option<Point>>,
    ring_center: Vec<Option<Point>>,
    /// Zig-zag side for the next chain step out of each atom.
    flip: Vec<bool>,
    queue: VecDeque<usize>,
}

/// Coordinates for `n` atoms joined by `bonds`, given the perceived `rings`
/// (each an ordered cycle of atom indices).
pub(crate) fn layout(
    n: usize,
    bonds: &[(usize, usize, BondOrder)],
    rings: &[Vec<usize>],
) -> Vec<Point> {
    let mut adj = vec![Vec::new(); n];
    for &(a, b, order) in bonds {
        if a < n && b < n {
            adj[a].push((b, order));
            adj[b].push((a, order));
        }
    }
    let mut placer = Placer {
        adj,
        rings,
        pos: vec![None; n],
        ring_center: vec![None; rings.len()],
        flip: vec![false; n],
        queue: VecDeque::new(),
    };

    let mut fragments: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        if placer.pos[start].is_none() {
            fragments.push(placer.place_fragment(start));
        }
    }

    let mut out: Vec<Point> = placer
        .pos
        .into_iter()
        .map(|p| p.unwrap_or_else(Point::zeros))
        .collect();
    arrange_fragments(&mut out, &fragments);
    out
}

/// Shift fragments after the first so they sit to its right, vertically centred.
fn arrange_fragments(pos: &mut [Point], fragments: &[Vec<usize>]) {
    let bounds_of = |pos: &[Point], atoms: &[usize]| {
        let pts: Vec<Point> = atoms.iter().map(|&i| pos[i]).collect();
        Bounds2::from_points(&pts).ok()
    };
    let Some(first) = fragments.first().and_then(|f| bounds_of(pos, f)) else {
        return;
    };
    let mut right = first.max.x;
    let mid_y = first.center().y;
    for frag in &fragments[1..] {
        let Some(b) = bounds_of(pos, frag) else {
            continue;
        };
        let shift = vector![right + FRAGMENT_GAP - b.min.x, mid_y - b.center().y];
        for &i in frag {
            pos[i] += shift;
        }
        right += FRAGMENT_GAP + b.width();
    }
}

impl Placer<'_> {
    fn at(&self, i: usize) -> Option<Point> {
        self.pos[i]
    }

    fn set(&mut self, i: usize, p: Point) {
        if self.pos[i].is_none() {
            self.pos[i] = Some(p);
            self.queue.push_back(i);
        }
    }

    fn place_fragment(&mut self, start: usize) -> Vec<usize> {
        let mut placed = Vec::new();
        self.set(start, Point::zeros());
        self.settle_rings();
        while let Some(u) = self.queue.pop_front() {
            placed.push(u);
            self.place_neighbours(u);
            self.settle_rings();
        }
        placed
    }

    /// Place every ring that touches a placed atom, edge-anchored rings first.
    fn settle_rings(&mut self) {
        loop {
            let pending: Vec<usize> = (0..self.rings.len())
                .filter(|&r| self.ring_center[r].is_none())
                .collect();
            let edge = pending.iter().copied().find(|&r| self.placed_edge(r).is_some());
            let any = pending
                .iter()
                .copied()
                .find(|&r| self.rings[r].iter().any(|&i| self.pos[i].is_some()));
            match edge.or(any) {
                Some(r) => self.place_ring(r),
                None => break,
            }
        }
    }

    /// Index `k` in ring `r` such that ring atoms `k` and `k+1` are both placed.
    fn placed_edge(&self, r: usize) -> Option<usize> {
        let ring = &self.rings[r];
        let n = ring.len();
        (0..n).find(|&k| self.pos[ring[k]].is_some() && self.pos[ring[(k + 1) % n]].is_some())
    }

    fn place_ring(&mut self, r: usize) {
        let rings = self.rings;
        let ring = &rings[r];
        let n = ring.len();
        let circumradius = 1.0 / (2.0 * (PI / n as f64).sin());
        let Some((center, first, theta0, step)) = self.ring_frame(r, circumradius) else {
            self.ring_center[r] = Some(Point::zeros());
            return;
        };
        for j in 0..n {
            let p = center + direction(theta0 + j as f64 * step) * circumradius;
            self.set(ring[(first + j) % n], p);
        }
        self.ring_center[r] = Some(center);
    }

    /// Centre, index of the first ring atom to walk from, its polar angle and
    /// the signed angular step between consecutive ring atoms.
    fn ring_frame(&self, r: usize, circumradius: f64) -> Option<(Point, usize, f64, f64)> {
        let ring = &self.rings[r];
        let n = ring.len();
        if n < 3 {
            return None;
        }
        if let Some(k) = self.placed_edge(r) {
            let (ia, ib) = (ring[k], ring[(k + 1) % n]);
            let (a, b) = (self.at(ia)?, self.at(ib)?);
            let apothem = 1.0 / (2.0 * (PI / n as f64).tan());
            let mid = (a + b) * 0.5;
            let mut normal = try_unit(perpendicular(b - a)).unwrap_or_else(|| vector![0.0, 1.0]);
            if let Some(reference) = self.edge_reference(r, ia, ib) {
                if normal.dot(&(reference - mid)) > 0.0 {
                    normal = -normal;
                }
            }
            let c = mid + normal * apothem;
            let ta = angle_of(a - c);
            let mut step = normalize_degrees(angle_of(b - c) - ta);
            if step > 180.0 {
                step -= 360.0;
            }
            return Some((c, k, ta, step));
        }
        let k = ring.iter().position(|&i| self.pos[i].is_some())?;
        let p = self.at(ring[k])?;
        let outward = self
            .placed_neighbour_centroid(ring[k], ring)
            .and_then(|c| try_unit(p - c))
            .unwrap_or_else(|| vector![1.0, 0.0]);
        let c = p + outward * circumradius;
        Some((c, k, angle_of(p - c), 360.0 / n as f64))
    }

    /// A point on the side of edge `ia`–`ib` that is already occupied.
    fn edge_reference(&self, r: usize, ia: usize, ib: usize) -> Option<Point> {
        let shared = self.rings.iter().enumerate().find_map(|(other, ring)| {
            if other != r && ring.contains(&ia) && ring.contains(&ib) {
                self.ring_center[other]
            } else {
                None
            }
        });
        shared.or_else(|| {
            let ring = &self.rings[r];
            let pts: Vec<Point> = [ia, ib]
                .iter()
                .flat_map(|&i| self.adj[i].iter().map(|&(j, _)| j))
                .filter(|j| !ring.contains(j))
                .filter_map(|j| self.pos[j])
                .collect();
            mean(&pts)
        })
    }

    fn placed_neighbour_centroid(&self, i: usize, exclude: &[usize]) -> Option<Point> {
        let pts: Vec<Point> = self.adj[i]
            .iter()
            .filter(|(j, _)| !exclude.contains(j))
            .filter_map(|&(j, _)| self.pos[j])
            .collect();
        mean(&pts)
    }

    fn place_neighbours(&mut self, u: usize) {
        let Some(origin) = self.at(u) else {
            return;
        };
        let placed: Vec<f64> = self.adj[u]
            .iter()
            .filter_map(|&(j, _)| self.pos[j].map(|p| angle_of(p - origin)))
            .collect();
        let todo: Vec<usize> = self.adj[u]
            .iter()
            .map(|&(j, _)| j)
            .filter(|&j| self.pos[j].is_none())
            .collect();
        if todo.is_empty() {
            return;
        }
        let angles = self.fan(u, &placed, todo.len());
        for (&v, theta) in todo.iter().zip(angles) {
            self.flip[v] = !self.flip[u];
            self.set(v, origin + direction(theta));
        }
    }

    /// Directions for `count` new neighbours of `u`, given the angles of the
    /// neighbours already placed.
    fn fan(&self, u: usize, placed: &[f64], count: usize) -> Vec<f64> {
        let degree = placed.len() + count;
        match placed {
            [] => match count {
                1 => vec![0.0],
                2 if self.is_linear(u) => vec![0.0, 180.0],
                2 => vec![210.0, 330.0],
                3 => vec![90.0, 210.0, 330.0],
                k => (0..k).map(|j| j as f64 * 360.0 / k as f64).collect(),
            },
            [base] => {
                if degree == 2 {
                    if self.is_linear(u) {
                        vec![base + 180.0]
                    } else {
                        let turn = if self.flip[u] { 120.0 } else { -120.0 };
                        vec![base + turn]
                    }
                } else {
                    // straightest continuation first: the first new neighbour
                    // carries the chain on, the rest take the sides
                    let mut steps: Vec<f64> = (1..degree)
                        .map(|j| j as f64 * 360.0 / degree as f64)
                        .collect();
                    steps.sort_by(|x, y| (x - 180.0).abs().total_cmp(&(y - 180.0).abs()));
                    if degree == 3 && self.flip[u] {
                        steps.reverse();
                    }
                    steps.into_iter().map(|s| base + s).collect()
                }
            }
            many => {
                let (start, size) = largest_gap(many);
                (1..=count)
                    .map(|j| start + size * j as f64 / (count + 1) as f64)
                    .collect()
            }
        }
    }

    fn is_linear(&self, u: usize) -> bool {
        let orders: Vec<BondOrder> = self.adj[u].iter().map(|&(_, o)| o).collect();
        orders.contains(&BondOrder::Triple)
            || (orders.len() == 2 && orders.iter().all(|&o| o == BondOrder::Double))
    }
}

/// `(start, size)` of the widest angular gap between the given directions.
fn largest_gap(angles: &[f64]) -> (f64, f64) {
    let mut sorted: Vec<f64> = angles.iter().map(|&a| normalize_degrees(a)).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let mut best = (sorted[0], 360.0);
    let mut best_size = -1.0;
    for k in 0..n {
        let start = sorted[k];
        let end = if k + 1 < n { sorted[k + 1] } else { sorted[0] + 360.0 };
        if end - start > best_size {
            best_size = end - start;
            best = (start, best_size);
        }
    }
    best
}

fn mean(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().fold(Point::zeros(), |acc, p| acc + p) / points.len() as f64)
}
