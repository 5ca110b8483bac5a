//! Horizontal number lines: ticks, tick labels, intervals and braces.
//!
//! All positions are in data units along x; the line itself sits at `y`.

use std::collections::HashSet;

use nalgebra::Vector2;

use crate::error::{require_positive, GeomResult, GeometryError};
use crate::kernel::{Bounds2, Point, Segment};

/// Fraction of the range added beyond each end for the arrow heads.
pub const ARROW_PADDING: f64 = 0.05;
/// Vertical lift of an interval above the line.
pub const INTERVAL_OFFSET: f64 = 0.15;
/// Length of an "extends to infinity" interval arrow.
pub const INTERVAL_ARROW: f64 = 0.3;
/// Largest tick denominator used by fraction labels.
pub const MAX_DENOMINATOR: i64 = 100;
/// Guard against a tiny step exploding the tick count.
const MAX_TICKS: usize = 10_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    #[default]
    Auto,
    Integer,
    Decimal,
    Fraction,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointStyle {
    #[default]
    Closed,
    Open,
    Arrow,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NumberLine {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub y: f64,
}

/// Brace drawn under an interval, plus where its label goes.
#[derive(Clone, Debug, PartialEq)]
pub struct Brace {
    pub points: Vec<Point>,
    pub label_anchor: Point,
}

impl NumberLine {
    pub fn new(min: f64, max: f64) -> GeomResult<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(GeometryError::invalid(format!(
                "number line needs finite min < max (got {min}, {max})"
            )));
        }
        Ok(Self { min, max, y: 0.0 })
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn at(&self, value: f64) -> Point {
        Vector2::new(value, self.y)
    }

    /// x-extent of the drawn line including arrow padding.
    pub fn arrow_extent(&self) -> (f64, f64) {
        let pad = self.range() * ARROW_PADDING;
        (self.min - pad, self.max + pad)
    }

    pub fn axis(&self, show_arrows: bool) -> Segment {
        let (lo, hi) = if show_arrows {
            self.arrow_extent()
        } else {
            (self.min, self.max)
        };
        Segment::new(self.at(lo), self.at(hi))
    }

    /// `min, min + step, ...` up to (and including, within half a step) `max`.
    pub fn major_ticks(&self, step: f64) -> GeomResult<Vec<f64>> {
        arange(self.min, self.max + step / 2.0, require_positive("step", step)?)
    }

    /// Minor ticks at `step / divisions`, skipping every major position.
    pub fn minor_ticks(&self, step: f64, divisions: u32) -> GeomResult<Vec<f64>> {
        if divisions == 0 {
            return Err(GeometryError::invalid("minor tick divisions must be at least 1"));
        }
        let majors: HashSet<i64> = self.major_ticks(step)?.into_iter().map(round_key).collect();
        let minor_step = step / f64::from(divisions);
        let all = arange(self.min, self.max + minor_step / 2.0, minor_step)?;
        Ok(all
            .into_iter()
            .filter(|t| !majors.contains(&round_key(*t)))
            .collect())
    }

    /// Vertical tick of total `length` centred on the line.
    pub fn tick(&self, value: f64, length: f64) -> Segment {
        let h = Vector2::new(0.0, length / 2.0);
        Segment::new(self.at(value) - h, self.at(value) + h)
    }

    /// Interval line, lifted `INTERVAL_OFFSET` above the axis.
    pub fn interval(&self, start: f64, end: f64) -> Segment {
        let lift = Vector2::new(0.0, INTERVAL_OFFSET);
        Segment::new(self.at(start) + lift, self.at(end) + lift)
    }

    /// Arrow continuing an interval past `value`: leftwards when `leftwards`.
    pub fn interval_arrow(&self, value: f64, leftwards: bool) -> Segment {
        let lift = Vector2::new(0.0, INTERVAL_OFFSET);
        let dx = if leftwards { -INTERVAL_ARROW } else { INTERVAL_ARROW };
        let from = self.at(value) + lift;
        Segment::new(from, from + Vector2::new(dx, 0.0))
    }

    /// Brace `offset` below the line spanning `[start, end]`.
    pub fn brace(&self, start: f64, end: f64, offset: f64) -> Brace {
        let y = self.y - offset;
        let mid = (start + end) / 2.0;
        Brace {
            points: vec![
                Vector2::new(start, y),
                Vector2::new(start, y - 0.1),
                Vector2::new(mid, y - 0.2),
                Vector2::new(end, y - 0.1),
                Vector2::new(end, y),
            ],
            label_anchor: Vector2::new(mid, y - 0.35),
        }
    }

    /// View: range padded by `padding_factor` on x, fixed ±1.5 on y.
    pub fn bounds(&self, padding_factor: f64) -> Bounds2 {
        let pad = self.range() * padding_factor;
        Bounds2::new(
            Vector2::new(self.min - pad, self.y - 1.5),
            Vector2::new(self.max + pad, self.y + 1.5),
        )
    }
}

fn arange(start: f64, stop: f64, step: f64) -> GeomResult<Vec<f64>> {
    let n = ((stop - start) / step).ceil().max(0.0);
    if n > MAX_TICKS as f64 {
        return Err(GeometryError::invalid(format!(
            "step {step} would produce more than {MAX_TICKS} ticks"
        )));
    }
    Ok((0..n as usize).map(|k| start + k as f64 * step).collect())
}

/// Tick identity at 10 decimal places.
#[inline]
fn round_key(v: f64) -> i64 {
    (v * 1e10).round() as i64
}

/// Text for a tick value.
///
/// Whole numbers always print as integers. `Auto` prefers an exact fraction
/// with denominator ≤ 100, falling back to two significant figures.
pub fn format_tick_label(value: f64, format: TickFormat) -> String {
    let whole = value == value.trunc();
    match format {
        TickFormat::Integer => format!("{}", value.round() as i64),
        _ if whole => format!("{}", value as i64),
        TickFormat::Decimal => format_sig2(value),
        TickFormat::Fraction => fraction_text(limit_denominator(value, MAX_DENOMINATOR)),
        TickFormat::Auto => {
            let (n, d) = limit_denominator(value, MAX_DENOMINATOR);
            if (n as f64 / d as f64 - value).abs() < 1e-9 {
                fraction_text((n, d))
            } else {
                format_sig2(value)
            }
        }
    }
}

fn fraction_text((n, d): (i64, i64)) -> String {
    if d == 1 {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// Closest fraction `n/d` to `x` with `1 <= d <= max_den` (continued fractions).
pub fn limit_denominator(x: f64, max_den: i64) -> (i64, i64) {
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut r = x;
    for _ in 0..64 {
        let a = r.floor();
        let ai = a as i64;
        let q2 = q0 + ai * q1;
        if q2 > max_den {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + ai * p1, q2);
        let frac = r - a;
        if frac.abs() < 1e-12 {
            return (p1, q1);
        }
        r = 1.0 / frac;
    }
    let k = (max_den - q0) / q1;
    let (bn, bd) = (p0 + k * p1, q0 + k * q1);
    let err1 = (bn as f64 / bd as f64 - x).abs();
    let err2 = (p1 as f64 / q1 as f64 - x).abs();
    if err2 <= err1 {
        (p1, q1)
    } else {
        (bn, bd)
    }
}

/// Two significant figures, switching to exponent form outside [1e-4, 100).
fn format_sig2(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let sci = format!("{value:.1e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };
    if !(-4..2).contains(&exp) {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    let decimals = (1 - exp).max(0) as usize;
    let fixed = format!("{value:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_ticks_include_max_within_half_step() {
        let nl = NumberLine::new(-5.0, 5.0).unwrap();
        let t = nl.major_ticks(1.0).unwrap();
        assert_eq!(t.len(), 11);
        assert_eq!(t[0], -5.0);
        assert!((t[10] - 5.0).abs() < 1e-12);
        assert!(nl.major_ticks(0.0).is_err());
        assert!(NumberLine::new(2.0, 2.0).is_err());
    }

    #[test]
    fn minor_ticks_skip_majors() {
        let nl = NumberLine::new(0.0, 2.0).unwrap();
        let m = nl.minor_ticks(1.0, 4).unwrap();
        assert_eq!(m.len(), 6);
        assert!(m.iter().all(|x| (x - x.round()).abs() > 1e-6));
        let m10 = NumberLine::new(0.0, 1.0).unwrap().minor_ticks(1.0, 10).unwrap();
        assert_eq!(m10.len(), 9);
    }

    #[test]
    fn arrow_extent_is_five_percent() {
        let nl = NumberLine::new(0.0, 10.0).unwrap();
        assert_eq!(nl.arrow_extent(), (-0.5, 10.5));
        let b = nl.bounds(0.15);
        assert!((b.min.x + 1.5).abs() < 1e-12);
        assert_eq!(b.max.y, 1.5);
    }

    #[test]
    fn tick_label_formats() {
        assert_eq!(format_tick_label(3.0, TickFormat::Auto), "3");
        assert_eq!(format_tick_label(-2.0, TickFormat::Fraction), "-2");
        assert_eq!(format_tick_label(0.5, TickFormat::Auto), "1/2");
        assert_eq!(format_tick_label(0.25, TickFormat::Fraction), "1/4");
        assert_eq!(format_tick_label(-0.75, TickFormat::Auto), "-3/4");
        assert_eq!(format_tick_label(2.6, TickFormat::Integer), "3");
        assert_eq!(format_tick_label(0.25, TickFormat::Decimal), "0.25");
        assert_eq!(format_tick_label(1.5, TickFormat::Decimal), "1.5");
        assert_eq!(format_tick_label(0.333, TickFormat::Decimal), "0.33");
        assert_eq!(format_tick_label(std::f64::consts::PI, TickFormat::Auto), "3.1");
    }

    #[test]
    fn limit_denominator_matches_best_approximation() {
        assert_eq!(limit_denominator(0.1, 100), (1, 10));
        assert_eq!(limit_denominator(1.0 / 3.0, 100), (1, 3));
        assert_eq!(limit_denominator(std::f64::consts::PI, 100), (311, 99));
        assert_eq!(limit_denominator(-1.5, 100), (-3, 2));
    }

    #[test]
    fn brace_shape() {
        let nl = NumberLine::new(0.0, 4.0).unwrap();
        let b = nl.brace(1.0, 3.0, 0.4);
        assert_eq!(b.points.len(), 5);
        assert!((b.points[2] - Vector2::new(2.0, -0.6)).norm() < 1e-12);
        assert!((b.label_anchor - Vector2::new(2.0, -0.75)).norm() < 1e-12);
    }

    #[test]
    fn interval_arrows_point_outward() {
        let nl = NumberLine::new(0.0, 4.0).unwrap();
        let left = nl.interval_arrow(1.0, true);
        assert!((left.end.x - 0.7).abs() < 1e-12);
        assert!((left.end.y - INTERVAL_OFFSET).abs() < 1e-12);
        let right = nl.interval_arrow(3.0, false);
        assert!((right.end.x - 3.3).abs() < 1e-12);
    }
}
