//! Curve normalization
//!
//! Offsetting treats every stored point as a polygon vertex, which only gives
//! a sensible stroke when cubic segments are monotonic and their handles do
//! not cross. [`CurveNormalizer`] sits in front of any [`Pen`] and rewrites
//! cubic segments until that holds:
//!
//! 1. zero-length handles are pulled out along the curve's tangent,
//! 2. segments with interior x/y extrema are split at every extremum,
//! 3. otherwise segments whose handle lines cross (with some tolerance) are
//!    split in half.
//!
//! Split pieces are rounded to integers. Everything other than cubics passes
//! through unchanged.

use crate::core::errors::PathError;
use crate::font_source::ComponentData;
use crate::geometry::{normalize, round_point};
use crate::pen::{draw, PathCommand, Pen};
use kurbo::{CubicBez, ParamCurve, ParamCurveExtrema, Point};

/// Extrema closer than this to either end of a segment are ignored
pub const EXTREMA_EPSILON: f64 = 1e-9;

/// Handle lines count as crossing when both intersection parameters lie
/// within `[-tolerance, 1 + tolerance]`, which also catches near misses
/// introduced by rounding.
pub const INTERSECTION_TOLERANCE: f64 = 0.1;

/// A pen adapter that normalizes cubic segments before forwarding them
pub struct CurveNormalizer<P> {
    out: P,
    last_point: Option<Point>,
    handle_fix: f64,
}

impl<P: Pen> CurveNormalizer<P> {
    /// `handle_fix` is how far a zero-length handle is pulled out
    pub fn new(out: P, handle_fix: f64) -> Self {
        Self {
            out,
            last_point: None,
            handle_fix,
        }
    }

    pub fn into_inner(self) -> P {
        self.out
    }
}

impl<P: Pen> Pen for CurveNormalizer<P> {
    fn move_to(&mut self, to: Point) -> Result<(), PathError> {
        self.last_point = Some(to);
        self.out.move_to(to)
    }

    fn line_to(&mut self, to: Point) -> Result<(), PathError> {
        self.last_point = Some(to);
        self.out.line_to(to)
    }

    fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> Result<(), PathError> {
        let start = self
            .last_point
            .ok_or(PathError::NoCurrentPoint { command: "curve_to" })?;
        for piece in normalize_cubic(CubicBez::new(start, c1, c2, to), self.handle_fix) {
            self.out.curve_to(piece.p1, piece.p2, piece.p3)?;
        }
        self.last_point = Some(to);
        Ok(())
    }

    fn qcurve_to(&mut self, off_curve: &[Point], to: Option<Point>) -> Result<(), PathError> {
        if to.is_some() {
            self.last_point = to;
        }
        self.out.qcurve_to(off_curve, to)
    }

    fn close_path(&mut self) -> Result<(), PathError> {
        self.out.close_path()
    }

    fn add_component(&mut self, component: &ComponentData) -> Result<(), PathError> {
        self.out.add_component(component)
    }
}

/// Normalize a whole command list
pub fn normalize_commands(
    commands: &[PathCommand],
    handle_fix: f64,
) -> Result<Vec<PathCommand>, PathError> {
    let mut normalizer = CurveNormalizer::new(Vec::new(), handle_fix);
    draw(commands, &mut normalizer)?;
    Ok(normalizer.into_inner())
}

/// Rewrite one cubic into the pieces that replace it.
///
/// The pieces share the original start and end points. A segment that needs
/// no repair and no split is returned exactly as given.
pub fn normalize_cubic(cubic: CubicBez, handle_fix: f64) -> Vec<CubicBez> {
    let cubic = repair_zero_handles(cubic, handle_fix);

    let extrema = extrema_parameters(&cubic);
    let pieces = if !extrema.is_empty() {
        split_at(&cubic, &extrema)
    } else if handles_cross(&cubic) {
        split_at(&cubic, &[0.5])
    } else {
        return vec![cubic];
    };

    // Rounding can collapse handles of short pieces
    let pieces: Vec<CubicBez> = pieces
        .into_iter()
        .filter(|piece| !is_point(piece))
        .map(|piece| repair_zero_handles(piece, handle_fix))
        .collect();
    if pieces.is_empty() {
        vec![cubic]
    } else {
        pieces
    }
}

/// Interior parameters where dx/dt or dy/dt vanish, ascending and unique
pub fn extrema_parameters(cubic: &CubicBez) -> Vec<f64> {
    let mut parameters: Vec<f64> = Vec::new();
    for t in cubic.extrema() {
        if t <= EXTREMA_EPSILON || t >= 1.0 - EXTREMA_EPSILON {
            continue;
        }
        if parameters
            .last()
            .is_some_and(|last| (t - last).abs() <= EXTREMA_EPSILON)
        {
            continue;
        }
        parameters.push(t);
    }
    parameters
}

/// Intersection parameters of the lines through `p0 -> p1` and `p2 -> p3`.
///
/// `None` when either handle has zero length or the lines are parallel.
pub fn handle_intersection(cubic: &CubicBez) -> Option<(f64, f64)> {
    let first = cubic.p1 - cubic.p0;
    let second = cubic.p3 - cubic.p2;
    let denominator = first.cross(second);
    if denominator.abs() < f64::EPSILON {
        return None;
    }
    let between = cubic.p2 - cubic.p0;
    Some((
        between.cross(second) / denominator,
        between.cross(first) / denominator,
    ))
}

fn handles_cross(cubic: &CubicBez) -> bool {
    let in_range = |t: f64| (-INTERSECTION_TOLERANCE..=1.0 + INTERSECTION_TOLERANCE).contains(&t);
    handle_intersection(cubic).is_some_and(|(t1, t2)| in_range(t1) && in_range(t2))
}

/// Pull zero-length handles out of their on-curve point.
///
/// A collapsed first handle is moved from the start toward the second
/// handle (or the end, if that coincides too); the second handle mirrors
/// this from the end.
fn repair_zero_handles(mut cubic: CubicBez, handle_fix: f64) -> CubicBez {
    if cubic.p1 == cubic.p0 {
        if let Some(handle) = pulled_handle(cubic.p0, &[cubic.p2, cubic.p3], handle_fix) {
            cubic.p1 = handle;
        }
    }
    if cubic.p2 == cubic.p3 {
        if let Some(handle) = pulled_handle(cubic.p3, &[cubic.p1, cubic.p0], handle_fix) {
            cubic.p2 = handle;
        }
    }
    cubic
}

/// Never pulled past the target it points at
fn pulled_handle(anchor: Point, toward: &[Point], distance: f64) -> Option<Point> {
    let (direction, length) = toward.iter().find_map(|target| {
        let offset = *target - anchor;
        normalize(offset).ok().map(|direction| (direction, offset.hypot()))
    })?;
    let handle = anchor + direction * distance.min(length);
    let rounded = round_point(handle);
    // Never let rounding collapse the handle again
    Some(if rounded == anchor { handle } else { rounded })
}

/// Pieces start where the previous rounded piece ended; the last one ends
/// exactly on `cubic.p3`.
fn split_at(cubic: &CubicBez, parameters: &[f64]) -> Vec<CubicBez> {
    let bounds: Vec<f64> = std::iter::once(0.0)
        .chain(parameters.iter().copied())
        .chain(std::iter::once(1.0))
        .collect();
    let mut start = cubic.p0;
    bounds
        .windows(2)
        .map(|range| {
            let piece = cubic.subsegment(range[0]..range[1]);
            let end = if range[1] >= 1.0 {
                cubic.p3
            } else {
                round_point(piece.p3)
            };
            let rounded = CubicBez::new(start, round_point(piece.p1), round_point(piece.p2), end);
            start = end;
            rounded
        })
        .collect()
}

fn is_point(cubic: &CubicBez) -> bool {
    cubic.p1 == cubic.p0 && cubic.p2 == cubic.p0 && cubic.p3 == cubic.p0
}
