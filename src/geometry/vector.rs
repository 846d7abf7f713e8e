//! Vector and offset math
//!
//! Offsets follow one sign convention everywhere: a positive distance moves a
//! vertex to the right of the direction of travel. For counter-clockwise
//! outer contours that is outward, for clockwise counters it is into the
//! counter, so a positive distance always grows the ink.

use kurbo::{Point, Vec2};
use thiserror::Error;

/// Cross products of unit vectors below this are treated as collinear.
pub const COLLINEAR_EPSILON: f64 = 1e-10;

/// Geometry that cannot be offset.
///
/// This never leaves the pipeline: callers substitute the unmodified point
/// so contour topology stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroLength,
    #[error("no distinct neighbor to offset against")]
    NoDistinctNeighbor,
}

/// Scale a vector to unit length
pub fn normalize(vector: Vec2) -> Result<Vec2, GeometryError> {
    let length = vector.hypot();
    if length == 0.0 || !length.is_finite() {
        return Err(GeometryError::ZeroLength);
    }
    Ok(vector / length)
}

/// Round a point onto the integer font-unit grid.
///
/// Every generated coordinate goes through here so all masters share one
/// rounding mode (half away from zero).
pub fn round_point(point: Point) -> Point {
    point.round()
}

/// Miter offset of `curr` for the polyline `prev -> curr -> next`.
///
/// Returns the vector to add to `curr`. When the two edges are collinear the
/// miter is undefined (its length divides by `sin(angle / 2)`), so the
/// perpendicular of the incoming edge is used instead.
pub fn bisector_offset(
    prev: Point,
    curr: Point,
    next: Point,
    distance: f64,
) -> Result<Vec2, GeometryError> {
    let incoming = normalize(prev - curr)?;
    let outgoing = normalize(next - curr)?;

    let cross = incoming.cross(outgoing);
    if cross.abs() < COLLINEAR_EPSILON {
        return Ok(Vec2::new(-incoming.y, incoming.x) * distance);
    }

    let bisector = normalize(incoming + outgoing)?;
    let angle = cross.atan2(incoming.dot(outgoing));
    Ok(bisector * (distance / (angle / 2.0).sin()))
}

/// Offset perpendicular to the edge `from -> to`, to its right.
pub fn perpendicular_offset(from: Point, to: Point, distance: f64) -> Result<Vec2, GeometryError> {
    let direction = normalize(to - from)?;
    Ok(Vec2::new(direction.y, -direction.x) * distance)
}

/// Extend the terminal vertex `curr` of an open polyline along its incoming edge.
pub fn end_offset(prev: Point, curr: Point, distance: f64) -> Result<Point, GeometryError> {
    let direction = normalize(curr - prev)?;
    Ok(curr + direction * distance)
}

/// Offset of `points[index]` against its nearest distinct neighbors.
///
/// Neighbors equal to the vertex are skipped, walking outward one index at a
/// time on each side independently (wrapping around when `closed`); the first
/// distinct point on each side is used. An open polyline's end vertices have
/// only one side and get a perpendicular offset.
///
/// Fails only when every other point coincides with the vertex.
pub fn vertex_offset(
    points: &[Point],
    index: usize,
    distance: f64,
    closed: bool,
) -> Result<Vec2, GeometryError> {
    let curr = points[index];
    let prev = distinct_neighbor(points, index, Direction::Backward, closed);
    let next = distinct_neighbor(points, index, Direction::Forward, closed);

    match (prev, next) {
        (Some(prev), Some(next)) => bisector_offset(points[prev], curr, points[next], distance),
        (None, Some(next)) => perpendicular_offset(curr, points[next], distance),
        (Some(prev), None) => perpendicular_offset(points[prev], curr, distance),
        (None, None) => Err(GeometryError::NoDistinctNeighbor),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Backward,
    Forward,
}

fn distinct_neighbor(
    points: &[Point],
    index: usize,
    direction: Direction,
    closed: bool,
) -> Option<usize> {
    let len = points.len();
    let origin = points[index];
    for step in 1..len {
        let candidate = match (direction, closed) {
            (Direction::Backward, true) => (index + len - step) % len,
            (Direction::Forward, true) => (index + step) % len,
            (Direction::Backward, false) => index.checked_sub(step)?,
            (Direction::Forward, false) => {
                let candidate = index + step;
                if candidate >= len {
                    return None;
                }
                candidate
            }
        };
        if points[candidate] != origin {
            return Some(candidate);
        }
    }
    None
}
